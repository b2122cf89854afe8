//! Central application state for textdiff.
//!
//! This module owns the group store plus all mutable UI state: the current
//! mode, which panel has focus, list selections, the diff scroll offset, the
//! open input form and the status message. No ratatui rendering logic lives here.
//! The render module reads it and the keybinding dispatcher mutates it.
//!
//! Every operation that changes the store sets `dirty`; the event loop saves
//! the workspace and clears the flag after each key.

use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use textdiff_core::{DiffCache, DiffOptions, GroupId, GroupStore, Source, TextSet, TextSetId};

/// Ticks (250 ms each) a status message stays visible.
const STATUS_TICKS: u8 = 16;

/// Editor mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// An input form is open and receives all keys.
    Insert,
    /// Full-screen help overlay is shown above all panels.
    HelpOverlay,
    /// Waiting for `y`/`n` before clearing the active group.
    ConfirmClear,
}

/// Which panel currently has keyboard focus.
///
/// Cycles Groups → TextSets → Diff → Groups via `next()`, reversed by `prev()`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    Groups,
    #[default]
    TextSets,
    Diff,
}

impl PanelFocus {
    pub fn prev(self) -> Self {
        match self {
            PanelFocus::Groups => PanelFocus::Diff,
            PanelFocus::TextSets => PanelFocus::Groups,
            PanelFocus::Diff => PanelFocus::TextSets,
        }
    }

    pub fn next(self) -> Self {
        match self {
            PanelFocus::Groups => PanelFocus::TextSets,
            PanelFocus::TextSets => PanelFocus::Diff,
            PanelFocus::Diff => PanelFocus::Groups,
        }
    }
}

/// What submitting the form does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    AddTextSet,
    RenameTextSet(TextSetId),
    RenameGroup(GroupId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Content,
}

/// Text being typed into the Insert-mode form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub kind: FormKind,
    pub name: String,
    pub content: String,
    pub field: FormField,
}

impl Form {
    fn new(kind: FormKind, name: impl Into<String>) -> Self {
        Self { kind, name: name.into(), content: String::new(), field: FormField::Name }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::AddTextSet => " New text set ",
            FormKind::RenameTextSet(_) => " Rename text set ",
            FormKind::RenameGroup(_) => " Rename group ",
        }
    }

    /// Only the add form has a content field.
    pub fn has_content(&self) -> bool {
        self.kind == FormKind::AddTextSet
    }

    pub fn next_field(&mut self) {
        if self.has_content() {
            self.field = match self.field {
                FormField::Name => FormField::Content,
                FormField::Content => FormField::Name,
            };
        }
    }

    fn buffer(&mut self) -> &mut String {
        match self.field {
            FormField::Name => &mut self.name,
            FormField::Content => &mut self.content,
        }
    }

    pub fn push(&mut self, c: char) {
        self.buffer().push(c);
    }

    pub fn backspace(&mut self) {
        self.buffer().pop();
    }

    /// Inserts pasted text. Line breaks survive only in the content field.
    pub fn paste(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n");
        match self.field {
            FormField::Name => self.name.push_str(&text.replace('\n', " ")),
            FormField::Content => self.content.push_str(&text),
        }
    }
}

/// Builds a manual or transcribed text set from raw input.
///
/// Name and content are trimmed; `None` if either ends up empty.
pub fn validated_text_set(name: &str, content: &str, source: Source) -> Option<TextSet> {
    let (name, content) = (name.trim(), content.trim());
    if name.is_empty() || content.is_empty() {
        return None;
    }
    Some(TextSet::new(name, content, source))
}

/// All mutable state passed through every render cycle.
pub struct AppState {
    pub store: GroupStore,
    pub options: DiffOptions,
    pub cache: DiffCache,

    pub mode: Mode,
    pub focus: PanelFocus,

    /// Cursor in the Groups panel (not the active group).
    pub group_list_state: ListState,
    /// Cursor in the TextSets panel, indexing the active group's display order.
    pub text_set_list_state: ListState,

    /// Vertical scroll offset of the diff panel.
    pub diff_scroll: u16,
    /// Inner height of the diff panel, cached after each render for page scrolling.
    pub diff_viewport_height: u16,
    /// Lines produced by the last diff render, used by `G`.
    pub diff_line_count: usize,
    pub help_scroll: u16,

    /// `[groups, text_sets, diff]` as laid out by the last render, for mouse focus.
    pub panel_rects: [Rect; 3],

    pub form: Option<Form>,
    status: Option<(String, u8)>,

    /// Set by every store mutation; cleared by the event loop once saved.
    pub dirty: bool,
}

impl AppState {
    pub fn new(store: GroupStore, options: DiffOptions, cache_capacity: usize) -> Self {
        let mut state = Self {
            store,
            options,
            cache: DiffCache::new(cache_capacity),
            mode: Mode::default(),
            focus: PanelFocus::default(),
            group_list_state: ListState::default(),
            text_set_list_state: ListState::default(),
            diff_scroll: 0,
            diff_viewport_height: 0,
            diff_line_count: 0,
            help_scroll: 0,
            panel_rects: [Rect::default(); 3],
            form: None,
            status: None,
            dirty: false,
        };
        state.group_list_state.select(Some(state.store.active_index()));
        state.sync_lists();
        state
    }

    /// Current status message, if one is still visible.
    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|(msg, _)| msg.as_str())
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some((msg.into(), STATUS_TICKS));
    }

    /// Ages the status message; called on every logic tick.
    pub fn on_tick(&mut self) {
        if let Some((_, ttl)) = &mut self.status {
            *ttl = ttl.saturating_sub(1);
            if *ttl == 0 {
                self.status = None;
            }
        }
    }

    /// Clamps both list cursors to their current lengths.
    pub fn sync_lists(&mut self) {
        clamp(&mut self.group_list_state, self.store.len());
        clamp(&mut self.text_set_list_state, self.store.active().text_sets().len());
    }

    pub fn selected_group_id(&self) -> Option<GroupId> {
        let index = self.group_list_state.selected()?;
        self.store.groups().get(index).map(|g| g.id().clone())
    }

    pub fn selected_text_set_id(&self) -> Option<TextSetId> {
        let index = self.text_set_list_state.selected()?;
        self.store.active().text_sets().at(index).map(|t| t.id().clone())
    }

    // -----------------------------------------------------------------------
    // Scrolling
    // -----------------------------------------------------------------------

    /// Moves the focused list cursor, or scrolls the diff, down by `lines`.
    pub fn scroll_down(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Groups => step(&mut self.group_list_state, self.store.len(), lines as isize),
            PanelFocus::TextSets => {
                let len = self.store.active().text_sets().len();
                step(&mut self.text_set_list_state, len, lines as isize);
            }
            PanelFocus::Diff => {
                let max = self.diff_line_count.saturating_sub(1).min(u16::MAX as usize) as u16;
                self.diff_scroll = self.diff_scroll.saturating_add(lines).min(max);
            }
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Groups => step(&mut self.group_list_state, self.store.len(), -(lines as isize)),
            PanelFocus::TextSets => {
                let len = self.store.active().text_sets().len();
                step(&mut self.text_set_list_state, len, -(lines as isize));
            }
            PanelFocus::Diff => self.diff_scroll = self.diff_scroll.saturating_sub(lines),
        }
    }

    pub fn scroll_top(&mut self) {
        match self.focus {
            PanelFocus::Groups => step(&mut self.group_list_state, self.store.len(), isize::MIN / 2),
            PanelFocus::TextSets => {
                let len = self.store.active().text_sets().len();
                step(&mut self.text_set_list_state, len, isize::MIN / 2);
            }
            PanelFocus::Diff => self.diff_scroll = 0,
        }
    }

    pub fn scroll_bottom(&mut self) {
        match self.focus {
            PanelFocus::Groups => step(&mut self.group_list_state, self.store.len(), isize::MAX / 2),
            PanelFocus::TextSets => {
                let len = self.store.active().text_sets().len();
                step(&mut self.text_set_list_state, len, isize::MAX / 2);
            }
            PanelFocus::Diff => {
                let last_page = self.diff_line_count.saturating_sub(self.diff_viewport_height as usize);
                self.diff_scroll = last_page.min(u16::MAX as usize) as u16;
            }
        }
    }

    /// Half the diff viewport; one row on the first frame before a height is known.
    fn half_page(&self) -> u16 {
        (self.diff_viewport_height / 2).max(1)
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down(self.half_page());
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up(self.half_page());
    }

    // -----------------------------------------------------------------------
    // Groups
    // -----------------------------------------------------------------------

    pub fn activate_selected_group(&mut self) {
        let Some(id) = self.selected_group_id() else { return };
        if self.store.set_active(&id) {
            self.text_set_list_state.select(Some(0));
            self.diff_scroll = 0;
            self.sync_lists();
            self.dirty = true;
        }
    }

    pub fn add_group(&mut self) {
        self.store.add_group();
        self.group_list_state.select(Some(self.store.active_index()));
        self.text_set_list_state.select(None);
        self.diff_scroll = 0;
        self.dirty = true;
        self.set_status(format!("Added {}", self.store.active().name()));
    }

    pub fn remove_selected_group(&mut self) {
        let Some(id) = self.selected_group_id() else { return };
        if self.store.remove_group(&id) {
            self.text_set_list_state.select(Some(0));
            self.sync_lists();
            self.diff_scroll = 0;
            self.dirty = true;
        } else {
            self.set_status("The last group cannot be removed");
        }
    }

    pub fn begin_rename_group(&mut self) {
        let Some(id) = self.selected_group_id() else { return };
        let name = self.store.get(&id).map(|g| g.name().to_owned()).unwrap_or_default();
        self.open_form(Form::new(FormKind::RenameGroup(id), name));
    }

    // -----------------------------------------------------------------------
    // Text sets of the active group
    // -----------------------------------------------------------------------

    pub fn toggle_selected_text_set(&mut self) {
        let Some(id) = self.selected_text_set_id() else { return };
        if self.store.active_mut().toggle_selected(&id).is_some() {
            self.diff_scroll = 0;
            self.dirty = true;
        }
    }

    pub fn select_all(&mut self) {
        self.store.active_mut().select_all();
        self.dirty = true;
    }

    pub fn select_none(&mut self) {
        self.store.active_mut().select_none();
        self.diff_scroll = 0;
        self.dirty = true;
    }

    pub fn begin_add_text_set(&mut self) {
        self.open_form(Form::new(FormKind::AddTextSet, ""));
    }

    pub fn begin_rename_text_set(&mut self) {
        let Some(id) = self.selected_text_set_id() else { return };
        let name = self
            .store
            .active()
            .text_sets()
            .get(&id)
            .map(|t| t.name().to_owned())
            .unwrap_or_default();
        self.open_form(Form::new(FormKind::RenameTextSet(id), name));
    }

    pub fn remove_selected_text_set(&mut self) {
        let Some(id) = self.selected_text_set_id() else { return };
        if let Some(removed) = self.store.active_mut().remove_text_set(&id) {
            self.sync_lists();
            self.dirty = true;
            self.set_status(format!("Removed {}", removed.name()));
        }
    }

    /// Moves the text set under the cursor by `delta` positions; the cursor follows.
    pub fn move_selected_text_set(&mut self, delta: isize) {
        let Some(index) = self.text_set_list_state.selected() else { return };
        let Some(id) = self.selected_text_set_id() else { return };
        let len = self.store.active().text_sets().len();
        let Some(target) = index.checked_add_signed(delta).filter(|t| *t < len) else {
            return;
        };
        if self.store.active_mut().move_text_set(&id, target) {
            self.text_set_list_state.select(Some(target));
            self.dirty = true;
        }
    }

    pub fn make_selected_base(&mut self) {
        let Some(id) = self.selected_text_set_id() else { return };
        if self.store.active_mut().make_base(&id) {
            self.text_set_list_state.select(Some(0));
            self.dirty = true;
        }
    }

    pub fn request_clear(&mut self) {
        if !self.store.active().text_sets().is_empty() {
            self.mode = Mode::ConfirmClear;
        }
    }

    pub fn confirm_clear(&mut self) {
        self.store.active_mut().clear();
        self.mode = Mode::Normal;
        self.diff_scroll = 0;
        self.sync_lists();
        self.dirty = true;
        self.set_status(format!("Cleared {}", self.store.active().name()));
    }

    // -----------------------------------------------------------------------
    // Diff options
    // -----------------------------------------------------------------------

    pub fn toggle_ignore_punctuation(&mut self) {
        self.options.ignore_punctuation = !self.options.ignore_punctuation;
        self.diff_scroll = 0;
        let state = if self.options.ignore_punctuation { "on" } else { "off" };
        self.set_status(format!("Ignore punctuation {state}"));
    }

    pub fn toggle_diff(&mut self) {
        self.options.diff_enabled = !self.options.diff_enabled;
        self.diff_scroll = 0;
        let state = if self.options.diff_enabled { "on" } else { "off" };
        self.set_status(format!("Diff {state}"));
    }

    // -----------------------------------------------------------------------
    // Insert-mode form
    // -----------------------------------------------------------------------

    fn open_form(&mut self, form: Form) {
        self.form = Some(form);
        self.mode = Mode::Insert;
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.mode = Mode::Normal;
    }

    /// Applies the open form. An add form with a blank field stays open.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.take() else {
            self.mode = Mode::Normal;
            return;
        };

        match form.kind.clone() {
            FormKind::AddTextSet => {
                let Some(text_set) = validated_text_set(&form.name, &form.content, Source::Manual) else {
                    self.set_status("Name and content are required");
                    self.form = Some(form);
                    return;
                };
                let group = self.store.active_mut();
                group.push_text_set(text_set);
                let last = group.text_sets().len() - 1;
                self.text_set_list_state.select(Some(last));
                self.dirty = true;
            }
            FormKind::RenameTextSet(id) => {
                if self.store.active_mut().rename_text_set(&id, &form.name) {
                    self.dirty = true;
                }
            }
            FormKind::RenameGroup(id) => {
                if self.store.rename_group(&id, &form.name) {
                    self.dirty = true;
                }
            }
        }
        self.mode = Mode::Normal;
    }
}

/// Selects `Some(0)` in a non-empty list with no cursor, clamps an
/// out-of-range cursor, clears the cursor of an empty list.
fn clamp(list: &mut ListState, len: usize) {
    if len == 0 {
        list.select(None);
        return;
    }
    let index = list.selected().unwrap_or(0).min(len - 1);
    list.select(Some(index));
}

fn step(list: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        list.select(None);
        return;
    }
    let current = list.selected().unwrap_or(0) as isize;
    let target = current.saturating_add(delta).clamp(0, len as isize - 1);
    list.select(Some(target as usize));
}
