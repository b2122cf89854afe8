//! textdiff: compare text variants word by word.
//!
//! Entry point for the `textdiff` binary. With a subcommand it runs headless
//! against the saved workspace; without one it opens the terminal UI.
//!
//! # TUI startup sequence
//!
//! 1. Load config and open the log file under `data_dir`; the terminal belongs
//!    to the renderer, so logs never go to stderr in this mode.
//! 2. Open the database and restore the latest workspace before touching the
//!    terminal, so failures still print normally.
//! 3. `install_panic_hook()`, then `register_sigterm()`, then `init_tui()`.
//! 4. Spawn the event task and run the loop.
//!
//! The loop exits only via `break`, so `restore_tui()` is always reached. The
//! workspace is saved after every key that changed it and once more on exit.

mod app;
mod cli;
mod commands;
mod config;
mod event;
mod theme;
mod tui;
mod ui;
mod workspace;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

use clap::Parser;
use textdiff_core::db::Connection;
use tracing_subscriber::EnvFilter;

use crate::app::AppState;
use crate::config::Config;
use crate::event::AppEvent;
use crate::ui::keybindings::{self, KeyAction};

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(config: &Config, log_file: Option<std::fs::File>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(file) => builder.with_writer(Mutex::new(file)).with_ansi(false).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = cli::Cli::parse();
    let (config, config_warning) = Config::load();
    let db_path = cli.db.clone().unwrap_or_else(|| config.db_path());

    match cli.command {
        Some(command) => {
            init_tracing(&config, None);
            if let Some(warning) = config_warning {
                tracing::warn!("{warning}");
            }
            let conn = workspace::open(&db_path).await?;
            commands::run(command, &conn, config.cache_capacity).await
        }
        None => {
            std::fs::create_dir_all(&config.data_dir)?;
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(config.log_path())?;
            init_tracing(&config, Some(log_file));
            if let Some(warning) = config_warning {
                tracing::warn!("{warning}");
            }
            run_tui(&config, &db_path).await
        }
    }
}

async fn run_tui(config: &Config, db_path: &Path) -> std::io::Result<()> {
    let theme = theme::Theme::from_name(&config.theme);
    let conn = workspace::open(db_path).await?;
    let store = workspace::load(&conn).await?;
    tracing::info!(groups = store.len(), db = %db_path.display(), "workspace loaded");
    let mut state = AppState::new(store, config.diff_options(), config.cache_capacity);

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    let mut draw_error = None;

    'event_loop: loop {
        tokio::select! {
            // Heartbeat: SIGTERM is checked at least every 50ms even when no
            // event arrives.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            draw_error = Some(e);
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Key(key)) => {
                        if keybindings::handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Paste(text)) => keybindings::handle_paste(&text, &mut state),
                    Some(AppEvent::Mouse(mouse)) => {
                        keybindings::handle_mouse(mouse, &mut state);
                    }
                    Some(AppEvent::Tick) => state.on_tick(),
                    // ratatui picks up the new size from frame.area() on the next Render.
                    Some(AppEvent::Resize(_, _)) => {}
                    None => break 'event_loop,
                }
                autosave(&conn, &mut state).await;
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    let saved = workspace::save(&conn, &state.store).await;
    tui::restore_tui()?;
    if let Some(e) = draw_error {
        return Err(e);
    }
    saved
}

/// Saves the workspace if the last event changed it. Failures stay in the
/// status bar and the log; the UI keeps running.
async fn autosave(conn: &Connection, state: &mut AppState) {
    if !state.dirty {
        return;
    }
    state.dirty = false;
    if let Err(e) = workspace::save(conn, &state.store).await {
        tracing::error!(error = %e, "autosave failed");
        state.set_status(format!("Save failed: {e}"));
    }
}
