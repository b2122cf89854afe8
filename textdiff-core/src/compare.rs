//! Base-versus-candidate comparisons for a group, memoised.
//!
//! Alignments are cached by `(base content, candidate content, options)`.
//! Content is held as the text set's shared `Arc<str>`, so a key costs two
//! reference-count bumps and equality short-circuits on pointer identity.
//! Entries can be evicted at any time; the cache only saves work.

use std::sync::Arc;

use cached::{Cached, SizedCache};

use crate::diff::{diff, DiffSummary};
use crate::group::DiffGroup;
use crate::tokenize::tokenize;
use crate::types::{DiffSegment, TextSet};

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Flags that change a comparison's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiffOptions {
    /// Case-fold and strip punctuation before tokenising.
    pub ignore_punctuation: bool,
    /// When off, comparisons list the candidates without aligning them.
    pub diff_enabled: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self { ignore_punctuation: false, diff_enabled: true }
    }
}

/// One non-base selected text set and its alignment against the base.
#[derive(Debug, Clone)]
pub struct CandidateDiff<'a> {
    pub text_set: &'a TextSet,
    /// Empty when diffing is disabled.
    pub segments: Arc<[DiffSegment]>,
    pub summary: DiffSummary,
}

/// Everything the presentation layer needs for a group's diff view.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    /// First selected text set in display order.
    pub base: &'a TextSet,
    /// Remaining selected text sets, in display order.
    pub candidates: Vec<CandidateDiff<'a>>,
    pub options: DiffOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DiffKey {
    base: Arc<str>,
    candidate: Arc<str>,
    options: DiffOptions,
}

/// Bounded memo of alignment results.
pub struct DiffCache {
    entries: SizedCache<DiffKey, Arc<[DiffSegment]>>,
}

impl Default for DiffCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl DiffCache {
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        Self { entries: SizedCache::with_size(capacity.max(1)) }
    }

    /// Builds the comparison for `group`'s current selection.
    ///
    /// Returns `None` when nothing is selected. A single selection yields a
    /// comparison with a base and no candidates.
    pub fn compare<'a>(&mut self, group: &'a DiffGroup, options: DiffOptions) -> Option<Comparison<'a>> {
        let selected = group.selected_text_sets();
        let (&base, rest) = selected.split_first()?;

        let candidates = rest
            .iter()
            .map(|&text_set| {
                let segments = self.segments(base.content_handle(), text_set.content_handle(), options);
                let summary = DiffSummary::from_segments(&segments);
                CandidateDiff { text_set, segments, summary }
            })
            .collect();

        Some(Comparison { base, candidates, options })
    }

    /// Aligns two raw texts, going through the memo.
    pub fn diff_texts(&mut self, base: &str, candidate: &str, options: DiffOptions) -> Arc<[DiffSegment]> {
        self.segments(Arc::from(base), Arc::from(candidate), options)
    }

    fn segments(&mut self, base: Arc<str>, candidate: Arc<str>, options: DiffOptions) -> Arc<[DiffSegment]> {
        let key = DiffKey { base, candidate, options };
        if let Some(hit) = self.entries.cache_get(&key) {
            return Arc::clone(hit);
        }

        let segments: Arc<[DiffSegment]> = if options.diff_enabled {
            let base_tokens = tokenize(&key.base, options.ignore_punctuation);
            let candidate_tokens = tokenize(&key.candidate, options.ignore_punctuation);
            tracing::debug!(
                base_tokens = base_tokens.len(),
                candidate_tokens = candidate_tokens.len(),
                "diff cache miss"
            );
            diff(&base_tokens, &candidate_tokens).into()
        } else {
            Arc::from(Vec::new())
        };

        self.entries.cache_set(key, Arc::clone(&segments));
        segments
    }

    pub fn len(&self) -> usize {
        self.entries.cache_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.entries.cache_hits().unwrap_or(0)
    }

    pub fn misses(&self) -> u64 {
        self.entries.cache_misses().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.entries.cache_clear();
    }
}
