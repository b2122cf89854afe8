//! Greedy token alignment with a bounded resynchronisation window.
//!
//! This is deliberately not a minimal-edit-distance diff. On a mismatch the
//! engine scans at most [`LOOKAHEAD`] tokens forward, first in the candidate
//! (to explain the gap as insertions), then in the base (as deletions), and
//! takes the first hit. With no hit in either direction the pair is reported
//! as a substitution. Cost is O((n + m) · LOOKAHEAD).

use crate::types::{DiffSegment, SegmentKind};

/// How many tokens past the mismatch the resynchronisation scan looks at.
///
/// The value and the insert-before-delete scan order only matter for
/// compatibility with previously produced results; they are tunable.
pub const LOOKAHEAD: usize = 4;

/// Aligns `compare` against `base`.
///
/// Every token of both inputs lands in exactly one segment. Reading the
/// `Equal` and `Delete` segments in order yields `base`; reading the `Equal`
/// and `Insert` segments in order yields `compare`.
pub fn diff<A, B>(base: &[A], compare: &[B]) -> Vec<DiffSegment>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut out = Vec::with_capacity(base.len().max(compare.len()));
    let (mut i, mut j) = (0, 0);

    while i < base.len() || j < compare.len() {
        if i >= base.len() {
            out.extend(compare[j..].iter().map(|t| DiffSegment::insert(t.as_ref())));
            j = compare.len();
        } else if j >= compare.len() {
            out.extend(base[i..].iter().map(|t| DiffSegment::delete(t.as_ref())));
            i = base.len();
        } else if base[i].as_ref() == compare[j].as_ref() {
            out.push(DiffSegment::equal(base[i].as_ref()));
            i += 1;
            j += 1;
        } else if let Some(k) = scan_ahead(compare, j, base[i].as_ref()) {
            out.extend(compare[j..k].iter().map(|t| DiffSegment::insert(t.as_ref())));
            out.push(DiffSegment::equal(base[i].as_ref()));
            i += 1;
            j = k + 1;
        } else if let Some(k) = scan_ahead(base, i, compare[j].as_ref()) {
            out.extend(base[i..k].iter().map(|t| DiffSegment::delete(t.as_ref())));
            out.push(DiffSegment::equal(base[k].as_ref()));
            i = k + 1;
            j += 1;
        } else {
            out.push(DiffSegment::delete(base[i].as_ref()));
            out.push(DiffSegment::insert(compare[j].as_ref()));
            i += 1;
            j += 1;
        }
    }

    out
}

/// Index of the first token equal to `needle` in `tokens[from+1 ..= from+LOOKAHEAD]`.
fn scan_ahead<T: AsRef<str>>(tokens: &[T], from: usize, needle: &str) -> Option<usize> {
    let end = (from + LOOKAHEAD + 1).min(tokens.len());
    (from + 1..end).find(|&k| tokens[k].as_ref() == needle)
}

/// Token counts per segment kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub equal: usize,
    pub inserted: usize,
    pub deleted: usize,
}

impl DiffSummary {
    pub fn from_segments(segments: &[DiffSegment]) -> Self {
        segments.iter().fold(Self::default(), |mut acc, seg| {
            match seg.kind {
                SegmentKind::Equal => acc.equal += 1,
                SegmentKind::Insert => acc.inserted += 1,
                SegmentKind::Delete => acc.deleted += 1,
            }
            acc
        })
    }

    pub fn is_identical(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}

/// Plain-text rendering: `[-deleted-]`, `{+inserted+}`, equal tokens bare,
/// separated by single spaces.
pub fn render_inline(segments: &[DiffSegment]) -> String {
    let mut out = String::new();
    for (n, seg) in segments.iter().enumerate() {
        if n > 0 {
            out.push(' ');
        }
        match seg.kind {
            SegmentKind::Equal => out.push_str(&seg.token),
            SegmentKind::Insert => {
                out.push_str("{+");
                out.push_str(&seg.token);
                out.push_str("+}");
            }
            SegmentKind::Delete => {
                out.push_str("[-");
                out.push_str(&seg.token);
                out.push_str("-]");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(segments: &[DiffSegment]) -> Vec<(SegmentKind, &str)> {
        segments.iter().map(|s| (s.kind, s.token.as_str())).collect()
    }

    const NONE: [&str; 0] = [];

    #[test]
    fn single_substitution() {
        let got = diff(&["the", "cat", "sat"], &["the", "dog", "sat"]);
        assert_eq!(
            got,
            vec![
                DiffSegment::equal("the"),
                DiffSegment::delete("cat"),
                DiffSegment::insert("dog"),
                DiffSegment::equal("sat"),
            ]
        );
    }

    #[test]
    fn empty_inputs() {
        assert!(diff(&NONE, &NONE).is_empty());
        assert_eq!(
            kinds(&diff(&NONE, &["a", "b"])),
            [(SegmentKind::Insert, "a"), (SegmentKind::Insert, "b")]
        );
        assert_eq!(
            kinds(&diff(&["a", "b"], &NONE)),
            [(SegmentKind::Delete, "a"), (SegmentKind::Delete, "b")]
        );
    }

    #[test]
    fn insertion_run_resyncs_on_candidate_side() {
        let got = diff(&["a", "z"], &["a", "x", "y", "z"]);
        assert_eq!(
            kinds(&got),
            [
                (SegmentKind::Equal, "a"),
                (SegmentKind::Insert, "x"),
                (SegmentKind::Insert, "y"),
                (SegmentKind::Equal, "z"),
            ]
        );
    }

    #[test]
    fn deletion_run_resyncs_on_base_side() {
        let got = diff(&["a", "x", "y", "z"], &["a", "z"]);
        assert_eq!(
            kinds(&got),
            [
                (SegmentKind::Equal, "a"),
                (SegmentKind::Delete, "x"),
                (SegmentKind::Delete, "y"),
                (SegmentKind::Equal, "z"),
            ]
        );
    }

    #[test]
    fn candidate_scan_wins_over_base_scan() {
        // Both directions could realign here; inserting wins because it is tried first.
        let got = diff(&["a", "b"], &["b", "a"]);
        assert_eq!(
            kinds(&got),
            [(SegmentKind::Insert, "b"), (SegmentKind::Equal, "a"), (SegmentKind::Delete, "b")]
        );
    }

    #[test]
    fn match_at_window_edge_still_resyncs() {
        let got = diff(&["x", "a", "b", "c", "d", "y"], &["x", "y"]);
        assert_eq!(
            kinds(&got),
            [
                (SegmentKind::Equal, "x"),
                (SegmentKind::Delete, "a"),
                (SegmentKind::Delete, "b"),
                (SegmentKind::Delete, "c"),
                (SegmentKind::Delete, "d"),
                (SegmentKind::Equal, "y"),
            ]
        );
    }

    #[test]
    fn match_past_window_is_a_substitution() {
        let got = diff(&["x", "a", "b", "c", "d", "e", "y"], &["x", "y"]);
        assert_eq!(
            kinds(&got),
            [
                (SegmentKind::Equal, "x"),
                (SegmentKind::Delete, "a"),
                (SegmentKind::Insert, "y"),
                (SegmentKind::Delete, "b"),
                (SegmentKind::Delete, "c"),
                (SegmentKind::Delete, "d"),
                (SegmentKind::Delete, "e"),
                (SegmentKind::Delete, "y"),
            ]
        );
    }

    #[test]
    fn insertion_past_window_is_a_substitution() {
        let got = diff(&["x", "y"], &["x", "a", "b", "c", "d", "e", "y"]);
        assert!(!got.iter().any(|s| s.kind == SegmentKind::Equal && s.token == "y"));
    }

    #[test]
    fn summary_counts() {
        let segs = diff(&["the", "cat", "sat"], &["the", "dog", "sat", "down"]);
        let summary = DiffSummary::from_segments(&segs);
        assert_eq!(summary, DiffSummary { equal: 2, inserted: 2, deleted: 1 });
        assert!(!summary.is_identical());
    }

    #[test]
    fn inline_rendering() {
        let segs = diff(&["the", "cat", "sat"], &["the", "dog", "sat"]);
        assert_eq!(render_inline(&segs), "the [-cat-] {+dog+} sat");
        assert_eq!(render_inline(&[]), "");
    }
}
