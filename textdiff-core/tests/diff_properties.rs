use quickcheck::{Arbitrary, Gen};
use textdiff_core::{diff, tokenize, DiffSegment, DiffSummary, SegmentKind};

/// Token sequences over a tiny vocabulary so that matches, near-misses and
/// resynchronisations all show up often.
#[derive(Debug, Clone)]
struct Tokens(Vec<String>);

impl Arbitrary for Tokens {
    fn arbitrary(g: &mut Gen) -> Self {
        const WORDS: [&str; 6] = ["the", "cat", "dog", "sat", "on", "mat"];
        let len = usize::arbitrary(g) % 24;
        Tokens((0..len).map(|_| (*g.choose(&WORDS).unwrap()).to_owned()).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Tokens))
    }
}

fn side(segments: &[DiffSegment], keep: SegmentKind) -> Vec<String> {
    segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Equal || s.kind == keep)
        .map(|s| s.token.clone())
        .collect()
}

#[quickcheck_macros::quickcheck]
fn prop_base_is_reconstructed(base: Tokens, candidate: Tokens) -> bool {
    side(&diff(&base.0, &candidate.0), SegmentKind::Delete) == base.0
}

#[quickcheck_macros::quickcheck]
fn prop_candidate_is_reconstructed(base: Tokens, candidate: Tokens) -> bool {
    side(&diff(&base.0, &candidate.0), SegmentKind::Insert) == candidate.0
}

#[quickcheck_macros::quickcheck]
fn prop_every_token_is_covered_once(base: Tokens, candidate: Tokens) -> bool {
    let summary = DiffSummary::from_segments(&diff(&base.0, &candidate.0));
    summary.equal + summary.deleted == base.0.len()
        && summary.equal + summary.inserted == candidate.0.len()
}

#[quickcheck_macros::quickcheck]
fn prop_identical_inputs_are_all_equal(tokens: Tokens) -> bool {
    let segments = diff(&tokens.0, &tokens.0);
    segments.len() == tokens.0.len() && segments.iter().all(|s| s.kind == SegmentKind::Equal)
}

#[quickcheck_macros::quickcheck]
fn prop_tokens_never_blank(text: String, ignore_punctuation: bool) -> bool {
    tokenize(&text, ignore_punctuation)
        .iter()
        .all(|t| !t.is_empty() && !t.chars().any(char::is_whitespace))
}

#[test]
fn cat_and_dog() {
    let segments = diff(&tokenize("the cat sat", false), &tokenize("the dog sat", false));
    assert_eq!(
        segments,
        [
            DiffSegment::equal("the"),
            DiffSegment::delete("cat"),
            DiffSegment::insert("dog"),
            DiffSegment::equal("sat"),
        ]
    );
}
