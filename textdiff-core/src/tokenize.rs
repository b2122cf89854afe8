//! Word tokenizer with optional punctuation-insensitive normalisation.

/// Splits `text` into whitespace-delimited tokens.
///
/// Runs of whitespace act as a single separator and leading or trailing
/// whitespace yields no empty tokens. With `ignore_punctuation` the text is
/// first passed through [`normalize`].
pub fn tokenize(text: &str, ignore_punctuation: bool) -> Vec<String> {
    if ignore_punctuation {
        split(&normalize(text))
    } else {
        split(text)
    }
}

/// Lower-cases `text` and drops every character that is neither alphanumeric
/// nor whitespace. Underscore counts as punctuation.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

fn split(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(tokenize("  the \t cat\n\nsat  ", false), ["the", "cat", "sat"]);
    }

    #[test]
    fn blank_input_has_no_tokens() {
        assert!(tokenize("", false).is_empty());
        assert!(tokenize(" \n\t ", true).is_empty());
    }

    #[test]
    fn keeps_case_and_punctuation_by_default() {
        assert_eq!(tokenize("Hello, World!", false), ["Hello,", "World!"]);
    }

    #[test]
    fn ignore_punctuation_folds_case_and_strips_symbols() {
        assert_eq!(tokenize("Hello, World! snake_case it's", true), ["hello", "world", "snakecase", "its"]);
    }

    #[test]
    fn punctuation_only_token_disappears() {
        assert_eq!(tokenize("wait -- what", true), ["wait", "what"]);
    }

    #[test]
    fn keeps_non_ascii_letters_and_digits() {
        assert_eq!(tokenize("Café №5, ÜBER 42.", true), ["café", "5", "über", "42"]);
    }
}
