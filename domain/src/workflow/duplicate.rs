//! Duplicate result detection.

use super::step::PastStep;
use crate::core::string::char_prefix;

/// Number of leading characters compared.
pub const DUPLICATE_PREFIX_CHARS: usize = 200;

/// Returns true if the two most recent results match on their first
/// [`DUPLICATE_PREFIX_CHARS`] characters, ignoring case and surrounding
/// whitespace.
pub fn detect_duplicate(past: &[PastStep]) -> bool {
    detect_duplicate_with(past, DUPLICATE_PREFIX_CHARS)
}

/// [`detect_duplicate`] with a configurable comparison window.
pub fn detect_duplicate_with(past: &[PastStep], prefix_chars: usize) -> bool {
    let [.., previous, last] = past else {
        return false;
    };
    normalize(&last.result, prefix_chars) == normalize(&previous.result, prefix_chars)
}

fn normalize(result: &str, prefix_chars: usize) -> String {
    char_prefix(result, prefix_chars).to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::step::Step;

    fn past(results: &[&str]) -> Vec<PastStep> {
        results
            .iter()
            .map(|r| PastStep::new(Step::scada("Get readings"), *r))
            .collect()
    }

    #[test]
    fn test_needs_two_entries() {
        assert!(!detect_duplicate(&[]));
        assert!(!detect_duplicate(&past(&["x"])));
    }

    #[test]
    fn test_case_and_whitespace_folded() {
        assert!(detect_duplicate(&past(&["Pressure 42 PSI  ", "  pressure 42 psi"])));
    }

    #[test]
    fn test_only_last_two_compared() {
        assert!(!detect_duplicate(&past(&["same", "same", "different"])));
        assert!(detect_duplicate(&past(&["different", "same", "same"])));
    }

    #[test]
    fn test_difference_beyond_prefix_ignored() {
        let head = "a".repeat(DUPLICATE_PREFIX_CHARS);
        let one = format!("{}tail one", head);
        let two = format!("{}tail two", head);
        assert!(detect_duplicate(&past(&[&one, &two])));
    }

    #[test]
    fn test_difference_inside_prefix_detected() {
        assert!(!detect_duplicate(&past(&["pressure 42", "pressure 43"])));
    }

    #[test]
    fn test_custom_window() {
        assert!(detect_duplicate_with(&past(&["abcX", "abcY"]), 3));
        assert!(!detect_duplicate_with(&past(&["abcX", "abcY"]), 4));
    }
}
