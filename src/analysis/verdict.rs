//! Security verdict heuristic
//!
//! A lexical scan of the rendered precondition, not a semantic check: any
//! `0`, `undefined` or `false` (any case) marks the condition insecure.
//! A guard like `modulus > 0` therefore fails the verdict on its own.

use crate::config::Locale;

/// Tokens that disqualify a condition, as reported by [`disqualifying_tokens`]
pub const DISQUALIFYING_TOKENS: [&str; 3] = ["0", "undefined", "false"];

/// Heuristic verdict over a rendered condition
pub fn is_secure(condition: &str) -> bool {
    disqualifying_tokens(condition).is_empty()
}

/// Which disqualifying tokens occur in `condition`
pub fn disqualifying_tokens(condition: &str) -> Vec<&'static str> {
    let mut found = Vec::new();
    if condition.contains('0') {
        found.push(DISQUALIFYING_TOKENS[0]);
    }
    if condition.contains("undefined") {
        found.push(DISQUALIFYING_TOKENS[1]);
    }
    if condition.to_lowercase().contains("false") {
        found.push(DISQUALIFYING_TOKENS[2]);
    }
    found
}

/// Pass or warning message naming the algorithm verbatim
pub fn assessment_text(is_secure: bool, algorithm_id: &str) -> String {
    Locale::default().assessment(is_secure, algorithm_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_disqualifies() {
        assert!(!is_secure("(0) >= 1"));
        assert!(!is_secure("modulus > 0 ∧ (x)"));
        assert!(!is_secure("y > 10"));
        assert!(is_secure("p ≠ q ∧ (IsPrime(p))"));
    }

    #[test]
    fn test_undefined_is_case_sensitive() {
        assert!(!is_secure("key == undefined"));
        assert!(is_secure("key == Undefined"));
    }

    #[test]
    fn test_false_is_case_insensitive() {
        assert!(!is_secure("FALSE"));
        assert!(!is_secure("key.IsRandom == False"));
        assert!(is_secure("true"));
    }

    #[test]
    fn test_disqualifying_tokens_reported() {
        assert_eq!(
            disqualifying_tokens("x = 0 ∨ undefined ∨ False"),
            vec!["0", "undefined", "false"]
        );
        assert!(disqualifying_tokens("result != null").is_empty());
    }

    #[test]
    fn test_assessment_names_algorithm() {
        let pass = assessment_text(true, "rsa");
        assert!(pass.contains("'rsa'"));
        assert!(pass.contains("passed the security check"));

        let warn = assessment_text(false, "виженер");
        assert!(warn.contains("'виженер'"));
        assert!(warn.contains("potential vulnerabilities"));
    }
}
