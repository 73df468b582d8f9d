//! Rendered Hoare triple

use crate::config::Locale;
use std::fmt;

/// `{ SECURITY: pre }` / `ALGORITHM:` / `CODE:` / `{ GUARANTEE: post }`
///
/// All four lines are always present; values are embedded verbatim, so a
/// multi-line `code` spans several output lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoareTriple<'a> {
    /// Derived precondition
    pub precondition: &'a str,
    /// Algorithm identifier as supplied
    pub algorithm: &'a str,
    /// Raw pseudocode
    pub code: &'a str,
    /// Postcondition as supplied
    pub postcondition: &'a str,
    /// Label language
    pub locale: Locale,
}

impl fmt::Display for HoareTriple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [security, algorithm, code, guarantee] = self.locale.triple_labels();
        writeln!(f, "{{ {}: {} }}", security, self.precondition)?;
        writeln!(f, "{}: {}", algorithm, self.algorithm)?;
        writeln!(f, "{}: {}", code, self.code)?;
        write!(f, "{{ {}: {} }}", guarantee, self.postcondition)
    }
}

/// Render the triple with English labels
pub fn format_triple(
    final_precondition: &str,
    algorithm_id: &str,
    raw_code: &str,
    postcondition: &str,
) -> String {
    HoareTriple {
        precondition: final_precondition,
        algorithm: algorithm_id,
        code: raw_code,
        postcondition,
        locale: Locale::En,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let triple = format_triple("p ≠ q ∧ (ok)", "rsa", "c := m", "ok");
        assert_eq!(
            triple,
            "{ SECURITY: p ≠ q ∧ (ok) }\nALGORITHM: rsa\nCODE: c := m\n{ GUARANTEE: ok }"
        );
    }

    #[test]
    fn test_empty_values_keep_all_lines() {
        let triple = format_triple("", "", "", "");
        assert_eq!(triple.lines().count(), 4);
        assert!(triple.starts_with("{ SECURITY:  }"));
    }

    #[test]
    fn test_multiline_code_is_verbatim() {
        let code = "x := 5\ny := x + 10";
        let triple = format_triple("pre", "caesar", code, "y > 10");
        assert!(triple.contains("CODE: x := 5\ny := x + 10\n"));
    }

    #[test]
    fn test_russian_labels() {
        let triple = HoareTriple {
            precondition: "pre",
            algorithm: "цезарь",
            code: "",
            postcondition: "post",
            locale: Locale::Ru,
        }
        .to_string();
        assert!(triple.starts_with("{ БЕЗОПАСНОСТЬ: pre }"));
        assert!(triple.ends_with("{ ГАРАНТИЯ: post }"));
    }
}
