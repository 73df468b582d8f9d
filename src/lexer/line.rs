use serde::{Deserialize, Serialize};

/// Assignment operator recognised in pseudocode
pub const ASSIGN_OP: &str = ":=";

/// A single retained line of pseudocode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLine {
    /// How the line is treated by backward analysis
    pub kind: LineKind,
    /// Trimmed text of the line
    pub text: String,
    /// Line number in the input text (1-indexed)
    pub line: usize,
}

/// Line categories, in classification precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// Starts with the `if` keyword (any case)
    Conditional,
    /// Contains `:=`
    Assignment,
    /// Mentions `encrypt` or `decrypt`
    CryptoOperation,
    /// Anything else; ignored by the analysis
    Other,
}

/// Which cryptographic operation a line mentions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CryptoOp {
    /// The line mentions `encrypt`
    Encrypt,
    /// The line mentions `decrypt` but not `encrypt`
    Decrypt,
}

/// `target := expression`, borrowed from a [`SourceLine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    /// Assigned variable (trimmed)
    pub target: &'a str,
    /// Assigned expression, trimmed and without trailing `;`
    pub expression: &'a str,
}

/// The guard of an `if (B) ...` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guard<'a> {
    /// Text inside the first balanced parenthesized group after `if`
    pub condition: &'a str,
    /// Whatever follows the closing parenthesis, trimmed
    pub rest: &'a str,
}

impl LineKind {
    /// Classify a trimmed line.
    ///
    /// Precedence is conditional, then assignment, then crypto mention, so
    /// `if (x) y := encrypt(m)` is a conditional.
    pub fn classify(text: &str) -> Self {
        if starts_with_keyword(text, "if") {
            LineKind::Conditional
        } else if text.contains(ASSIGN_OP) {
            LineKind::Assignment
        } else if CryptoOp::mentioned_in(text).is_some() {
            LineKind::CryptoOperation
        } else {
            LineKind::Other
        }
    }
}

impl CryptoOp {
    /// Detect an operation mention (case-sensitive)
    pub fn mentioned_in(text: &str) -> Option<Self> {
        if text.contains("encrypt") {
            Some(CryptoOp::Encrypt)
        } else if text.contains("decrypt") {
            Some(CryptoOp::Decrypt)
        } else {
            None
        }
    }

    /// Abstract validity predicate conjoined for this operation
    pub fn validity_predicate(self) -> &'static str {
        match self {
            CryptoOp::Encrypt => "IsValidEncryption(text, key)",
            CryptoOp::Decrypt => "IsValidDecryption(ciphertext, key)",
        }
    }
}

impl SourceLine {
    /// Creates a classified line from already-trimmed text
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        let text = text.into();
        SourceLine {
            kind: LineKind::classify(&text),
            text,
            line,
        }
    }

    /// Split an assignment line into target and expression.
    ///
    /// Returns `None` for anything that is not exactly one `:=` with a
    /// non-empty target and expression on either side.
    pub fn assignment(&self) -> Option<Assignment<'_>> {
        if self.kind != LineKind::Assignment || self.text.matches(ASSIGN_OP).count() != 1 {
            return None;
        }

        let (target, expression) = self.text.split_once(ASSIGN_OP)?;
        let target = target.trim();
        let expression = expression.trim().trim_end_matches(';').trim_end();

        if target.is_empty() || expression.is_empty() {
            return None;
        }

        Some(Assignment { target, expression })
    }

    /// Extract the guard of a conditional line.
    ///
    /// The guard is the first balanced parenthesized group directly after
    /// the keyword; `None` when there is no such group or it is empty.
    pub fn guard(&self) -> Option<Guard<'_>> {
        if self.kind != LineKind::Conditional {
            return None;
        }

        let body = self.text.get(2..)?.trim_start().strip_prefix('(')?;
        let mut depth = 1usize;
        for (idx, c) in body.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        let condition = body[..idx].trim();
                        if condition.is_empty() {
                            return None;
                        }
                        return Some(Guard {
                            condition,
                            rest: body[idx + 1..].trim(),
                        });
                    }
                }
                _ => {}
            }
        }

        None
    }

    /// Operation mentioned by a crypto-operation line
    pub fn crypto_op(&self) -> Option<CryptoOp> {
        if self.kind != LineKind::CryptoOperation {
            return None;
        }
        CryptoOp::mentioned_in(&self.text)
    }
}

/// Case-insensitive ASCII keyword prefix test
pub(crate) fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.get(..keyword.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_precedence() {
        assert_eq!(LineKind::classify("if (x > 0) {"), LineKind::Conditional);
        assert_eq!(LineKind::classify("IF (x > 0)"), LineKind::Conditional);
        // conditional wins over assignment and crypto mention
        assert_eq!(
            LineKind::classify("if (ok) c := encrypt(m, k)"),
            LineKind::Conditional
        );
        // assignment wins over crypto mention
        assert_eq!(
            LineKind::classify("c := encrypt(m, k);"),
            LineKind::Assignment
        );
        assert_eq!(
            LineKind::classify("function decrypt(c, k) {"),
            LineKind::CryptoOperation
        );
        assert_eq!(LineKind::classify("return result;"), LineKind::Other);
    }

    #[test]
    fn test_crypto_mention_is_case_sensitive() {
        assert_eq!(LineKind::classify("Encrypt(m)"), LineKind::Other);
        assert_eq!(
            CryptoOp::mentioned_in("decrypt(encrypt(m))"),
            Some(CryptoOp::Encrypt)
        );
        assert_eq!(CryptoOp::mentioned_in("decrypt(c)"), Some(CryptoOp::Decrypt));
    }

    #[test]
    fn test_assignment_split() {
        let line = SourceLine::new("shift := key % 32;", 2);
        let assignment = line.assignment().unwrap();
        assert_eq!(assignment.target, "shift");
        assert_eq!(assignment.expression, "key % 32");
    }

    #[test]
    fn test_malformed_assignments() {
        assert!(SourceLine::new("a := b := c", 1).assignment().is_none());
        assert!(SourceLine::new(":= 5", 1).assignment().is_none());
        assert!(SourceLine::new("x := ;", 1).assignment().is_none());
        assert!(SourceLine::new("x :=", 1).assignment().is_none());
        assert!(SourceLine::new("x :=:= 5", 1).assignment().is_none());
        assert!(SourceLine::new(":= x := 5", 1).assignment().is_none());
        assert!(SourceLine::new("x := 5 :=", 1).assignment().is_none());
    }

    #[test]
    fn test_guard_extraction() {
        let line = SourceLine::new("if (char in alphabet) {", 5);
        let guard = line.guard().unwrap();
        assert_eq!(guard.condition, "char in alphabet");
        assert_eq!(guard.rest, "{");

        let nested = SourceLine::new("if (gcd(e, phi) == 1) d := inverse(e)", 1);
        let guard = nested.guard().unwrap();
        assert_eq!(guard.condition, "gcd(e, phi) == 1");
        assert_eq!(guard.rest, "d := inverse(e)");

        let tight = SourceLine::new("if(x)", 1);
        assert_eq!(tight.guard().unwrap().condition, "x");
    }

    #[test]
    fn test_guard_missing() {
        assert!(SourceLine::new("if x > 0 then", 1).guard().is_none());
        assert!(SourceLine::new("if ()", 1).guard().is_none());
        assert!(SourceLine::new("if (a > (b", 1).guard().is_none());
        assert!(SourceLine::new("ifdef_mode := 1", 1).guard().is_none());
    }

    #[test]
    fn test_keyword_prefix_on_multibyte_text() {
        assert!(!starts_with_keyword("ф", "if"));
        assert!(!starts_with_keyword("i", "if"));
        assert!(starts_with_keyword("If(", "if"));
    }
}
