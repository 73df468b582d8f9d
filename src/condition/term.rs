use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque assertion or expression text, split at word boundaries.
///
/// A word is a maximal run of alphanumerics and `_`; every other character
/// is its own symbol. Substitution matches whole fragment sequences, so a
/// variable is never replaced inside a longer identifier.
///
/// Substituted expressions are delimited by [`Fragment::GroupStart`] and
/// [`Fragment::GroupEnd`] markers rather than nested terms, so a term stays
/// flat however many substitutions it has been through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Term {
    fragments: Vec<Fragment>,
}

/// A piece of a [`Term`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fragment {
    /// Identifier or numeric literal
    Word(String),
    /// Any single non-word character, whitespace included
    Symbol(char),
    /// Start of a substituted expression, rendered as `(`
    GroupStart,
    /// End of a substituted expression, rendered as `)`
    GroupEnd,
}

impl Term {
    /// Split text into fragments
    pub fn parse(text: &str) -> Self {
        let mut fragments = Vec::new();
        let mut word = String::new();

        for c in text.chars() {
            if is_word_char(c) {
                word.push(c);
            } else {
                if !word.is_empty() {
                    fragments.push(Fragment::Word(std::mem::take(&mut word)));
                }
                fragments.push(Fragment::Symbol(c));
            }
        }
        if !word.is_empty() {
            fragments.push(Fragment::Word(word));
        }

        Term { fragments }
    }

    /// Fragments in source order
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Returns true if the term renders to the empty string
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Replace every whole occurrence of `target` with `(replacement)`.
    ///
    /// Groups produced by earlier substitutions are searched too; the
    /// inserted replacement is not rescanned. A match never spans a group
    /// marker.
    pub fn substitute(&self, target: &Term, replacement: &Term) -> Term {
        let pattern = target.fragments();
        if pattern.is_empty() {
            return self.clone();
        }

        let mut fragments = Vec::with_capacity(self.fragments.len());
        let mut i = 0;
        while i < self.fragments.len() {
            if self.fragments[i..].starts_with(pattern) {
                fragments.push(Fragment::GroupStart);
                fragments.extend(replacement.fragments.iter().cloned());
                fragments.push(Fragment::GroupEnd);
                i += pattern.len();
            } else {
                fragments.push(self.fragments[i].clone());
                i += 1;
            }
        }

        Term { fragments }
    }

    /// Returns true if `word` occurs as a whole word, groups included
    pub fn contains_word(&self, word: &str) -> bool {
        self.fragments
            .iter()
            .any(|fragment| matches!(fragment, Fragment::Word(w) if w == word))
    }

    /// Collect identifiers (words not starting with a digit)
    pub fn collect_identifiers(&self, out: &mut BTreeSet<String>) {
        for fragment in &self.fragments {
            if let Fragment::Word(w) = fragment {
                if !w.starts_with(|c: char| c.is_numeric()) {
                    out.insert(w.clone());
                }
            }
        }
    }
}

impl From<&str> for Term {
    fn from(text: &str) -> Self {
        Term::parse(text)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            write!(f, "{}", fragment)?;
        }
        Ok(())
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Word(w) => write!(f, "{}", w),
            Fragment::Symbol(c) => write!(f, "{}", c),
            Fragment::GroupStart => f.write_str("("),
            Fragment::GroupEnd => f.write_str(")"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_renders_verbatim() {
        for text in [
            "decrypt(encrypt(text, key), key) == text",
            "∀i,j: i≠j ⇒ key[i] ≠ key[j]",
            "",
            "  spaced  ",
        ] {
            assert_eq!(Term::parse(text).to_string(), text);
        }
    }

    #[test]
    fn test_whole_word_substitution() {
        let term = Term::parse("x + x1 + max(x, y_x)");
        let result = term.substitute(&Term::parse("x"), &Term::parse("5"));
        assert_eq!(result.to_string(), "(5) + x1 + max((5), y_x)");
    }

    #[test]
    fn test_substitution_into_groups() {
        let once = Term::parse("y > 10").substitute(&"y".into(), &"x + 10".into());
        assert_eq!(once.to_string(), "(x + 10) > 10");

        let twice = once.substitute(&"x".into(), &"5".into());
        assert_eq!(twice.to_string(), "((5) + 10) > 10");
    }

    #[test]
    fn test_self_referencing_replacement_is_not_rescanned() {
        let term = Term::parse("shift <= 32");
        let result = term.substitute(&"shift".into(), &"shift % 32".into());
        assert_eq!(result.to_string(), "(shift % 32) <= 32");
    }

    #[test]
    fn test_compound_target() {
        let term = Term::parse("alphabet.Length == 33 ∧ alphabet.size > 0");
        let result = term.substitute(&"alphabet.Length".into(), &"n".into());
        assert_eq!(result.to_string(), "(n) == 33 ∧ alphabet.size > 0");
    }

    #[test]
    fn test_long_substitution_chain_stays_flat() {
        let mut term = Term::parse("x > 1");
        for _ in 0..2000 {
            term = term.substitute(&"x".into(), &"x + 1".into());
        }

        let rendered = term.to_string();
        assert!(rendered.starts_with("((("));
        assert!(rendered.ends_with("x + 1) + 1) > 1"));
        assert!(term.contains_word("x"));
        assert_eq!(
            term.fragments()
                .iter()
                .filter(|f| **f == Fragment::GroupStart)
                .count(),
            2000
        );
    }

    #[test]
    fn test_missing_target_leaves_term_unchanged() {
        let term = Term::parse("key.Length >= 8");
        assert_eq!(term.substitute(&"shift".into(), &"0".into()), term);
        assert_eq!(term.substitute(&Term::default(), &"0".into()), term);
    }

    #[test]
    fn test_unicode_words() {
        let term = Term::parse("φ(n) ≠ шаг");
        assert!(term.contains_word("шаг"));
        assert!(term.contains_word("φ"));
        assert!(!term.contains_word("ша"));
    }

    #[test]
    fn test_identifiers_skip_numbers() {
        let mut ids = BTreeSet::new();
        Term::parse("(5) + key1 > 10").collect_identifiers(&mut ids);
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["key1".to_string()]);
    }
}
