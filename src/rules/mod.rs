//! # Rule Catalog
//!
//! Domain axioms per cipher family and the generic safety checks applied to
//! assigned expressions. The catalog is a read-only static table; lookups
//! are case-insensitive and unknown identifiers get no axioms.
//!
//! | Algorithm | Axioms |
//! |-----------|--------|
//! | caesar    | shift range, alphabet size |
//! | vigenere  | key length, non-repeating key, alphabet membership |
//! | rsa       | positive modulus, primality, `p ≠ q`, `gcd(e, φ(n)) == 1` |
//! | playfair  | matrix validity, distinct rows, key length |
//! | vernam    | key covers text, random key, key alphabet |

pub mod safety;

pub use safety::{generic_safety_checks_for, SafetyCheck};

use crate::condition::Condition;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Cipher families known to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Caesar shift cipher
    Caesar,
    /// Vigenère polyalphabetic cipher
    Vigenere,
    /// Textbook RSA
    Rsa,
    /// Playfair digraph cipher
    Playfair,
    /// Vernam one-time pad
    Vernam,
    /// Anything else; receives no axioms
    Unknown,
}

/// A named domain axiom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Axiom {
    /// Short identifier used in step descriptions
    pub name: &'static str,
    /// Assertion text injected into the condition
    pub text: &'static str,
}

impl Axiom {
    /// The axiom as a condition
    pub fn condition(&self) -> Condition {
        Condition::atom(self.text)
    }
}

const KEY_LENGTH: Axiom = Axiom {
    name: "key_length",
    text: "key.Length >= 8",
};
const NON_REPEATING: Axiom = Axiom {
    name: "non_repeating",
    text: "∀i,j: i≠j ⇒ key[i] ≠ key[j]",
};
const ALPHABET_BOUND: Axiom = Axiom {
    name: "alphabet_bound",
    text: "∀c∈text: c ∈ alphabet",
};
const SHIFT_RANGE: Axiom = Axiom {
    name: "shift_range",
    text: "shift >= 1 ∧ shift <= 32",
};
const ALPHABET_SIZE: Axiom = Axiom {
    name: "alphabet_size",
    text: "alphabet.Length == 33",
};
const POSITIVE_MODULUS: Axiom = Axiom {
    name: "positive_modulus",
    text: "modulus > 1",
};
const PRIME_CHECK: Axiom = Axiom {
    name: "prime_check",
    text: "IsPrime(p) ∧ IsPrime(q)",
};
const DISTINCT_PRIMES: Axiom = Axiom {
    name: "distinct_primes",
    text: "p ≠ q",
};
const COPRIME_EXPONENT: Axiom = Axiom {
    name: "coprime_exponent",
    text: "gcd(e, φ(n)) == 1",
};
const MATRIX_VALID: Axiom = Axiom {
    name: "matrix_valid",
    text: "matrix.IsValid()",
};
const DISTINCT_ROWS: Axiom = Axiom {
    name: "distinct_rows",
    text: "∀row: row.Distinct().Count() == 6",
};
const KEY_COVERS_TEXT: Axiom = Axiom {
    name: "key_covers_text",
    text: "key.Length >= text.Length",
};
const KEY_RANDOM: Axiom = Axiom {
    name: "key_random",
    text: "key.IsRandom",
};
const KEY_ALPHABET: Axiom = Axiom {
    name: "key_alphabet",
    text: "∀c∈key: c ∈ alphabet",
};

const CAESAR_AXIOMS: &[Axiom] = &[SHIFT_RANGE, ALPHABET_SIZE];
const VIGENERE_AXIOMS: &[Axiom] = &[KEY_LENGTH, NON_REPEATING, ALPHABET_BOUND];
const RSA_AXIOMS: &[Axiom] = &[POSITIVE_MODULUS, PRIME_CHECK, DISTINCT_PRIMES, COPRIME_EXPONENT];
const PLAYFAIR_AXIOMS: &[Axiom] = &[MATRIX_VALID, DISTINCT_ROWS, KEY_LENGTH];
const VERNAM_AXIOMS: &[Axiom] = &[KEY_COVERS_TEXT, KEY_RANDOM, KEY_ALPHABET];

lazy_static::lazy_static! {
    /// Lowercased identifiers, English and the workbench's Russian names
    static ref ALGORITHM_IDS: HashMap<&'static str, Algorithm> = {
        let mut ids = HashMap::new();
        ids.insert("caesar", Algorithm::Caesar);
        ids.insert("цезарь", Algorithm::Caesar);
        ids.insert("vigenere", Algorithm::Vigenere);
        ids.insert("vigenère", Algorithm::Vigenere);
        ids.insert("виженер", Algorithm::Vigenere);
        ids.insert("rsa", Algorithm::Rsa);
        ids.insert("playfair", Algorithm::Playfair);
        ids.insert("плейфер", Algorithm::Playfair);
        ids.insert("vernam", Algorithm::Vernam);
        ids.insert("вернам", Algorithm::Vernam);
        ids
    };
}

impl Algorithm {
    /// Look up a free-form identifier (trimmed, case-insensitive)
    pub fn from_id(id: &str) -> Self {
        let key = id.trim().to_lowercase();
        ALGORITHM_IDS
            .get(key.as_str())
            .copied()
            .unwrap_or(Algorithm::Unknown)
    }

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Caesar => "caesar",
            Algorithm::Vigenere => "vigenere",
            Algorithm::Rsa => "rsa",
            Algorithm::Playfair => "playfair",
            Algorithm::Vernam => "vernam",
            Algorithm::Unknown => "unknown",
        }
    }

    /// Domain axioms in injection order
    pub fn axioms(self) -> &'static [Axiom] {
        match self {
            Algorithm::Caesar => CAESAR_AXIOMS,
            Algorithm::Vigenere => VIGENERE_AXIOMS,
            Algorithm::Rsa => RSA_AXIOMS,
            Algorithm::Playfair => PLAYFAIR_AXIOMS,
            Algorithm::Vernam => VERNAM_AXIOMS,
            Algorithm::Unknown => &[],
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Ordered axioms for an algorithm identifier; empty when unrecognised
pub fn rules_for(algorithm_id: &str) -> Vec<Condition> {
    Algorithm::from_id(algorithm_id)
        .axioms()
        .iter()
        .map(Axiom::condition)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_counts() {
        assert_eq!(rules_for("caesar").len(), 2);
        assert_eq!(rules_for("vigenere").len(), 3);
        assert_eq!(rules_for("rsa").len(), 4);
        assert_eq!(rules_for("playfair").len(), 3);
        assert_eq!(rules_for("vernam").len(), 3);
        assert!(rules_for("aes").is_empty());
        assert!(rules_for("").is_empty());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Algorithm::from_id("RSA"), Algorithm::Rsa);
        assert_eq!(Algorithm::from_id("  Caesar "), Algorithm::Caesar);
        assert_eq!(Algorithm::from_id("ЦЕЗАРЬ"), Algorithm::Caesar);
        assert_eq!(Algorithm::from_id("Виженер"), Algorithm::Vigenere);
        assert_eq!(Algorithm::from_id("des"), Algorithm::Unknown);
    }

    #[test]
    fn test_rsa_axiom_order() {
        let texts: Vec<String> = rules_for("rsa").iter().map(|c| c.to_string()).collect();
        assert_eq!(
            texts,
            vec![
                "modulus > 1",
                "IsPrime(p) ∧ IsPrime(q)",
                "p ≠ q",
                "gcd(e, φ(n)) == 1"
            ]
        );
    }

    #[test]
    fn test_caesar_axioms() {
        let names: Vec<&str> = Algorithm::Caesar.axioms().iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["shift_range", "alphabet_size"]);
        assert_eq!(Algorithm::Caesar.to_string(), "caesar");
    }
}
