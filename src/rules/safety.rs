//! Generic safety checks derived from the literal text of an assigned
//! expression.
//!
//! Detection is lexical: a `/` anywhere means a divisor guard, `sqrt(` an
//! argument guard, `%` or `mod` a modulus guard. Caesar and RSA add their
//! own parameter guards.

use super::Algorithm;
use crate::condition::{Condition, Term};
use regex::Regex;

/// A guard injected in front of a substituted condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyCheck {
    /// Expression divides
    DivisorNonZero,
    /// Expression takes a square root
    SqrtArgument,
    /// Expression reduces modulo something
    PositiveModulus,
    /// Caesar expression reads `shift`
    ShiftRange,
    /// RSA expression multiplies `p * q`
    DistinctPrimes,
    /// RSA expression calls modular exponentiation
    ModPowDomain,
}

impl SafetyCheck {
    /// Guard text
    pub fn text(self) -> &'static str {
        match self {
            SafetyCheck::DivisorNonZero => "denominator ≠ 0",
            SafetyCheck::SqrtArgument => "sqrt_argument ≥ 0",
            SafetyCheck::PositiveModulus => "modulus > 0",
            SafetyCheck::ShiftRange => "1 ≤ shift ≤ 32",
            SafetyCheck::DistinctPrimes => "p > 1 ∧ q > 1 ∧ p ≠ q",
            SafetyCheck::ModPowDomain => "base ≥ 0 ∧ exponent ≥ 0 ∧ modulus > 1",
        }
    }
}

lazy_static::lazy_static! {
    static ref PRIME_PRODUCT: Regex = Regex::new(r"\bp\s*\*\s*q\b").unwrap();
    static ref MOD_POW_CALL: Regex =
        Regex::new(r"(?i)\b(mod_?pow|pow_?mod)\s*\(").unwrap();
}

/// Checks triggered by `expression`, in a fixed order
pub fn generic_safety_checks_for(expression: &str, algorithm: Algorithm) -> Vec<SafetyCheck> {
    let mut checks = Vec::new();

    if expression.contains('/') {
        checks.push(SafetyCheck::DivisorNonZero);
    }
    if expression.contains("sqrt(") {
        checks.push(SafetyCheck::SqrtArgument);
    }
    if expression.contains("mod") || expression.contains('%') {
        checks.push(SafetyCheck::PositiveModulus);
    }

    match algorithm {
        Algorithm::Caesar => {
            if Term::parse(expression).contains_word("shift") {
                checks.push(SafetyCheck::ShiftRange);
            }
        }
        Algorithm::Rsa => {
            if PRIME_PRODUCT.is_match(expression) {
                checks.push(SafetyCheck::DistinctPrimes);
            }
            if MOD_POW_CALL.is_match(expression) {
                checks.push(SafetyCheck::ModPowDomain);
            }
        }
        _ => {}
    }

    checks
}

/// All triggered checks conjoined into one guard, or `None`
pub fn combined_guard(expression: &str, algorithm: Algorithm) -> Option<Condition> {
    Condition::all(
        generic_safety_checks_for(expression, algorithm)
            .into_iter()
            .map(SafetyCheck::text),
    )
}
