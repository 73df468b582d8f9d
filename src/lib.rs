//! # crypto-wp - Security Preconditions for Cipher Pseudocode
//!
//! A small backward analysis engine that derives a *security precondition*
//! for a pseudocode description of a cryptographic algorithm, in the
//! weakest-precondition tradition. Intended for teaching: the engine is not
//! a sound verifier and its security verdict is a lexical heuristic.
//!
//! ## Quick Start
//!
//! ```rust
//! use crypto_wp::analyze_crypto_algorithm;
//!
//! let result = analyze_crypto_algorithm(
//!     "caesar",
//!     "shift := 0\nresult := encrypt(text, shift)",
//!     "decrypt(result, shift) = text",
//! );
//!
//! // the literal 0 survives into the precondition
//! assert!(!result.is_secure);
//! assert!(result.hoare_triple.contains("ALGORITHM: caesar"));
//! ```
//!
//! ## How It Works
//!
//! ```text
//! pseudocode → LineScanner → classified lines ─┐
//! algorithm id → rule catalog → axioms ────────┤
//!                                              ▼
//!                 backward substitution (last line first)
//!                                              │
//!                    precondition ─┬─ verdict heuristic
//!                                  └─ Hoare triple
//! ```
//!
//! - **Assignments** `x := e` substitute `(e)` for every whole word `x` and
//!   prepend guards such as `denominator ≠ 0` when `e` divides
//! - **Conditionals** `if (B)` become `( B ∧ wp(secure_branch, Q) ) ∨ ( ¬B ∧ wp(fallback_branch, Q) )`
//! - **Crypto mentions** prepend `IsValidEncryption(text, key)` or
//!   `IsValidDecryption(ciphertext, key)`
//!
//! ## Main Components
//!
//! - [`LineScanner`] - Splits and classifies pseudocode lines
//! - [`Condition`] - Symbolic condition tree with whole-word substitution
//! - [`rules`] - Domain axioms and generic safety checks
//! - [`SecurityAnalyzer`] - The backward analysis
//! - [`AnalyzerOptions`] - Branch mode, safety checks, message locale
//! - [`parallel`] - Batch analysis on a thread pool

/// Version of the analyzer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod analysis;
pub mod condition;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parallel;
pub mod rules;

// Re-export main types
pub use analysis::{
    analyze_crypto_algorithm, assessment_text, format_triple, is_secure, AnalysisRequest,
    AnalysisResult, AnalysisStep, HoareTriple, SecurityAnalyzer, StepKind,
};
pub use condition::{Condition, Term};
pub use config::{AnalyzerOptions, BranchMode, Locale};
pub use error::{Error, Result};
pub use lexer::{classify_lines, LineKind, LineScanner, SourceLine};
pub use rules::{generic_safety_checks_for, rules_for, Algorithm, Axiom, SafetyCheck};
