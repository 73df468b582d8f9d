//! # Security-Condition Analysis
//!
//! Backward analysis of cipher pseudocode. Starting from a desired security
//! postcondition, the engine walks the classified lines last-to-first and
//! threads one running [`Condition`](crate::condition::Condition) through them:
//!
//! ```text
//! postcondition → axioms → lines (reversed) → precondition
//!                                                ├─ verdict heuristic
//!                                                └─ rendered Hoare triple
//! ```
//!
//! Every transformation is recorded as an [`AnalysisStep`], oldest first.
//!
//! ## Example
//!
//! ```rust
//! use crypto_wp::analyze_crypto_algorithm;
//!
//! let result = analyze_crypto_algorithm("caesar", "x := 5\ny := x + 10", "y > 10");
//! assert!(result.final_precondition.contains("5"));
//! assert_eq!(result.axiom_steps().count(), 2);
//! ```

mod engine;
mod messages;
pub mod structure;
pub mod triple;
pub mod verdict;

pub use engine::{analyze_crypto_algorithm, SecurityAnalyzer};
pub use triple::{format_triple, HoareTriple};
pub use verdict::{assessment_text, is_secure};

use crate::condition::Term;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One recorded transformation of the running condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStep {
    /// What happened
    pub description: String,
    /// Condition (or injected axiom) produced by this step
    pub expression: String,
    /// Safety or domain rule applied, empty if none
    pub security_check: String,
    /// Transition that produced the step
    pub kind: StepKind,
}

/// Transition kinds of the backward analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Raw postcondition captured at the start
    Initialization,
    /// Domain axiom injected before traversal
    Axiom,
    /// Substitution through `x := e`
    Assignment,
    /// Case split on an `if` guard
    Branch,
    /// Validity predicate for an encrypt/decrypt mention
    CryptoOperation,
}

/// Everything one analysis produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Recorded transformations, oldest first; never empty
    pub steps: Vec<AnalysisStep>,
    /// Derived precondition, rendered
    pub final_precondition: String,
    /// Verdict of the lexical heuristic
    pub is_secure: bool,
    /// Human-readable verdict
    pub security_assessment: String,
    /// Rendered `{pre} algorithm/code {post}` block
    pub hoare_triple: String,
}

impl AnalysisResult {
    /// Steps that injected a domain axiom
    pub fn axiom_steps(&self) -> impl Iterator<Item = &AnalysisStep> {
        self.steps_of(StepKind::Axiom)
    }

    /// Steps of one kind, in derivation order
    pub fn steps_of(&self, kind: StepKind) -> impl Iterator<Item = &AnalysisStep> {
        self.steps.iter().filter(move |step| step.kind == kind)
    }

    /// Identifiers still present in the final precondition.
    ///
    /// Predicate and property names such as `IsPrime` or `Length` are
    /// identifiers too; numeric literals are not.
    pub fn free_variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        Term::parse(&self.final_precondition).collect_identifiers(&mut out);
        out
    }

    /// Serialize for the presentation layer
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::SerializationError(e.to_string()))
    }
}

/// Input of one analysis
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Algorithm identifier, matched case-insensitively
    pub algorithm: String,
    /// Pseudocode; absent means empty
    #[serde(default)]
    pub code: String,
    /// Desired security postcondition
    pub postcondition: String,
}

impl AnalysisRequest {
    /// Creates a request
    pub fn new(
        algorithm: impl Into<String>,
        code: impl Into<String>,
        postcondition: impl Into<String>,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            code: code.into(),
            postcondition: postcondition.into(),
        }
    }
}
