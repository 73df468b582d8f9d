//! Analyzer configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Options for security-condition analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerOptions {
    /// How conditional lines are handled
    /// Default: `Placeholder`
    pub branch_mode: BranchMode,

    /// Inject generic safety guards on assignments
    /// Default: true
    pub safety_checks: bool,

    /// Language of step descriptions, assessments and triple labels
    /// Default: `En`
    pub locale: Locale,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            branch_mode: BranchMode::Placeholder,
            safety_checks: true,
            locale: Locale::En,
        }
    }
}

impl AnalyzerOptions {
    /// Parse options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::invalid_options(e.to_string()))
    }

    /// Options with recursive branch analysis enabled
    pub fn structured() -> Self {
        Self {
            branch_mode: BranchMode::Structured,
            ..Self::default()
        }
    }
}

/// Treatment of `if (B) ...` lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchMode {
    /// Branch bodies stay symbolic: `wp(secure_branch, Q)` / `wp(fallback_branch, Q)`
    #[default]
    Placeholder,
    /// Brace-delimited branch bodies are analysed recursively
    Structured,
}

/// Message language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Russian
    Ru,
}
