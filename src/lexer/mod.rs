//! Line classification for pseudocode
//!
//! Splits raw pseudocode into trimmed, non-empty lines and classifies each
//! as a conditional, an assignment, a crypto-operation mention or other.

mod line;
mod line_scanner;

pub(crate) use line::starts_with_keyword;
pub use line::{Assignment, CryptoOp, Guard, LineKind, SourceLine, ASSIGN_OP};
pub use line_scanner::LineScanner;

/// Classify every retained line of `code`
pub fn classify_lines(code: &str) -> Vec<SourceLine> {
    LineScanner::new(code).scan_lines()
}
