//! Backward substitution core

use super::structure::{BlockParser, Stmt};
use super::triple::HoareTriple;
use super::verdict;
use super::{AnalysisRequest, AnalysisResult, AnalysisStep, StepKind};
use crate::condition::{Condition, Term};
use crate::config::{AnalyzerOptions, BranchMode};
use crate::lexer::{classify_lines, LineKind, SourceLine};
use crate::rules::{safety, Algorithm};

/// Derives security preconditions for cipher pseudocode.
///
/// Holds only its options, so one analyzer can be shared freely between
/// threads; every call returns an independent [`AnalysisResult`].
#[derive(Debug, Clone, Default)]
pub struct SecurityAnalyzer {
    options: AnalyzerOptions,
}

impl SecurityAnalyzer {
    /// Creates an analyzer with the given options
    pub fn new(options: AnalyzerOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Run the backward analysis.
    ///
    /// Never fails: unrecognised algorithms get no axioms, empty code only
    /// records the initial and axiom steps, and malformed lines are skipped.
    pub fn analyze(&self, algorithm_id: &str, code: &str, postcondition: &str) -> AnalysisResult {
        let algorithm = Algorithm::from_id(algorithm_id);
        let locale = self.options.locale;
        let lines = classify_lines(code);

        tracing::debug!(
            "Analyzing {} ({}) with {} lines in {:?} mode",
            algorithm_id,
            algorithm,
            lines.len(),
            self.options.branch_mode
        );

        let mut derivation = Derivation::new(algorithm, &self.options);

        let mut running = Condition::atom(postcondition.trim());
        derivation.record(
            StepKind::Initialization,
            locale.initial_description(algorithm_id),
            running.to_string(),
            locale.initial_check().to_string(),
        );

        for axiom in algorithm.axioms() {
            running = running.guarded_by(axiom.condition());
            derivation.record(
                StepKind::Axiom,
                locale.axiom_description(axiom),
                axiom.text.to_string(),
                locale.axiom_check().to_string(),
            );
        }

        let precondition = match self.options.branch_mode {
            BranchMode::Placeholder => lines
                .iter()
                .rev()
                .fold(running, |post, line| derivation.apply_line(line, post)),
            BranchMode::Structured => {
                let stmts = BlockParser::new(&lines).parse();
                derivation.wp_sequence(&stmts, running)
            }
        };

        let final_precondition = precondition.to_string();
        let is_secure = verdict::is_secure(&final_precondition);
        if !is_secure {
            tracing::debug!(
                "Precondition for {} rejected by verdict heuristic: {:?}",
                algorithm_id,
                verdict::disqualifying_tokens(&final_precondition)
            );
        }

        let hoare_triple = HoareTriple {
            precondition: &final_precondition,
            algorithm: algorithm_id,
            code,
            postcondition,
            locale,
        }
        .to_string();

        let steps = derivation.into_steps();
        tracing::debug!(
            "Analysis of {} finished: {} steps, secure = {}",
            algorithm_id,
            steps.len(),
            is_secure
        );

        AnalysisResult {
            steps,
            security_assessment: locale.assessment(is_secure, algorithm_id),
            final_precondition,
            is_secure,
            hoare_triple,
        }
    }

    /// Run the analysis for a request
    pub fn analyze_request(&self, request: &AnalysisRequest) -> AnalysisResult {
        self.analyze(&request.algorithm, &request.code, &request.postcondition)
    }
}

/// Analyze with default options
pub fn analyze_crypto_algorithm(
    algorithm_id: &str,
    code: &str,
    security_postcondition: &str,
) -> AnalysisResult {
    SecurityAnalyzer::default().analyze(algorithm_id, code, security_postcondition)
}

/// Step log and per-line transitions of one analysis
struct Derivation<'a> {
    algorithm: Algorithm,
    options: &'a AnalyzerOptions,
    steps: Vec<AnalysisStep>,
}

impl<'a> Derivation<'a> {
    fn new(algorithm: Algorithm, options: &'a AnalyzerOptions) -> Self {
        Self {
            algorithm,
            options,
            steps: Vec::new(),
        }
    }

    fn record(
        &mut self,
        kind: StepKind,
        description: String,
        expression: String,
        security_check: String,
    ) {
        tracing::trace!("{:?} step: {}", kind, expression);
        self.steps.push(AnalysisStep {
            description,
            expression,
            security_check,
            kind,
        });
    }

    fn into_steps(self) -> Vec<AnalysisStep> {
        self.steps
    }

    /// Transition for one line; lines that cannot be applied leave `post`
    /// unchanged and record nothing.
    fn apply_line(&mut self, line: &SourceLine, post: Condition) -> Condition {
        match line.kind {
            LineKind::Assignment => self.assign(line, post),
            LineKind::Conditional => match line.guard() {
                Some(guard) => {
                    let next =
                        Condition::placeholder_branches(Term::parse(guard.condition), post);
                    self.record_branch(guard.condition, &next);
                    next
                }
                None => {
                    tracing::trace!("No guard in line {}: {}", line.line, line.text);
                    post
                }
            },
            LineKind::CryptoOperation => match line.crypto_op() {
                Some(op) => {
                    let locale = self.options.locale;
                    let next = post.guarded_by(Condition::atom(op.validity_predicate()));
                    self.record(
                        StepKind::CryptoOperation,
                        locale.crypto_description(op).to_string(),
                        next.to_string(),
                        locale.crypto_check(op).to_string(),
                    );
                    next
                }
                None => post,
            },
            LineKind::Other => post,
        }
    }

    /// `x := e`: guards for `e`, then `(e)` substituted for every whole `x`
    fn assign(&mut self, line: &SourceLine, post: Condition) -> Condition {
        let assignment = match line.assignment() {
            Some(assignment) => assignment,
            None => {
                tracing::warn!(
                    "Skipping malformed assignment in line {}: {}",
                    line.line,
                    line.text
                );
                return post;
            }
        };

        let guard = if self.options.safety_checks {
            safety::combined_guard(assignment.expression, self.algorithm)
        } else {
            None
        };
        let check = guard.as_ref().map(ToString::to_string).unwrap_or_default();

        let substituted = post.substitute(
            &Term::parse(assignment.target),
            &Term::parse(assignment.expression),
        );
        let next = match guard {
            Some(guard) => substituted.guarded_by(guard),
            None => substituted,
        };

        self.record(
            StepKind::Assignment,
            self.options.locale.assignment_description(&line.text),
            next.to_string(),
            check,
        );
        next
    }

    fn record_branch(&mut self, guard: &str, next: &Condition) {
        let locale = self.options.locale;
        self.record(
            StepKind::Branch,
            locale.branch_description().to_string(),
            next.to_string(),
            locale.branch_check(guard),
        );
    }

    fn wp_sequence(&mut self, stmts: &[Stmt], post: Condition) -> Condition {
        stmts
            .iter()
            .rev()
            .fold(post, |post, stmt| self.wp_statement(stmt, post))
    }

    fn wp_statement(&mut self, stmt: &Stmt, post: Condition) -> Condition {
        match stmt {
            Stmt::Line(line) => self.apply_line(line, post),
            Stmt::If {
                line,
                guard,
                then_body,
                else_body,
            } => {
                tracing::trace!(
                    "Branch at line {}: {} then / {} else statements",
                    line.line,
                    then_body.len(),
                    else_body.len()
                );
                let secure = self.wp_sequence(then_body, post.clone());
                let fallback = self.wp_sequence(else_body, post);
                let next = Condition::branches(Term::parse(guard), secure, fallback);
                self.record_branch(guard, &next);
                next
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Locale;

    #[test]
    fn test_start_and_axiom_steps() {
        let result = analyze_crypto_algorithm("caesar", "", "true");

        assert_eq!(result.steps.len(), 3);
        assert_eq!(result.steps[0].kind, StepKind::Initialization);
        assert_eq!(result.steps[0].expression, "true");
        assert_eq!(result.steps[0].security_check, "initialization");
        assert_eq!(result.steps[1].expression, "shift >= 1 ∧ shift <= 32");
        assert_eq!(result.steps[1].security_check, "cryptographic check");
        assert_eq!(
            result.final_precondition,
            "alphabet.Length == 33 ∧ (shift >= 1 ∧ shift <= 32 ∧ (true))"
        );
    }

    #[test]
    fn test_assignment_substitution_chain() {
        let result = analyze_crypto_algorithm("none", "x := 5\ny := x + 10", "y > 10");

        assert_eq!(result.final_precondition, "((5) + 10) > 10");
        let assignments: Vec<&str> = result
            .steps_of(StepKind::Assignment)
            .map(|s| s.expression.as_str())
            .collect();
        assert_eq!(assignments, vec!["(x + 10) > 10", "((5) + 10) > 10"]);
        assert!(result.steps[1].description.ends_with("y := x + 10"));
    }

    #[test]
    fn test_assignment_guard_is_recorded() {
        let result = analyze_crypto_algorithm("caesar", "result := value / divisor;", "result > 1");
        let step = result.steps_of(StepKind::Assignment).next().unwrap();

        assert_eq!(step.security_check, "denominator ≠ 0");
        assert!(step.expression.starts_with("denominator ≠ 0 ∧ ("));
        assert!(result.final_precondition.contains("(value / divisor) > 1"));
    }

    #[test]
    fn test_placeholder_branch() {
        let result = analyze_crypto_algorithm("x", "if (k > 1) {", "ok");
        assert_eq!(
            result.final_precondition,
            "( k > 1 ∧ wp(secure_branch, ok) ) ∨ ( ¬k > 1 ∧ wp(fallback_branch, ok) )"
        );
        let step = result.steps_of(StepKind::Branch).next().unwrap();
        assert_eq!(step.security_check, "Guard check: k > 1");
    }

    #[test]
    fn test_crypto_operations() {
        let result = analyze_crypto_algorithm("x", "decrypt(c, k)\nencrypt(m, k)", "ok");
        // last line first
        assert_eq!(
            result.final_precondition,
            "IsValidDecryption(ciphertext, key) ∧ (IsValidEncryption(text, key) ∧ (ok))"
        );
    }

    #[test]
    fn test_noop_lines_are_not_recorded() {
        let result = analyze_crypto_algorithm("x", "return r;\nif x > 1\na := b := c\n}", "ok");
        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.final_precondition, "ok");
    }

    #[test]
    fn test_doubled_assign_operator_is_noop() {
        for code in ["x :=:= 5", ":= x := 5", "x := 5 :="] {
            let result = analyze_crypto_algorithm("none", code, "x > 1");
            assert_eq!(result.final_precondition, "x > 1", "code {:?}", code);
            assert_eq!(result.steps.len(), 1);
        }
    }

    #[test]
    fn test_safety_checks_can_be_disabled() {
        let analyzer = SecurityAnalyzer::new(AnalyzerOptions {
            safety_checks: false,
            ..AnalyzerOptions::default()
        });
        let result = analyzer.analyze("x", "r := a / b", "r > 1");
        assert_eq!(result.final_precondition, "(a / b) > 1");
        assert_eq!(result.steps[1].security_check, "");
    }

    #[test]
    fn test_structured_branches() {
        let analyzer = SecurityAnalyzer::new(AnalyzerOptions::structured());
        let code = "if (k > 1) {\n  c := m + k\n} else {\n  c := m\n}";
        let result = analyzer.analyze("x", code, "c > 1");

        assert_eq!(
            result.final_precondition,
            "( k > 1 ∧ (m + k) > 1 ) ∨ ( ¬k > 1 ∧ (m) > 1 )"
        );
        let kinds: Vec<StepKind> = result.steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::Initialization,
                StepKind::Assignment,
                StepKind::Assignment,
                StepKind::Branch
            ]
        );
    }

    #[test]
    fn test_structured_missing_else_keeps_post() {
        let analyzer = SecurityAnalyzer::new(AnalyzerOptions::structured());
        let result = analyzer.analyze("x", "if (ok) {\n  r := 1\n}", "r > 1");
        assert_eq!(result.final_precondition, "( ok ∧ (1) > 1 ) ∨ ( ¬ok ∧ r > 1 )");
    }

    #[test]
    fn test_russian_locale() {
        let analyzer = SecurityAnalyzer::new(AnalyzerOptions {
            locale: Locale::Ru,
            ..AnalyzerOptions::default()
        });
        let result = analyzer.analyze("цезарь", "", "true");
        assert_eq!(result.steps[0].security_check, "Инициализация анализа");
        assert_eq!(result.axiom_steps().count(), 2);
        assert!(result.security_assessment.contains("'цезарь'"));
        assert!(result.hoare_triple.contains("АЛГОРИТМ: цезарь"));
    }
}
