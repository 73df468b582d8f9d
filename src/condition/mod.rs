//! # Symbolic Security Conditions
//!
//! A condition is a small tree of logical connectives over opaque [`Term`]s.
//! Terms are never parsed into an expression grammar; they are split at
//! word boundaries only, which is enough for whole-word substitution.
//!
//! ## Rendering
//!
//! Every node renders to a fixed textual shape, so the string form of a
//! derivation is reproducible:
//!
//! ```text
//! Atom        decrypt(result, shift) = text
//! All         denominator ≠ 0 ∧ modulus > 0
//! Guarded     premise ∧ (body)
//! Branches    ( B ∧ S ) ∨ ( ¬B ∧ F )
//! Wp          wp(secure_branch, Q)
//! ```

mod term;

pub use term::{Fragment, Term};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A symbolic security assertion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Opaque assertion text
    Atom(Term),

    /// Flat conjunction of guards, rendered without parentheses
    All(Vec<Condition>),

    /// `p1 ∧ (p2 ∧ (… ∧ (body)))`: premises conjoined to the front of a
    /// condition, one per injection.
    ///
    /// The run is stored flat so that long listings do not produce a deep
    /// tree; [`Condition::guarded_by`] keeps `body` free of further `Guarded`
    /// nodes.
    Guarded {
        /// Injected premises (axioms, safety guards, validity predicates),
        /// innermost first
        premises: Vec<Condition>,
        /// The condition they were conjoined to
        body: Box<Condition>,
    },

    /// Case split on a branch guard: `( B ∧ S ) ∨ ( ¬B ∧ F )`
    Branches {
        /// The guard `B`
        guard: Term,
        /// Condition required when the guard holds
        secure: Box<Condition>,
        /// Condition required when the guard fails
        fallback: Box<Condition>,
    },

    /// Unanalysed branch body: `wp(label, post)`
    Wp {
        /// Which branch the placeholder stands for
        branch: Branch,
        /// Postcondition the branch must establish
        post: Box<Condition>,
    },
}

/// Branch labels used by [`Condition::Wp`] placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    /// Taken when the guard holds
    Secure,
    /// Taken when the guard fails
    Fallback,
}

impl Branch {
    /// Label rendered inside `wp(...)`
    pub fn label(self) -> &'static str {
        match self {
            Branch::Secure => "secure_branch",
            Branch::Fallback => "fallback_branch",
        }
    }
}

impl Condition {
    /// An opaque assertion
    pub fn atom(text: &str) -> Self {
        Condition::Atom(Term::parse(text))
    }

    /// Conjunction of atoms; `None` when there are none
    pub fn all<'a>(texts: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let items: Vec<Condition> = texts.into_iter().map(Condition::atom).collect();
        if items.is_empty() {
            None
        } else {
            Some(Condition::All(items))
        }
    }

    /// Conjoin `premise` to the front: `premise ∧ (self)`
    pub fn guarded_by(self, premise: Condition) -> Self {
        match self {
            Condition::Guarded { mut premises, body } => {
                premises.push(premise);
                Condition::Guarded { premises, body }
            }
            body => Condition::Guarded {
                premises: vec![premise],
                body: Box::new(body),
            },
        }
    }

    /// Case split with explicit branch conditions
    pub fn branches(guard: Term, secure: Condition, fallback: Condition) -> Self {
        Condition::Branches {
            guard,
            secure: Box::new(secure),
            fallback: Box::new(fallback),
        }
    }

    /// Case split whose branch bodies are left as `wp(...)` placeholders
    pub fn placeholder_branches(guard: Term, post: Condition) -> Self {
        let secure = Condition::Wp {
            branch: Branch::Secure,
            post: Box::new(post.clone()),
        };
        let fallback = Condition::Wp {
            branch: Branch::Fallback,
            post: Box::new(post),
        };
        Condition::branches(guard, secure, fallback)
    }

    /// Replace every whole occurrence of `target` with `(replacement)`
    /// throughout the tree. Terms without the target are left as they are.
    pub fn substitute(&self, target: &Term, replacement: &Term) -> Self {
        match self {
            Condition::Atom(term) => Condition::Atom(term.substitute(target, replacement)),
            Condition::All(items) => Condition::All(
                items
                    .iter()
                    .map(|item| item.substitute(target, replacement))
                    .collect(),
            ),
            Condition::Guarded { premises, body } => Condition::Guarded {
                premises: premises
                    .iter()
                    .map(|premise| premise.substitute(target, replacement))
                    .collect(),
                body: Box::new(body.substitute(target, replacement)),
            },
            Condition::Branches {
                guard,
                secure,
                fallback,
            } => Condition::Branches {
                guard: guard.substitute(target, replacement),
                secure: Box::new(secure.substitute(target, replacement)),
                fallback: Box::new(fallback.substitute(target, replacement)),
            },
            Condition::Wp { branch, post } => Condition::Wp {
                branch: *branch,
                post: Box::new(post.substitute(target, replacement)),
            },
        }
    }

    /// Identifiers occurring anywhere in the condition
    pub fn identifiers(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_identifiers(&mut out);
        out
    }

    fn collect_identifiers(&self, out: &mut BTreeSet<String>) {
        match self {
            Condition::Atom(term) => term.collect_identifiers(out),
            Condition::All(items) => items.iter().for_each(|item| item.collect_identifiers(out)),
            Condition::Guarded { premises, body } => {
                premises
                    .iter()
                    .for_each(|premise| premise.collect_identifiers(out));
                body.collect_identifiers(out);
            }
            Condition::Branches {
                guard,
                secure,
                fallback,
            } => {
                guard.collect_identifiers(out);
                secure.collect_identifiers(out);
                fallback.collect_identifiers(out);
            }
            Condition::Wp { post, .. } => post.collect_identifiers(out),
        }
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        match self {
            Condition::Atom(_) => 1,
            Condition::All(items) => 1 + items.iter().map(Condition::size).sum::<usize>(),
            Condition::Guarded { premises, body } => {
                premises.iter().map(|p| 1 + p.size()).sum::<usize>() + body.size()
            }
            Condition::Branches {
                secure, fallback, ..
            } => 1 + secure.size() + fallback.size(),
            Condition::Wp { post, .. } => 1 + post.size(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Atom(term) => write!(f, "{}", term),
            Condition::All(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ∧ ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Condition::Guarded { premises, body } => {
                for premise in premises.iter().rev() {
                    write!(f, "{} ∧ (", premise)?;
                }
                write!(f, "{}", body)?;
                for _ in premises {
                    f.write_str(")")?;
                }
                Ok(())
            }
            Condition::Branches {
                guard,
                secure,
                fallback,
            } => write!(
                f,
                "( {} ∧ {} ) ∨ ( ¬{} ∧ {} )",
                guard,
                Operand(secure),
                guard,
                Operand(fallback)
            ),
            Condition::Wp { branch, post } => write!(f, "wp({}, {})", branch.label(), post),
        }
    }
}

/// Branch operand; nested disjunctions get their own parentheses
struct Operand<'a>(&'a Condition);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Condition::Branches { .. } => write!(f, "({})", self.0),
            other => write!(f, "{}", other),
        }
    }
}
