//! Brace-structured view of classified lines
//!
//! Used by [`BranchMode::Structured`](crate::config::BranchMode) to recover
//! `if`/`else` bodies so they can be analysed recursively. Every other block
//! (function bodies, loops) is transparent: the header stays an ordinary
//! statement followed by its body. Unbalanced braces never fail the parse.
//!
//! The parser keeps its open blocks on an explicit stack, so brace depth is
//! limited only by memory. `if` nesting beyond [`MAX_BRANCH_DEPTH`] is
//! flattened: the deeper guard is dropped and its body read as straight-line
//! code.

use crate::lexer::{starts_with_keyword, SourceLine};
use std::iter::Peekable;
use std::vec::IntoIter;

/// Deepest `if` nesting kept as branches
pub const MAX_BRANCH_DEPTH: usize = 64;

/// A statement of the structured view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// Straight-line statement
    Line(SourceLine),
    /// `if (guard) { then } else { else }`
    If {
        /// The conditional line
        line: SourceLine,
        /// Extracted guard text
        guard: String,
        /// Statements run when the guard holds
        then_body: Vec<Stmt>,
        /// Statements run otherwise; empty when there is no `else`
        else_body: Vec<Stmt>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Open,
    Close,
    Else,
    Line(SourceLine),
}

/// A block, or an `else` awaiting its single statement
#[derive(Debug)]
enum Frame {
    /// Flattened into the enclosing block when closed
    Transparent {
        header: Option<SourceLine>,
        body: Vec<Stmt>,
    },
    Then {
        line: SourceLine,
        guard: String,
        body: Vec<Stmt>,
    },
    Else {
        line: SourceLine,
        guard: String,
        then_body: Vec<Stmt>,
        body: Vec<Stmt>,
    },
    /// `else stmt` without braces
    ElseStatement {
        line: SourceLine,
        guard: String,
        then_body: Vec<Stmt>,
    },
}

impl Frame {
    fn is_branch(&self) -> bool {
        !matches!(self, Frame::Transparent { .. })
    }

    fn body_mut(&mut self) -> Option<&mut Vec<Stmt>> {
        match self {
            Frame::Transparent { body, .. }
            | Frame::Then { body, .. }
            | Frame::Else { body, .. } => Some(body),
            Frame::ElseStatement { .. } => None,
        }
    }
}

/// Folds classified lines into a statement tree
pub struct BlockParser {
    events: Peekable<IntoIter<Event>>,
    frames: Vec<Frame>,
    branch_depth: usize,
    root: Vec<Stmt>,
}

impl BlockParser {
    /// Creates a parser over classified lines
    pub fn new(lines: &[SourceLine]) -> Self {
        let mut events = Vec::new();
        for line in lines {
            push_events(&mut events, line);
        }
        BlockParser {
            events: events.into_iter().peekable(),
            frames: Vec::new(),
            branch_depth: 0,
            root: Vec::new(),
        }
    }

    /// Parse the whole input
    pub fn parse(mut self) -> Vec<Stmt> {
        while let Some(event) = self.events.next() {
            match event {
                Event::Open => self.push_frame(Frame::Transparent {
                    header: None,
                    body: Vec::new(),
                }),
                Event::Close => {
                    if self.frames.is_empty() {
                        tracing::warn!("Ignoring unmatched closing brace");
                    } else {
                        self.close_block();
                    }
                }
                Event::Else => tracing::warn!("Ignoring else without a preceding if"),
                Event::Line(line) => self.statement(line),
            }
        }

        if !self.frames.is_empty() {
            tracing::warn!("{} unterminated blocks at end of input", self.frames.len());
        }
        while !self.frames.is_empty() {
            self.close_block();
        }

        self.root
    }

    fn statement(&mut self, line: SourceLine) {
        let opens = matches!(self.events.peek(), Some(Event::Open));
        if opens {
            self.events.next();
        }

        let guard = line.guard().map(|guard| guard.condition.to_string());
        match guard {
            Some(guard) if self.branch_depth < MAX_BRANCH_DEPTH => {
                if opens {
                    self.push_frame(Frame::Then {
                        line,
                        guard,
                        body: Vec::new(),
                    });
                } else {
                    self.finish_if(line, guard, Vec::new());
                }
            }
            Some(_) => {
                tracing::warn!(
                    "Branch nesting deeper than {} at line {}; dropping guard",
                    MAX_BRANCH_DEPTH,
                    line.line
                );
                if opens {
                    self.push_frame(Frame::Transparent {
                        header: None,
                        body: Vec::new(),
                    });
                } else {
                    self.deliver(Vec::new());
                }
            }
            None if opens => self.push_frame(Frame::Transparent {
                header: Some(line),
                body: Vec::new(),
            }),
            None => self.deliver(vec![Stmt::Line(line)]),
        }
    }

    /// Then-body complete; attach an `else` if one follows
    fn finish_if(&mut self, line: SourceLine, guard: String, then_body: Vec<Stmt>) {
        if matches!(self.events.peek(), Some(Event::Else)) {
            self.events.next();
            match self.events.peek() {
                Some(Event::Open) => {
                    self.events.next();
                    self.push_frame(Frame::Else {
                        line,
                        guard,
                        then_body,
                        body: Vec::new(),
                    });
                    return;
                }
                Some(Event::Line(_)) => {
                    self.push_frame(Frame::ElseStatement {
                        line,
                        guard,
                        then_body,
                    });
                    return;
                }
                _ => {}
            }
        }

        self.deliver(vec![Stmt::If {
            line,
            guard,
            then_body,
            else_body: Vec::new(),
        }]);
    }

    /// Pop the innermost block and hand its statements to the enclosing one
    fn close_block(&mut self) {
        let Some(frame) = self.pop_frame() else {
            return;
        };

        match frame {
            Frame::Transparent { header, body } => {
                let mut stmts: Vec<Stmt> = header.map(Stmt::Line).into_iter().collect();
                stmts.extend(body);
                self.deliver(stmts);
            }
            Frame::Then { line, guard, body } => self.finish_if(line, guard, body),
            Frame::Else {
                line,
                guard,
                then_body,
                body,
            } => self.deliver(vec![Stmt::If {
                line,
                guard,
                then_body,
                else_body: body,
            }]),
            Frame::ElseStatement {
                line,
                guard,
                then_body,
            } => self.deliver(vec![Stmt::If {
                line,
                guard,
                then_body,
                else_body: Vec::new(),
            }]),
        }
    }

    /// Append finished statements to the innermost open block, completing
    /// any `else stmt` waiting for them
    fn deliver(&mut self, mut stmts: Vec<Stmt>) {
        while let Some(Frame::ElseStatement { .. }) = self.frames.last() {
            if let Some(Frame::ElseStatement {
                line,
                guard,
                then_body,
            }) = self.pop_frame()
            {
                stmts = vec![Stmt::If {
                    line,
                    guard,
                    then_body,
                    else_body: stmts,
                }];
            }
        }

        match self.frames.last_mut().and_then(Frame::body_mut) {
            Some(body) => body.extend(stmts),
            None => self.root.extend(stmts),
        }
    }

    fn push_frame(&mut self, frame: Frame) {
        if frame.is_branch() {
            self.branch_depth += 1;
        }
        self.frames.push(frame);
    }

    fn pop_frame(&mut self) -> Option<Frame> {
        let frame = self.frames.pop()?;
        if frame.is_branch() {
            self.branch_depth -= 1;
        }
        Some(frame)
    }
}

/// Split one line into brace and statement events.
///
/// `} else {` yields close, else, open; `function f(x) {` yields the header
/// line then open; `if (a) x := 1` yields `if (a)`, open, `x := 1`, close.
fn push_events(events: &mut Vec<Event>, line: &SourceLine) {
    let mut text = line.text.as_str();

    while let Some(rest) = text.strip_prefix('}') {
        events.push(Event::Close);
        text = rest.trim_start();
    }

    if let Some(rest) = strip_else(text) {
        events.push(Event::Else);
        text = rest;
    }

    let opens = text.ends_with('{');
    if opens {
        text = text[..text.len() - 1].trim_end();
    }

    let mut inline_blocks = 0;
    if !opens {
        while let Some((header, body)) = split_inline_if(text) {
            events.push(Event::Line(SourceLine::new(header, line.line)));
            events.push(Event::Open);
            inline_blocks += 1;
            text = body;
        }
    }

    if !text.is_empty() {
        events.push(Event::Line(SourceLine::new(text, line.line)));
    }
    if opens {
        events.push(Event::Open);
    }
    events.extend((0..inline_blocks).map(|_| Event::Close));
}

fn strip_else(text: &str) -> Option<&str> {
    if !starts_with_keyword(text, "else") {
        return None;
    }
    let rest = &text[4..];
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' => None,
        _ => Some(rest.trim_start()),
    }
}

/// Split `if (B) stmt` into the `if (B)` header and the inline statement
fn split_inline_if(text: &str) -> Option<(&str, &str)> {
    let rest_len = SourceLine::new(text, 0).guard()?.rest.len();
    let split = text.len() - rest_len;
    let body = text[split..]
        .trim_start_matches('{')
        .trim_end_matches('}')
        .trim();
    if body.is_empty() {
        return None;
    }
    Some((text[..split].trim_end(), body))
}
