//! AST representing a template.
//!
//! The tree only knows about conditional blocks. Placeholders are not part of
//! the tree, they are substituted in the resolved text afterwards.

use crate::types::span::Span;

#[derive(Debug, Clone)]
pub struct Template<'source> {
    pub source: &'source str,
    pub scope: Scope,
}

/// An ordered sequence of nodes, the content of a block.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone)]
pub enum Node {
    /// Raw template text, emitted verbatim.
    Text(Span),
    /// An `[[IF]] ... [[/IF]]` block.
    Cond(Conditional),
}

#[derive(Debug, Clone)]
pub struct Conditional {
    /// The span of the opening `[[IF ...]]` tag.
    pub span: Span,
    pub clauses: Vec<Clause>,
}

#[derive(Debug, Clone)]
pub struct Clause {
    /// The condition expression, `None` for an `[[ELSE]]` clause.
    pub cond: Option<Span>,
    /// The span of the tag that opened this clause.
    pub span: Span,
    pub body: Scope,
}

impl Scope {
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl Conditional {
    pub fn new(span: Span) -> Self {
        Self {
            span,
            clauses: Vec::new(),
        }
    }

    /// Returns true if any clause is an `[[ELSE]]` clause.
    pub fn has_else(&self) -> bool {
        self.clauses.iter().any(|c| c.cond.is_none())
    }
}
