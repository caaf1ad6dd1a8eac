use std::mem;

use tracing::debug;

use crate::compile::lex::{Keyword, Lexer, Tag, Token};
use crate::types::ast;
use crate::types::span::Span;
use crate::{Engine, Error, Result};

/// A parser that constructs an AST from a token stream.
///
/// The parser is implemented without recursion so that conditionals can be
/// nested to any depth.
pub struct Parser<'engine, 'source> {
    engine: &'engine Engine,

    /// A lexer that tokenizes the template source.
    tokens: Lexer<'source>,
}

/// An open `[[IF]]` block.
struct Frame {
    /// The scope the conditional is inserted into once it is closed.
    parent: ast::Scope,
    /// The conditional with all of its completed clauses.
    cond: ast::Conditional,
    /// The clause currently collecting content, `None` for `[[ELSE]]`.
    head: (Option<Span>, Span),
}

impl<'engine, 'source> Parser<'engine, 'source> {
    /// Construct a new parser.
    pub fn new(engine: &'engine Engine, source: &'source str) -> Self {
        Self {
            engine,
            tokens: Lexer::new(source),
        }
    }

    /// Parses a template.
    ///
    /// The parser keeps a stack of open blocks. Each block remembers the scope
    /// it was opened in, while `scope` always refers to the body of the
    /// innermost clause being collected.
    pub fn parse_template(mut self) -> Result<ast::Template<'source>> {
        let mut blocks: Vec<Frame> = Vec::new();
        let mut scope = ast::Scope::new();

        while let Some(token) = self.tokens.next() {
            let tag = match token {
                Token::Raw(span) => {
                    scope.nodes.push(ast::Node::Text(span));
                    continue;
                }
                Token::Tag(tag) => tag,
            };

            match tag.keyword {
                // The start of a conditional, e.g.
                //
                //   [[IF cond]]
                //
                // The current scope is stashed in the new frame and content is
                // collected into the first clause from now on.
                Keyword::If => {
                    blocks.push(Frame {
                        parent: mem::take(&mut scope),
                        cond: ast::Conditional::new(tag.span),
                        head: (Some(tag.arg), tag.span),
                    });
                }

                // A new clause of the innermost conditional, e.g.
                //
                //   [[ELIF cond]]
                //   [[ELSE]]
                Keyword::ElseIf | Keyword::Else => {
                    let frame = self.expect_open(&mut blocks, &tag)?;
                    if frame.head.0.is_none() || frame.cond.has_else() {
                        debug!(
                            tag = %tag.keyword,
                            offset = tag.span.m,
                            "clause follows an `ELSE` and is unreachable"
                        );
                    }
                    let cond = (tag.keyword == Keyword::ElseIf).then_some(tag.arg);
                    let head = mem::replace(&mut frame.head, (cond, tag.span));
                    close_clause(&mut frame.cond, head, mem::take(&mut scope));
                }

                // The end of the innermost conditional, e.g.
                //
                //   [[/IF]]
                Keyword::EndIf => {
                    self.expect_open(&mut blocks, &tag)?;
                    if let Some(frame) = blocks.pop() {
                        scope = finish(frame, scope);
                    }
                }
            }
        }

        while let Some(frame) = blocks.pop() {
            if !self.engine.allow_unclosed {
                return Err(Error::syntax(
                    "unclosed `IF` tag",
                    self.source(),
                    frame.cond.span,
                ));
            }
            debug!(offset = frame.cond.span.m, "finalizing unclosed `IF` tag");
            scope = finish(frame, scope);
        }

        Ok(ast::Template {
            source: self.source(),
            scope,
        })
    }

    fn expect_open<'a>(&self, blocks: &'a mut [Frame], tag: &Tag) -> Result<&'a mut Frame> {
        match blocks.last_mut() {
            Some(frame) => Ok(frame),
            None => Err(Error::syntax(
                format!("unexpected `{}` tag, no open `IF`", tag.keyword),
                self.source(),
                tag.span,
            )),
        }
    }

    fn source(&self) -> &'source str {
        self.tokens.source
    }
}

fn close_clause(cond: &mut ast::Conditional, head: (Option<Span>, Span), body: ast::Scope) {
    let (cond_span, span) = head;
    cond.clauses.push(ast::Clause {
        cond: cond_span,
        span,
        body,
    });
}

/// Closes the last clause of the frame and returns the enclosing scope with
/// the finished conditional appended.
fn finish(frame: Frame, body: ast::Scope) -> ast::Scope {
    let Frame {
        mut parent,
        mut cond,
        head,
    } = frame;
    close_clause(&mut cond, head, body);
    parent.nodes.push(ast::Node::Cond(cond));
    parent
}
