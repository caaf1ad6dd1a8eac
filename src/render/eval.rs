use tracing::trace;

use crate::render::cond::eval_condition;
use crate::types::ast;
use crate::Value;

/// Walks the AST and returns the text of the taken branches.
///
/// For each conditional the first clause whose condition is true, or the
/// first `[[ELSE]]` clause reached, is taken. All other clauses are dropped
/// entirely. The walk uses an explicit stack so nesting depth is not bound by
/// the call stack.
pub fn template(template: &ast::Template<'_>, ctx: &Value) -> String {
    let source = template.source;
    let mut out = String::with_capacity(source.len());
    let mut stack = vec![template.scope.nodes.iter()];

    loop {
        let next = match stack.last_mut() {
            Some(nodes) => nodes.next(),
            None => break,
        };
        match next {
            None => {
                stack.pop();
            }
            Some(ast::Node::Text(span)) => out.push_str(&source[*span]),
            Some(ast::Node::Cond(cond)) => {
                if let Some(clause) = select(source, cond, ctx) {
                    stack.push(clause.body.nodes.iter());
                }
            }
        }
    }

    out
}

fn select<'a>(source: &str, cond: &'a ast::Conditional, ctx: &Value) -> Option<&'a ast::Clause> {
    let taken = cond.clauses.iter().position(|clause| match clause.cond {
        Some(span) => eval_condition(&source[span], ctx),
        None => true,
    });
    let clause = taken.map(|i| &cond.clauses[i]);
    trace!(
        offset = cond.span.m,
        clauses = cond.clauses.len(),
        taken = ?clause.map(|c| c.span.m),
        "resolved conditional"
    );
    clause
}
