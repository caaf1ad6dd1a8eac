//! Render an AST into the final text.
//!
//! Rendering runs the following passes in order:
//! - The tree evaluator resolves conditionals, eliding branches not taken.
//! - Placeholders in the resolved text are substituted.
//! - Whitespace is normalized.
//! - In strict mode, the text is checked for unresolved syntax.

mod cond;
mod eval;
mod normalize;
mod residue;
mod subst;

use tracing::debug;

pub use crate::render::cond::eval_condition;
pub use crate::render::normalize::normalize;
pub use crate::render::residue::{check_residue, Residue};
pub use crate::render::subst::substitute;
use crate::types::ast::Template;
use crate::{Engine, Result, Value};

/// Render a parsed template using the given context.
pub fn template(engine: &Engine, template: &Template<'_>, ctx: &Value) -> Result<String> {
    let resolved = eval::template(template, ctx);
    let substituted = substitute(&resolved, ctx);
    let out = normalize(&substituted);
    if engine.strict {
        check_residue(&out)?;
    }
    debug!(
        input = template.source.len(),
        output = out.len(),
        strict = engine.strict,
        "rendered template"
    );
    Ok(out)
}

/// Resolve only the conditionals of a template.
pub fn conditionals(template: &Template<'_>, ctx: &Value) -> String {
    eval::template(template, ctx)
}
