//! A tag-based conditional template engine for generating legal defense
//! documents from structured case data.
//!
//! # Features
//!
//! ### Syntax
//!
//! - Placeholders: `{{ cliente.NOMBRE }}`
//! - Text filters: `{{ cliente.NOMBRE | upper }}`, `| lower`, `| title`
//! - Nested conditionals:
//!   `[[IF expr]] ... [[ELIF expr]] ... [[ELSE]] ... [[/IF]]`
//! - Conditions: `VAR`, `!VAR`, `VAR == 'value'`, `VAR != 3`
//!
//! ### Engine
//!
//! - Conditionals are resolved before placeholders are substituted, so text
//!   in branches that are not taken is never touched.
//! - Rendering degrades gracefully: missing values substitute as empty text
//!   and malformed conditions are false.
//! - Optional strict mode fails if any placeholder or tag syntax remains.
//! - Contexts can be deserialized from any [`serde`] data format or built
//!   with the [`value!`] macro.
//!
//! # Getting started
//!
//! The quickest way to render is the [`render`] function which takes the
//! template source, the context, and the strict flag.
//!
//! ```
//! let ctx = descargo::value! { x: true, name: "ana" };
//! let out = descargo::render("[[IF x]]YES[[ELSE]]NO[[/IF]] - {{name|upper}}", &ctx, false)?;
//! assert_eq!(out, "YES - ANA");
//! # Ok::<(), descargo::Error>(())
//! ```
//!
//! For more control construct an [`Engine`]. It stores the render settings
//! and can parse a template once with [`.compile`][Engine::compile] to render
//! it many times.
//!
//! ```
//! let mut engine = descargo::Engine::new();
//! engine.set_strict(true);
//!
//! let template = engine.compile("Acta {{ NRO_ACTA }}[[IF FIRMA]], firmada[[/IF]].")?;
//! let out = template.render(&descargo::value! { NRO_ACTA: "A-1", FIRMA: "si" })?;
//! assert_eq!(out, "Acta A-1, firmada.");
//! # Ok::<(), descargo::Error>(())
//! ```
//!
//! # Examples
//!
//! ### Render using a JSON case record
//!
//! With the `serde` feature a context deserializes from any format.
//!
//! ```
//! let ctx: descargo::Value = serde_json::from_str(r#"{
//!     "cliente": { "NOMBRE": "juan layan" },
//!     "TIPO_INFRACCION": "velocidad"
//! }"#).unwrap();
//!
//! let source = "\
//! [[IF TIPO_INFRACCION == 'semaforo']]
//! Cruce en rojo.
//! [[ELIF TIPO_INFRACCION == 'velocidad']]
//! Exceso de velocidad.
//! [[/IF]]
//! Firma: {{ cliente.NOMBRE | title }}";
//!
//! let out = descargo::render(source, &ctx, true)?;
//! assert_eq!(out, "\nExceso de velocidad.\n\nFirma: Juan Layan");
//! # Ok::<(), descargo::Error>(())
//! ```
//!
//! ### Detect unresolved syntax
//!
//! In strict mode a render fails if placeholder or tag syntax is left in the
//! output, for example when a substituted value contains a placeholder.
//!
//! ```
//! let ctx = descargo::value! { nota: "{{ unresolved }}" };
//! let err = descargo::render("{{ nota }}", &ctx, true).unwrap_err();
//! assert_eq!(err.to_string(), "unresolved markers remain: placeholders {{...}}");
//! ```

mod compile;
mod error;
mod macros;
mod render;
mod types;
mod value;

use std::fmt;
use std::io;

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::render::{check_residue, eval_condition, normalize, substitute, Residue};
pub use crate::value::{List, Map, Value};

use crate::types::ast;

/// The parsing and rendering engine.
///
/// The engine only stores settings, it keeps no state between renders.
#[derive(Debug, Clone)]
pub struct Engine {
    strict: bool,
    allow_unclosed: bool,
}

/// A parsed template.
///
/// The tree is immutable once parsed, rendering never modifies it.
pub struct Template<'engine, 'source> {
    engine: &'engine Engine,
    template: ast::Template<'source>,
}

impl Default for Engine {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Construct a new engine with strict mode disabled and unclosed `[[IF]]`
    /// tags allowed.
    #[inline]
    pub fn new() -> Self {
        Self {
            strict: false,
            allow_unclosed: true,
        }
    }

    /// Set whether rendering fails when placeholder or tag syntax remains in
    /// the output.
    ///
    /// When disabled any leftover syntax is passed through verbatim.
    #[inline]
    pub fn set_strict(&mut self, strict: bool) -> &mut Self {
        self.strict = strict;
        self
    }

    /// Set whether an `[[IF]]` that is still open at the end of the template
    /// is accepted.
    ///
    /// When allowed, all open conditionals are closed at the end of the
    /// template with whatever content they collected. Defaults to `true`.
    ///
    /// ```
    /// let mut engine = descargo::Engine::new();
    /// engine.set_allow_unclosed(false);
    ///
    /// let err = engine.compile("lorem [[IF x]] ipsum").unwrap_err();
    /// assert_eq!(err.to_string(), "unclosed `IF` tag between bytes 6 and 14");
    /// ```
    #[inline]
    pub fn set_allow_unclosed(&mut self, allow: bool) -> &mut Self {
        self.allow_unclosed = allow;
        self
    }

    /// Parse a template.
    ///
    /// Fails if an `[[ELIF]]`, `[[ELSE]]` or `[[/IF]]` tag has no open
    /// `[[IF]]`.
    #[inline]
    pub fn compile<'source>(&self, source: &'source str) -> Result<Template<'_, 'source>> {
        let template = compile::template(self, source)?;
        Ok(Template {
            engine: self,
            template,
        })
    }

    /// Parse and render a template in one go.
    #[inline]
    pub fn render(&self, source: &str, ctx: &Value) -> Result<String> {
        self.compile(source)?.render(ctx)
    }
}

impl<'engine, 'source> Template<'engine, 'source> {
    /// Render the template to a string using the provided context.
    #[inline]
    pub fn render(&self, ctx: &Value) -> Result<String> {
        render::template(self.engine, &self.template, ctx)
    }

    /// Render the template to a writer using the provided context.
    ///
    /// Nothing is written if rendering fails.
    #[inline]
    pub fn render_to_writer<W>(&self, mut writer: W, ctx: &Value) -> Result<()>
    where
        W: io::Write,
    {
        let out = self.render(ctx)?;
        writer.write_all(out.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Returns only the text of the taken branches, without substituting
    /// placeholders or normalizing whitespace.
    #[inline]
    pub fn resolve_conditionals(&self, ctx: &Value) -> String {
        render::conditionals(&self.template, ctx)
    }

    /// Returns the original template source.
    #[inline]
    pub fn source(&self) -> &'source str {
        self.template.source
    }
}

impl fmt::Debug for Template<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

/// Render a template in one go with the default engine settings.
///
/// If `strict` is true, rendering fails when any placeholder or tag syntax
/// remains in the output.
pub fn render(source: &str, ctx: &Value, strict: bool) -> Result<String> {
    let mut engine = Engine::new();
    engine.set_strict(strict);
    engine.render(source, ctx)
}
