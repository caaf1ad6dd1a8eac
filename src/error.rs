use std::cmp::max;
use std::fmt;
use std::io;

use unicode_width::UnicodeWidthStr;

use crate::render::Residue;
use crate::types::span::Span;

/// A convenient type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur during template parsing or rendering.
pub struct Error {
    kind: ErrorKind,
    msg: String,
    span: Option<(String, Span)>,
    source: Option<io::Error>,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A control tag without a matching `[[IF]]`, or an unclosed `[[IF]]`
    /// when unclosed blocks are not allowed.
    Syntax,
    /// Unresolved placeholder or tag syntax left in strict mode.
    Residue(Residue),
    /// Writing the rendered output failed.
    Io,
}

impl Error {
    pub(crate) fn syntax(msg: impl Into<String>, source: &str, span: impl Into<Span>) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            msg: msg.into(),
            span: Some((source.to_owned(), span.into())),
            source: None,
        }
    }

    pub(crate) fn from_residue(residue: Residue) -> Self {
        let mut found = Vec::new();
        if residue.placeholders {
            found.push("placeholders {{...}}");
        }
        if residue.tags {
            found.push("tags [[IF/ELIF/ELSE/IF]]");
        }
        Self {
            kind: ErrorKind::Residue(residue),
            msg: format!("unresolved markers remain: {}", found.join(", ")),
            span: None,
            source: None,
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns what was left unresolved if this is a strict mode failure.
    pub fn residue(&self) -> Option<Residue> {
        match self.kind {
            ErrorKind::Residue(residue) => Some(residue),
            _ => None,
        }
    }

    /// Returns the region of the template this error points at, as byte
    /// offsets.
    pub fn span(&self) -> Option<(usize, usize)> {
        self.span.as_ref().map(|(_, span)| (span.m, span.n))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self {
            kind: ErrorKind::Io,
            msg: format!("failed to write rendered output: {err}"),
            span: None,
            source: Some(err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some((source, span)) => fmt_pretty(&self.msg, source, *span, f),
            None => write!(f, "{}", self.msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some((source, span)) => {
                if f.alternate() {
                    fmt_pretty(&self.msg, source, *span, f)
                } else {
                    write!(f, "{} between bytes {} and {}", self.msg, span.m, span.n)
                }
            }
            None => write!(f, "{}", self.msg),
        }
    }
}

fn fmt_pretty(msg: &str, source: &str, span: Span, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let lines: Vec<_> = source.split_terminator('\n').collect();
    let (line, col) = to_line_col(&lines, span.m);
    let width = max(1, source[span].width());
    let code = lines
        .get(line)
        .or_else(|| lines.last())
        .copied()
        .unwrap_or_default();

    let num = (line + 1).to_string();
    let pad = num.width();
    let pipe = "|";
    let underline = "^".repeat(width);

    write!(
        f,
        "\n \
        {0:pad$} {pipe}\n \
        {num:>} {pipe} {code}\n \
        {0:pad$} {pipe} {underline:>width$} {msg}\n",
        "",
        pad = pad,
        pipe = pipe,
        num = num,
        code = code,
        underline = underline,
        width = col + width,
        msg = msg
    )
}

fn to_line_col(lines: &[&str], offset: usize) -> (usize, usize) {
    let mut n = 0;
    for (i, line) in lines.iter().enumerate() {
        let len = line.len() + 1;
        if n + len > offset {
            return (i, lines[i][..offset - n].width());
        }
        n += len;
    }
    (lines.len(), lines.last().map(|l| l.width()).unwrap_or(0))
}
