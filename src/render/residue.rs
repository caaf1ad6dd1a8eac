use crate::compile::lex::{self, Keyword};
use crate::render::subst::find_placeholder;
use crate::{Error, Result};

/// The kinds of unresolved syntax found in rendered text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Residue {
    /// A `{{ ... }}` placeholder remains.
    pub placeholders: bool,
    /// An `[[IF]]`, `[[ELIF]]`, `[[ELSE]]` or `[[/IF]]` tag remains.
    pub tags: bool,
}

impl Residue {
    /// Scans text for leftover placeholder and tag syntax.
    pub fn scan(text: &str) -> Self {
        Self {
            placeholders: find_placeholder(text, 0).is_some(),
            tags: has_tag(text),
        }
    }

    /// Returns true if nothing was left unresolved.
    pub fn is_empty(&self) -> bool {
        !self.placeholders && !self.tags
    }
}

/// Fails if any placeholder or control tag syntax remains in `text`.
///
/// ```
/// assert!(descargo::check_residue("all resolved").is_ok());
///
/// let err = descargo::check_residue("{{ unresolved }}").unwrap_err();
/// assert!(err.residue().unwrap().placeholders);
/// ```
pub fn check_residue(text: &str) -> Result<()> {
    let residue = Residue::scan(text);
    if residue.is_empty() {
        Ok(())
    } else {
        Err(Error::from_residue(residue))
    }
}

/// Returns true if the text contains anything the lexer would take for a tag,
/// or `[[` and a keyword followed by text without `]` up to `]]`.
fn has_tag(text: &str) -> bool {
    let bytes = text.as_bytes();
    (0..bytes.len().saturating_sub(1))
        .filter(|&m| bytes[m] == b'[' && bytes[m + 1] == b'[')
        .any(|m| lex::match_tag(text, m).is_some() || is_tag_prefix(&text[m + 2..]))
}

fn is_tag_prefix(rest: &str) -> bool {
    Keyword::match_prefix(rest).map_or(false, |(_, len)| {
        let tail = &rest[len..];
        tail.find(']')
            .map_or(false, |end| tail[end..].starts_with("]]"))
    })
}
