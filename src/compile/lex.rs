use std::fmt;

use crate::types::span::Span;

/// A lexer that chunks the template source into raw text and control tags so
/// that the parser doesn't have to operate on raw text.
///
/// Tags are recognized in textual order. Anything that looks like a tag but
/// doesn't match the tag syntax exactly is left as raw text.
#[derive(Debug)]
pub struct Lexer<'source> {
    /// The original template source.
    pub source: &'source str,

    /// A cursor over the template source.
    cursor: usize,

    /// A tag found while scanning raw text, emitted after the raw token.
    next: Option<Tag>,
}

/// The unit yielded by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Raw template
    Raw(Span),
    /// A control tag, e.g. `[[IF cond]]`
    Tag(Tag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub keyword: Keyword,
    /// The span of the entire tag including the brackets.
    pub span: Span,
    /// The span of the trimmed argument, empty if there is none.
    pub arg: Span,
}

/// A control tag keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    ElseIf,
    Else,
    EndIf,
}

impl<'source> Lexer<'source> {
    /// Construct a new lexer.
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            cursor: 0,
            next: None,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(tag) = self.next.take() {
            self.cursor = tag.span.n;
            return Some(Token::Tag(tag));
        }

        let i = self.cursor;
        if i >= self.source.len() {
            return None;
        }

        // xxxxxxx[[IF xxx]]xxxx
        //    ^   ^         ^
        //    i   m         n
        match find_tag(self.source, i) {
            Some(tag) if tag.span.m == i => {
                self.cursor = tag.span.n;
                Some(Token::Tag(tag))
            }
            Some(tag) => {
                self.cursor = tag.span.m;
                self.next = Some(tag);
                Some(Token::Raw(Span::from(i..tag.span.m)))
            }
            None => {
                let j = self.source.len();
                self.cursor = j;
                Some(Token::Raw(Span::from(i..j)))
            }
        }
    }
}

/// Finds the first tag in `source` starting at or after byte `from`.
pub fn find_tag(source: &str, from: usize) -> Option<Tag> {
    let mut i = from;
    while let Some(j) = source.get(i..)?.find("[[") {
        let m = i + j;
        if let Some(tag) = match_tag(source, m) {
            return Some(tag);
        }
        i = m + 1;
    }
    None
}

/// Attempts to match a tag at exactly byte `m`.
///
/// A tag is `[[`, a keyword, and then either `]]` directly, or at least one
/// whitespace character followed by the argument up to the first `]]`.
pub fn match_tag(source: &str, m: usize) -> Option<Tag> {
    let rest = source.get(m..)?.strip_prefix("[[")?;
    let (keyword, len) = Keyword::match_prefix(rest)?;
    let i = m + 2 + len;
    let tail = &source[i..];

    if tail.starts_with("]]") {
        return Some(Tag {
            keyword,
            span: Span::from(m..i + 2),
            arg: Span::from(i..i),
        });
    }

    if !tail.starts_with(char::is_whitespace) {
        return None;
    }

    let j = i + tail.find("]]")?;
    let raw = &source[i..j];
    let trimmed = raw.trim();
    let arg = if trimmed.is_empty() {
        Span::from(j..j)
    } else {
        let a = i + (raw.len() - raw.trim_start().len());
        Span::from(a..a + trimmed.len())
    };

    Some(Tag {
        keyword,
        span: Span::from(m..j + 2),
        arg,
    })
}

impl Keyword {
    const ALL: [(Self, &'static str); 4] = [
        (Self::If, "IF"),
        (Self::ElseIf, "ELIF"),
        (Self::Else, "ELSE"),
        (Self::EndIf, "/IF"),
    ];

    /// Matches a keyword at the start of `s`, ignoring ASCII case. Returns the
    /// keyword and its length in bytes.
    pub fn match_prefix(s: &str) -> Option<(Self, usize)> {
        Self::ALL.iter().find_map(|&(kw, name)| {
            s.get(..name.len())
                .filter(|prefix| prefix.eq_ignore_ascii_case(name))
                .map(|_| (kw, name.len()))
        })
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::If => "IF",
            Self::ElseIf => "ELIF",
            Self::Else => "ELSE",
            Self::EndIf => "/IF",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
