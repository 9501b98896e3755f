#[cfg(feature = "serde")]
use serde::Serialize;

/// Which delimiter pair an argument group was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum GroupDelim {
    /// `{...}`, a mandatory argument.
    Brace,
    /// `[...]`, an optional argument.
    Bracket,
}

/// The structural kind of a [`Token`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum TokenKind {
    /// `\name`, together with the argument groups attached to it.
    /// The name is stored without the leading backslash.
    Command(String),
    /// A `{...}` or `[...]` argument group following a command name.
    Group(GroupDelim),
    /// `$...$`
    MathInline,
    /// `$$...$$`
    MathDisplay,
}

/// A parsed structural unit covering the byte range `[start, end)` of the
/// document it was parsed from.
///
/// A command's children are its argument groups; a group's or math span's
/// children are the recursively parsed interior. Token trees are rebuilt
/// from scratch on every query and discarded afterwards; they never hold a
/// reference into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub children: Vec<Token>,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, start: usize, end: usize, children: Vec<Token>) -> Self {
        debug_assert!(start <= end);
        Token {
            kind,
            start,
            end,
            children,
        }
    }

    /// Returns `true` if the offset `pos` lies strictly between this
    /// token's first and last byte. A cursor sitting on either boundary is
    /// considered outside the token.
    pub fn encloses(&self, pos: usize) -> bool {
        self.start < pos && pos < self.end
    }

    /// The command name, without the leading backslash.
    pub fn command_name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Command(name) => Some(name),
            TokenKind::Group(_) | TokenKind::MathInline | TokenKind::MathDisplay => None,
        }
    }

    pub fn is_math(&self) -> bool {
        matches!(self.kind, TokenKind::MathInline | TokenKind::MathDisplay)
    }

    /// Byte length of one of this token's delimiters (`{`, `[`, `$` or
    /// `$$`). Commands have no delimiter in this sense.
    pub fn delim_len(&self) -> usize {
        match self.kind {
            TokenKind::Command(_) => 0,
            TokenKind::Group(_) | TokenKind::MathInline => 1,
            TokenKind::MathDisplay => 2,
        }
    }

    /// The byte range of the content between this token's delimiters.
    /// For commands this is the full token range.
    pub fn content_range(&self) -> (usize, usize) {
        let d = self.delim_len();
        (self.start + d, self.end - d)
    }
}
