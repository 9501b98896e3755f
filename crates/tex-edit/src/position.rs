//! Offset validity and cursor-context classification.
//!
//! Offsets are byte indices into the document. A valid offset is one a
//! cursor may occupy: on a UTF-8 character boundary and never between an
//! active backslash and the character it escapes. Callers are expected to
//! repair untrusted offsets with [`nearest_valid_position`] before acting
//! on them; every engine entry point does so.

use strum_macros::IntoStaticStr;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::scan;
use crate::token::{GroupDelim, Token, TokenKind};

/// Classification of a cursor offset against the parsed structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Context {
    /// Plain text, outside any argument group.
    #[default]
    Text,
    /// Inside a `{...}` argument of a command.
    CommandArg,
    /// Inside a `[...]` argument of a command.
    CommandOptionalArg,
}

/// Derived classification of an offset. Ephemeral: recomputed from
/// `(text, pos)` on every call, never cached.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PositionInfo {
    pub context: Context,
    /// The offset lies strictly inside a math span's content, not
    /// adjacent to either delimiter.
    pub in_math: bool,
    /// The offset sits immediately after an opening `$`/`$$`.
    pub after_opening_math: bool,
    /// The offset sits immediately before a closing `$`/`$$`.
    pub before_closing_math: bool,
    /// Innermost argument group enclosing the offset.
    pub argument: Option<Token>,
}

/// [`PositionInfo`] plus the nearest enclosing command token, for
/// argument-content lookups.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CursorContext {
    pub info: PositionInfo,
    pub command: Option<Token>,
}

/// Returns `true` if `pos` denotes a valid edit point in `text`.
///
/// False iff `pos` is out of bounds, not a character boundary, or falls
/// strictly inside an escape pair (between an active `\` and the character
/// it escapes).
pub fn is_valid_position(text: &str, pos: usize) -> bool {
    if pos > text.len() || !text.is_char_boundary(pos) {
        return false;
    }
    if pos > 0 && pos < text.len() {
        let bytes = text.as_bytes();
        if bytes[pos - 1] == b'\\' && !scan::is_escaped(bytes, pos - 1) {
            return false;
        }
    }
    true
}

/// Smallest valid offset `>= pos` (clamped to the document length, which
/// is always valid).
pub fn next_valid_position(text: &str, pos: usize) -> usize {
    let mut p = pos.min(text.len());
    while !is_valid_position(text, p) {
        p += 1;
    }
    p
}

/// Largest valid offset `<= pos` (offset 0 is always valid).
pub fn previous_valid_position(text: &str, pos: usize) -> usize {
    let mut p = pos.min(text.len());
    while !is_valid_position(text, p) {
        p -= 1;
    }
    p
}

/// Repairs an untrusted offset to the nearest valid one; equidistant
/// candidates resolve forward.
pub fn nearest_valid_position(text: &str, pos: usize) -> usize {
    let pos = pos.min(text.len());
    if is_valid_position(text, pos) {
        return pos;
    }
    let prev = previous_valid_position(text, pos);
    let next = next_valid_position(text, pos);
    if next - pos <= pos - prev { next } else { prev }
}

/// Classify `pos` against the parsed structure of `text`.
pub fn position_info(text: &str, pos: usize) -> PositionInfo {
    cursor_context(text, pos).info
}

/// Classify `pos` and also report the nearest enclosing command token.
pub fn cursor_context(text: &str, pos: usize) -> CursorContext {
    let pos = nearest_valid_position(text, pos);
    let tokens = scan::parse(text);
    let mut ctx = CursorContext::default();
    descend(&tokens, pos, &mut ctx);
    ctx
}

fn descend(tokens: &[Token], pos: usize, ctx: &mut CursorContext) {
    for token in tokens {
        if !token.encloses(pos) {
            continue;
        }
        match &token.kind {
            TokenKind::Command(_) => ctx.command = Some(token.clone()),
            TokenKind::Group(delim) => {
                ctx.info.context = match delim {
                    GroupDelim::Brace => Context::CommandArg,
                    GroupDelim::Bracket => Context::CommandOptionalArg,
                };
                ctx.info.argument = Some(token.clone());
            }
            TokenKind::MathInline | TokenKind::MathDisplay => {
                let (content_start, content_end) = token.content_range();
                ctx.info.in_math = content_start < pos && pos < content_end;
                ctx.info.after_opening_math = pos == content_start;
                ctx.info.before_closing_math = pos == content_end;
            }
        }
        descend(&token.children, pos, ctx);
        // Sibling ranges are disjoint; only one can enclose the offset.
        return;
    }
}

/// Returns `true` if the byte at `pos` belongs to a math span delimiter.
pub fn is_at_math_delimiter(text: &str, pos: usize) -> bool {
    fn walk(tokens: &[Token], pos: usize) -> bool {
        tokens.iter().any(|token| {
            if token.is_math() {
                let d = token.delim_len();
                if (token.start..token.start + d).contains(&pos)
                    || (token.end - d..token.end).contains(&pos)
                {
                    return true;
                }
            }
            walk(&token.children, pos)
        })
    }
    walk(&scan::parse(text), pos)
}
