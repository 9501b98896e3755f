//! tex_edit
//!
//! A LaTeX-aware structural text engine for plain text buffers: the piece
//! of an editor that understands `\command{...}[...]` structure and
//! `$`/`$$` math spans well enough to classify a cursor position and to
//! synthesize new constructs without breaking the document.
//!
//! The engine is deliberately boring about state: every query reparses the
//! document from scratch, every operation is a pure function of
//! `(text, cursor, request)`, and nothing is cached between calls. At
//! interactive document sizes the O(n) rescan is cheap, and there is no
//! cache to invalidate.
//!
//! # Layers
//!
//! - [`parse`] — the structural scanner: commands, argument groups, math
//!   spans, each with a `[start, end)` byte range and recursively parsed
//!   children. Malformed input degrades to literal text; parsing never
//!   fails.
//! - [`position`](mod@position) — offset validity and repair
//!   ([`is_valid_position`], [`nearest_valid_position`]) and cursor
//!   classification ([`position_info`], [`cursor_context`]).
//! - [`InsertEngine`] — the insertion operations. Each returns an
//!   [`Edit`]: the full replacement text plus the offset the cursor
//!   should land on, with the construct wrapped in `$...$` unless the
//!   cursor already sits in math.
//! - [`EditorHost`] / [`HostEditor`] — the seam to the surrounding
//!   editor, which owns the authoritative `(text, cursor)` pair and
//!   applies each edit atomically.
//!
//! # Example
//!
//! ```rust
//! use tex_edit::{InsertEngine, InsertOptions};
//!
//! let engine = InsertEngine::new();
//! let edit = engine.insert_command("", 0, "frac", &[], &InsertOptions::default());
//! assert_eq!(edit.text, r"$\frac{}{}$");
//! assert_eq!(edit.cursor, 7); // inside the numerator braces
//!
//! // Inside math, no new dollar signs appear.
//! let edit = engine.insert_fraction(r"$\alpha$", 7, &InsertOptions::default());
//! assert_eq!(edit.text, r"$\frac{\alpha}{}$");
//! ```

mod host;
mod insert;
pub mod position;
mod scan;
mod token;

pub use host::{EditorHost, HostEditor};
pub use insert::{ArgTarget, Edit, InsertEngine, InsertOptions, LatexStructure, StructureQuery};
pub use position::{
    Context, CursorContext, PositionInfo, cursor_context, is_at_math_delimiter, is_valid_position,
    nearest_valid_position, next_valid_position, position_info, previous_valid_position,
};
pub use scan::parse;
pub use token::{GroupDelim, Token, TokenKind};
