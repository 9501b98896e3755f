//! Command insertion.
//!
//! Every operation here is a pure function from `(text, cursor, request)`
//! to an [`Edit`]: the full replacement text plus the offset the cursor
//! should land on. The engine never fails; untrusted offsets are repaired,
//! impossible requests fall back to the plainest insertion that still
//! yields structurally valid LaTeX.

use crate::position::{self, PositionInfo};
use crate::scan;
use crate::token::{Token, TokenKind};

/// Which brace argument of an inserted snippet the cursor lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgTarget {
    #[default]
    First,
    Last,
    /// Zero-based argument index; negative values count from the end.
    /// Out-of-range indices are clamped.
    Index(i32),
}

/// Options accepted by every insertion operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertOptions {
    /// `Some(false)` disables the automatic `$...$` wrap. `None` (and
    /// `Some(true)`) let the cursor context decide.
    pub wrap_with_math: Option<bool>,
    /// Absorb the run before the cursor as the first argument.
    pub use_text_before_cursor: bool,
    /// Overrides the operation's default cursor argument.
    pub arg_target: Option<ArgTarget>,
}

impl InsertOptions {
    pub fn no_wrap() -> Self {
        InsertOptions {
            wrap_with_math: Some(false),
            ..Self::default()
        }
    }
}

/// A computed text mutation. The caller owns the authoritative
/// `(text, cursor)` pair and must apply both fields atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub cursor: usize,
}

/// The parser/resolver seam of the insertion engine.
///
/// The engine consults document structure only through this trait, so
/// tests can substitute a fixed-context implementation.
pub trait StructureQuery {
    fn parse(&self, text: &str) -> Vec<Token>;
    fn info(&self, text: &str, pos: usize) -> PositionInfo;
    fn repair(&self, text: &str, pos: usize) -> usize;
}

/// The crate's own scanner and resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexStructure;

impl StructureQuery for LatexStructure {
    fn parse(&self, text: &str) -> Vec<Token> {
        scan::parse(text)
    }

    fn info(&self, text: &str, pos: usize) -> PositionInfo {
        position::position_info(text, pos)
    }

    fn repair(&self, text: &str, pos: usize) -> usize {
        position::nearest_valid_position(text, pos)
    }
}

enum SnippetCursor {
    /// Inside one of the snippet's brace arguments.
    Arg(ArgTarget),
    /// A fixed byte offset into the snippet.
    Offset(usize),
}

pub struct InsertEngine<S = LatexStructure> {
    structure: S,
}

impl InsertEngine {
    pub fn new() -> Self {
        InsertEngine {
            structure: LatexStructure,
        }
    }
}

impl Default for InsertEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StructureQuery> InsertEngine<S> {
    pub fn with_structure(structure: S) -> Self {
        InsertEngine { structure }
    }

    /// Insert `\name{arg0}{arg1}...`, padded with empty groups to at least
    /// two arguments.
    ///
    /// At offset 0 of a document that opens with a math span, the snippet
    /// goes just inside the opening delimiter instead of in front of it.
    /// The cursor lands in the first brace argument unless
    /// [`InsertOptions::arg_target`] says otherwise.
    pub fn insert_command(
        &self,
        text: &str,
        pos: usize,
        name: &str,
        args: &[&str],
        options: &InsertOptions,
    ) -> Edit {
        let mut pos = self.structure.repair(text, pos);
        if options.use_text_before_cursor {
            return self.insert_command_absorbing(text, pos, name, options);
        }
        if pos == 0 {
            if let Some(first) = self.structure.parse(text).first() {
                if first.start == 0 && first.is_math() {
                    pos = first.delim_len();
                }
            }
        }
        let snippet = build_snippet(name, args, 2);
        self.splice(
            text,
            pos,
            pos,
            &snippet,
            options,
            SnippetCursor::Arg(ArgTarget::First),
        )
    }

    /// Insert `\name{...}{}` where the first argument absorbs either a
    /// balanced `(...)` run or a contiguous non-whitespace run ending
    /// exactly at the cursor.
    ///
    /// Absorption is skipped (plain insertion instead) when the run
    /// contains `$`, has unbalanced groups, or the cursor follows
    /// whitespace. Immediately after an opening math delimiter the
    /// operation degrades to a plain, unwrapped insertion.
    pub fn insert_command_absorbing(
        &self,
        text: &str,
        pos: usize,
        name: &str,
        options: &InsertOptions,
    ) -> Edit {
        let pos = self.structure.repair(text, pos);
        let info = self.structure.info(text, pos);
        if !info.after_opening_math {
            let scope = info.argument.as_ref().map_or(0, |arg| arg.start + 1);
            if let Some(start) = absorption_start(text, pos, scope) {
                let snippet = build_snippet(name, &[&text[start..pos]], 2);
                return self.splice(
                    text,
                    start,
                    pos,
                    &snippet,
                    options,
                    SnippetCursor::Arg(ArgTarget::Index(1)),
                );
            }
        }
        let snippet = build_snippet(name, &[], 2);
        self.splice(
            text,
            pos,
            pos,
            &snippet,
            options,
            SnippetCursor::Arg(ArgTarget::First),
        )
    }

    /// Replace the selection `[start, end)` with `\name{text_to_wrap}{}`.
    /// The cursor defaults to the second argument.
    pub fn insert_command_wrapping(
        &self,
        text: &str,
        start: usize,
        end: usize,
        name: &str,
        text_to_wrap: &str,
        options: &InsertOptions,
    ) -> Edit {
        let start = self.structure.repair(text, start);
        let end = self.structure.repair(text, end).max(start);
        let snippet = build_snippet(name, &[text_to_wrap], 2);
        self.splice(
            text,
            start,
            end,
            &snippet,
            options,
            SnippetCursor::Arg(ArgTarget::Index(1)),
        )
    }

    /// Insert a fraction. A complete command token ending exactly at the
    /// cursor becomes the numerator, with the cursor in the empty
    /// denominator; otherwise the generic absorption rules apply.
    pub fn insert_fraction(&self, text: &str, pos: usize, options: &InsertOptions) -> Edit {
        let pos = self.structure.repair(text, pos);
        if let Some(token) = self.command_ending_at(text, pos) {
            let snippet = build_snippet("frac", &[&text[token.start..token.end]], 2);
            return self.splice(
                text,
                token.start,
                pos,
                &snippet,
                options,
                SnippetCursor::Arg(ArgTarget::Index(1)),
            );
        }
        self.insert_command_absorbing(text, pos, "frac", options)
    }

    /// Insert `\sqrt{}` with the cursor inside the radicand.
    pub fn insert_sqrt(&self, text: &str, pos: usize, options: &InsertOptions) -> Edit {
        let pos = self.structure.repair(text, pos);
        let snippet = build_snippet("sqrt", &[], 1);
        self.splice(
            text,
            pos,
            pos,
            &snippet,
            options,
            SnippetCursor::Arg(ArgTarget::First),
        )
    }

    /// Insert `base_{}` where `base` is the token run preceding the
    /// cursor; the cursor lands inside the new braces.
    pub fn insert_subscript(&self, text: &str, pos: usize, options: &InsertOptions) -> Edit {
        self.insert_script(text, pos, '_', options)
    }

    /// Insert `base^{}`; see [`Self::insert_subscript`].
    pub fn insert_superscript(&self, text: &str, pos: usize, options: &InsertOptions) -> Edit {
        self.insert_script(text, pos, '^', options)
    }

    fn insert_script(&self, text: &str, pos: usize, sigil: char, options: &InsertOptions) -> Edit {
        let pos = self.structure.repair(text, pos);
        let info = self.structure.info(text, pos);
        let scope = info.argument.as_ref().map_or(0, |arg| arg.start + 1);
        let start = self.script_base(text, pos, scope).unwrap_or(pos);
        let snippet = format!("{}{}{{}}", &text[start..pos], sigil);
        self.splice(
            text,
            start,
            pos,
            &snippet,
            options,
            SnippetCursor::Arg(ArgTarget::Last),
        )
    }

    /// Insert a `pmatrix` environment with `rows` rows of `cols` blank
    /// cells; the cursor lands immediately after the first newline.
    pub fn insert_matrix(&self, text: &str, pos: usize, rows: usize, cols: usize) -> Edit {
        let pos = self.structure.repair(text, pos);
        let (rows, cols) = (rows.max(1), cols.max(1));
        let mut body = String::from("\\begin{pmatrix}\n");
        let cursor_in_snippet = body.len();
        for row in 0..rows {
            body.push_str(&" & ".repeat(cols - 1));
            if row + 1 < rows {
                body.push_str(" \\\\\n");
            } else {
                body.push('\n');
            }
        }
        body.push_str("\\end{pmatrix}");
        self.splice(
            text,
            pos,
            pos,
            &body,
            &InsertOptions::default(),
            SnippetCursor::Offset(cursor_in_snippet),
        )
    }

    /// Insert the `\color{}{}{}{}` template (red, green, blue, text); the
    /// cursor defaults into the text slot.
    pub fn insert_color(&self, text: &str, pos: usize, options: &InsertOptions) -> Edit {
        let pos = self.structure.repair(text, pos);
        let snippet = build_snippet("color", &[], 4);
        self.splice(
            text,
            pos,
            pos,
            &snippet,
            options,
            SnippetCursor::Arg(ArgTarget::Index(3)),
        )
    }

    /// Replace `[start, end)` with `snippet`, wrapped in `$...$` when the
    /// context calls for it, and compute the result cursor.
    fn splice(
        &self,
        text: &str,
        start: usize,
        end: usize,
        snippet: &str,
        options: &InsertOptions,
        cursor: SnippetCursor,
    ) -> Edit {
        let info = self.structure.info(text, start);
        let wrap = options.wrap_with_math != Some(false)
            && !(info.in_math || info.after_opening_math || info.before_closing_math);
        let lead = usize::from(wrap);
        let mut new_text =
            String::with_capacity(text.len() - (end - start) + snippet.len() + 2 * lead);
        new_text.push_str(&text[..start]);
        if wrap {
            new_text.push('$');
        }
        new_text.push_str(snippet);
        if wrap {
            new_text.push('$');
        }
        new_text.push_str(&text[end..]);
        let cursor = match cursor {
            SnippetCursor::Offset(offset) => start + lead + offset,
            SnippetCursor::Arg(default) => {
                let offsets = argument_offsets(snippet);
                if offsets.is_empty() {
                    start + snippet.len() + 2 * lead
                } else {
                    let target = options.arg_target.unwrap_or(default);
                    start + lead + offsets[resolve_target(target, offsets.len())]
                }
            }
        };
        Edit {
            text: new_text,
            cursor,
        }
    }

    /// The outermost command token whose range ends exactly at `pos`.
    fn command_ending_at(&self, text: &str, pos: usize) -> Option<Token> {
        fn walk(tokens: &[Token], pos: usize) -> Option<Token> {
            for token in tokens {
                if token.end == pos && matches!(token.kind, TokenKind::Command(_)) {
                    return Some(token.clone());
                }
                if token.start < pos && pos <= token.end {
                    if let Some(found) = walk(&token.children, pos) {
                        return Some(found);
                    }
                }
            }
            None
        }
        walk(&self.structure.parse(text), pos)
    }

    /// Start of the base a sub/superscript attaches to: a complete
    /// command, a balanced `(...)` run, or an alphanumeric run ending at
    /// the cursor.
    fn script_base(&self, text: &str, pos: usize, scope: usize) -> Option<usize> {
        if let Some(token) = self.command_ending_at(text, pos) {
            if token.start >= scope {
                return Some(token.start);
            }
        }
        if text[..pos].ends_with(')') {
            if let Some(open) = matching_paren_back(text, pos, scope) {
                if !text[open..pos].contains('$') {
                    return Some(open);
                }
            }
        }
        let mut start = pos;
        for c in text[scope..pos].chars().rev() {
            if !c.is_alphanumeric() {
                break;
            }
            start -= c.len_utf8();
        }
        (start < pos).then_some(start)
    }
}

/// `\name{arg0}{arg1}...`, padded with empty groups to `min_args`.
fn build_snippet(name: &str, args: &[&str], min_args: usize) -> String {
    let mut snippet = String::with_capacity(1 + name.len() + 2 * min_args.max(args.len()));
    snippet.push('\\');
    snippet.push_str(name);
    for arg in args {
        snippet.push('{');
        snippet.push_str(arg);
        snippet.push('}');
    }
    for _ in args.len()..min_args {
        snippet.push_str("{}");
    }
    snippet
}

/// Byte offsets just inside each depth-1 `{` of `snippet`, in order.
fn argument_offsets(snippet: &str) -> Vec<usize> {
    let bytes = snippet.as_bytes();
    let mut offsets = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'{' => {
                depth += 1;
                if depth == 1 {
                    offsets.push(i + 1);
                }
            }
            b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        i += 1;
    }
    offsets
}

fn resolve_target(target: ArgTarget, count: usize) -> usize {
    match target {
        ArgTarget::First => 0,
        ArgTarget::Last => count - 1,
        ArgTarget::Index(i) => {
            let idx = if i < 0 {
                count as i64 + i64::from(i)
            } else {
                i64::from(i)
            };
            idx.clamp(0, count as i64 - 1) as usize
        }
    }
}

/// Start of the run the first argument absorbs, or `None` if absorption
/// must fall back to plain insertion.
fn absorption_start(text: &str, pos: usize, scope: usize) -> Option<usize> {
    if pos <= scope {
        return None;
    }
    let prev = text[..pos].chars().next_back()?;
    if prev.is_whitespace() {
        return None;
    }
    let start = if prev == ')' {
        matching_paren_back(text, pos, scope).unwrap_or_else(|| run_start(text, pos, scope))
    } else {
        run_start(text, pos, scope)
    };
    let run = &text[start..pos];
    if run.contains('$') || !balanced_groups(run) {
        return None;
    }
    Some(start)
}

/// Start of the contiguous non-whitespace run ending at `pos`, bounded
/// below by `scope`.
fn run_start(text: &str, pos: usize, scope: usize) -> usize {
    let mut start = pos;
    for c in text[scope..pos].chars().rev() {
        if c.is_whitespace() {
            break;
        }
        start -= c.len_utf8();
    }
    start
}

/// Offset of the `(` matching the `)` that ends at `pos`.
fn matching_paren_back(text: &str, pos: usize, scope: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut p = pos;
    while p > scope {
        p -= 1;
        match bytes[p] {
            b')' => depth += 1,
            b'(' => {
                depth -= 1;
                if depth == 0 {
                    return Some(p);
                }
            }
            _ => {}
        }
    }
    None
}

/// Braces and brackets must individually balance for a run to be
/// absorbable as an argument.
fn balanced_groups(run: &str) -> bool {
    let bytes = run.as_bytes();
    let (mut braces, mut brackets) = (0i32, 0i32);
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'{' => braces += 1,
            b'}' => {
                braces -= 1;
                if braces < 0 {
                    return false;
                }
            }
            b'[' => brackets += 1,
            b']' => {
                brackets -= 1;
                if brackets < 0 {
                    return false;
                }
            }
            _ => {}
        }
        i += 1;
    }
    braces == 0 && brackets == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> InsertEngine {
        InsertEngine::new()
    }

    #[test]
    fn snippet_builder_pads_arguments() {
        assert_eq!(build_snippet("frac", &[], 2), r"\frac{}{}");
        assert_eq!(build_snippet("frac", &["x"], 2), r"\frac{x}{}");
        assert_eq!(build_snippet("sqrt", &[], 1), r"\sqrt{}");
        assert_eq!(build_snippet("color", &[], 4), r"\color{}{}{}{}");
    }

    #[test]
    fn argument_offsets_are_depth_one_only() {
        assert_eq!(argument_offsets(r"\frac{}{}"), vec![6, 8]);
        assert_eq!(argument_offsets(r"\frac{\sqrt{2}}{}"), vec![6, 16]);
        assert_eq!(argument_offsets(r"\alpha"), Vec::<usize>::new());
    }

    #[test]
    fn target_resolution_clamps() {
        assert_eq!(resolve_target(ArgTarget::First, 3), 0);
        assert_eq!(resolve_target(ArgTarget::Last, 3), 2);
        assert_eq!(resolve_target(ArgTarget::Index(1), 3), 1);
        assert_eq!(resolve_target(ArgTarget::Index(7), 3), 2);
        assert_eq!(resolve_target(ArgTarget::Index(-1), 3), 2);
        assert_eq!(resolve_target(ArgTarget::Index(-9), 3), 0);
    }

    #[test]
    fn command_in_empty_document_is_wrapped() {
        let edit = engine().insert_command("", 0, "frac", &[], &InsertOptions::default());
        assert_eq!(edit.text, r"$\frac{}{}$");
        assert_eq!(edit.cursor, 7);
    }

    #[test]
    fn command_in_math_is_not_wrapped() {
        let edit = engine().insert_command("$ab$", 2, "frac", &[], &InsertOptions::default());
        assert_eq!(edit.text, r"$a\frac{}{}b$");
        assert_eq!(edit.cursor, 8);
        assert!(!edit.text[1..edit.text.len() - 1].contains('$'));
    }

    #[test]
    fn adjacent_to_delimiter_is_not_wrapped() {
        let edit = engine().insert_command("$ab$", 1, "frac", &[], &InsertOptions::default());
        assert_eq!(edit.text, r"$\frac{}{}ab$");
        let edit = engine().insert_command("$ab$", 3, "frac", &[], &InsertOptions::default());
        assert_eq!(edit.text, r"$ab\frac{}{}$");
    }

    #[test]
    fn wrap_can_be_disabled() {
        let edit = engine().insert_command("", 0, "frac", &[], &InsertOptions::no_wrap());
        assert_eq!(edit.text, r"\frac{}{}");
        assert_eq!(edit.cursor, 6);
    }

    #[test]
    fn explicit_args_are_kept() {
        let edit = engine().insert_command("", 0, "frac", &["1", "2"], &InsertOptions::no_wrap());
        assert_eq!(edit.text, r"\frac{1}{2}");
        assert_eq!(edit.cursor, 6);
    }

    #[test]
    fn arg_target_overrides_default() {
        let options = InsertOptions {
            arg_target: Some(ArgTarget::Index(1)),
            ..InsertOptions::no_wrap()
        };
        let edit = engine().insert_command("", 0, "frac", &[], &options);
        assert_eq!(edit.cursor, 8);
        let options = InsertOptions {
            arg_target: Some(ArgTarget::Index(-1)),
            ..InsertOptions::no_wrap()
        };
        let edit = engine().insert_command("", 0, "frac", &[], &options);
        assert_eq!(edit.cursor, 8);
    }

    #[test]
    fn single_explicit_argument_still_pads() {
        let edit = engine().insert_command("", 0, "alpha", &["x"], &InsertOptions::no_wrap());
        assert_eq!(edit.text, r"\alpha{x}{}");
        assert_eq!(edit.cursor, 7);
    }

    #[test]
    fn start_of_math_document_inserts_inside_delimiter() {
        let edit = engine().insert_command("$x$", 0, "frac", &[], &InsertOptions::default());
        assert_eq!(edit.text, r"$\frac{}{}x$");
        assert_eq!(edit.cursor, 7);
        let edit = engine().insert_command("$$x$$", 0, "frac", &[], &InsertOptions::default());
        assert_eq!(edit.text, r"$$\frac{}{}x$$");
        assert_eq!(edit.cursor, 8);
    }

    #[test]
    fn absorption_takes_word_before_cursor() {
        let edit =
            engine().insert_command_absorbing("ab cd", 5, "frac", &InsertOptions::default());
        assert_eq!(edit.text, r"ab $\frac{cd}{}$");
        assert_eq!(edit.cursor, 14);
    }

    #[test]
    fn absorption_takes_parenthesized_run() {
        let edit =
            engine().insert_command_absorbing("x (a+b)", 7, "frac", &InsertOptions::default());
        assert_eq!(edit.text, r"x $\frac{(a+b)}{}$");
        assert_eq!(edit.cursor, 16);
    }

    #[test]
    fn absorption_skipped_after_whitespace() {
        let edit = engine().insert_command_absorbing("ab ", 3, "frac", &InsertOptions::default());
        assert_eq!(edit.text, r"ab $\frac{}{}$");
        assert_eq!(edit.cursor, 10);
    }

    #[test]
    fn absorption_skipped_when_run_contains_dollar() {
        let edit = engine().insert_command_absorbing("$ab$", 3, "frac", &InsertOptions::default());
        assert_eq!(edit.text, r"$ab\frac{}{}$");
        assert_eq!(edit.cursor, 9);
    }

    #[test]
    fn absorption_after_opening_delimiter_is_plain() {
        let edit = engine().insert_command_absorbing("$ab$", 1, "frac", &InsertOptions::default());
        assert_eq!(edit.text, r"$\frac{}{}ab$");
        assert_eq!(edit.cursor, 7);
    }

    #[test]
    fn absorption_is_confined_to_argument() {
        let text = r"\color{}{}{}{abc}";
        let edit = engine().insert_command_absorbing(text, 16, "frac", &InsertOptions::default());
        assert_eq!(edit.text, r"\color{}{}{}{$\frac{abc}{}$}");
    }

    #[test]
    fn fraction_absorbs_whole_command() {
        let edit = engine().insert_fraction(r"\alpha", 6, &InsertOptions::default());
        assert_eq!(edit.text, r"$\frac{\alpha}{}$");
        assert_eq!(edit.cursor, 15);
    }

    #[test]
    fn fraction_absorbs_command_inside_math() {
        let edit = engine().insert_fraction(r"$\alpha$", 7, &InsertOptions::default());
        assert_eq!(edit.text, r"$\frac{\alpha}{}$");
        assert_eq!(edit.cursor, 15);
    }

    #[test]
    fn fraction_falls_back_to_word_absorption() {
        let edit = engine().insert_fraction("12", 2, &InsertOptions::default());
        assert_eq!(edit.text, r"$\frac{12}{}$");
        assert_eq!(edit.cursor, 11);
    }

    #[test]
    fn sqrt_is_single_argument() {
        let edit = engine().insert_sqrt("", 0, &InsertOptions::default());
        assert_eq!(edit.text, r"$\sqrt{}$");
        assert_eq!(edit.cursor, 7);
    }

    #[test]
    fn subscript_absorbs_base() {
        let edit = engine().insert_subscript("x", 1, &InsertOptions::default());
        assert_eq!(edit.text, r"$x_{}$");
        assert_eq!(edit.cursor, 4);
    }

    #[test]
    fn superscript_absorbs_command_base() {
        let edit = engine().insert_superscript(r"$\alpha$", 7, &InsertOptions::default());
        assert_eq!(edit.text, r"$\alpha^{}$");
        assert_eq!(edit.cursor, 9);
    }

    #[test]
    fn superscript_without_base() {
        let edit = engine().insert_superscript("a ", 2, &InsertOptions::default());
        assert_eq!(edit.text, r"a $^{}$");
        assert_eq!(edit.cursor, 5);
    }

    #[test]
    fn subscript_takes_only_the_token_run() {
        let edit = engine().insert_subscript("a+b2", 4, &InsertOptions::no_wrap());
        assert_eq!(edit.text, r"a+b2_{}");
        assert_eq!(edit.cursor, 6);
    }

    #[test]
    fn matrix_template_and_cursor() {
        let edit = engine().insert_matrix("", 0, 2, 2);
        assert_eq!(edit.text, "$\\begin{pmatrix}\n &  \\\\\n & \n\\end{pmatrix}$");
        assert_eq!(edit.cursor, 17);
        assert_eq!(&edit.text[16..17], "\n");
    }

    #[test]
    fn matrix_in_math_is_unwrapped() {
        let edit = engine().insert_matrix("$ab$", 2, 1, 1);
        assert!(!edit.text[1..edit.text.len() - 1].contains('$'));
        assert_eq!(edit.cursor, 2 + 16);
    }

    #[test]
    fn color_cursor_lands_in_text_slot() {
        let edit = engine().insert_color("", 0, &InsertOptions::default());
        assert_eq!(edit.text, r"$\color{}{}{}{}$");
        assert_eq!(edit.cursor, 14);
    }

    #[test]
    fn wrapper_replaces_selection() {
        let edit = engine().insert_command_wrapping(
            "pick me",
            5,
            7,
            "overline",
            "me",
            &InsertOptions::default(),
        );
        assert_eq!(edit.text, r"pick $\overline{me}{}$");
        assert_eq!(edit.cursor, 20);
    }

    #[test]
    fn invalid_offsets_are_repaired() {
        let edit = engine().insert_command(r"a\$b", 2, "frac", &[], &InsertOptions::no_wrap());
        // Offset 2 splits the escape pair; it is repaired to 3.
        assert_eq!(edit.text, r"a\$\frac{}{}b");
    }

    #[test]
    fn inserted_braces_always_balance() {
        let cases: &[(&str, usize)] = &[("", 0), ("$x$", 1), (r"\frac{}{}", 6), ("word ", 5)];
        for &(text, pos) in cases {
            let edit = engine().insert_command(text, pos, "frac", &[], &InsertOptions::default());
            let opens = edit.text.matches('{').count();
            let closes = edit.text.matches('}').count();
            assert_eq!(opens, closes, "text {text:?}");
        }
    }

    /// A fixed-context stand-in proving the engine consults structure
    /// only through the seam.
    struct AlwaysMath;

    impl StructureQuery for AlwaysMath {
        fn parse(&self, _text: &str) -> Vec<Token> {
            Vec::new()
        }

        fn info(&self, _text: &str, _pos: usize) -> PositionInfo {
            PositionInfo {
                in_math: true,
                ..PositionInfo::default()
            }
        }

        fn repair(&self, text: &str, pos: usize) -> usize {
            pos.min(text.len())
        }
    }

    #[test]
    fn structure_service_is_swappable() {
        let engine = InsertEngine::with_structure(AlwaysMath);
        let edit = engine.insert_command("ab", 1, "frac", &[], &InsertOptions::default());
        assert_eq!(edit.text, r"a\frac{}{}b");
    }
}
