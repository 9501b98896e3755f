//! mdtex_renderer
//!
//! Renders Markdown with embedded LaTeX math to HTML, for note previews.
//!
//! Two passes: a line-based block pass (headings, lists, paragraphs) and
//! an inline pass that expands `$...$`/`$$...$$` spans through a
//! recursive-descent math walker before applying bold/italic/code/link
//! substitutions. Rendering is a pure function of the input text and
//! never fails; anything the math walker does not recognize is emitted
//! verbatim.
//!
//! The renderer does **not** escape HTML-special characters in user
//! text. The output is meant for a trusted preview surface; run it
//! through a sanitizer before showing it anywhere else.
//!
//! ```rust
//! use mdtex_renderer::render_markdown;
//!
//! let html = render_markdown(r"# Hello $\alpha$");
//! assert_eq!(html, "<h1>Hello <span class=\"math-inline\">α</span></h1>\n");
//! ```

mod block;
mod inline;
mod math;
mod symbol;

pub use math::Display;

/// Render a Markdown+LaTeX document to HTML.
pub fn render_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 2);
    block::render_blocks(&mut out, text);
    out
}

/// Render a bare LaTeX math expression to HTML, wrapper element
/// included.
///
/// ```rust
/// use mdtex_renderer::{Display, render_math};
///
/// let html = render_math(r"\frac{1}{2}", Display::Inline);
/// assert!(html.starts_with("<span class=\"math-inline\">"));
/// ```
pub fn render_math(latex: &str, display: Display) -> String {
    let mut out = String::new();
    math::render_span(&mut out, latex, display);
    out
}
