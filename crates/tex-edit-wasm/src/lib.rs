//! wasm-bindgen bindings for the web editor.
//!
//! The JS side owns the authoritative `{text, cursor}` pair; every
//! insertion method here is pure and returns an [`EditOutcome`] the
//! caller applies atomically.

#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

// SAFETY: This application is single threaded, so using AssumeSingleThreaded is allowed.
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

use js_sys::Array;
use wasm_bindgen::prelude::*;

use mdtex_renderer::Display;
use tex_edit::{ArgTarget, Edit, InsertEngine, InsertOptions};

/// The result of one insertion: the full replacement text and the new
/// cursor offset.
#[wasm_bindgen(getter_with_clone)]
pub struct EditOutcome {
    pub text: String,
    pub cursor: u32,
}

/// Cursor classification for the toolbar (which buttons make sense, and
/// whether an insertion would be wrapped in `$...$`).
#[wasm_bindgen(getter_with_clone)]
pub struct ContextInfo {
    pub context: String,
    pub in_math: bool,
    pub after_opening_math: bool,
    pub before_closing_math: bool,
}

fn outcome(edit: Edit) -> EditOutcome {
    EditOutcome {
        text: edit.text,
        cursor: edit.cursor as u32,
    }
}

fn options(wrap_with_math: Option<bool>, cursor_argument_index: Option<i32>) -> InsertOptions {
    InsertOptions {
        wrap_with_math,
        use_text_before_cursor: false,
        arg_target: cursor_argument_index.map(ArgTarget::Index),
    }
}

#[wasm_bindgen]
pub struct TexEditor {
    engine: InsertEngine,
}

impl Default for TexEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl TexEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TexEditor {
        TexEditor {
            engine: InsertEngine::new(),
        }
    }

    #[wasm_bindgen(js_name = insertCommand)]
    pub fn insert_command(
        &self,
        text: &str,
        pos: u32,
        name: &str,
        args: Array,
        wrap_with_math: Option<bool>,
        cursor_argument_index: Option<i32>,
    ) -> EditOutcome {
        let args: Vec<String> = args.iter().filter_map(|v| v.as_string()).collect();
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let options = options(wrap_with_math, cursor_argument_index);
        outcome(
            self.engine
                .insert_command(text, pos as usize, name, &arg_refs, &options),
        )
    }

    #[wasm_bindgen(js_name = insertCommandAbsorbing)]
    pub fn insert_command_absorbing(
        &self,
        text: &str,
        pos: u32,
        name: &str,
        wrap_with_math: Option<bool>,
    ) -> EditOutcome {
        let options = options(wrap_with_math, None);
        outcome(
            self.engine
                .insert_command_absorbing(text, pos as usize, name, &options),
        )
    }

    #[wasm_bindgen(js_name = wrapSelection)]
    pub fn wrap_selection(
        &self,
        text: &str,
        start: u32,
        end: u32,
        name: &str,
        selection: &str,
        wrap_with_math: Option<bool>,
    ) -> EditOutcome {
        let options = options(wrap_with_math, None);
        outcome(self.engine.insert_command_wrapping(
            text,
            start as usize,
            end as usize,
            name,
            selection,
            &options,
        ))
    }

    #[wasm_bindgen(js_name = insertFraction)]
    pub fn insert_fraction(
        &self,
        text: &str,
        pos: u32,
        wrap_with_math: Option<bool>,
    ) -> EditOutcome {
        let options = options(wrap_with_math, None);
        outcome(self.engine.insert_fraction(text, pos as usize, &options))
    }

    #[wasm_bindgen(js_name = insertSqrt)]
    pub fn insert_sqrt(&self, text: &str, pos: u32, wrap_with_math: Option<bool>) -> EditOutcome {
        let options = options(wrap_with_math, None);
        outcome(self.engine.insert_sqrt(text, pos as usize, &options))
    }

    #[wasm_bindgen(js_name = insertSubscript)]
    pub fn insert_subscript(
        &self,
        text: &str,
        pos: u32,
        wrap_with_math: Option<bool>,
    ) -> EditOutcome {
        let options = options(wrap_with_math, None);
        outcome(self.engine.insert_subscript(text, pos as usize, &options))
    }

    #[wasm_bindgen(js_name = insertSuperscript)]
    pub fn insert_superscript(
        &self,
        text: &str,
        pos: u32,
        wrap_with_math: Option<bool>,
    ) -> EditOutcome {
        let options = options(wrap_with_math, None);
        outcome(self.engine.insert_superscript(text, pos as usize, &options))
    }

    #[wasm_bindgen(js_name = insertMatrix)]
    pub fn insert_matrix(&self, text: &str, pos: u32, rows: u32, cols: u32) -> EditOutcome {
        outcome(
            self.engine
                .insert_matrix(text, pos as usize, rows as usize, cols as usize),
        )
    }

    #[wasm_bindgen(js_name = insertColor)]
    pub fn insert_color(&self, text: &str, pos: u32, wrap_with_math: Option<bool>) -> EditOutcome {
        let options = options(wrap_with_math, None);
        outcome(self.engine.insert_color(text, pos as usize, &options))
    }

    #[wasm_bindgen(js_name = cursorContext)]
    pub fn cursor_context(&self, text: &str, pos: u32) -> ContextInfo {
        let info = tex_edit::position_info(text, pos as usize);
        ContextInfo {
            context: <&'static str>::from(&info.context).to_owned(),
            in_math: info.in_math,
            after_opening_math: info.after_opening_math,
            before_closing_math: info.before_closing_math,
        }
    }

    #[wasm_bindgen(js_name = isValidPosition)]
    pub fn is_valid_position(&self, text: &str, pos: u32) -> bool {
        tex_edit::is_valid_position(text, pos as usize)
    }

    #[wasm_bindgen(js_name = nextValidPosition)]
    pub fn next_valid_position(&self, text: &str, pos: u32) -> u32 {
        tex_edit::next_valid_position(text, pos as usize) as u32
    }

    #[wasm_bindgen(js_name = previousValidPosition)]
    pub fn previous_valid_position(&self, text: &str, pos: u32) -> u32 {
        tex_edit::previous_valid_position(text, pos as usize) as u32
    }
}

/// Render a Markdown+LaTeX document to preview HTML.
#[wasm_bindgen(js_name = renderMarkdown)]
pub fn render_markdown(text: &str) -> String {
    mdtex_renderer::render_markdown(text)
}

/// Render a bare LaTeX formula to preview HTML.
#[wasm_bindgen(js_name = renderMath)]
pub fn render_math(latex: &str, block: bool) -> String {
    let display = if block { Display::Block } else { Display::Inline };
    mdtex_renderer::render_math(latex, display)
}
