//! Editor-host integration.
//!
//! The presentation layer owns the authoritative `(text, cursor)` pair;
//! the engine never touches presentation. [`HostEditor`] runs a pure
//! insertion against the host's content, hands the result back through
//! the host's setters in one step, and reports the new cursor offset.

use crate::insert::{Edit, InsertEngine, InsertOptions, StructureQuery};

/// The engine's view of the surrounding editor.
pub trait EditorHost {
    /// The current document text.
    fn content(&self) -> String;
    /// Replace the document text and selection in one step.
    fn set_content(&mut self, text: &str, sel_start: usize, sel_end: usize);
    /// Move the selection without changing the text.
    fn set_cursor(&mut self, start: usize, end: usize);
}

/// Drives an [`InsertEngine`] against an [`EditorHost`].
pub struct HostEditor<H, S> {
    host: H,
    engine: InsertEngine<S>,
}

impl<H: EditorHost, S: StructureQuery> HostEditor<H, S> {
    pub fn new(host: H, engine: InsertEngine<S>) -> Self {
        HostEditor { host, engine }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn insert_command(
        &mut self,
        pos: usize,
        name: &str,
        args: &[&str],
        options: &InsertOptions,
    ) -> usize {
        let text = self.host.content();
        let edit = self.engine.insert_command(&text, pos, name, args, options);
        self.apply(edit)
    }

    pub fn insert_command_absorbing(
        &mut self,
        pos: usize,
        name: &str,
        options: &InsertOptions,
    ) -> usize {
        let text = self.host.content();
        let edit = self
            .engine
            .insert_command_absorbing(&text, pos, name, options);
        self.apply(edit)
    }

    pub fn insert_command_wrapping(
        &mut self,
        start: usize,
        end: usize,
        name: &str,
        text_to_wrap: &str,
        options: &InsertOptions,
    ) -> usize {
        let text = self.host.content();
        let edit = self
            .engine
            .insert_command_wrapping(&text, start, end, name, text_to_wrap, options);
        self.apply(edit)
    }

    pub fn insert_fraction(&mut self, pos: usize, options: &InsertOptions) -> usize {
        let text = self.host.content();
        let edit = self.engine.insert_fraction(&text, pos, options);
        self.apply(edit)
    }

    pub fn insert_sqrt(&mut self, pos: usize, options: &InsertOptions) -> usize {
        let text = self.host.content();
        let edit = self.engine.insert_sqrt(&text, pos, options);
        self.apply(edit)
    }

    pub fn insert_subscript(&mut self, pos: usize, options: &InsertOptions) -> usize {
        let text = self.host.content();
        let edit = self.engine.insert_subscript(&text, pos, options);
        self.apply(edit)
    }

    pub fn insert_superscript(&mut self, pos: usize, options: &InsertOptions) -> usize {
        let text = self.host.content();
        let edit = self.engine.insert_superscript(&text, pos, options);
        self.apply(edit)
    }

    pub fn insert_matrix(&mut self, pos: usize, rows: usize, cols: usize) -> usize {
        let text = self.host.content();
        let edit = self.engine.insert_matrix(&text, pos, rows, cols);
        self.apply(edit)
    }

    pub fn insert_color(&mut self, pos: usize, options: &InsertOptions) -> usize {
        let text = self.host.content();
        let edit = self.engine.insert_color(&text, pos, options);
        self.apply(edit)
    }

    fn apply(&mut self, edit: Edit) -> usize {
        let cursor = edit.cursor;
        self.host.set_content(&edit.text, cursor, cursor);
        self.host.set_cursor(cursor, cursor);
        cursor
    }
}
