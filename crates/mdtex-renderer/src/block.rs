//! Line-based block pass.
//!
//! Recognizes `#`..`######` headings, `-`/`*` and `1.` list items, and
//! blank-line paragraph breaks. The only state carried between lines is
//! the currently open list kind, so `<ul>`/`<ol>` close on a kind change
//! or at the end of a run.

use std::fmt::Write;

use crate::inline::render_inline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn open_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>\n",
            ListKind::Ordered => "<ol>\n",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>\n",
            ListKind::Ordered => "</ol>\n",
        }
    }
}

pub(crate) fn render_blocks(out: &mut String, text: &str) {
    let mut list: Option<ListKind> = None;
    let mut paragraph = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            flush_paragraph(out, &mut paragraph);
            close_list(out, &mut list);
            continue;
        }
        if let Some((level, rest)) = heading(line) {
            flush_paragraph(out, &mut paragraph);
            close_list(out, &mut list);
            let _ = write!(out, "<h{level}>");
            render_inline(out, rest);
            let _ = write!(out, "</h{level}>");
            out.push('\n');
            continue;
        }
        if let Some((kind, rest)) = list_item(line) {
            flush_paragraph(out, &mut paragraph);
            if list != Some(kind) {
                close_list(out, &mut list);
                out.push_str(kind.open_tag());
                list = Some(kind);
            }
            out.push_str("<li>");
            render_inline(out, rest);
            out.push_str("</li>\n");
            continue;
        }
        close_list(out, &mut list);
        if !paragraph.is_empty() {
            paragraph.push('\n');
        }
        paragraph.push_str(line);
    }
    flush_paragraph(out, &mut paragraph);
    close_list(out, &mut list);
}

fn flush_paragraph(out: &mut String, paragraph: &mut String) {
    if paragraph.is_empty() {
        return;
    }
    out.push_str("<p>");
    render_inline(out, paragraph);
    out.push_str("</p>\n");
    paragraph.clear();
}

fn close_list(out: &mut String, list: &mut Option<ListKind>) {
    if let Some(kind) = list.take() {
        out.push_str(kind.close_tag());
    }
}

/// `#`..`######` followed by a space.
fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    line[level..]
        .strip_prefix(' ')
        .map(|rest| (level, rest.trim_start()))
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    let line = line.trim_start();
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some((ListKind::Unordered, rest));
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(". ") {
            return Some((ListKind::Ordered, rest));
        }
    }
    None
}
