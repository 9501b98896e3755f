//! Recursive-descent walker for math spans.
//!
//! The walker turns the content of a `$...$`/`$$...$$` span into a tree of
//! [`MathNode`]s and emits HTML from it. The node set is closed; anything
//! the walker does not recognize, including commands with too few
//! arguments, becomes [`MathNode::Unknown`] and is emitted verbatim.

use crate::symbol::{BIG_OPERATORS, LIMIT_OPERATORS, SYMBOLS};

/// Whether an equation is an inline or a block-level one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Inline,
    Block,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MathNode<'a> {
    /// A literal character run.
    Run(&'a str),
    /// A symbol-table entry, e.g. `\alpha`.
    Symbol(&'static str),
    /// `{...}`
    Group(Vec<MathNode<'a>>),
    /// `\frac{num}{den}` and friends.
    Fraction {
        num: Vec<MathNode<'a>>,
        den: Vec<MathNode<'a>>,
    },
    /// `\sqrt[index]{radicand}`
    Root {
        index: Option<Vec<MathNode<'a>>>,
        radicand: Vec<MathNode<'a>>,
    },
    /// `\sum_{lower}^{upper}` and other large operators.
    BigOp {
        symbol: &'static str,
        lower: Option<Vec<MathNode<'a>>>,
        upper: Option<Vec<MathNode<'a>>>,
    },
    /// `\lim_{lower}` and other named operators.
    Limit {
        name: &'static str,
        lower: Option<Vec<MathNode<'a>>>,
    },
    /// `base_{sub}^{sup}` on an ordinary base.
    Script {
        base: Box<MathNode<'a>>,
        sub: Option<Vec<MathNode<'a>>>,
        sup: Option<Vec<MathNode<'a>>>,
    },
    /// `\color{r}{g}{b}{body}`
    Color {
        red: &'a str,
        green: &'a str,
        blue: &'a str,
        body: Vec<MathNode<'a>>,
    },
    /// Unrecognized input, emitted verbatim.
    Unknown(&'a str),
}

/// Render the content of one math span into `out`, wrapper element
/// included.
pub(crate) fn render_span(out: &mut String, latex: &str, display: Display) {
    match display {
        Display::Inline => out.push_str("<span class=\"math-inline\">"),
        Display::Block => out.push_str("<span class=\"math-display\">"),
    }
    emit_sequence(out, &parse(latex));
    out.push_str("</span>");
}

pub(crate) fn parse(latex: &str) -> Vec<MathNode<'_>> {
    let mut parser = MathParser {
        text: latex,
        bytes: latex.as_bytes(),
        pos: 0,
    };
    parser.sequence(None)
}

struct MathParser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> MathParser<'a> {
    /// Parse nodes until `stop` (not consumed) or end of input.
    fn sequence(&mut self, stop: Option<u8>) -> Vec<MathNode<'a>> {
        let mut nodes = Vec::new();
        while let Some(&b) = self.bytes.get(self.pos) {
            if Some(b) == stop {
                break;
            }
            match b {
                b'^' | b'_' => {
                    self.pos += 1;
                    let arg = self.script_argument();
                    attach_script(&mut nodes, b == b'_', arg);
                }
                _ => {
                    let node = self.atom();
                    nodes.push(node);
                }
            }
        }
        nodes
    }

    /// Parse one node, always consuming at least one byte.
    fn atom(&mut self) -> MathNode<'a> {
        match self.bytes[self.pos] {
            b'\\' => self.command(),
            b'{' => {
                self.pos += 1;
                let children = self.sequence(Some(b'}'));
                self.consume(b'}');
                MathNode::Group(children)
            }
            // A stray closer is literal text.
            b'}' | b']' => {
                let start = self.pos;
                self.pos += 1;
                MathNode::Run(&self.text[start..self.pos])
            }
            _ => self.run(),
        }
    }

    /// A run of ordinary characters, up to the next structural byte.
    fn run(&mut self) -> MathNode<'a> {
        let start = self.pos;
        while let Some(&b) = self.bytes.get(self.pos) {
            if matches!(b, b'\\' | b'{' | b'}' | b']' | b'^' | b'_') {
                break;
            }
            self.pos += 1;
        }
        MathNode::Run(&self.text[start..self.pos])
    }

    fn command(&mut self) -> MathNode<'a> {
        let start = self.pos;
        self.pos += 1;
        let name_start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(u8::is_ascii_alphabetic)
        {
            self.pos += 1;
        }
        if self.pos == name_start {
            // An escape pair like `\$` or `\{`; kept verbatim.
            if let Some(c) = self.text[self.pos..].chars().next() {
                self.pos += c.len_utf8();
            }
            return MathNode::Run(&self.text[start..self.pos]);
        }
        let name = &self.text[name_start..self.pos];
        match name {
            "frac" | "dfrac" | "tfrac" | "cfrac" => {
                match (self.brace_group(), self.brace_group()) {
                    (Some(num), Some(den)) => MathNode::Fraction { num, den },
                    _ => MathNode::Unknown(&self.text[start..self.pos]),
                }
            }
            "sqrt" => {
                let index = self.bracket_group();
                match self.brace_group() {
                    Some(radicand) => MathNode::Root { index, radicand },
                    None => MathNode::Unknown(&self.text[start..self.pos]),
                }
            }
            "color" => {
                let channels = (
                    self.raw_brace_group(),
                    self.raw_brace_group(),
                    self.raw_brace_group(),
                );
                match (channels, self.brace_group()) {
                    ((Some(red), Some(green), Some(blue)), Some(body)) => MathNode::Color {
                        red,
                        green,
                        blue,
                        body,
                    },
                    _ => MathNode::Unknown(&self.text[start..self.pos]),
                }
            }
            _ => {
                if let Some(&symbol) = BIG_OPERATORS.get(name) {
                    MathNode::BigOp {
                        symbol,
                        lower: None,
                        upper: None,
                    }
                } else if let Some(&display_name) = LIMIT_OPERATORS.get(name) {
                    MathNode::Limit {
                        name: display_name,
                        lower: None,
                    }
                } else if let Some(&symbol) = SYMBOLS.get(name) {
                    MathNode::Symbol(symbol)
                } else {
                    MathNode::Unknown(&self.text[start..self.pos])
                }
            }
        }
    }

    /// `{...}`, recursively parsed. `None` if the next byte is not `{`.
    fn brace_group(&mut self) -> Option<Vec<MathNode<'a>>> {
        if self.bytes.get(self.pos) != Some(&b'{') {
            return None;
        }
        self.pos += 1;
        let children = self.sequence(Some(b'}'));
        self.consume(b'}');
        Some(children)
    }

    /// `[...]`, recursively parsed. `None` if the next byte is not `[`.
    fn bracket_group(&mut self) -> Option<Vec<MathNode<'a>>> {
        if self.bytes.get(self.pos) != Some(&b'[') {
            return None;
        }
        self.pos += 1;
        let children = self.sequence(Some(b']'));
        self.consume(b']');
        Some(children)
    }

    /// `{...}` taken as a raw slice, brace nesting honored.
    fn raw_brace_group(&mut self) -> Option<&'a str> {
        if self.bytes.get(self.pos) != Some(&b'{') {
            return None;
        }
        let mut depth = 0usize;
        let mut p = self.pos;
        while p < self.bytes.len() {
            match self.bytes[p] {
                b'\\' => {
                    p += 2;
                    continue;
                }
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        let inner = &self.text[self.pos + 1..p];
                        self.pos = p + 1;
                        return Some(inner);
                    }
                }
                _ => {}
            }
            p += 1;
        }
        None
    }

    /// The argument of `^`/`_`: a brace group, a command, or one char.
    fn script_argument(&mut self) -> Vec<MathNode<'a>> {
        match self.bytes.get(self.pos) {
            Some(b'{') => self.brace_group().unwrap_or_default(),
            Some(b'\\') => vec![self.command()],
            Some(_) => {
                let start = self.pos;
                let c = self.text[start..].chars().next().expect("non-empty");
                self.pos += c.len_utf8();
                vec![MathNode::Run(&self.text[start..self.pos])]
            }
            None => Vec::new(),
        }
    }

    fn consume(&mut self, byte: u8) {
        if self.bytes.get(self.pos) == Some(&byte) {
            self.pos += 1;
        }
    }
}

/// Attach a `^`/`_` argument to the preceding node: big operators and
/// named operators take it as a limit, everything else becomes a
/// [`MathNode::Script`]. A multi-character run yields only its last
/// character as the base.
fn attach_script<'a>(nodes: &mut Vec<MathNode<'a>>, is_sub: bool, arg: Vec<MathNode<'a>>) {
    match nodes.last_mut() {
        Some(MathNode::BigOp { lower, upper, .. }) => {
            let slot = if is_sub { lower } else { upper };
            if slot.is_none() {
                *slot = Some(arg);
                return;
            }
        }
        Some(MathNode::Limit { lower, .. }) if is_sub => {
            if lower.is_none() {
                *lower = Some(arg);
                return;
            }
        }
        Some(MathNode::Script { sub, sup, .. }) => {
            let slot = if is_sub { sub } else { sup };
            if slot.is_none() {
                *slot = Some(arg);
                return;
            }
        }
        _ => {}
    }
    let base = match nodes.pop() {
        Some(MathNode::Run(text)) if text.chars().count() > 1 => {
            let last = text.chars().next_back().expect("non-empty run");
            let split = text.len() - last.len_utf8();
            nodes.push(MathNode::Run(&text[..split]));
            MathNode::Run(&text[split..])
        }
        Some(node) => node,
        None => MathNode::Group(Vec::new()),
    };
    let (sub, sup) = if is_sub {
        (Some(arg), None)
    } else {
        (None, Some(arg))
    };
    nodes.push(MathNode::Script {
        base: Box::new(base),
        sub,
        sup,
    });
}

pub(crate) fn emit_sequence(out: &mut String, nodes: &[MathNode]) {
    for node in nodes {
        emit(out, node);
    }
}

fn emit(out: &mut String, node: &MathNode) {
    match node {
        MathNode::Run(text) => out.push_str(text),
        MathNode::Symbol(symbol) => out.push_str(symbol),
        MathNode::Group(children) => emit_sequence(out, children),
        MathNode::Fraction { num, den } => {
            out.push_str("<span class=\"frac\"><span class=\"frac-num\">");
            emit_sequence(out, num);
            out.push_str("</span><span class=\"frac-den\">");
            emit_sequence(out, den);
            out.push_str("</span></span>");
        }
        MathNode::Root { index, radicand } => {
            out.push_str("<span class=\"root\">");
            if let Some(index) = index {
                out.push_str("<sup class=\"root-index\">");
                emit_sequence(out, index);
                out.push_str("</sup>");
            }
            out.push_str("√<span class=\"root-body\">");
            emit_sequence(out, radicand);
            out.push_str("</span></span>");
        }
        MathNode::BigOp {
            symbol,
            lower,
            upper,
        } => {
            if lower.is_none() && upper.is_none() {
                out.push_str(symbol);
                return;
            }
            out.push_str("<span class=\"bigop\"><span class=\"bigop-symbol\">");
            out.push_str(symbol);
            out.push_str("</span>");
            if let Some(lower) = lower {
                out.push_str("<sub class=\"bigop-lower\">");
                emit_sequence(out, lower);
                out.push_str("</sub>");
            }
            if let Some(upper) = upper {
                out.push_str("<sup class=\"bigop-upper\">");
                emit_sequence(out, upper);
                out.push_str("</sup>");
            }
            out.push_str("</span>");
        }
        MathNode::Limit { name, lower } => match lower {
            None => out.push_str(name),
            Some(lower) => {
                out.push_str("<span class=\"limop\">");
                out.push_str(name);
                out.push_str("<sub class=\"limop-lower\">");
                emit_sequence(out, lower);
                out.push_str("</sub></span>");
            }
        },
        MathNode::Script { base, sub, sup } => {
            emit(out, base);
            if let Some(sub) = sub {
                out.push_str("<sub>");
                emit_sequence(out, sub);
                out.push_str("</sub>");
            }
            if let Some(sup) = sup {
                out.push_str("<sup>");
                emit_sequence(out, sup);
                out.push_str("</sup>");
            }
        }
        MathNode::Color {
            red,
            green,
            blue,
            body,
        } => {
            out.push_str("<span style=\"color:rgb(");
            out.push_str(red);
            out.push(',');
            out.push_str(green);
            out.push(',');
            out.push_str(blue);
            out.push_str(")\">");
            emit_sequence(out, body);
            out.push_str("</span>");
        }
        MathNode::Unknown(text) => out.push_str(text),
    }
}
