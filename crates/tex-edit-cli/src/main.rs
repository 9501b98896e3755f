use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

use clap::Parser;

use mdtex_renderer::{Display, render_markdown, render_math};

/// Renders Markdown+LaTeX documents to HTML
#[derive(Parser, Debug)]
#[command(version, about = "Renders Markdown+LaTeX documents to HTML", long_about = None)]
struct Args {
    /// The Markdown file to process; `-` reads from stdin
    #[arg(conflicts_with = "formula", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Write the output to this file instead of stdout
    #[arg(short, long, conflicts_with = "recursive", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Look recursively for Markdown files in the given directory and
    /// write an `.html` file next to each
    #[arg(short, long, conflicts_with = "formula")]
    recursive: bool,

    /// Wrap the output in a complete HTML page
    #[arg(long)]
    standalone: bool,

    /// Page title used by --standalone
    #[arg(long, default_value = "Preview", value_name = "STR")]
    title: String,

    /// Render a single LaTeX formula instead of a document
    #[arg(short, long, conflicts_with = "file")]
    formula: Option<String>,

    /// Sets the display style for the formula to "block"
    #[arg(short, long, requires = "formula")]
    block: bool,
}

fn main() {
    let args = Args::parse();
    if let Some(ref formula) = args.formula {
        let display = if args.block {
            Display::Block
        } else {
            Display::Inline
        };
        println!("{}", render_math(formula, display));
        return;
    }
    let Some(ref path) = args.file else {
        let html = finish(&args, &render_markdown(&read_stdin()));
        emit(&args, &html);
        return;
    };
    if path == &PathBuf::from("-") {
        let html = finish(&args, &render_markdown(&read_stdin()));
        emit(&args, &html);
    } else if args.recursive {
        render_tree(&args, path);
    } else {
        let source = fs::read_to_string(path).unwrap_or_else(|e| exit_io_error(path, e));
        let html = finish(&args, &render_markdown(&source));
        emit(&args, &html);
    }
}

fn read_stdin() -> String {
    let mut buffer = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
        exit_io_error(Path::new("stdin"), e);
    }
    buffer
}

fn emit(args: &Args, html: &str) {
    match args.output {
        Some(ref path) => {
            fs::write(path, html).unwrap_or_else(|e| exit_io_error(path, e));
        }
        None => print!("{html}"),
    }
}

/// Render every `.md` file under `path`, writing the `.html` sibling.
fn render_tree(args: &Args, path: &Path) {
    if path.is_dir() {
        let dir = fs::read_dir(path).unwrap_or_else(|e| exit_io_error(path, e));
        for entry in dir.filter_map(Result::ok) {
            render_tree(args, entry.path().as_ref());
        }
    } else if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
        let source = fs::read_to_string(path).unwrap_or_else(|e| exit_io_error(path, e));
        let html = finish(args, &render_markdown(&source));
        let out_path = path.with_extension("html");
        fs::write(&out_path, html).unwrap_or_else(|e| exit_io_error(&out_path, e));
    }
}

fn finish(args: &Args, body: &str) -> String {
    if !args.standalone {
        return body.to_owned();
    }
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        args.title, body
    )
}

fn exit_io_error(path: &Path, e: std::io::Error) -> ! {
    eprintln!("IO Error in '{}': {}", path.display(), e);
    std::process::exit(1);
}
