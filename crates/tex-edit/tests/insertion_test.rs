//! End-to-end checks of the engine's structural guarantees.

use tex_edit::{
    ArgTarget, Context, InsertEngine, InsertOptions, is_valid_position, next_valid_position,
    parse, position_info,
};

fn brace_balance(text: &str) -> bool {
    let mut depth = 0i32;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    depth == 0
}

#[test]
fn repaired_positions_are_always_valid() {
    let texts = [
        "",
        "plain",
        r"a\$b\\c",
        r"\frac{1}{2}",
        "$x^2$ and $$\\sum$$",
        "aπβ∞b",
    ];
    for text in texts {
        for pos in 0..=text.len() + 3 {
            let repaired = next_valid_position(text, pos);
            assert!(
                is_valid_position(text, repaired),
                "text {text:?}, pos {pos} repaired to {repaired}"
            );
        }
    }
}

#[test]
fn inserted_commands_have_balanced_braces() {
    let engine = InsertEngine::new();
    let documents = ["", "notes on $x$", r"\frac{}{}", "word (a+b)", "$$ $$"];
    let commands: &[(&str, &[&str])] = &[
        ("frac", &[]),
        ("sqrt", &["2"]),
        ("color", &["255", "0", "0"]),
        ("overline", &[]),
    ];
    for text in documents {
        for pos in 0..=text.len() {
            if !is_valid_position(text, pos) {
                continue;
            }
            for &(name, args) in commands {
                let edit =
                    engine.insert_command(text, pos, name, args, &InsertOptions::default());
                assert!(
                    brace_balance(&edit.text),
                    "unbalanced result {:?} for {name} at {pos} in {text:?}",
                    edit.text
                );
            }
        }
    }
}

#[test]
fn no_dollar_is_added_inside_math() {
    let engine = InsertEngine::new();
    let text = "$abc$";
    for pos in 1..=4 {
        let before = text.matches('$').count();
        let edit = engine.insert_command(text, pos, "frac", &[], &InsertOptions::default());
        assert_eq!(
            edit.text.matches('$').count(),
            before,
            "dollar added at {pos}: {:?}",
            edit.text
        );
    }
}

#[test]
fn default_cursor_sits_inside_first_braces() {
    let engine = InsertEngine::new();
    let edit = engine.insert_command("", 0, "frac", &[], &InsertOptions::default());
    assert_eq!(edit.text, r"$\frac{}{}$");
    assert_eq!(edit.cursor, 7);
    assert_eq!(&edit.text[edit.cursor - 1..=edit.cursor], "{}");
}

#[test]
fn matrix_cursor_follows_first_newline() {
    let engine = InsertEngine::new();
    let edit = engine.insert_matrix("", 0, 2, 2);
    assert!(edit.text.contains("\\begin{pmatrix}"));
    assert!(edit.text.contains("\\end{pmatrix}"));
    assert_eq!(edit.text.matches("\\\\").count(), 1);
    let first_newline = edit.text.find('\n').unwrap();
    assert_eq!(edit.cursor, first_newline + 1);
}

#[test]
fn in_argument_insertion_stays_inside_the_argument() {
    let engine = InsertEngine::new();
    let text = r"\color{}{}{}{some text}";
    let arg_start = text.find("{some").unwrap();
    let arg_end = text.len() - 1;
    for pos in arg_start + 1..=arg_end {
        let info = position_info(text, pos);
        assert_eq!(info.context, Context::CommandArg);
        let edit = engine.insert_command(text, pos, "frac", &[], &InsertOptions::default());
        // Every token of the result that carries a `$` must lie within
        // the grown argument's range.
        let tokens = parse(&edit.text);
        let arg = tokens[0].children.last().unwrap();
        for (idx, _) in edit.text.match_indices('$') {
            assert!(
                arg.start < idx && idx < arg.end,
                "dollar at {idx} escaped the argument in {:?}",
                edit.text
            );
        }
    }
}

#[test]
fn fraction_after_command_absorbs_it_as_numerator() {
    let engine = InsertEngine::new();
    let edit = engine.insert_fraction(r"\alpha", 6, &InsertOptions::default());
    assert_eq!(edit.text, r"$\frac{\alpha}{}$");
    // The cursor sits in the empty denominator.
    assert_eq!(&edit.text[edit.cursor - 1..=edit.cursor], "{}");
    let math = &parse(&edit.text)[0];
    let frac = &math.children[0];
    assert_eq!(frac.command_name(), Some("frac"));
    assert_eq!(frac.children[0].children[0].command_name(), Some("alpha"));
    assert!(frac.children[1].children.is_empty());
}

#[test]
fn arg_target_is_clamped() {
    let engine = InsertEngine::new();
    let options = InsertOptions {
        arg_target: Some(ArgTarget::Index(42)),
        ..InsertOptions::default()
    };
    let edit = engine.insert_command("", 0, "frac", &[], &options);
    // Clamped to the last argument.
    assert_eq!(edit.cursor, 9);
    let options = InsertOptions {
        arg_target: Some(ArgTarget::Index(-42)),
        ..InsertOptions::default()
    };
    let edit = engine.insert_command("", 0, "frac", &[], &options);
    assert_eq!(edit.cursor, 7);
}
