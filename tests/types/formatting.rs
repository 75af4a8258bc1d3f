use error_trail::{to_custom_string, to_string, Error, FormatOptions, StringFormat};
use std::io;

fn plain(invert_output: bool, with_external: bool) -> StringFormat {
    StringFormat::new(
        FormatOptions::default().invert_output(invert_output).with_external(with_external),
    )
}

fn abc_join() -> Error {
    Error::join([Error::new("A"), Error::new("B"), Error::new("C")]).wrap("outer")
}

#[test]
fn root_renders_code_and_message() {
    assert_eq!(to_string(&Error::new("x"), false), "code(unknown) x");
}

#[test]
fn empty_message_renders_nothing() {
    assert_eq!(to_string(&Error::new(""), false), "");
    assert_eq!(to_string(None::<&Error>, true), "");
}

#[test]
fn chain_renders_outermost_first() {
    let err = Error::new("root").wrap("inner").wrap("outer");
    assert_eq!(
        to_string(&err, false),
        "code(internal) outer: code(internal) inner: code(unknown) root"
    );
}

#[test]
fn inverted_chain_renders_root_first() {
    let err = Error::new("root").wrap("inner").wrap("outer");
    assert_eq!(
        to_custom_string(&err, &plain(true, true)),
        "code(unknown) root: code(internal) inner: code(internal) outer"
    );
}

#[test]
fn foreign_text_follows_its_root() {
    let err = Error::from(io::Error::other("disk full")).wrap("saving").wrap("exporting");

    assert_eq!(
        to_string(&err, false),
        "code(internal) exporting: code(internal) saving: disk full"
    );
    assert_eq!(
        to_custom_string(&err, &plain(true, true)),
        "disk full: code(internal) saving: code(internal) exporting"
    );
    assert_eq!(
        to_custom_string(&err, &plain(false, false)),
        "code(internal) exporting: code(internal) saving"
    );
}

#[test]
fn bare_foreign_error_renders_its_text() {
    let err = Error::from(io::Error::other("reset"));
    assert_eq!(to_string(&err, false), "reset");
    assert_eq!(to_custom_string(&err, &plain(false, false)), "");
}

#[test]
fn traced_bare_foreign_error_has_no_blank_line() {
    let err = Error::from(io::Error::other("fmt error"));
    assert_eq!(to_string(&err, true), "fmt error");
}

#[test]
fn traced_join_branch_starts_on_marker_line() {
    let err = Error::join([Error::from(io::Error::other("fmt error")), Error::new("local")]);
    let text = to_string(&err, true);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "code(unknown) join error");
    assert!(lines.contains(&"0>\tfmt error"), "{text}");
    let local = lines.iter().position(|line| *line == "1>\tcode(unknown) local").unwrap();
    // the local branch carries its frames, each indented one level deeper
    assert!(lines[local + 1].starts_with("\t\t"), "{text}");
    assert!(lines.iter().all(|line| !line.trim().is_empty()), "{text}");
}

#[test]
fn join_branches_render_one_per_line() {
    assert_eq!(
        to_string(&abc_join(), false),
        "code(internal) outer: code(unknown) join error\n\
         0>\tcode(unknown) A\n\
         1>\tcode(unknown) B\n\
         2>\tcode(unknown) C"
    );
}

#[test]
fn join_branches_keep_order_when_inverted() {
    assert_eq!(
        to_custom_string(&abc_join(), &plain(true, true)),
        "code(unknown) join error: code(internal) outer\n\
         0>\tcode(unknown) A\n\
         1>\tcode(unknown) B\n\
         2>\tcode(unknown) C"
    );
}

#[test]
fn join_branches_need_external_output() {
    assert_eq!(
        to_custom_string(&abc_join(), &plain(false, false)),
        "code(internal) outer: code(unknown) join error"
    );
}

#[test]
fn nested_join_branches_are_indented() {
    let err = Error::join([Error::join([Error::new("a"), Error::new("b")]), Error::new("c")]);
    assert_eq!(
        to_string(&err, false),
        "code(unknown) join error\n\
         0>\tcode(unknown) join error\n\
         \t0>\tcode(unknown) a\n\
         \t1>\tcode(unknown) b\n\
         1>\tcode(unknown) c"
    );
}

#[test]
fn custom_separators_are_used_verbatim() {
    let format = StringFormat { error_sep: " <- ".into(), ..plain(false, true) };
    let err = Error::from(io::Error::other("eof")).wrap("decoding").wrap("loading");

    assert_eq!(
        to_custom_string(&err, &format),
        "code(internal) loading <- code(internal) decoding <- eof"
    );
}

#[test]
fn traced_output_puts_frames_under_messages() {
    let err = Error::new("root").wrap("outer");
    let text = to_string(&err, true);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "code(internal) outer");
    assert!(lines[1].starts_with('\t'));
    assert!(lines[1].contains("traced_output_puts_frames_under_messages"), "{text}");
    assert_eq!(lines[2], "code(unknown) root");
    assert!(lines.len() > 3);
    assert!(lines[3..].iter().all(|line| line.starts_with('\t')));
}

#[test]
fn inverted_trace_reverses_frames() {
    let err = Error::new("root");
    let forward = to_custom_string(&err, &StringFormat::traced());
    let backward = to_custom_string(
        &err,
        &StringFormat::new(
            FormatOptions::default().with_trace(true).with_external(true).invert_trace(true),
        ),
    );

    let mut forward_frames: Vec<&str> = forward.lines().skip(1).collect();
    let backward_frames: Vec<&str> = backward.lines().skip(1).collect();
    forward_frames.reverse();
    assert_eq!(forward_frames, backward_frames);
}

#[test]
fn display_matches_renderer() {
    let err = Error::new("root").wrap("outer");

    assert_eq!(format!("{err}"), to_string(&err, false));
    assert_eq!(format!("{err:#}"), to_string(&err, true));
    assert_eq!(format!("{err:?}"), to_string(&err, true));
    assert!(format!("{err:#?}").contains("Wrap("));
}
