use error_trail::{chain, Code, Error, Field};
use serde_json::json;
use std::fmt;
use std::io;

#[derive(Debug)]
struct ConfigError {
    source: io::Error,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid config")
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[test]
fn wrap_of_absent_error_is_absent() {
    assert!(chain::wrap(None::<Error>, "x").is_none());
    assert!(chain::wrap(None::<io::Error>, "").is_none());
}

#[test]
fn wrap_of_present_error_adds_context() {
    let err = chain::wrap(Some(io::Error::other("eof")), "reading").unwrap();
    assert_eq!(err.to_string(), "code(internal) reading: eof");

    let err = chain::wrap(Some(err), "loading").unwrap();
    assert_eq!(err.to_string(), "code(internal) loading: code(internal) reading: eof");
}

#[test]
fn unwrap_follows_one_link() {
    let root = Error::new("root");
    assert!(chain::unwrap(&root).is_none());

    let wrapped = root.wrap("ctx");
    assert_eq!(chain::unwrap(&wrapped).map(Error::message), Some("root"));

    let adapted = Error::from(io::Error::other("eof")).wrap("reading");
    assert!(chain::unwrap(&adapted).unwrap().as_external().is_some());
    assert!(chain::unwrap(chain::unwrap(&adapted).unwrap()).is_none());

    let joined = Error::join([Error::new("a")]);
    assert!(chain::unwrap(&joined).is_none());
}

#[test]
fn is_is_reflexive() {
    let cases = [
        Error::new("root"),
        Error::new("root").wrap("ctx"),
        Error::from(io::Error::other("eof")),
        Error::join([Error::new("a")]),
    ];
    for err in &cases {
        assert!(chain::is(err, err));
    }
}

#[test]
fn is_matches_message_and_code_but_not_properties() {
    let target = Error::new("not found").with_code(Code::NotFound);
    let err = Error::new("not found")
        .with_code(Code::NotFound)
        .with_property("id", 3)
        .wrap("loading")
        .wrap("handling");

    assert!(chain::is(&err, &target));
    assert!(!chain::is(&err, &Error::new("not found")));
    assert!(!chain::is(&err, &Error::new("gone").with_code(Code::NotFound)));
}

#[test]
fn is_matches_wraps_structurally() {
    let err = Error::new("root").wrap("loading").wrap("handling");
    let target = Error::new("other").wrap("loading");

    assert!(chain::is(&err, &target));
}

#[test]
fn is_finds_shared_foreign_error() {
    let io = Error::from(io::Error::other("disk full"));
    let err = io.clone().wrap("saving").wrap("exporting");

    assert!(chain::is(&err, &io));
    assert!(!chain::is(&err, &Error::from(io::Error::other("disk empty"))));
}

#[test]
fn local_nodes_match_foreign_text() {
    let foreign = Error::from(io::Error::other("timeout"));

    assert!(chain::is(&Error::new("timeout"), &foreign));
    assert!(!chain::is(&Error::new("timeout").with_code(Code::DeadlineExceeded), &foreign));
    assert!(chain::is(&Error::new("root").wrap("timeout"), &foreign));
}

#[test]
fn walks_stop_at_joins() {
    let branch = Error::new("branch");
    let err = Error::join([branch.clone()]).wrap("outer");

    assert!(!chain::is(&err, &branch));
    assert_eq!(chain::cause(&err).message(), "join error");
}

#[test]
fn as_error_returns_first_node_with_same_message() {
    let err = Error::new("root").with_code(Code::NotFound).wrap("loading").wrap("handling");

    let found = chain::as_error(&err, &Error::new("root")).unwrap();
    assert_eq!(found.code(), Code::NotFound);

    let found = chain::as_error(&err, &Error::new("x").wrap("loading")).unwrap();
    assert_eq!(found.message(), "loading");

    assert!(chain::as_error(&err, &Error::new("missing")).is_none());
}

#[test]
fn downcast_ref_finds_foreign_types() {
    let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "missing")).wrap("opening");

    let io = chain::downcast_ref::<io::Error>(&err).unwrap();
    assert_eq!(io.kind(), io::ErrorKind::NotFound);
    assert!(chain::downcast_ref::<fmt::Error>(&err).is_none());
    assert!(chain::downcast_ref::<io::Error>(&Error::new("local")).is_none());
}

#[test]
fn downcast_ref_searches_foreign_sources() {
    let config = ConfigError { source: io::Error::new(io::ErrorKind::InvalidData, "bad utf-8") };
    let err = Error::from(config).wrap("starting");

    assert!(chain::downcast_ref::<ConfigError>(&err).is_some());
    let io = chain::downcast_ref::<io::Error>(&err).unwrap();
    assert_eq!(io.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn cause_returns_last_reachable_error() {
    let err = Error::new("root").wrap("a").wrap("b");
    assert_eq!(chain::cause(&err).message(), "root");

    let err = Error::from(io::Error::other("eof")).wrap("a").wrap("b");
    let cause = chain::cause(&err);
    assert!(cause.as_external().is_some());
    assert_eq!(cause.to_string(), "eof");
}

#[test]
fn stack_frames_depend_on_node_kind() {
    let root = Error::new("root");
    assert!(!chain::stack_frames(&root).is_empty());

    let wrapped = root.wrap("ctx");
    assert_eq!(chain::stack_frames(&wrapped).len(), 1);

    let foreign = Error::from(io::Error::other("eof"));
    assert!(chain::stack_frames(&foreign).is_empty());

    let joined = Error::join([Error::new("a")]);
    assert!(!chain::stack_frames(&joined).is_empty());
}

#[test]
fn get_code_defaults_to_unknown_for_foreign_errors() {
    assert_eq!(chain::get_code(&Error::from(io::Error::other("eof"))), Code::Unknown);
    assert_eq!(chain::get_code(&Error::new("x").with_code(Code::Aborted)), Code::Aborted);
    assert_eq!(chain::get_code(&Error::new("x").wrap("y")), Code::Internal);
}

#[test]
fn free_mutators_match_methods() {
    let err = chain::with(Error::new("x"), [Field::code(Code::OutOfRange), Field::kv("max", 10)]);
    assert_eq!(err.code(), Code::OutOfRange);
    assert_eq!(err.properties().unwrap()["max"], json!(10));

    let err = chain::with_code(err, Code::Aborted);
    assert_eq!(err.code(), Code::Aborted);

    let err = chain::with_property(Error::from(io::Error::other("eof")), "path", "/tmp/a");
    assert_eq!(err.message(), "with property");
    assert_eq!(err.properties().unwrap()["path"], json!("/tmp/a"));
}
