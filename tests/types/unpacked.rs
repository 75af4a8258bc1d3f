use error_trail::{chain, unpack, Code, Error, UnpackedError};
use std::io;

#[test]
fn chain_lists_outermost_wrap_first() {
    let err = Error::new("root").wrap("inner").wrap("outer").with_code(Code::Aborted);
    let unpacked = unpack(&err);

    assert!(unpacked.external.is_none());
    assert!(unpacked.joins.is_empty());
    assert_eq!(unpacked.root.message, "root");
    assert_eq!(unpacked.root.code, Code::Unknown);
    assert!(!unpacked.root.stack.is_empty());

    let messages: Vec<_> = unpacked.chain.iter().map(|link| link.message.as_str()).collect();
    assert_eq!(messages, ["outer", "inner"]);
    assert_eq!(unpacked.chain[0].code, Code::Aborted);
    assert_eq!(unpacked.chain[1].code, Code::Internal);
    assert!(unpacked.chain.iter().all(|link| link.site.is_some()));
}

#[test]
fn promoted_root_keeps_foreign_error_as_external() {
    let err = Error::from(io::Error::other("disk full")).wrap("saving").wrap("exporting");
    let unpacked = err.unpack();

    assert_eq!(unpacked.root.message, "saving");
    assert_eq!(unpacked.chain.len(), 1);
    assert_eq!(unpacked.external.as_ref().map(ToString::to_string).as_deref(), Some("disk full"));
}

#[test]
fn bare_foreign_error_fills_only_external() {
    let err = Error::from(io::Error::other("reset"));
    let unpacked = unpack(&err);

    assert!(unpacked.external.is_some());
    assert!(unpacked.root.message.is_empty());
    assert!(unpacked.root.stack.is_empty());
    assert!(unpacked.chain.is_empty());
}

#[test]
fn joins_unpack_every_branch_in_order() {
    let inner = Error::join([Error::new("a"), Error::new("b")]);
    let err = Error::join([inner, Error::new("c").wrap("c ctx")]).wrap("outer");
    let unpacked = unpack(&err);

    assert_eq!(unpacked.chain.len(), 1);
    assert_eq!(unpacked.root.message, "join error");
    assert_eq!(unpacked.joins.len(), 2);

    let nested = &unpacked.joins[0];
    assert_eq!(nested.root.message, "join error");
    assert_eq!(nested.joins[0].root.message, "a");
    assert_eq!(nested.joins[1].root.message, "b");

    let last = &unpacked.joins[1];
    assert_eq!(last.root.message, "c");
    assert_eq!(last.chain[0].message, "c ctx");
}

#[test]
fn root_message_is_innermost_local_message() {
    let foreign = || Error::from(io::Error::other("timeout"));
    let cases = [
        Error::new("plain"),
        Error::new("plain").wrap("ctx"),
        foreign().wrap("adapted"),
        foreign().wrap("adapted").wrap("ctx"),
        Error::join([Error::new("x")]).wrap("ctx"),
    ];

    for err in &cases {
        let mut local = err;
        while let Some(next) = chain::unwrap(local) {
            if next.as_external().is_some() {
                break;
            }
            local = next;
        }
        assert_eq!(unpack(err).root.message, local.message());
    }
}

#[test]
fn unpacking_is_idempotent() {
    let err = Error::join([Error::new("a"), Error::from(io::Error::other("b"))])
        .wrap("outer")
        .with_property("k", "v");

    assert_eq!(unpack(&err), unpack(&err));
}

#[test]
fn absent_error_unpacks_to_empty_projection() {
    assert_eq!(unpack(None::<&Error>), UnpackedError::default());
}

#[test]
fn projection_serializes_with_resolved_frames() {
    let err = Error::new("root").with_property("k", 1).wrap("outer");
    let value = serde_json::to_value(unpack(&err)).unwrap();

    assert_eq!(value["root"]["message"], "root");
    assert_eq!(value["root"]["code"], "unknown");
    assert_eq!(value["root"]["properties"]["k"], 1);
    assert!(value["root"]["stack"].as_array().is_some_and(|frames| !frames.is_empty()));
    assert!(value["root"]["stack"][0]["function"].is_string());
    assert_eq!(value["chain"][0]["message"], "outer");
    assert!(value["chain"][0]["site"]["line"].is_u64());
    assert!(value.get("external").is_none());
    assert!(value.get("joins").is_none());
}
