//! Free functions for building and walking error chains.
//!
//! A walk starts at the outermost node and follows [`unwrap`] one hop at a
//! time: a wrap leads to its cause, a root to the foreign error it adapts.
//! Joins and foreign errors end a walk; join branches are only reachable
//! through [`unpack`](crate::unpack).
//!
//! # Examples
//!
//! ```
//! use error_trail::{chain, Code, Error};
//!
//! let not_found = Error::new("user missing").with_code(Code::NotFound);
//! let err = not_found.clone().wrap("loading profile").wrap("handling request");
//!
//! assert!(chain::is(&err, &not_found));
//! assert_eq!(chain::cause(&err).message(), "user missing");
//! assert_eq!(chain::get_code(&err), Code::Internal);
//! ```
use crate::types::code::DEFAULT_CODE_WRAP;
use crate::types::{Code, Error, Field, Node};
use serde::Serialize;
use std::error::Error as StdError;

/// Wraps a possibly absent error. `None` stays `None`.
///
/// ```
/// use error_trail::{chain, Error};
///
/// assert!(chain::wrap(None::<Error>, "ignored").is_none());
/// assert!(chain::wrap(Some(Error::new("root")), "context").is_some());
/// ```
#[inline(never)]
pub fn wrap<E>(err: Option<E>, message: impl Into<String>) -> Option<Error>
where
    E: Into<Error>,
{
    match err {
        Some(err) => Some(err.into().wrap_at(message.into(), DEFAULT_CODE_WRAP, 2)),
        None => None,
    }
}

/// The next error in the chain, if any.
pub fn unwrap(err: &Error) -> Option<&Error> {
    match err.node() {
        Node::Root(root) => root.external.as_ref(),
        Node::Wrap(wrap) => Some(&wrap.cause),
        Node::Join(_) | Node::External(_) => None,
    }
}

/// Reports whether any node of `err` matches `target`.
///
/// Nodes match when they are the same value, or when they are of the same
/// kind with the same message and code; properties are ignored. A local
/// node also matches a foreign target with the same text.
pub fn is(err: &Error, target: &Error) -> bool {
    walk(err).any(|node| {
        core::ptr::eq(node, target)
            || core::ptr::eq(node.node(), target.node())
            || node.node().matches(target.node())
    })
}

/// First node of `err` with the same kind and message as `target`.
pub fn as_error<'a>(err: &'a Error, target: &Error) -> Option<&'a Error> {
    walk(err).find(|node| node.node().same_message(target.node()))
}

/// Finds a foreign error of type `E` in the chain, looking through the
/// foreign error's own `source()` chain as well.
///
/// ```
/// use error_trail::{chain, Error};
/// use std::io;
///
/// let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "missing")).wrap("open");
/// let io = chain::downcast_ref::<io::Error>(&err).unwrap();
/// assert_eq!(io.kind(), io::ErrorKind::NotFound);
/// ```
pub fn downcast_ref<E>(err: &Error) -> Option<&E>
where
    E: StdError + 'static,
{
    walk(err).find_map(|node| node.as_external().and_then(|external| external.downcast_ref::<E>()))
}

/// The last error reached by repeated [`unwrap`].
pub fn cause(err: &Error) -> &Error {
    let mut current = err;
    while let Some(next) = unwrap(current) {
        current = next;
    }
    current
}

/// Raw call-site addresses recorded on the head node, for handing to other
/// trace reporters.
///
/// A root or join yields its whole stack, a wrap its own call site and a
/// foreign error nothing.
pub fn stack_frames(err: &Error) -> Vec<usize> {
    match err.node() {
        Node::Root(root) => root.stack.addrs(),
        Node::Join(join) => join.stack.addrs(),
        Node::Wrap(wrap) => wrap.site.map(|site| site.addr()).into_iter().collect(),
        Node::External(_) => Vec::new(),
    }
}

/// Code of the head node, [`Code::Unknown`] for a foreign error.
#[inline]
pub fn get_code(err: &Error) -> Code {
    err.code()
}

/// Applies `fields` to the head node; see [`Error::with_fields`].
///
/// ```
/// use error_trail::{chain, Code, Error, Field};
///
/// let err = chain::with(Error::new("denied"), [Field::code(Code::PermissionDenied), Field::kv("user", 7)]);
/// assert_eq!(err.code(), Code::PermissionDenied);
/// assert_eq!(err.properties().unwrap()["user"], 7);
/// ```
#[inline(never)]
pub fn with<I>(err: Error, fields: I) -> Error
where
    I: IntoIterator<Item = Field>,
{
    err.apply_fields(fields, 1)
}

#[inline(never)]
pub fn with_code(err: Error, code: Code) -> Error {
    err.apply_fields([Field::Code(code)], 1)
}

#[inline(never)]
pub fn with_property<K, V>(err: Error, key: K, value: V) -> Error
where
    K: Into<String>,
    V: Serialize,
{
    err.apply_fields([Field::kv(key, value)], 1)
}

fn walk(err: &Error) -> impl Iterator<Item = &Error> {
    core::iter::successors(Some(err), |current| unwrap(*current))
}
