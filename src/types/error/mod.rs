//! The error handle and the chain construction algorithm.
//!
//! An [`Error`] owns one boxed [`Node`]. Chains are built by the three
//! constructors:
//! - [`Error::new`] creates a root and captures the full call stack
//! - [`Error::wrap`] adds context and merges the wrap site into the root's stack
//! - [`Error::join`] merges independent failures into one composite error
//!
//! Mutators such as [`Error::with_code`] are consuming builders: the node is
//! moved in, updated in place and handed back. Reusing an error from several
//! places (a sentinel in a `static`) therefore always goes through `clone()`.
use crate::types::code::{DEFAULT_CODE_JOIN, DEFAULT_CODE_NEW, DEFAULT_CODE_WRAP};
use crate::types::{Code, ErrorVec, GrpcCode, Properties, Stack};
use serde::Serialize;
use serde_json::Value;

mod node;
mod traits;

pub use node::{ExternalError, JoinError, Node, RootError, WrapError};

/// Message used when a foreign error has to be promoted before fields can be
/// attached to it.
const PROMOTION_MESSAGE: &str = "with property";

/// Message of every join node.
pub const JOIN_MESSAGE: &str = "join error";

/// An error chain.
///
/// # Examples
///
/// ```
/// use error_trail::{Code, Error};
///
/// let err = Error::new("connection refused")
///     .with_code(Code::Unavailable)
///     .with_property("host", "db-1")
///     .wrap("loading user");
///
/// assert_eq!(
///     err.to_string(),
///     "code(internal) loading user: code(unavailable) connection refused"
/// );
/// ```
#[must_use]
#[derive(Clone)]
pub struct Error {
    node: Box<Node>,
}

/// A single change applied by [`Error::with_field`].
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Code(Code),
    Property { key: String, value: Value },
}

impl Field {
    #[inline]
    pub fn code(code: Code) -> Self {
        Field::Code(code)
    }

    /// Builds a property field; see [`Error::with_property`] for how values
    /// are converted.
    pub fn kv<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Serialize,
    {
        Field::Property { key: key.into(), value: to_property_value(value) }
    }
}

/// Serializes a property value. Values serde_json rejects become `{}`.
pub(crate) fn to_property_value<V: Serialize>(value: V) -> Value {
    serde_json::to_value(value).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    #[inline]
    pub(crate) fn from_node(node: Node) -> Self {
        Self { node: Box::new(node) }
    }

    /// Creates a root error with code [`Code::Unknown`].
    ///
    /// The full call stack is captured here. When the call happens while a
    /// `static` is being lazily initialized the root is marked global: every
    /// later wrap of it starts a fresh stack instead of extending the shared
    /// one.
    #[inline(never)]
    pub fn new(message: impl Into<String>) -> Self {
        let stack = Stack::capture(1);
        let global = stack.is_global();
        Self::from_node(Node::Root(RootError {
            message: message.into(),
            code: DEFAULT_CODE_NEW,
            external: None,
            stack,
            properties: Properties::new(),
            global,
        }))
    }

    /// Adds context to the chain with code [`Code::Internal`].
    ///
    /// - a global root is re-rooted with a stack captured here
    /// - any other root, or the root/join under a wrap, records this call site
    /// - a foreign error becomes a new root carrying it as external cause
    ///
    /// ```
    /// use error_trail::{Error, Node};
    ///
    /// let io = std::io::Error::other("disk full");
    /// let err = Error::from(io).wrap("saving report");
    ///
    /// // the foreign error sits one hop inside its first local wrapper
    /// assert!(matches!(err.node(), Node::Root(_)));
    /// assert_eq!(err.to_string(), "code(internal) saving report: disk full");
    /// ```
    #[inline(never)]
    pub fn wrap(self, message: impl Into<String>) -> Self {
        self.wrap_at(message.into(), DEFAULT_CODE_WRAP, 2)
    }

    /// Wrap with an explicit number of library frames to hide, counting this
    /// function and every library caller between it and user code.
    #[inline(never)]
    pub(crate) fn wrap_at(mut self, message: String, code: Code, skip: usize) -> Self {
        let callers = Stack::capture(skip);

        if let Some(external) = self.as_external() {
            let external = Self::from_node(Node::External(external.clone()));
            return Self::from_node(Node::Root(RootError {
                message,
                code,
                external: Some(external),
                stack: callers,
                properties: Properties::new(),
                global: false,
            }));
        }

        if self.is_global() {
            // a fresh copy of the sentinel: message and code only
            if let Node::Root(root) = &mut *self.node {
                root.stack = callers.clone();
                root.properties = Properties::new();
            }
        } else if let Some(stack) = self.local_stack_mut() {
            stack.insert(&callers);
        }

        Self::from_node(Node::Wrap(WrapError {
            message,
            code,
            properties: Properties::new(),
            site: callers.first(),
            cause: self,
        }))
    }

    /// Stack of the first root or join reached through wrap links.
    fn local_stack_mut(&mut self) -> Option<&mut Stack> {
        match &mut *self.node {
            Node::Root(root) => Some(&mut root.stack),
            Node::Join(join) => Some(&mut join.stack),
            Node::Wrap(wrap) => wrap.cause.local_stack_mut(),
            Node::External(_) => None,
        }
    }

    /// Merges independent errors into one, keeping their order.
    ///
    /// `None` entries are skipped. The join has its own message
    /// (`"join error"`), code and stack, and is wrapped like any other error.
    ///
    /// ```
    /// use error_trail::Error;
    ///
    /// let err = Error::join([Some(Error::new("a")), None, Some(Error::new("b"))]);
    /// assert_eq!(err.unpack().joins.len(), 2);
    /// ```
    #[inline(never)]
    pub fn join<I>(causes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Error>>,
    {
        let stack = Stack::capture(1);
        let causes: ErrorVec<Error> = causes.into_iter().filter_map(Into::into).collect();
        Self::from_node(Node::Join(JoinError {
            message: JOIN_MESSAGE.into(),
            code: DEFAULT_CODE_JOIN,
            properties: Properties::new(),
            stack,
            causes,
        }))
    }

    /// Sets the code.
    #[inline(never)]
    pub fn with_code(self, code: Code) -> Self {
        self.apply_fields([Field::Code(code)], 1)
    }

    /// Sets the code from an HTTP status. Success statuses keep the current
    /// code; statuses without a mapping set [`Code::Unknown`].
    #[inline(never)]
    pub fn with_code_http(self, status: u16) -> Self {
        if (200..300).contains(&status) {
            return self;
        }
        let code = Code::from_http(status).unwrap_or(Code::Unknown);
        self.apply_fields([Field::Code(code)], 1)
    }

    /// Sets the code from a gRPC status. `GrpcCode::Ok` keeps the current
    /// code.
    #[inline(never)]
    pub fn with_code_grpc(self, status: GrpcCode) -> Self {
        match Code::from_grpc(status) {
            Some(code) => self.apply_fields([Field::Code(code)], 1),
            None => self,
        }
    }

    /// Attaches a property, replacing any previous value under `key`.
    ///
    /// The value is serialized with serde_json right away; a value that
    /// cannot be serialized is stored as an empty object.
    #[inline(never)]
    pub fn with_property<K, V>(self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Serialize,
    {
        self.apply_fields([Field::kv(key, value)], 1)
    }

    #[inline(never)]
    pub fn with_field(self, field: Field) -> Self {
        self.apply_fields([field], 1)
    }

    #[inline(never)]
    pub fn with_fields<I>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        self.apply_fields(fields, 1)
    }

    /// Applies fields to the outermost node. A foreign error is promoted to
    /// a root first so it has somewhere to hold them.
    #[inline(never)]
    pub(crate) fn apply_fields<I>(self, fields: I, outer: usize) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        let mut err = if self.as_external().is_some() {
            self.wrap_at(PROMOTION_MESSAGE.into(), DEFAULT_CODE_WRAP, outer + 2)
        } else {
            self
        };
        if let Some(status) = err.node.status_mut() {
            for field in fields {
                match field {
                    Field::Code(code) => status.set_code(code),
                    Field::Property { key, value } => {
                        status.properties_mut().insert(key, value);
                    },
                }
            }
        }
        err
    }

    /// The node at the head of the chain.
    #[inline]
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Message of the head node; empty for a foreign error.
    pub fn message(&self) -> &str {
        self.node.status().map_or("", |status| status.message())
    }

    /// Code of the head node; [`Code::Unknown`] for a foreign error.
    pub fn code(&self) -> Code {
        self.node.status().map_or(Code::Unknown, |status| status.code())
    }

    /// Properties of the head node; `None` for a foreign error.
    pub fn properties(&self) -> Option<&Properties> {
        self.node.status().map(|status| status.properties())
    }

    /// Whether the head node is a global root.
    pub fn is_global(&self) -> bool {
        matches!(&*self.node, Node::Root(root) if root.global)
    }

    /// Returns the foreign error at the head of the chain, if that is what
    /// this is.
    pub fn as_external(&self) -> Option<&ExternalError> {
        match &*self.node {
            Node::External(external) => Some(external),
            _ => None,
        }
    }
}
