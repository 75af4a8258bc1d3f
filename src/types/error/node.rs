//! The node kinds an [`Error`] can hold.
use super::Error;
use crate::types::{Code, ErrorVec, Properties, Stack};
use crate::types::stack::CallSite;
use core::fmt::{self, Debug, Display};
use serde::{Serialize, Serializer};
use std::error::Error as StdError;
use std::sync::Arc;

/// One link of an error chain.
///
/// Every traversal and renderer matches on this enum, so adding a kind is a
/// compile error everywhere it needs handling.
#[derive(Debug, Clone)]
pub enum Node {
    /// Terminal error created by this crate; owns the full stack.
    Root(RootError),
    /// Context added while propagating; owns only its own call site.
    Wrap(WrapError),
    /// Several independent failures merged into one.
    Join(JoinError),
    /// A foreign error, opaque apart from its text.
    External(ExternalError),
}

/// Terminal chain node.
#[derive(Debug, Clone)]
pub struct RootError {
    pub(crate) message: String,
    pub(crate) code: Code,
    /// Always an [`Node::External`] when present.
    pub(crate) external: Option<Error>,
    pub(crate) stack: Stack,
    pub(crate) properties: Properties,
    pub(crate) global: bool,
}

/// Context-adding chain node.
#[derive(Debug, Clone)]
pub struct WrapError {
    pub(crate) message: String,
    pub(crate) code: Code,
    pub(crate) properties: Properties,
    pub(crate) site: Option<CallSite>,
    pub(crate) cause: Error,
}

/// Composite node holding independent causes in the order they were given.
#[derive(Debug, Clone)]
pub struct JoinError {
    pub(crate) message: String,
    pub(crate) code: Code,
    pub(crate) properties: Properties,
    pub(crate) stack: Stack,
    pub(crate) causes: ErrorVec<Error>,
}

/// Node kinds that carry a message, a code and properties.
pub(crate) trait Status {
    fn message(&self) -> &str;
    fn code(&self) -> Code;
    fn set_code(&mut self, code: Code);
    fn properties(&self) -> &Properties;
    fn properties_mut(&mut self) -> &mut Properties;
}

macro_rules! status_node {
    ($($ty:ty),+ $(,)?) => {$(
        impl $ty {
            /// The message given at construction.
            #[inline]
            pub fn message(&self) -> &str {
                &self.message
            }

            #[inline]
            pub fn code(&self) -> Code {
                self.code
            }

            /// Attached key/value properties.
            #[inline]
            pub fn properties(&self) -> &Properties {
                &self.properties
            }
        }

        impl Status for $ty {
            fn message(&self) -> &str {
                &self.message
            }

            fn code(&self) -> Code {
                self.code
            }

            fn set_code(&mut self, code: Code) {
                self.code = code;
            }

            fn properties(&self) -> &Properties {
                &self.properties
            }

            fn properties_mut(&mut self) -> &mut Properties {
                &mut self.properties
            }
        }
    )+};
}

status_node!(RootError, WrapError, JoinError);

impl RootError {
    #[inline]
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// The foreign error this root adapts, if any.
    pub fn external(&self) -> Option<&ExternalError> {
        match self.external.as_ref().map(Error::node) {
            Some(Node::External(external)) => Some(external),
            _ => None,
        }
    }

    /// Whether the root was declared once in a `static` and is meant to be
    /// reused.
    #[inline]
    pub fn is_global(&self) -> bool {
        self.global
    }
}

impl WrapError {
    /// Where the wrap happened.
    #[inline]
    pub fn site(&self) -> Option<CallSite> {
        self.site
    }

    /// The next error in the chain.
    #[inline]
    pub fn cause(&self) -> &Error {
        &self.cause
    }
}

impl JoinError {
    #[inline]
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// The joined errors in the order they were supplied.
    #[inline]
    pub fn causes(&self) -> &[Error] {
        &self.causes
    }
}

impl Node {
    pub(crate) fn status(&self) -> Option<&dyn Status> {
        match self {
            Node::Root(root) => Some(root),
            Node::Wrap(wrap) => Some(wrap),
            Node::Join(join) => Some(join),
            Node::External(_) => None,
        }
    }

    pub(crate) fn status_mut(&mut self) -> Option<&mut dyn Status> {
        match self {
            Node::Root(root) => Some(root),
            Node::Wrap(wrap) => Some(wrap),
            Node::Join(join) => Some(join),
            Node::External(_) => None,
        }
    }

    /// Structural identity: same kind, same message and code. Properties are
    /// not compared. A local node also matches a foreign target whose text
    /// equals its message (roots only while their code is still `Unknown`).
    pub(crate) fn matches(&self, target: &Node) -> bool {
        match (self, target) {
            (Node::Root(a), Node::Root(b)) => a.message == b.message && a.code == b.code,
            (Node::Wrap(a), Node::Wrap(b)) => a.message == b.message && a.code == b.code,
            (Node::Join(a), Node::Join(b)) => a.message == b.message && a.code == b.code,
            (Node::External(a), Node::External(b)) => a.same_as(b),
            (Node::Root(a), Node::External(b)) => {
                a.code == Code::Unknown && a.message == b.to_string()
            },
            (Node::Wrap(a), Node::External(b)) => a.message == b.to_string(),
            _ => false,
        }
    }

    /// Same kind and same message, the looser match used by `as_error`.
    pub(crate) fn same_message(&self, target: &Node) -> bool {
        match (self, target) {
            (Node::Root(a), Node::Root(b)) => a.message == b.message,
            (Node::Wrap(a), Node::Wrap(b)) => a.message == b.message,
            (Node::Join(a), Node::Join(b)) => a.message == b.message,
            (Node::External(a), Node::External(b)) => a.same_as(b),
            _ => false,
        }
    }
}

/// A foreign error carried as an opaque leaf.
#[derive(Clone)]
pub struct ExternalError {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

impl ExternalError {
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self { inner: Arc::new(error) }
    }

    /// The wrapped foreign error.
    #[inline]
    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner
    }

    /// Text used by the renderers; the alternate form is used with traces.
    pub fn render(&self, with_trace: bool) -> String {
        if with_trace {
            format!("{:#}", self.inner)
        } else {
            self.inner.to_string()
        }
    }

    /// Looks for an `E` in the foreign error and its `source()` chain.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        let mut current: Option<&(dyn StdError + 'static)> = Some(self.get_ref());
        while let Some(error) = current {
            if let Some(found) = error.downcast_ref::<E>() {
                return Some(found);
            }
            current = error.source();
        }
        None
    }

    fn same_as(&self, other: &ExternalError) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.to_string() == other.to_string()
    }
}

impl Display for ExternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl Debug for ExternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.inner, f)
    }
}

impl PartialEq for ExternalError {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Serialize for ExternalError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.inner)
    }
}
