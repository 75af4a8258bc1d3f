//! The render-ready projection of an error chain.
//!
//! [`unpack`] flattens a chain of any shape into one [`UnpackedError`]:
//! one optional foreign payload, one root descriptor, the wrap links in
//! order, and, when the chain ends in a join, one nested projection per
//! branch. Renderers consume only this projection and never walk the raw
//! chain themselves.
use crate::chain;
use crate::types::stack::{CallSite, Frame};
use crate::types::{Code, Error, ErrorVec, ExternalError, Node, Properties, Stack};
use serde::Serialize;

/// Flattened view of an error chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnpackedError {
    /// The foreign error the chain ends in, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalError>,
    pub root: ErrRoot,
    /// Wrap links, outermost first.
    pub chain: ErrorVec<ErrLink>,
    /// One projection per join branch, in join order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub joins: Vec<UnpackedError>,
}

/// The root (or join) at the bottom of the local chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrRoot {
    pub message: String,
    pub code: Code,
    /// Stack of the root, resolved only when formatted or serialized.
    pub stack: Stack,
    pub properties: Properties,
}

/// One wrap link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrLink {
    pub message: String,
    pub code: Code,
    /// Where the wrap happened.
    pub site: Option<CallSite>,
    pub properties: Properties,
}

impl ErrRoot {
    #[inline]
    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }
}

impl ErrLink {
    #[inline]
    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    /// Resolves the wrap site; unknown sites resolve to a placeholder.
    pub fn frame(&self) -> Frame {
        self.site.map(CallSite::resolve).unwrap_or_default()
    }
}

/// Flattens `err`; an absent error unpacks to an empty projection.
///
/// ```
/// use error_trail::{unpack, Error};
///
/// let err = Error::new("root").wrap("inner").wrap("outer");
/// let unpacked = unpack(&err);
///
/// assert_eq!(unpacked.root.message, "root");
/// assert_eq!(unpacked.chain[0].message, "outer");
/// assert_eq!(unpacked.chain[1].message, "inner");
/// ```
pub fn unpack<'a>(err: impl Into<Option<&'a Error>>) -> UnpackedError {
    let mut unpacked = UnpackedError::default();
    let mut current = err.into();

    while let Some(err) = current {
        match err.node() {
            Node::Root(root) => {
                unpacked.root = ErrRoot {
                    message: root.message.clone(),
                    code: root.code,
                    stack: root.stack.clone(),
                    properties: root.properties.clone(),
                };
            },
            Node::Wrap(wrap) => unpacked.chain.push(ErrLink {
                message: wrap.message.clone(),
                code: wrap.code,
                site: wrap.site,
                properties: wrap.properties.clone(),
            }),
            Node::Join(join) => {
                unpacked.root = ErrRoot {
                    message: join.message.clone(),
                    code: join.code,
                    stack: join.stack.clone(),
                    properties: join.properties.clone(),
                };
                unpacked.joins = join.causes.iter().map(unpack).collect();
                break;
            },
            Node::External(external) => {
                unpacked.external = Some(external.clone());
                break;
            },
        }
        current = chain::unwrap(err);
    }

    unpacked
}

impl Error {
    /// Flattens this chain; see [`unpack`].
    #[inline]
    pub fn unpack(&self) -> UnpackedError {
        unpack(self)
    }
}
