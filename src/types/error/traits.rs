use super::{Error, ExternalError, Node};
use crate::types::error_formatter;
use core::fmt::{self, Debug, Display};
use std::error::Error as StdError;

impl Display for Error {
    /// `{}` renders the chain without traces, `{:#}` with traces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&error_formatter::to_string(self, f.alternate()))
    }
}

impl Debug for Error {
    /// `{:?}` renders the traced chain, `{:#?}` dumps the node structure.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return Debug::fmt(&self.node, f);
        }
        f.write_str(&error_formatter::to_string(self, true))
    }
}

/// Foreign errors enter a chain as external leaves, which lets `?` lift
/// them; the first wrap promotes them to a root.
impl<E> From<E> for Error
where
    E: StdError + Send + Sync + 'static,
{
    #[inline]
    fn from(error: E) -> Self {
        Self::from_node(Node::External(ExternalError::new(error)))
    }
}

impl From<ExternalError> for Error {
    #[inline]
    fn from(external: ExternalError) -> Self {
        Self::from_node(Node::External(external))
    }
}

/// Adapter so a chain can travel as `Box<dyn std::error::Error>`.
struct StdAdapter(Error);

impl Display for StdAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Debug for StdAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl StdError for StdAdapter {
    /// The foreign error at the bottom of the chain, if there is one.
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        let cause = crate::chain::cause(&self.0);
        cause.as_external().map(|external| external.get_ref() as &(dyn StdError + 'static))
    }
}

impl From<Error> for Box<dyn StdError + Send + Sync + 'static> {
    fn from(error: Error) -> Self {
        Box::new(StdAdapter(error))
    }
}

impl From<Error> for Box<dyn StdError + 'static> {
    fn from(error: Error) -> Self {
        Box::new(StdAdapter(error))
    }
}
