//! Tracing integration for error-trail.
//!
//! Attaches the active `tracing` span to errors as the `"span"` property
//! and reports finished chains as structured error events.
//!
//! # Feature Flag
//!
//! Requires the `tracing` feature:
//!
//! ```toml
//! [dependencies]
//! error-trail = { version = "0.1", features = ["tracing"] }
//! ```

use tracing::Span;

use crate::types::{Error, Field};

/// Property key the span name is stored under.
pub const SPAN_PROPERTY: &str = "span";

/// Extension trait for `Result` types to record a span on errors.
pub trait ResultSpanExt<T> {
    /// Records the current span's name on the error.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use error_trail::tracing_ext::ResultSpanExt;
    ///
    /// #[tracing::instrument]
    /// fn process() -> Result<Data, error_trail::Error> {
    ///     do_work().with_current_span()
    /// }
    /// ```
    fn with_current_span(self) -> Result<T, Error>;

    /// Records a specific span's name on the error.
    fn with_span(self, span: &Span) -> Result<T, Error>;
}

impl<T, E> ResultSpanExt<T> for Result<T, E>
where
    E: Into<Error>,
{
    #[inline(never)]
    fn with_current_span(self) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.into().apply_fields([span_field(&Span::current())], 1)),
        }
    }

    #[inline(never)]
    fn with_span(self, span: &Span) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.into().apply_fields([span_field(span)], 1)),
        }
    }
}

/// Records the current span's name on `error`.
///
/// # Example
///
/// ```rust,ignore
/// use error_trail::tracing_ext::instrument_error;
///
/// let err = instrument_error(std::io::Error::other("reset"));
/// assert!(err.properties().unwrap().contains_key("span"));
/// ```
#[inline(never)]
pub fn instrument_error(error: impl Into<Error>) -> Error {
    error.into().apply_fields([span_field(&Span::current())], 1)
}

/// Emits one `ERROR` event for `error`, with its code, its head message and
/// the rendered chain as fields.
pub fn report(error: &Error) {
    tracing::error!(
        error.code = %error.code(),
        error.message = error.message(),
        error.chain = %error,
        "error reported"
    );
}

/// Name of `span`; disabled spans have no metadata and report `unknown`.
fn span_field(span: &Span) -> Field {
    let name = span.metadata().map(|m| m.name()).unwrap_or("unknown");
    Field::kv(SPAN_PROPERTY, name)
}
