//! Error chains with classification codes, key/value properties, merged
//! stack traces and deterministic string and JSON rendering.
//!
//! Errors start as a root ([`Error::new`], [`err!`]), gain context while
//! they propagate ([`Error::wrap`], [`wrap!`], [`ResultExt::wrap`]) and can
//! be merged with [`Error::join`]. A root owns the full call stack; every
//! wrap records its own call site into that stack, so one trace covers the
//! whole propagation path without duplicates.
//!
//! Each submodule re-exports its public surface from here, so consumers can
//! simply depend on `error_trail::*` or pick focused pieces as needed.
//!
//! # Examples
//!
//! ## Building a chain
//!
//! ```
//! use error_trail::{Code, Error};
//!
//! let err = Error::new("connection refused")
//!     .with_code(Code::Unavailable)
//!     .with_property("host", "db-1")
//!     .wrap("loading user");
//!
//! assert_eq!(err.to_string(), "code(internal) loading user: code(unavailable) connection refused");
//! ```
//!
//! ## Foreign errors and `?`
//!
//! ```
//! use error_trail::prelude::*;
//!
//! fn read(path: &str) -> Result<String, Error> {
//!     let text = std::fs::read_to_string(path).wrap("reading input")?;
//!     Ok(text)
//! }
//!
//! let err = read("/nonexistent/input.txt").unwrap_err();
//! assert!(chain::downcast_ref::<std::io::Error>(&err).is_some());
//! ```
//!
//! ## Structured output
//!
//! ```
//! use error_trail::{to_json, Error};
//!
//! let err = Error::new("root").wrap("outer");
//! let json = serde_json::Value::Object(to_json(&err, false));
//!
//! assert_eq!(json["root"]["message"], "root");
//! assert_eq!(json["wrap"][0]["code"], "internal");
//! ```

/// Walking, matching and annotating chains
pub mod chain;
/// Formatted constructors
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Extension traits for `Result`
pub mod traits;
/// Error node model, codes, stacks, unpacking and rendering
pub mod types;

/// Tracing integration (requires `tracing` feature)
#[cfg(feature = "tracing")]
pub mod tracing_ext;

pub use traits::*;
pub use types::error_formatter::{
    to_custom_json, to_custom_string, to_json, to_string, ErrorFormatter, FormatOptions,
    JsonFormat, StringFormat,
};
pub use types::unpacked::{unpack, ErrLink, ErrRoot, UnpackedError};
pub use types::{
    CallSite, Code, Error, ErrorVec, ExternalError, Field, Frame, GrpcCode, JoinError, Node,
    Properties, RootError, Stack, WrapError,
};
