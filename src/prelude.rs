//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use error_trail::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`err!`], [`wrap!`]
//! - **Types**: [`Error`], [`Code`], [`Field`]
//! - **Traits**: [`ResultExt`]
//! - **Modules**: [`chain`]
//!
//! # Examples
//!
//! ```
//! use error_trail::prelude::*;
//!
//! fn parse_port(raw: &str) -> Result<u16> {
//!     raw.parse::<u16>().with_code(Code::InvalidArgument).wrap("parsing port")
//! }
//!
//! let err = parse_port("http").unwrap_err();
//! assert_eq!(chain::cause(&err).to_string(), "invalid digit found in string");
//! ```

// Macros
pub use crate::{err, wrap};

// Core types
pub use crate::types::{Code, Error, Field};

// Traits
pub use crate::traits::ResultExt;

// Free functions
pub use crate::chain;

/// Result type defaulting to [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
