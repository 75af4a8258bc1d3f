//! Formatted constructors.
//!
//! - [`macro@crate::err`] - creates a root error from a format string
//! - [`macro@crate::wrap`] - wraps an error (or anything that converts into
//!   one) with a formatted message
//!
//! Both expand in place, so the recorded call site is the line of the macro
//! invocation.
//!
//! # Examples
//!
//! ```
//! use error_trail::{err, wrap};
//!
//! let id = 42;
//! let root = err!("user {} not found", id);
//! let err = wrap!(root, "loading profile for {}", id);
//!
//! assert_eq!(
//!     err.to_string(),
//!     "code(internal) loading profile for 42: code(unknown) user 42 not found"
//! );
//! ```

/// Creates a root [`Error`](crate::Error) with a formatted message.
///
/// # Examples
///
/// ```
/// use error_trail::{err, Code};
///
/// let err = err!("timed out after {}ms", 250);
/// assert_eq!(err.message(), "timed out after 250ms");
/// assert_eq!(err.code(), Code::Unknown);
/// ```
#[macro_export]
macro_rules! err {
    ($($arg:tt)+) => {
        $crate::Error::new(::std::format!($($arg)+))
    };
}

/// Wraps an error with a formatted message.
///
/// The first argument may be an [`Error`](crate::Error) or any foreign
/// error that converts into one.
///
/// # Examples
///
/// ```
/// use error_trail::wrap;
/// use std::io;
///
/// let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
/// let err = wrap!(io, "opening {}", "/etc/shadow");
/// assert_eq!(err.to_string(), "code(internal) opening /etc/shadow: denied");
/// ```
#[macro_export]
macro_rules! wrap {
    ($err:expr, $($arg:tt)+) => {
        ::core::convert::Into::<$crate::Error>::into($err).wrap(::std::format!($($arg)+))
    };
}
