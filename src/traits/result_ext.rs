//! Extension trait for wrapping the error side of a `Result`.
//!
//! # Examples
//!
//! ```
//! use error_trail::traits::ResultExt;
//! use error_trail::Error;
//!
//! fn load_config() -> Result<String, Error> {
//!     std::fs::read_to_string("/nonexistent/config.toml").wrap("loading configuration file")
//! }
//!
//! let err = load_config().unwrap_err();
//! assert!(err.to_string().starts_with("code(internal) loading configuration file: "));
//! ```

use crate::types::code::DEFAULT_CODE_WRAP;
use crate::types::{Code, Error, Field};
use serde::Serialize;

/// Wrapping and annotation for any `Result` whose error converts into an
/// [`Error`].
///
/// `Ok` values pass through untouched. Every method records the caller as
/// the wrap site, so a chain built with `?` reads like one built by hand.
///
/// # Examples
///
/// ```
/// use error_trail::traits::ResultExt;
/// use error_trail::{Code, Error};
///
/// fn find_user(id: u64) -> Result<String, Error> {
///     Err(Error::new("no such row"))
///         .with_code(Code::NotFound)
///         .wrap_with(|| format!("finding user {id}"))
/// }
///
/// let err = find_user(7).unwrap_err();
/// assert_eq!(err.to_string(), "code(internal) finding user 7: code(not found) no such row");
/// ```
pub trait ResultExt<T> {
    /// Wraps the error with `message`.
    fn wrap(self, message: impl Into<String>) -> Result<T, Error>;

    /// Wraps the error with a message that is only built on the error path.
    fn wrap_with<F, M>(self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> M,
        M: Into<String>;

    /// Sets the code of the outermost node.
    fn with_code(self, code: Code) -> Result<T, Error>;

    /// Attaches a property to the outermost node.
    fn with_property<K, V>(self, key: K, value: V) -> Result<T, Error>
    where
        K: Into<String>,
        V: Serialize;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<Error>,
{
    #[inline(never)]
    fn wrap(self, message: impl Into<String>) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(err.into().wrap_at(message.into(), DEFAULT_CODE_WRAP, 2)),
        }
    }

    #[inline(never)]
    fn wrap_with<F, M>(self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> M,
        M: Into<String>,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(err.into().wrap_at(f().into(), DEFAULT_CODE_WRAP, 2)),
        }
    }

    #[inline(never)]
    fn with_code(self, code: Code) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(err.into().apply_fields([Field::Code(code)], 1)),
        }
    }

    #[inline(never)]
    fn with_property<K, V>(self, key: K, value: V) -> Result<T, Error>
    where
        K: Into<String>,
        V: Serialize,
    {
        match self {
            Ok(ok) => Ok(ok),
            Err(err) => Err(err.into().apply_fields([Field::kv(key, value)], 1)),
        }
    }
}
