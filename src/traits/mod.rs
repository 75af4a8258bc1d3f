//! Extension traits that let chains compose with `?`.
//!
//! - [`ResultExt`]: wrap or annotate the error side of any `Result` whose
//!   error converts into an [`Error`](crate::Error)

pub mod result_ext;

pub use result_ext::ResultExt;
