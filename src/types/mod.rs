//! Error types and utilities.
//!
//! This module holds the chain data model, the stack capture it relies on,
//! the classification codes, the unpacked projection and the renderers.
//!
//! # Examples
//!
//! ```
//! use error_trail::{Code, Error};
//!
//! let err = Error::new("database connection failed")
//!     .with_code(Code::Unavailable)
//!     .with_property("retry_count", 3)
//!     .wrap("loading profile");
//!
//! println!("{:#}", err);
//! // code(internal) loading profile
//! //     app::load_profile:src/app.rs:42
//! // code(unavailable) database connection failed
//! //     app::connect:src/db.rs:17
//! //     app::load_profile:src/app.rs:40
//! ```
use smallvec::SmallVec;
use std::collections::BTreeMap;

pub mod code;
pub mod error;
pub mod error_formatter;
pub mod stack;
pub mod unpacked;

pub use code::{Code, GrpcCode, DEFAULT_CODE_JOIN, DEFAULT_CODE_NEW, DEFAULT_CODE_WRAP};
pub use error::{Error, ExternalError, Field, JoinError, Node, RootError, WrapError};
pub use error_formatter::{FormatOptions, JsonFormat, StringFormat};
pub use stack::{CallSite, Frame, Stack, MAX_STACK_DEPTH};
pub use unpacked::{ErrLink, ErrRoot, UnpackedError};

/// SmallVec-backed collection used for join branches and unpacked links.
///
/// Uses inline storage for up to 2 elements to avoid heap allocations
/// for the common short chains.
pub type ErrorVec<E> = SmallVec<[E; 2]>;

/// Key/value metadata attached to a node.
///
/// Keys are unique; a `BTreeMap` keeps rendering deterministic.
pub type Properties = BTreeMap<String, serde_json::Value>;
