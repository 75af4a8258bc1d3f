//! String and JSON rendering of error chains.
//!
//! Renderers never walk a chain themselves: the error is first flattened
//! with [`unpack`](crate::unpack) and the [`UnpackedError`] is handed to an
//! [`ErrorFormatter`]. Both formatters are pure and total; an absent error
//! renders as an empty string or an empty map.
//!
//! # Examples
//!
//! ```
//! use error_trail::{to_custom_string, Error, FormatOptions, StringFormat};
//!
//! let err = Error::new("root").wrap("outer");
//! let format = StringFormat::new(FormatOptions::default().invert_output(true));
//!
//! assert_eq!(to_custom_string(&err, &format), "code(unknown) root: code(internal) outer");
//! ```
use crate::types::unpacked::{unpack, ErrLink, ErrRoot, UnpackedError};
use crate::types::{Code, Error, Properties};
use serde_json::{Map, Value};

/// Turns an [`UnpackedError`] into some output representation.
pub trait ErrorFormatter {
    type Output;

    fn render(&self, unpacked: &UnpackedError) -> Self::Output;
}

/// Switches shared by both renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FormatOptions {
    /// Render the root first and the outermost wrap last.
    pub invert_output: bool,
    /// Include stack frames.
    pub with_trace: bool,
    /// Render every stack outermost call first.
    pub invert_trace: bool,
    /// Include the text of foreign errors and of join branches.
    pub with_external: bool,
}

impl FormatOptions {
    #[inline]
    pub fn invert_output(mut self, invert: bool) -> Self {
        self.invert_output = invert;
        self
    }

    #[inline]
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.with_trace = enabled;
        self
    }

    #[inline]
    pub fn invert_trace(mut self, invert: bool) -> Self {
        self.invert_trace = invert;
        self
    }

    #[inline]
    pub fn with_external(mut self, enabled: bool) -> Self {
        self.with_external = enabled;
        self
    }
}

/// Separators and options for the string renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringFormat {
    pub options: FormatOptions,
    /// Between a message and its stack frames.
    pub msg_stack_sep: String,
    /// Before every stack frame.
    pub pre_stack_sep: String,
    /// Between the function, file and line of one frame.
    pub stack_elem_sep: String,
    /// Between two errors of the chain, and between two frames of a stack.
    pub error_sep: String,
}

impl StringFormat {
    /// Default separators for `options`.
    ///
    /// With traces every error and every frame gets its own line; without
    /// them the chain is joined with `": "`.
    pub fn new(options: FormatOptions) -> Self {
        if options.with_trace {
            Self {
                options,
                msg_stack_sep: "\n".into(),
                pre_stack_sep: "\t".into(),
                stack_elem_sep: ":".into(),
                error_sep: "\n".into(),
            }
        } else {
            Self {
                options,
                msg_stack_sep: String::new(),
                pre_stack_sep: String::new(),
                stack_elem_sep: String::new(),
                error_sep: ": ".into(),
            }
        }
    }

    /// Single-line format with external text, as used by `{}`.
    #[inline]
    pub fn compact() -> Self {
        Self::new(FormatOptions::default().with_external(true))
    }

    /// Multi-line format with traces and external text, as used by `{:#}`.
    #[inline]
    pub fn traced() -> Self {
        Self::new(FormatOptions::default().with_trace(true).with_external(true))
    }

    fn root(&self, root: &ErrRoot) -> String {
        if !self.root_has_text(root) {
            return String::new();
        }
        let mut out = head(root.code, &root.message);
        out.push_str(&self.msg_stack_sep);
        if self.options.with_trace {
            let frames = root.stack.format(&self.stack_elem_sep, self.options.invert_trace);
            for (i, frame) in frames.iter().enumerate() {
                if i > 0 {
                    out.push_str(&self.error_sep);
                }
                out.push_str(&self.pre_stack_sep);
                out.push_str(frame);
            }
        }
        out
    }

    fn link(&self, link: &ErrLink) -> String {
        if link.message.is_empty() && !self.options.with_trace {
            return String::new();
        }
        let mut out = head(link.code, &link.message);
        out.push_str(&self.msg_stack_sep);
        if self.options.with_trace {
            out.push_str(&self.pre_stack_sep);
            out.push_str(&link.frame().format(&self.stack_elem_sep));
        }
        out
    }

    /// Whether the root produces any text of its own.
    fn root_has_text(&self, root: &ErrRoot) -> bool {
        !root.message.is_empty() || (self.options.with_trace && !root.stack.is_empty())
    }
}

impl Default for StringFormat {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}

impl ErrorFormatter for StringFormat {
    type Output = String;

    fn render(&self, unpacked: &UnpackedError) -> String {
        let options = self.options;
        let external = unpacked
            .external
            .as_ref()
            .filter(|_| options.with_external)
            .map(|external| external.render(options.with_trace));
        let root_has_text = self.root_has_text(&unpacked.root);

        let mut out = String::new();
        if options.invert_output {
            if let Some(external) = &external {
                out.push_str(external);
                if root_has_text {
                    out.push_str(&self.error_sep);
                }
            }
            out.push_str(&self.root(&unpacked.root));
            for link in unpacked.chain.iter().rev() {
                out.push_str(&self.error_sep);
                out.push_str(&self.link(link));
            }
        } else {
            for link in &unpacked.chain {
                out.push_str(&self.link(link));
                out.push_str(&self.error_sep);
            }
            out.push_str(&self.root(&unpacked.root));
            if let Some(external) = &external {
                if root_has_text {
                    out.push_str(&self.error_sep);
                }
                out.push_str(external);
            }
        }

        // branches keep join order whatever the output order
        if options.with_external {
            for (i, branch) in unpacked.joins.iter().enumerate() {
                let text = self.render(branch).replace('\n', "\n\t");
                out.push_str(&format!("\n{i}>\t{text}"));
            }
        }

        out
    }
}

/// Options for the JSON renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFormat {
    pub options: FormatOptions,
    /// Between the function, file and line of one frame.
    pub stack_elem_sep: String,
}

impl JsonFormat {
    pub fn new(options: FormatOptions) -> Self {
        Self { options, stack_elem_sep: ":".into() }
    }

    fn root(&self, root: &ErrRoot) -> Value {
        let mut map = status_map(root.code, &root.message, &root.properties);
        if self.options.with_trace {
            let frames = root.stack.format(&self.stack_elem_sep, self.options.invert_trace);
            map.insert("stack".into(), Value::from(frames));
        }
        Value::Object(map)
    }

    fn link(&self, link: &ErrLink) -> Value {
        let mut map = status_map(link.code, &link.message, &link.properties);
        if self.options.with_trace {
            map.insert("stack".into(), Value::from(link.frame().format(&self.stack_elem_sep)));
        }
        Value::Object(map)
    }
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}

impl ErrorFormatter for JsonFormat {
    type Output = Map<String, Value>;

    fn render(&self, unpacked: &UnpackedError) -> Map<String, Value> {
        let options = self.options;
        let mut map = Map::new();

        if options.with_external {
            if !unpacked.joins.is_empty() {
                let branches =
                    unpacked.joins.iter().map(|branch| Value::Object(self.render(branch))).collect();
                map.insert("externals".into(), Value::Array(branches));
            } else if let Some(external) = &unpacked.external {
                map.insert("external".into(), Value::from(external.render(options.with_trace)));
            }
        }

        let root = &unpacked.root;
        if !root.message.is_empty() || (options.with_trace && !root.stack.is_empty()) {
            map.insert("root".into(), self.root(root));
        }

        if !unpacked.chain.is_empty() {
            let mut links: Vec<Value> = unpacked.chain.iter().map(|link| self.link(link)).collect();
            if options.invert_output {
                links.reverse();
            }
            map.insert("wrap".into(), Value::Array(links));
        }

        map
    }
}

/// `code(<name>) <message>`, or nothing for an empty message.
fn head(code: Code, message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!("code({code}) {message}")
    }
}

fn status_map(code: Code, message: &str, properties: &Properties) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("code".into(), Value::from(code.as_str()));
    map.insert("message".into(), Value::from(message));
    if !properties.is_empty() {
        let kvs = properties.iter().map(|(key, value)| (key.clone(), value.clone())).collect();
        map.insert("KVs".into(), Value::Object(kvs));
    }
    map
}

/// Renders `err` on one line (`with_trace = false`) or with stack frames,
/// including the text of foreign errors.
///
/// ```
/// use error_trail::{to_string, Error};
///
/// assert_eq!(to_string(&Error::new("x"), false), "code(unknown) x");
/// assert_eq!(to_string(&Error::new(""), false), "");
/// assert_eq!(to_string(None::<&Error>, false), "");
/// ```
pub fn to_string<'a>(err: impl Into<Option<&'a Error>>, with_trace: bool) -> String {
    let options = FormatOptions::default().with_trace(with_trace).with_external(true);
    to_custom_string(err, &StringFormat::new(options))
}

/// Renders `err` with a caller-supplied format.
pub fn to_custom_string<'a>(err: impl Into<Option<&'a Error>>, format: &StringFormat) -> String {
    match err.into() {
        Some(err) => format.render(&unpack(err)),
        None => String::new(),
    }
}

/// Renders `err` as a JSON object, including the text of foreign errors.
///
/// ```
/// use error_trail::{to_json, Error};
/// use serde_json::json;
///
/// let json = to_json(&Error::new("x"), false);
/// assert_eq!(json, json!({"root": {"code": "unknown", "message": "x"}}).as_object().cloned().unwrap());
/// ```
pub fn to_json<'a>(err: impl Into<Option<&'a Error>>, with_trace: bool) -> Map<String, Value> {
    let options = FormatOptions::default().with_trace(with_trace).with_external(true);
    to_custom_json(err, &JsonFormat::new(options))
}

/// Renders `err` as a JSON object with a caller-supplied format.
pub fn to_custom_json<'a>(
    err: impl Into<Option<&'a Error>>,
    format: &JsonFormat,
) -> Map<String, Value> {
    match err.into() {
        Some(err) => format.render(&unpack(err)),
        None => Map::new(),
    }
}
