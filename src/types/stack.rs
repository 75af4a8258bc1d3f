//! Call stack capture and lazy symbol resolution.
//!
//! Capturing only records raw instruction pointers; turning them into
//! function names and source locations is deferred until a renderer asks for
//! text, because symbolication is far more expensive than the walk itself.
use core::ffi::c_void;
use core::fmt::{self, Display};
use serde::{Serialize, Serializer};

/// Maximum number of call sites recorded by a single capture.
pub const MAX_STACK_DEPTH: usize = 64;

/// Symbols that only show up on the stack while a process-wide lazy value is
/// being initialized.
const INIT_CONTEXTS: &[&str] = &[
    "lazy_lock::",
    "once_lock::",
    "sync::once::",
    "once_cell::",
    "lazy_static::",
];

/// Whether `name` belongs to a lazy initializer.
///
/// Markers are matched at path segment boundaries, so
/// `core::ops::function::FnOnce::call_once` does not count as `Once::call_once`.
fn is_init_context(name: &str) -> bool {
    INIT_CONTEXTS.iter().any(|marker| {
        name.match_indices(marker).any(|(at, _)| {
            at == 0 || name[..at].ends_with("::") || name[..at].ends_with('<')
        })
    })
}

/// One raw, unresolved call-site address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite(usize);

impl CallSite {
    /// Wraps a raw instruction pointer.
    #[inline]
    pub const fn from_addr(addr: usize) -> Self {
        Self(addr)
    }

    /// Returns the raw instruction pointer.
    #[inline]
    pub const fn addr(self) -> usize {
        self.0
    }

    /// Resolves the address into a function name, file and line.
    pub fn resolve(self) -> Frame {
        let mut frame = None;
        backtrace::resolve(self.0 as *mut c_void, |symbol| {
            // inlined callees are reported first, the first symbol is the
            // one that actually contains the address
            if frame.is_some() {
                return;
            }
            frame = Some(Frame {
                function: symbol
                    .name()
                    .map(|name| format!("{:#}", name))
                    .unwrap_or_else(|| Frame::UNKNOWN.into()),
                file: symbol
                    .filename()
                    .map(|path| path.display().to_string())
                    .unwrap_or_default(),
                line: symbol.lineno().unwrap_or(0),
            });
        });
        frame.unwrap_or_default()
    }
}

impl Serialize for CallSite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.resolve().serialize(serializer)
    }
}

/// A resolved call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Frame {
    pub function: String,
    pub file: String,
    pub line: u32,
}

impl Frame {
    const UNKNOWN: &'static str = "unknown";

    /// Renders the frame as `function{sep}file{sep}line`.
    pub fn format(&self, sep: &str) -> String {
        format!("{}{sep}{}{sep}{}", self.function, self.file, self.line)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self { function: Self::UNKNOWN.into(), file: String::new(), line: 0 }
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(":"))
    }
}

/// Ordered call sites, innermost call first.
///
/// A stack only ever grows: [`Stack::insert`] records additional sites but
/// never drops or reorders existing ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Stack {
    sites: Vec<CallSite>,
}

impl Stack {
    /// Captures the current call stack.
    ///
    /// Frames belonging to the unwinder and to this function are always
    /// dropped; `skip` additional frames above it are dropped as well, so a
    /// constructor that calls `capture(1)` records its caller first.
    #[inline(never)]
    pub fn capture(skip: usize) -> Self {
        let anchor = Self::capture as *const () as usize;
        let mut raw: Vec<(usize, usize)> = Vec::with_capacity(MAX_STACK_DEPTH);
        let limit = MAX_STACK_DEPTH * 2 + skip;

        backtrace::trace(|frame| {
            raw.push((frame.ip() as usize, frame.symbol_address() as usize));
            raw.len() < limit
        });

        let start = raw
            .iter()
            .position(|&(_, symbol)| symbol == anchor)
            .map_or(0, |at| at + 1 + skip);

        let sites = raw
            .iter()
            .skip(start)
            .take(MAX_STACK_DEPTH)
            .map(|&(ip, _)| CallSite(ip))
            .collect();
        Self { sites }
    }

    /// Builds a stack from raw addresses, innermost first.
    pub fn from_addrs<I>(addrs: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self { sites: addrs.into_iter().map(CallSite).collect() }
    }

    /// Innermost call site, if any was captured.
    #[inline]
    pub fn first(&self) -> Option<CallSite> {
        self.sites.first().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// The raw call sites, innermost first.
    #[inline]
    pub fn sites(&self) -> &[CallSite] {
        &self.sites
    }

    /// The raw addresses, for handing to other trace reporters.
    pub fn addrs(&self) -> Vec<usize> {
        self.sites.iter().map(|site| site.addr()).collect()
    }

    /// Records the innermost site of `callers` into this stack.
    ///
    /// `callers` is a stack captured at a wrap site. Its first entry is the
    /// wrap site itself and its second entry is the wrap site's caller. The
    /// wrap site is inserted right before the caller when the caller is part
    /// of this stack. Nothing happens when the wrap site is already recorded
    /// or the two stacks share no caller. A single-entry `callers` is
    /// appended.
    pub fn insert(&mut self, callers: &Stack) {
        let (site, parent) = match callers.sites.as_slice() {
            [] => return,
            [only] => {
                self.sites.push(*only);
                return;
            },
            [site, parent, ..] => (*site, *parent),
        };

        for at in 0..self.sites.len() {
            if self.sites[at] == site {
                return;
            }
            if self.sites[at] == parent {
                self.sites.insert(at, site);
                return;
            }
        }
    }

    /// Resolves every call site, innermost first.
    pub fn frames(&self) -> Vec<Frame> {
        self.sites.iter().map(|site| site.resolve()).collect()
    }

    /// Resolves and renders every frame, innermost first unless `invert`.
    pub fn format(&self, sep: &str, invert: bool) -> Vec<String> {
        let mut lines: Vec<String> = self.frames().iter().map(|frame| frame.format(sep)).collect();
        if invert {
            lines.reverse();
        }
        lines
    }

    /// Reports whether the stack was captured while a `static` was being
    /// lazily initialized.
    pub fn is_global(&self) -> bool {
        self.sites.iter().any(|site| {
            let mut global = false;
            backtrace::resolve(site.addr() as *mut c_void, |symbol| {
                if let Some(name) = symbol.name() {
                    let name = format!("{:#}", name);
                    global |= is_init_context(&name);
                }
            });
            global
        })
    }
}

impl Serialize for Stack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sites.iter())
    }
}
