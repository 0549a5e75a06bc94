//! Non-fatal lookup diagnostics.
//!
//! Misses never interrupt a lookup. They are reported here instead, and the
//! whole channel can be muted with the silence flag.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Something worth telling the developer about while translating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Neither the language nor its primary subtag has a table.
    MissingLanguage {
        /// Requested language code.
        language: String,
    },
    /// The language table has no entry for the msgid.
    MissingKey {
        /// Requested language code.
        language: String,
        /// The msgid that was looked up.
        msgid: String,
    },
    /// A `%{}` expression resolved in no context layer.
    UnresolvedExpression {
        /// The trimmed expression text.
        expression: String,
    },
    /// A plural entry has a different number of forms than its language uses.
    FormCountMismatch {
        /// Catalog language code.
        language: String,
        /// The msgid of the entry.
        msgid: String,
        /// Forms the language's plural rule selects from.
        expected: usize,
        /// Forms the entry provides.
        found: usize,
    },
    /// A template uses `{{ }}`, which this engine never expands.
    MustacheSyntax {
        /// The offending template.
        template: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLanguage { language } => {
                write!(f, "No translations found for {language}")
            }
            Self::MissingKey { language, msgid } => {
                write!(f, "Untranslated {language} key found:\n{msgid}")
            }
            Self::UnresolvedExpression { expression } => {
                write!(f, "Cannot evaluate expression: {expression}")
            }
            Self::FormCountMismatch {
                language,
                msgid,
                expected,
                found,
            } => write!(
                f,
                "{language} entry {msgid:?} has {found} plural forms, expected {expected}"
            ),
            Self::MustacheSyntax { template } => write!(
                f,
                "Mustache syntax cannot be used with lingo. Please use \"%{{}}\" instead of \"{{{{}}}}\" in: {template}"
            ),
        }
    }
}

/// Destination for diagnostics.
pub trait DiagnosticSink: Send + Sync + fmt::Debug {
    /// Records one diagnostic.
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Sink that logs every diagnostic as a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        warn!(target: "lingo::diagnostics", "{}", diagnostic);
    }
}

/// The diagnostics channel handed to resolvers and interpolators.
#[derive(Debug)]
pub struct Diagnostics {
    silent: AtomicBool,
    sink: Arc<dyn DiagnosticSink>,
}

impl Diagnostics {
    /// Channel logging through `tracing`.
    pub fn new(silent: bool) -> Self {
        Self::with_sink(Arc::new(TracingSink), silent)
    }

    /// Channel delivering to a custom sink.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>, silent: bool) -> Self {
        Self {
            silent: AtomicBool::new(silent),
            sink,
        }
    }

    /// Whether diagnostics are currently suppressed.
    pub fn is_silent(&self) -> bool {
        self.silent.load(Ordering::Relaxed)
    }

    /// Mutes or unmutes the channel. Takes effect on the next report.
    pub fn set_silent(&self, silent: bool) {
        self.silent.store(silent, Ordering::Relaxed);
    }

    /// Reports `diagnostic` unless the channel is silent.
    pub fn report(&self, diagnostic: Diagnostic) {
        if !self.is_silent() {
            self.sink.emit(&diagnostic);
        }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Sink that keeps diagnostics in memory so tests can inspect them.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct MemorySink {
    records: std::sync::Mutex<Vec<Diagnostic>>,
}

#[cfg(any(test, feature = "testing"))]
impl MemorySink {
    /// A shared, empty sink.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Everything recorded so far.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[cfg(any(test, feature = "testing"))]
impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(diagnostic.clone());
    }
}
