//! Diagnostic reporting for recovered failures.

use rt_doc::{InvalidNode, ParseError};

/// Non-fatal condition recorded while parsing or rendering a document.
///
/// Everything here has already been recovered: unknown kinds fall back to
/// child flattening, invalid nodes render to nothing, and a rejected
/// document yields the fallback block. Diagnostics exist so hosts can see
/// what was degraded.
#[derive(Debug, thiserror::Error)]
pub enum Diagnostic {
    /// A node's `type` was not in the known set.
    #[error("unknown node kind \"{kind}\", rendering children only")]
    UnknownKind { kind: String },
    /// A children entry could not be rendered at all.
    #[error("skipped unrenderable node: {reason}")]
    SkippedNode { reason: InvalidNode },
    /// The whole document was rejected before traversal.
    #[error("document rejected: {source}")]
    Rejected {
        #[source]
        source: ParseError,
    },
}

/// Receives diagnostics recorded during parse and render recovery.
///
/// The renderer never writes to global logging itself; the default
/// [`TracingSink`] forwards to `tracing`, and tests inject a collecting
/// sink instead.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Default sink forwarding diagnostics to `tracing`.
///
/// Rejections and skipped nodes log at `warn`; unknown kinds log at
/// `debug` since they are routine with newer editor payloads.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::Rejected { .. } | Diagnostic::SkippedNode { .. } => {
                tracing::warn!("{diagnostic}");
            }
            Diagnostic::UnknownKind { .. } => tracing::debug!("{diagnostic}"),
        }
    }
}

/// Sink that retains every diagnostic message, for inspection in tests.
///
/// Clones share the same buffer, so a caller can keep one clone and hand
/// the other to the renderer.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    diagnostics: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

impl CollectingSink {
    /// Messages recorded so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.lock().unwrap().clone()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.lock().unwrap().push(diagnostic.to_string());
    }
}
