//! Recursive rich text renderer with node-local error recovery.
//!
//! Consumes the typed document tree from `rt-doc` and produces a keyed
//! output tree, plus an HTML serialization of it. The pipeline is a pure,
//! single-threaded, in-memory transformation: no I/O, no shared state
//! between invocations.
//!
//! Failure handling is deliberately asymmetric:
//! - A document that cannot be parsed yields one [`Fallback`](ElementTag::Fallback)
//!   block — nothing partially renders.
//! - Anything wrong inside a single node (unknown kind, unclassifiable
//!   child, truncated subtree) degrades locally while siblings and
//!   ancestors render normally.
//!
//! Recovered conditions surface as [`Diagnostic`]s through an injectable
//! [`DiagnosticSink`] and as display strings on [`RenderResult::warnings`];
//! the renderer itself performs no logging or other side effects.
//!
//! # Example
//!
//! ```
//! use rt_render::DocRenderer;
//!
//! let result = DocRenderer::new().render_json(
//!     r#"{"root":{"children":[
//!         {"type":"heading","tag":"h1","children":[{"type":"text","text":"Title"}]},
//!         {"type":"paragraph","children":[{"type":"text","text":"Body","format":2}]}
//!     ]}}"#,
//! );
//! assert!(result.warnings.is_empty());
//! assert_eq!(result.to_html(), "<h1>Title</h1><p><em>Body</em></p>");
//! ```

mod html;
mod renderer;
mod sink;
mod tree;

pub use html::{escape_html, render_html};
pub use renderer::{DocRenderer, RenderResult};
pub use sink::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use tree::{ElementTag, RenderContent, RenderNode};

// Re-export the input-side types callers need alongside the renderer.
pub use rt_doc::{Document, ParseError, ParseLimits};
