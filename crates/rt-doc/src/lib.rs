//! Typed document model for serialized rich text.
//!
//! Editor frontends hand us their document state as JSON: a `root` object
//! holding an arbitrarily nested tree of nodes, each tagged with a `type`
//! discriminator and, for text runs, an integer bit-set of inline styles.
//! This crate turns that raw input into a typed [`Node`] tree that the
//! `rt-render` crate can dispatch on exhaustively.
//!
//! Classification is total: node kinds we do not recognize become
//! [`Node::Unknown`], and entries that are not objects at all become
//! [`Node::Invalid`]. Only two conditions reject a document outright —
//! input that is not valid JSON, and input without a `root.children`
//! sequence ([`ParseError`]).
//!
//! # Example
//!
//! ```
//! use rt_doc::{Document, Node};
//!
//! let doc = Document::parse(
//!     r#"{"root":{"children":[{"type":"paragraph","children":[
//!         {"type":"text","text":"Hello","format":1}]}]}}"#,
//! )?;
//! assert!(matches!(doc.children[0], Node::Paragraph { .. }));
//! # Ok::<(), rt_doc::ParseError>(())
//! ```

mod document;
mod format;
mod node;

pub use document::{Document, ParseError, ParseLimits};
pub use format::{InlineStyle, TextFormat};
pub use node::{HeadingLevel, InvalidNode, Node};
