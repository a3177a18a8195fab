//! Document parsing and root extraction.

use serde_json::Value;

use crate::node::Node;

/// Traversal ceilings applied while classifying raw input.
///
/// Nesting depth and total node count are user-controlled in some contexts,
/// so both are capped. Subtrees past a ceiling degrade to
/// [`Node::Invalid`] markers; well-formed input within the limits is
/// unaffected.
#[derive(Clone, Copy, Debug)]
pub struct ParseLimits {
    /// Maximum nesting depth below the root.
    pub max_depth: usize,
    /// Maximum number of classified nodes per document.
    pub max_nodes: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_nodes: 100_000,
        }
    }
}

impl ParseLimits {
    /// Set the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the maximum node count.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}

/// Error returned when a document cannot be parsed at all.
///
/// Both variants are document-fatal: there is no tree to traverse. Shape
/// problems inside individual nodes are not errors — they degrade during
/// classification instead.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Input string is not well-formed JSON.
    #[error("invalid document JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Parsed structure has no `root.children` sequence.
    #[error("document has no root.children sequence")]
    MissingRoot,
}

/// Parsed top-level document container.
///
/// Children are kept in serialized order; that order is rendering order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    /// Parse a JSON-encoded document with default limits.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] if the input is not valid JSON and
    /// [`ParseError::MissingRoot`] if it lacks a `root.children` array.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, &ParseLimits::default())
    }

    /// Parse a JSON-encoded document with explicit limits.
    ///
    /// # Errors
    ///
    /// See [`Document::parse`].
    pub fn parse_with(input: &str, limits: &ParseLimits) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(&value, limits)
    }

    /// Build a document from an already-structured value.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingRoot`] if the value lacks a
    /// `root.children` array.
    pub fn from_value(value: &Value, limits: &ParseLimits) -> Result<Self, ParseError> {
        let children = value
            .get("root")
            .and_then(|root| root.get("children"))
            .and_then(Value::as_array)
            .ok_or(ParseError::MissingRoot)?;

        let mut remaining = limits.max_nodes;
        Ok(Self {
            children: children
                .iter()
                .map(|entry| Node::classify(entry, 0, limits, &mut remaining))
                .collect(),
        })
    }

    /// Whether the document has no top-level nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
