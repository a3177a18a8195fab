//! Typed document tree and node classification.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::document::ParseLimits;
use crate::format::TextFormat;

/// Heading levels supported by the serialized format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
}

impl HeadingLevel {
    /// Derive a level from a heading node's `tag` field.
    ///
    /// `"h1"` maps to level 1; any other value, including a missing tag,
    /// maps to level 2.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("h1") => Self::H1,
            _ => Self::H2,
        }
    }

    /// Numeric level (1 or 2).
    #[must_use]
    pub const fn as_number(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
        }
    }
}

/// Why a children entry could not be classified into a renderable node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidNode {
    /// Entry was not a JSON object.
    NotAnObject,
    /// Nesting exceeded the configured depth ceiling.
    DepthExceeded,
    /// Document exceeded the configured node budget.
    BudgetExhausted,
}

impl fmt::Display for InvalidNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "children entry is not an object"),
            Self::DepthExceeded => write!(f, "nesting depth limit exceeded"),
            Self::BudgetExhausted => write!(f, "node budget exhausted"),
        }
    }
}

/// One element of the document tree, tagged by kind.
///
/// The variant set is closed, but input is open-ended: unrecognized `type`
/// values classify as [`Node::Unknown`] and unclassifiable entries as
/// [`Node::Invalid`], so a `match` over this enum covers every input the
/// wire format can produce.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Leaf text run with combinable inline styles.
    Text { text: String, format: TextFormat },
    Paragraph { children: Vec<Node> },
    Heading {
        level: HeadingLevel,
        children: Vec<Node>,
    },
    /// Ordered when the serialized `listType` equals `"number"`.
    List { ordered: bool, children: Vec<Node> },
    ListItem { children: Vec<Node> },
    Quote { children: Vec<Node> },
    /// Preformatted block; usually a single text run but not guaranteed.
    Code { children: Vec<Node> },
    /// Hard line break, a childless leaf.
    LineBreak,
    /// Unrecognized kind; renders by flattening its children.
    Unknown { kind: String, children: Vec<Node> },
    /// Unclassifiable entry; renders to nothing with a diagnostic.
    Invalid { reason: InvalidNode },
}

impl Node {
    /// Classify one raw children entry.
    ///
    /// Total: every JSON value maps to some variant. Depth and budget
    /// ceilings cut traversal off with [`Node::Invalid`] markers instead of
    /// descending further, so classification is bounded by the limits even
    /// on pathological input.
    pub(crate) fn classify(
        value: &Value,
        depth: usize,
        limits: &ParseLimits,
        remaining: &mut usize,
    ) -> Self {
        let Some(node) = value.as_object() else {
            return Self::Invalid {
                reason: InvalidNode::NotAnObject,
            };
        };
        if depth >= limits.max_depth {
            return Self::Invalid {
                reason: InvalidNode::DepthExceeded,
            };
        }
        if *remaining == 0 {
            return Self::Invalid {
                reason: InvalidNode::BudgetExhausted,
            };
        }
        *remaining -= 1;

        let children = |remaining: &mut usize| {
            Self::classify_children(node.get("children"), depth + 1, limits, remaining)
        };

        match node.get("type").and_then(Value::as_str).unwrap_or("") {
            "text" => Self::Text {
                text: node
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned(),
                format: TextFormat::new(
                    node.get("format").and_then(Value::as_u64).unwrap_or(0),
                ),
            },
            "linebreak" => Self::LineBreak,
            "paragraph" => Self::Paragraph {
                children: children(remaining),
            },
            "heading" => Self::Heading {
                level: HeadingLevel::from_tag(node.get("tag").and_then(Value::as_str)),
                children: children(remaining),
            },
            "list" => Self::List {
                ordered: node.get("listType").and_then(Value::as_str) == Some("number"),
                children: children(remaining),
            },
            "listitem" => Self::ListItem {
                children: children(remaining),
            },
            "quote" => Self::Quote {
                children: children(remaining),
            },
            "code" => Self::Code {
                children: children(remaining),
            },
            other => Self::Unknown {
                kind: other.to_owned(),
                children: children(remaining),
            },
        }
    }

    /// Classify a raw `children` field.
    ///
    /// A missing or non-array field is an empty sequence, never an error.
    fn classify_children(
        raw: Option<&Value>,
        depth: usize,
        limits: &ParseLimits,
        remaining: &mut usize,
    ) -> Vec<Self> {
        match raw.and_then(Value::as_array) {
            Some(entries) => entries
                .iter()
                .map(|entry| Self::classify(entry, depth, limits, remaining))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Child nodes of a container; empty slice for leaves.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Paragraph { children }
            | Self::Heading { children, .. }
            | Self::List { children, .. }
            | Self::ListItem { children }
            | Self::Quote { children }
            | Self::Code { children }
            | Self::Unknown { children, .. } => children,
            Self::Text { .. } | Self::LineBreak | Self::Invalid { .. } => &[],
        }
    }
}
