//! Keyed output tree assembled from dispatched node results.

use rt_doc::{HeadingLevel, InlineStyle};
use serde::Serialize;

/// Wrapper element kinds appearing in the output tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementTag {
    Paragraph,
    Heading(HeadingLevel),
    OrderedList,
    UnorderedList,
    ListItem,
    Blockquote,
    CodeBlock,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    LineBreak,
    /// Single substitute block emitted when a document is rejected.
    Fallback,
}

impl ElementTag {
    /// The wrapper element for an inline style.
    #[must_use]
    pub const fn for_style(style: InlineStyle) -> Self {
        match style {
            InlineStyle::Bold => Self::Bold,
            InlineStyle::Italic => Self::Italic,
            InlineStyle::Underline => Self::Underline,
            InlineStyle::Strikethrough => Self::Strikethrough,
        }
    }
}

/// Content of one rendered node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderContent {
    /// Literal text run. Stored unescaped; escaping is the backend's job.
    Text(String),
    /// Wrapper element with rendered children.
    Element {
        tag: ElementTag,
        children: Vec<RenderNode>,
    },
}

impl RenderContent {
    /// Childless wrapper element.
    #[must_use]
    pub const fn empty_element(tag: ElementTag) -> Self {
        Self::Element {
            tag,
            children: Vec::new(),
        }
    }
}

/// One node of the output tree, carrying its sibling key.
///
/// Keys are ordinal positions within the parent, assigned after
/// unknown-kind flattening, so the same input always yields the same keys
/// and re-renders are stable.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderNode {
    pub key: usize,
    #[serde(flatten)]
    pub content: RenderContent,
}

/// Assign ordinal keys to a final sibling sequence.
pub(crate) fn emit(siblings: Vec<RenderContent>) -> Vec<RenderNode> {
    siblings
        .into_iter()
        .enumerate()
        .map(|(key, content)| RenderNode { key, content })
        .collect()
}
