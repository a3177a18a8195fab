//! Inline formatting bit-set carried by text nodes.

use serde::{Deserialize, Serialize};

/// Combinable inline text styles, in their fixed decode order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl InlineStyle {
    /// All styles in decode order (bits 1, 2, 4, 8).
    pub const ALL: [Self; 4] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::Strikethrough,
    ];

    /// The bit this style occupies in the serialized mask.
    #[must_use]
    pub const fn bit(self) -> u64 {
        match self {
            Self::Bold => 1,
            Self::Italic => 2,
            Self::Underline => 4,
            Self::Strikethrough => 8,
        }
    }
}

/// Mask of all bits with a defined meaning.
const KNOWN_BITS: u64 = 0b1111;

/// Integer bit-set from a text node's `format` field.
///
/// Known bits are bold=1, italic=2, underline=4, strikethrough=8; any
/// combination may be set at once. Bits outside the known range are
/// ignored rather than rejected, so a mask of `16` renders as plain text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextFormat(u64);

impl TextFormat {
    /// Wrap a raw mask value.
    #[must_use]
    pub const fn new(mask: u64) -> Self {
        Self(mask)
    }

    /// The raw mask as serialized.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Whether no known style bit is set.
    #[must_use]
    pub const fn is_plain(self) -> bool {
        self.0 & KNOWN_BITS == 0
    }

    /// Whether a specific style bit is set.
    #[must_use]
    pub const fn contains(self, style: InlineStyle) -> bool {
        self.0 & style.bit() != 0
    }

    /// Set styles in the fixed decode order bold, italic, underline,
    /// strikethrough.
    ///
    /// The first yielded style becomes the outermost wrapper in rendered
    /// output: a mask of `3` nests italic inside bold. Swapping this order
    /// changes observable nesting and requires a test update.
    pub fn styles(self) -> impl DoubleEndedIterator<Item = InlineStyle> {
        InlineStyle::ALL
            .into_iter()
            .filter(move |style| self.contains(*style))
    }
}
