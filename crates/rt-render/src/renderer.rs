//! Recursive node dispatch with node-local error recovery.

use rt_doc::{Document, Node, ParseError, ParseLimits, TextFormat};
use serde_json::Value;

use crate::html;
use crate::sink::{Diagnostic, DiagnosticSink, TracingSink};
use crate::tree::{ElementTag, RenderContent, RenderNode, emit};

/// Message carried by the fallback block when a document is rejected.
const FALLBACK_MESSAGE: &str = "Content could not be loaded.";

/// Result of rendering a document.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderResult {
    /// Keyed output tree, top-level siblings in input order.
    pub nodes: Vec<RenderNode>,
    /// Display strings for every diagnostic recovered during the render.
    pub warnings: Vec<String>,
}

impl RenderResult {
    /// Serialize the output tree to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        html::render_html(&self.nodes)
    }

    /// Whether this result is the document-fatal fallback block.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(
            self.nodes.as_slice(),
            [RenderNode {
                content: RenderContent::Element {
                    tag: ElementTag::Fallback,
                    ..
                },
                ..
            }]
        )
    }
}

/// Recursive document renderer.
///
/// Dispatches on node kind, decodes inline format masks, and assembles a
/// keyed output tree. Failures split two ways: a document that cannot be
/// parsed at all yields a single fallback block, while anything wrong
/// inside an individual node degrades locally and the rest of the tree
/// renders normally. No input makes the public entry points return an
/// error or panic.
///
/// # Example
///
/// ```
/// use rt_render::DocRenderer;
///
/// let result = DocRenderer::new().render_json(
///     r#"{"root":{"children":[{"type":"paragraph","children":[
///         {"type":"text","text":"Hello","format":3}]}]}}"#,
/// );
/// assert_eq!(
///     result.to_html(),
///     "<p><strong><em>Hello</em></strong></p>",
/// );
/// ```
pub struct DocRenderer {
    limits: ParseLimits,
    sink: Box<dyn DiagnosticSink>,
}

impl Default for DocRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocRenderer {
    /// Create a renderer with default limits and the `tracing` sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            limits: ParseLimits::default(),
            sink: Box::new(TracingSink),
        }
    }

    /// Override traversal limits applied while parsing raw input.
    #[must_use]
    pub fn with_limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replace the diagnostic sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Parse and render a JSON-encoded document.
    ///
    /// A parse failure yields the fallback block with the diagnostic in
    /// `warnings`; it never partially renders and never propagates.
    pub fn render_json(&mut self, input: &str) -> RenderResult {
        match Document::parse_with(input, &self.limits) {
            Ok(document) => self.render(&document),
            Err(error) => self.fallback(error),
        }
    }

    /// Render an already-structured value.
    pub fn render_value(&mut self, value: &Value) -> RenderResult {
        match Document::from_value(value, &self.limits) {
            Ok(document) => self.render(&document),
            Err(error) => self.fallback(error),
        }
    }

    /// Render a parsed document.
    pub fn render(&mut self, document: &Document) -> RenderResult {
        let mut warnings = Vec::new();
        let siblings = self.render_children(&document.children, &mut warnings);
        RenderResult {
            nodes: emit(siblings),
            warnings,
        }
    }

    /// Substitute output for a document-fatal failure.
    fn fallback(&mut self, error: ParseError) -> RenderResult {
        let mut warnings = Vec::new();
        self.note(Diagnostic::Rejected { source: error }, &mut warnings);
        RenderResult {
            nodes: emit(vec![RenderContent::Element {
                tag: ElementTag::Fallback,
                children: emit(vec![RenderContent::Text(FALLBACK_MESSAGE.to_owned())]),
            }]),
            warnings,
        }
    }

    fn render_children(
        &mut self,
        children: &[Node],
        warnings: &mut Vec<String>,
    ) -> Vec<RenderContent> {
        let mut siblings = Vec::with_capacity(children.len());
        for child in children {
            self.render_node(child, warnings, &mut siblings);
        }
        siblings
    }

    /// Dispatch one node, appending its output to the sibling sequence.
    ///
    /// Appending (rather than returning) lets unknown kinds splice their
    /// children into the parent's sequence and invalid nodes contribute
    /// nothing, before sibling keys are assigned.
    fn render_node(
        &mut self,
        node: &Node,
        warnings: &mut Vec<String>,
        siblings: &mut Vec<RenderContent>,
    ) {
        match node {
            Node::Text { text, format } => siblings.push(render_text(text, *format)),
            Node::LineBreak => {
                siblings.push(RenderContent::empty_element(ElementTag::LineBreak));
            }
            Node::Paragraph { children } => {
                siblings.push(self.container(ElementTag::Paragraph, children, warnings));
            }
            Node::Heading { level, children } => {
                siblings.push(self.container(ElementTag::Heading(*level), children, warnings));
            }
            Node::List { ordered, children } => {
                let tag = if *ordered {
                    ElementTag::OrderedList
                } else {
                    ElementTag::UnorderedList
                };
                siblings.push(self.container(tag, children, warnings));
            }
            Node::ListItem { children } => {
                siblings.push(self.container(ElementTag::ListItem, children, warnings));
            }
            Node::Quote { children } => {
                siblings.push(self.container(ElementTag::Blockquote, children, warnings));
            }
            Node::Code { children } => {
                siblings.push(self.container(ElementTag::CodeBlock, children, warnings));
            }
            Node::Unknown { kind, children } => {
                self.note(Diagnostic::UnknownKind { kind: kind.clone() }, warnings);
                for child in children {
                    self.render_node(child, warnings, siblings);
                }
            }
            Node::Invalid { reason } => {
                self.note(Diagnostic::SkippedNode { reason: *reason }, warnings);
            }
        }
    }

    fn container(
        &mut self,
        tag: ElementTag,
        children: &[Node],
        warnings: &mut Vec<String>,
    ) -> RenderContent {
        RenderContent::Element {
            tag,
            children: emit(self.render_children(children, warnings)),
        }
    }

    fn note(&mut self, diagnostic: Diagnostic, warnings: &mut Vec<String>) {
        warnings.push(diagnostic.to_string());
        self.sink.report(&diagnostic);
    }
}

/// Wrap a text run per its format mask.
///
/// Styles decode in the fixed order bold, italic, underline, strikethrough,
/// with the first set bit becoming the outermost wrapper. Building inside
/// out, so the iteration here runs in reverse.
fn render_text(text: &str, format: TextFormat) -> RenderContent {
    let mut content = RenderContent::Text(text.to_owned());
    for style in format.styles().rev() {
        content = RenderContent::Element {
            tag: ElementTag::for_style(style),
            children: emit(vec![content]),
        };
    }
    content
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sink::CollectingSink;

    fn render(input: &str) -> RenderResult {
        DocRenderer::new().render_json(input)
    }

    fn doc(children: &str) -> String {
        format!(r#"{{"root":{{"children":[{children}]}}}}"#)
    }

    #[test]
    fn test_plain_text_has_no_wrappers() {
        let result = render(&doc(r#"{"type":"text","text":"plain","format":0}"#));
        assert_eq!(
            result.nodes,
            vec![RenderNode {
                key: 0,
                content: RenderContent::Text("plain".to_owned()),
            }]
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_bold_italic_nesting_order() {
        // Bit law: 1|2 wraps italic inside bold.
        let result = render(&doc(r#"{"type":"text","text":"x","format":3}"#));
        assert_eq!(result.to_html(), "<strong><em>x</em></strong>");
    }

    #[test]
    fn test_all_styles_nesting_order() {
        let result = render(&doc(r#"{"type":"text","text":"x","format":15}"#));
        assert_eq!(
            result.to_html(),
            "<strong><em><u><s>x</s></u></em></strong>"
        );
    }

    #[test]
    fn test_undefined_format_bits_ignored() {
        let result = render(&doc(r#"{"type":"text","text":"x","format":16}"#));
        assert_eq!(result.to_html(), "x");
    }

    #[test]
    fn test_empty_document_renders_empty() {
        let result = render(r#"{"root":{"children":[]}}"#);
        assert!(result.nodes.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.to_html(), "");
    }

    #[test]
    fn test_sibling_order_preserved() {
        let result = render(&doc(
            r#"{"type":"paragraph","children":[
                {"type":"text","text":"A"},
                {"type":"text","text":"B"},
                {"type":"text","text":"C"}
            ]}"#,
        ));
        assert_eq!(result.to_html(), "<p>ABC</p>");
    }

    #[test]
    fn test_keys_are_ordinal_and_stable() {
        let input = doc(
            r#"{"type":"text","text":"a"},
               {"type":"linebreak"},
               {"type":"text","text":"b"}"#,
        );
        let first = render(&input);
        let second = render(&input);
        assert_eq!(first.nodes, second.nodes);
        let keys: Vec<_> = first.nodes.iter().map(|node| node.key).collect();
        assert_eq!(keys, vec![0, 1, 2]);
    }

    #[test]
    fn test_heading_levels() {
        let result = render(&doc(
            r#"{"type":"heading","tag":"h1","children":[{"type":"text","text":"T"}]},
               {"type":"heading","tag":"h4","children":[{"type":"text","text":"S"}]}"#,
        ));
        assert_eq!(result.to_html(), "<h1>T</h1><h2>S</h2>");
    }

    #[test]
    fn test_list_kinds() {
        let ordered = render(&doc(
            r#"{"type":"list","listType":"number","children":[
                {"type":"listitem","children":[{"type":"text","text":"one"}]}
            ]}"#,
        ));
        assert_eq!(ordered.to_html(), "<ol><li>one</li></ol>");

        let bullet = render(&doc(
            r#"{"type":"list","listType":"bullet","children":[
                {"type":"listitem","children":[{"type":"text","text":"one"}]}
            ]}"#,
        ));
        assert_eq!(bullet.to_html(), "<ul><li>one</li></ul>");
    }

    #[test]
    fn test_nested_lists_preserve_order() {
        let result = render(&doc(
            r#"{"type":"list","listType":"bullet","children":[
                {"type":"listitem","children":[{"type":"text","text":"outer"}]},
                {"type":"listitem","children":[
                    {"type":"list","listType":"number","children":[
                        {"type":"listitem","children":[{"type":"text","text":"inner"}]}
                    ]}
                ]}
            ]}"#,
        ));
        assert_eq!(
            result.to_html(),
            "<ul><li>outer</li><li><ol><li>inner</li></ol></li></ul>"
        );
    }

    #[test]
    fn test_quote_and_code_containers() {
        let result = render(&doc(
            r#"{"type":"quote","children":[{"type":"text","text":"said"}]},
               {"type":"code","children":[{"type":"text","text":"let x = 1;"}]}"#,
        ));
        assert_eq!(
            result.to_html(),
            "<blockquote>said</blockquote><pre><code>let x = 1;</code></pre>"
        );
    }

    #[test]
    fn test_linebreak_renders_hard_break() {
        let result = render(&doc(
            r#"{"type":"paragraph","children":[
                {"type":"text","text":"a"},
                {"type":"linebreak"},
                {"type":"text","text":"b"}
            ]}"#,
        ));
        assert_eq!(result.to_html(), "<p>a<br>b</p>");
    }

    #[test]
    fn test_unknown_kind_flattens_children() {
        let result = render(&doc(
            r#"{"type":"paragraph","children":[
                {"type":"mention","children":[
                    {"type":"text","text":"@a"},
                    {"type":"text","text":"@b"}
                ]}
            ]}"#,
        ));
        assert_eq!(result.to_html(), "<p>@a@b</p>");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("mention"));
    }

    #[test]
    fn test_unknown_kind_without_children_renders_nothing() {
        let result = render(&doc(r#"{"type":"widget"}"#));
        assert_eq!(result.to_html(), "");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_flattened_children_get_parent_sequence_keys() {
        let result = render(&doc(
            r#"{"type":"text","text":"lead"},
               {"type":"mention","children":[
                   {"type":"text","text":"@a"},
                   {"type":"text","text":"@b"}
               ]},
               {"type":"text","text":"tail"}"#,
        ));
        let keys: Vec<_> = result.nodes.iter().map(|node| node.key).collect();
        assert_eq!(keys, vec![0, 1, 2, 3]);
        assert_eq!(result.to_html(), "lead@a@btail");
    }

    #[test]
    fn test_malformed_json_yields_fallback() {
        let result = render("{not json");
        assert!(result.is_fallback());
        assert_eq!(
            result.to_html(),
            r#"<div class="rt-fallback">Content could not be loaded.</div>"#
        );
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("invalid document JSON"));
    }

    #[test]
    fn test_missing_root_yields_fallback() {
        let result = render(r#"{"version":1}"#);
        assert!(result.is_fallback());
        assert!(result.warnings[0].contains("root.children"));
    }

    #[test]
    fn test_corrupt_child_does_not_blank_document() {
        let result = render(&doc(
            r#"{"type":"paragraph","children":[
                {"type":"text","text":"good"},
                17,
                {"type":"text","text":"still good"}
            ]}"#,
        ));
        assert_eq!(result.to_html(), "<p>goodstill good</p>");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("not an object"));
    }

    #[test]
    fn test_depth_ceiling_degrades_without_overflow() {
        let mut inner = r#"{"type":"text","text":"deep"}"#.to_owned();
        for _ in 0..64 {
            inner = format!(r#"{{"type":"quote","children":[{inner}]}}"#);
        }
        let input = format!(
            r#"{{"root":{{"children":[{inner},{{"type":"text","text":"flat"}}]}}}}"#
        );
        let mut renderer =
            DocRenderer::new().with_limits(ParseLimits::default().with_max_depth(8));
        let result = renderer.render_json(&input);

        // The over-deep tail degrades; the sibling still renders.
        assert!(result.to_html().ends_with("flat"));
        assert!(!result.is_fallback());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("depth limit"));
    }

    #[test]
    fn test_render_value_structured_input() {
        let value = serde_json::json!({
            "root": {"children": [{"type": "text", "text": "direct"}]}
        });
        let result = DocRenderer::new().render_value(&value);
        assert_eq!(result.to_html(), "direct");
    }

    #[test]
    fn test_sink_receives_diagnostics() {
        let sink = CollectingSink::default();
        let mut renderer = DocRenderer::new().with_sink(sink.clone());
        renderer.render_json(&doc(r#"{"type":"widget"}"#));
        renderer.render_json("{not json");

        let messages = sink.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("widget"));
        assert!(messages[1].contains("document rejected"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let input = doc(
            r#"{"type":"heading","tag":"h1","children":[
                {"type":"text","text":"t","format":9}
            ]}"#,
        );
        assert_eq!(render(&input), render(&input));
    }
}
