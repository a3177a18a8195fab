//! HTML backend for the rendered tree.
//!
//! Produces semantic HTML5. The output tree carries text unescaped;
//! everything is escaped here at the serialization boundary.

use std::fmt::Write;

use crate::tree::{ElementTag, RenderContent, RenderNode};

/// Serialize a rendered sibling sequence to HTML.
#[must_use]
pub fn render_html(nodes: &[RenderNode]) -> String {
    let mut out = String::with_capacity(256);
    write_nodes(nodes, &mut out);
    out
}

fn write_nodes(nodes: &[RenderNode], out: &mut String) {
    for node in nodes {
        write_content(&node.content, out);
    }
}

fn write_content(content: &RenderContent, out: &mut String) {
    match content {
        RenderContent::Text(text) => out.push_str(&escape_html(text)),
        RenderContent::Element { tag, children } => match tag {
            ElementTag::LineBreak => out.push_str("<br>"),
            ElementTag::Heading(level) => {
                let level = level.as_number();
                write!(out, "<h{level}>").unwrap();
                write_nodes(children, out);
                write!(out, "</h{level}>").unwrap();
            }
            ElementTag::CodeBlock => {
                out.push_str("<pre><code>");
                write_nodes(children, out);
                out.push_str("</code></pre>");
            }
            ElementTag::Fallback => {
                out.push_str(r#"<div class="rt-fallback">"#);
                write_nodes(children, out);
                out.push_str("</div>");
            }
            _ => {
                let name = tag_name(*tag);
                write!(out, "<{name}>").unwrap();
                write_nodes(children, out);
                write!(out, "</{name}>").unwrap();
            }
        },
    }
}

/// Element name for tags with a plain open/close pair.
fn tag_name(tag: ElementTag) -> &'static str {
    match tag {
        ElementTag::Paragraph => "p",
        ElementTag::OrderedList => "ol",
        ElementTag::UnorderedList => "ul",
        ElementTag::ListItem => "li",
        ElementTag::Blockquote => "blockquote",
        ElementTag::Bold => "strong",
        ElementTag::Italic => "em",
        ElementTag::Underline => "u",
        ElementTag::Strikethrough => "s",
        // Handled by write_content before reaching here.
        ElementTag::Heading(_)
        | ElementTag::CodeBlock
        | ElementTag::LineBreak
        | ElementTag::Fallback => unreachable!("tag has dedicated serialization"),
    }
}

/// Escape text for safe inclusion in HTML content or attributes.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
