//! A minimal serializable HTML node tree.
//!
//! Renderers map data records to [`Node`] values instead of writing markup
//! strings directly. The tree is plain data (it derives `Serialize`), so
//! tests can assert on structure or snapshot it without a real document;
//! [`Node::to_html`] serializes it at the edge.
//!
//! Text and attribute values are escaped during serialization. The one
//! deliberate hole is [`Element::raw`], which inserts trusted HTML verbatim
//! (the DVIDS API returns article bodies as HTML fragments).

use serde::Serialize;

/// Elements that close implicitly and take no children.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source"];

/// One node in the tree: an element, an escaped text run, or a trusted raw
/// HTML fragment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Element(Element),
    Text(String),
    Raw(String),
}

impl Node {
    /// Serialize the tree to an HTML string.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Concatenated text content of the subtree, raw fragments excluded.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Raw(html) => out.push_str(html),
            Node::Element(element) => element.write_html(out),
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Raw(_) => {}
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An HTML element with classes, attributes, and children.
///
/// Built fluently:
///
/// ```ignore
/// Element::new("a")
///     .class("button")
///     .attr("href", "/dvids/article?id=A1")
///     .text("Read More")
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_string(),
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Append an escaped text child.
    pub fn text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    /// Append a trusted raw HTML child. No escaping is applied.
    pub fn raw(mut self, html: &str) -> Self {
        self.children.push(Node::Raw(html.to_string()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append a child only when `node` is present. Keeps conditional
    /// fragments (missing dates, absent images) out of the tree entirely.
    pub fn maybe_child(mut self, node: Option<impl Into<Node>>) -> Self {
        if let Some(node) = node {
            self.children.push(node.into());
        }
        self
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_attr(&self.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
