//! Full-document assembly.
//!
//! Wraps a rendered block in a complete HTML5 document so the CLI can write
//! standalone pages.

use crate::render::html::{Element, Node};

/// Wrap a body node in a complete HTML document with the given title.
pub fn html_page(title: &str, body: Node) -> String {
    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(Element::new("title").text(title));

    let document: Node = Element::new("html")
        .attr("lang", "en")
        .child(head)
        .child(Element::new("body").child(Element::new("main").child(body)))
        .into();

    format!("<!doctype html>\n{}\n", document.to_html())
}
