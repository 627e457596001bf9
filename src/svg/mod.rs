//! Parse vector-map markup into a navigable element tree.
//!
//! The floor plan is an SVG document; the extraction passes only need tag
//! names, attribute lists, and nesting, so the tree keeps exactly that.
//! Parsing is a single `quick-xml` event pass with an open-element stack.

pub mod geometry;
pub mod gids;

use crate::error::{MapError, Result};

/// One element of the parsed document, with children in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgElement {
    /// Local tag name (namespace prefix stripped).
    pub tag: String,
    /// Attributes in source order, local names.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<SvgElement>,
}

impl SvgElement {
    fn new(tag: String) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// First attribute with the given local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse markup into an element tree.
///
/// The returned element is a synthetic document root; real top-level
/// elements (normally the single `<svg>`) are its children. Text content,
/// comments, and processing instructions are dropped — the extraction
/// passes never look at them.
pub fn parse_svg(text: &str) -> Result<SvgElement> {
    use quick_xml::events::{BytesStart, Event};

    fn open_element(e: &BytesStart) -> SvgElement {
        let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
        let mut el = SvgElement::new(tag);
        for attr in e.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
            let value = String::from_utf8_lossy(&attr.value).to_string();
            el.attrs.push((key, value));
        }
        el
    }

    let mut reader = quick_xml::Reader::from_str(text);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    // stack[0] is the synthetic document root.
    let mut stack = vec![SvgElement::new(String::new())];

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(open_element(e));
            }
            Ok(Event::Empty(ref e)) => {
                let el = open_element(e);
                stack
                    .last_mut()
                    .ok_or_else(|| MapError::Parse("unbalanced element nesting".into()))?
                    .children
                    .push(el);
            }
            Ok(Event::End(_)) => {
                // quick-xml rejects mismatched close tags before we get here
                let el = stack
                    .pop()
                    .ok_or_else(|| MapError::Parse("unbalanced element nesting".into()))?;
                stack
                    .last_mut()
                    .ok_or_else(|| MapError::Parse("close tag without open element".into()))?
                    .children
                    .push(el);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(MapError::Parse(e.to_string())),
        }
        buf.clear();
    }

    if stack.len() != 1 {
        return Err(MapError::Parse(format!(
            "{} element(s) left open at end of document",
            stack.len() - 1
        )));
    }
    Ok(stack.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_tree() {
        let svg = r#"<?xml version="1.0"?>
        <svg xmlns="http://www.w3.org/2000/svg" width="800" height="600">
          <g id="rooms">
            <rect id="Room1" x="10" y="20" width="100" height="50"/>
            <text id="Room1_label">Room 1</text>
          </g>
        </svg>"#;

        let root = parse_svg(svg).unwrap();
        assert_eq!(root.children.len(), 1);

        let svg_el = &root.children[0];
        assert_eq!(svg_el.tag, "svg");
        assert_eq!(svg_el.attr("width"), Some("800"));

        let group = &svg_el.children[0];
        assert_eq!(group.tag, "g");
        assert_eq!(group.attr("id"), Some("rooms"));
        assert_eq!(group.children.len(), 2);
        assert_eq!(group.children[0].tag, "rect");
        assert_eq!(group.children[1].tag, "text");
    }

    #[test]
    fn test_namespace_prefixes_stripped() {
        let svg = r##"<svg xmlns:xlink="http://www.w3.org/1999/xlink">
            <svg:g xmlns:svg="http://www.w3.org/2000/svg" id="paths">
                <svg:path d="M0 0" xlink:href="#x"/>
            </svg:g>
        </svg>"##;

        let root = parse_svg(svg).unwrap();
        let group = &root.children[0].children[0];
        assert_eq!(group.tag, "g");
        assert_eq!(group.children[0].tag, "path");
        assert_eq!(group.children[0].attr("href"), Some("#x"));
    }

    #[test]
    fn test_attribute_source_order() {
        let root = parse_svg(r#"<svg><rect width="1" x="2" id="r"/></svg>"#).unwrap();
        let rect = &root.children[0].children[0];
        let keys: Vec<&str> = rect.attrs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["width", "x", "id"]);
    }

    #[test]
    fn test_malformed_markup_is_parse_error() {
        for bad in ["<svg><g></svg>", "<svg><rect id='x'></svg"] {
            match parse_svg(bad) {
                Err(MapError::Parse(_)) => {}
                other => panic!("expected parse error for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unclosed_element_is_parse_error() {
        assert!(matches!(
            parse_svg("<svg><g id='a'>"),
            Err(MapError::Parse(_))
        ));
    }
}
