//! Collect primitive shape geometry from the designated path container.

use crate::svg::gids::sanitize_id;
use crate::svg::SvgElement;
use serde::Serialize;

/// Primitive shape tags collected for clients.
const SHAPE_TAGS: &[&str] = &["rect", "circle", "line", "path"];

/// Geometry of one primitive shape. Missing or unparsable numeric
/// attributes default to `0.0`; `id` is `None` when the element has none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeRecord {
    pub id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Collect every primitive shape under the `<g>` with the given id, in
/// document order.
///
/// A document without the container yields an empty list — that is a
/// normal outcome for maps with no path layer, not an error. Shapes are
/// not filtered against the exclusion rules; geometry and identifier
/// extraction are independent passes.
pub fn collect_shapes(root: &SvgElement, container_id: &str) -> Vec<ShapeRecord> {
    let mut shapes = Vec::new();
    if let Some(container) = find_container(root, container_id) {
        descend(container, &mut shapes);
    }
    shapes
}

fn find_container<'a>(el: &'a SvgElement, container_id: &str) -> Option<&'a SvgElement> {
    if el.tag == "g" && el.attr("id") == Some(container_id) {
        return Some(el);
    }
    el.children
        .iter()
        .find_map(|child| find_container(child, container_id))
}

fn descend(el: &SvgElement, shapes: &mut Vec<ShapeRecord>) {
    for child in &el.children {
        if SHAPE_TAGS.contains(&child.tag.as_str()) {
            shapes.push(shape_record(child));
        }
        descend(child, shapes);
    }
}

fn shape_record(el: &SvgElement) -> ShapeRecord {
    ShapeRecord {
        id: el.attr("id").map(sanitize_id),
        x: num_attr(el, "x"),
        y: num_attr(el, "y"),
        width: num_attr(el, "width"),
        height: num_attr(el, "height"),
    }
}

/// Lenient numeric read: absent or unparsable values become `0.0`.
fn num_attr(el: &SvgElement, name: &str) -> f64 {
    el.attr(name)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::parse_svg;

    #[test]
    fn test_missing_container_is_empty_not_error() {
        let root = parse_svg(r#"<svg><g id="labels"><rect x="1"/></g></svg>"#).unwrap();
        assert!(collect_shapes(&root, "paths").is_empty());
    }

    #[test]
    fn test_collects_shapes_in_document_order() {
        let svg = r#"<svg>
            <g id="paths">
                <rect id="r1" x="10" y="20" width="30" height="40"/>
                <g id="inner">
                    <circle id="c1" x="5" y="6"/>
                    <line id="l1"/>
                </g>
                <path id="p1" x="7"/>
            </g>
            <g id="other"><rect id="outside"/></g>
        </svg>"#;
        let root = parse_svg(svg).unwrap();

        let shapes = collect_shapes(&root, "paths");
        let ids: Vec<Option<&str>> = shapes.iter().map(|s| s.id.as_deref()).collect();
        assert_eq!(
            ids,
            [Some("r1"), Some("c1"), Some("l1"), Some("p1")],
            "shapes outside the container must not be collected"
        );
        assert_eq!(shapes[0].x, 10.0);
        assert_eq!(shapes[0].height, 40.0);
    }

    #[test]
    fn test_numeric_leniency_defaults_to_zero() {
        let svg = r#"<svg><g id="paths">
            <rect id="r" x="12.5" y="not-a-number" width=""/>
        </g></svg>"#;
        let root = parse_svg(svg).unwrap();

        let shapes = collect_shapes(&root, "paths");
        assert_eq!(shapes[0].x, 12.5);
        assert_eq!(shapes[0].y, 0.0);
        assert_eq!(shapes[0].width, 0.0);
        assert_eq!(shapes[0].height, 0.0);
    }

    #[test]
    fn test_shape_without_id_serializes_null() {
        let root = parse_svg(r#"<svg><g id="paths"><path d="M0 0"/></g></svg>"#).unwrap();
        let shapes = collect_shapes(&root, "paths");
        assert_eq!(shapes[0].id, None);

        let json = serde_json::to_value(&shapes[0]).unwrap();
        assert!(json["id"].is_null());
    }

    #[test]
    fn test_no_exclusion_filtering_on_geometry() {
        // Identifier filtering and geometry are independent passes.
        let svg = r#"<svg><g id="paths"><rect id="vector_decor" x="1"/></g></svg>"#;
        let root = parse_svg(svg).unwrap();
        let shapes = collect_shapes(&root, "paths");
        assert_eq!(shapes[0].id.as_deref(), Some("vector_decor"));
    }
}
