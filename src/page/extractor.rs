//! Element extraction for one rendered page.
//!
//! The renderer lays pages out as children of a spread container; each page
//! container holds a page box which is the visible page surface. Geometry is
//! reported relative to that surface.

use crate::dom::DomNode;
use crate::geometry::{self, Rect};
use crate::href;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Attribute marking the element that holds one child per laid-out page.
pub const SPREAD_CONTAINER_ATTR: &str = "data-vivliostyle-spread-container";

/// Attribute marking the visible content area of a page.
pub const PAGE_BOX_ATTR: &str = "data-vivliostyle-page-box";

/// Prefix of the anchor ids the renderer generates for its own linking.
pub const SYNTHETIC_ID_PREFIX: &str = "viv-id-";

/// An addressable element on the current page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptor {
    /// Lowercase element name
    pub tag: String,
    /// Class tokens in authored order
    pub class_names: Vec<String>,
    /// Element id, empty when the element has none
    pub id: String,
    pub name: Option<String>,
    /// Demangled link target
    pub href: Option<String>,
    /// Page-relative boxes, never empty
    pub rects: Vec<Rect>,
}

/// Locate the page surface of page `page_index` in the rendered document.
///
/// Returns `None` before the first layout, for an index past the last page, or
/// when the page has no flagged page box.
pub fn current_page_box(document: &DomNode, page_index: usize) -> Option<&DomNode> {
    let spread = document.find_inclusive(|node| node.has_attribute(SPREAD_CONTAINER_ATTR))?;
    let page_container = spread.children.get(page_index)?;
    page_container.find(|node| node.has_attribute(PAGE_BOX_ATTR))
}

/// Describe every addressable element of page `page_index`.
///
/// An empty result is not an error; it means there is nothing to describe yet.
pub fn elements_of_page(document: &DomNode, page_index: usize) -> Vec<ElementDescriptor> {
    let Some(page_box) = current_page_box(document, page_index) else {
        debug!(page_index, "no page box rendered");
        return Vec::new();
    };

    let elements: Vec<ElementDescriptor> = page_box
        .descendants()
        .filter(|element| is_addressable(element))
        .filter(|element| !element.id().starts_with(SYNTHETIC_ID_PREFIX))
        .filter_map(|element| describe(element, page_box))
        .collect();

    debug!(page_index, count = elements.len(), "extracted page elements");
    elements
}

/// Elements with an id, a name, or anchors with a link target.
fn is_addressable(element: &DomNode) -> bool {
    element.has_attribute("id")
        || element.has_attribute("name")
        || (element.is("a") && element.has_attribute("href"))
}

fn describe(element: &DomNode, page_box: &DomNode) -> Option<ElementDescriptor> {
    let rects = geometry::relative_client_rects(element, page_box);
    if rects.is_empty() {
        return None;
    }

    Some(ElementDescriptor {
        tag: element.local_name(),
        class_names: element.class_list(),
        id: element.id().to_string(),
        name: element.attribute("name").map(str::to_string),
        href: href::demangle_href(element.attribute("href")).map(|href| href.into_owned()),
        rects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_box(children: Vec<DomNode>) -> DomNode {
        let mut page_box = DomNode::new("div")
            .with_attribute(PAGE_BOX_ATTR, "")
            .with_bounds(Rect::new(100.0, 200.0, 600.0, 800.0));
        page_box.children = children;
        page_box
    }

    fn document(pages: Vec<DomNode>) -> DomNode {
        let mut spread = DomNode::new("div").with_attribute(SPREAD_CONTAINER_ATTR, "");
        spread.children = pages
            .into_iter()
            .map(|page_box| DomNode::new("div").with_child(page_box))
            .collect();
        DomNode::new("html").with_child(DomNode::new("body").with_child(spread))
    }

    #[test]
    fn test_relative_rect() {
        let doc = document(vec![page_box(vec![DomNode::new("p")
            .with_attribute("id", "intro")
            .with_rect(Rect::new(110.0, 210.0, 50.0, 20.0))])]);

        let elements = elements_of_page(&doc, 0);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].tag, "p");
        assert_eq!(elements[0].id, "intro");
        assert_eq!(elements[0].rects, vec![Rect::new(10.0, 10.0, 50.0, 20.0)]);
    }

    #[test]
    fn test_missing_page_surface() {
        assert!(elements_of_page(&DomNode::new("html"), 0).is_empty());

        let doc = document(vec![page_box(Vec::new())]);
        assert!(elements_of_page(&doc, 1).is_empty());

        let no_box = DomNode::new("div")
            .with_attribute(SPREAD_CONTAINER_ATTR, "")
            .with_child(DomNode::new("div").with_child(DomNode::new("p").with_attribute("id", "x")));
        assert!(current_page_box(&no_box, 0).is_none());
    }

    #[test]
    fn test_page_box_must_be_descendant() {
        let mut spread = DomNode::new("div").with_attribute(SPREAD_CONTAINER_ATTR, "");
        spread.children.push(DomNode::new("div").with_attribute(PAGE_BOX_ATTR, ""));
        assert!(current_page_box(&spread, 0).is_none());
    }

    #[test]
    fn test_skips_synthetic_and_invisible() {
        let doc = document(vec![page_box(vec![
            DomNode::new("a")
                .with_attribute("id", "viv-id-xyz")
                .with_rect(Rect::new(100.0, 200.0, 1.0, 1.0)),
            DomNode::new("h1").with_attribute("id", "hidden"),
            DomNode::new("span").with_attribute("class", "no-id").with_rect(Rect::new(0.0, 0.0, 1.0, 1.0)),
        ])]);
        assert!(elements_of_page(&doc, 0).is_empty());
    }

    #[test]
    fn test_anchor_without_href_needs_id_or_name() {
        let rect = Rect::new(100.0, 200.0, 10.0, 10.0);
        let doc = document(vec![page_box(vec![
            DomNode::new("a").with_rect(rect),
            DomNode::new("a").with_attribute("name", "old-style").with_rect(rect),
            DomNode::new("div").with_attribute("href", "#ignored").with_rect(rect),
        ])]);

        let elements = elements_of_page(&doc, 0);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].name.as_deref(), Some("old-style"));
        assert_eq!(elements[0].id, "");
        assert_eq!(elements[0].href, None);
    }

    #[test]
    fn test_descriptor_fields() {
        let doc = document(vec![page_box(vec![DomNode::new("A")
            .with_attribute("class", "xref internal")
            .with_attribute("href", "#viv-id-:002fdoc:002ehtml:0023foo:0020bar")
            .with_rect(Rect::new(120.0, 230.0, 40.0, 12.0))
            .with_rect(Rect::new(100.0, 244.0, 25.0, 12.0))])]);

        let elements = elements_of_page(&doc, 0);
        assert_eq!(elements.len(), 1);
        let link = &elements[0];
        assert_eq!(link.tag, "a");
        assert_eq!(link.class_names, vec!["xref", "internal"]);
        assert_eq!(link.href.as_deref(), Some("#foo bar"));
        assert_eq!(
            link.rects,
            vec![Rect::new(20.0, 30.0, 40.0, 12.0), Rect::new(0.0, 44.0, 25.0, 12.0)]
        );
    }

    #[test]
    fn test_selects_page_by_index() {
        let rect = Rect::new(100.0, 200.0, 10.0, 10.0);
        let doc = document(vec![
            page_box(vec![DomNode::new("p").with_attribute("id", "first").with_rect(rect)]),
            page_box(vec![DomNode::new("p").with_attribute("id", "second").with_rect(rect)]),
        ]);
        let ids: Vec<String> = elements_of_page(&doc, 1).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["second"]);
    }

    #[test]
    fn test_serializes_with_host_keys() {
        let descriptor = ElementDescriptor {
            tag: "a".to_string(),
            class_names: vec!["x".to_string()],
            id: String::new(),
            name: None,
            href: Some("#y".to_string()),
            rects: vec![Rect::new(0.0, 0.0, 1.0, 1.0)],
        };
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["classNames"], serde_json::json!(["x"]));
        assert_eq!(json["name"], serde_json::Value::Null);
        assert_eq!(json["href"], "#y");
    }
}
