//! Serialized snapshot of the renderer's DOM.
//!
//! The web view walks its rendered viewport and posts a tree of [`DomNode`]s with
//! the geometry it measured (`getClientRects` / `getBoundingClientRect`). The
//! introspection code only ever reads this tree.

use crate::geometry::{self, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One rendered element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomNode {
    /// Element name as reported by the DOM (`DIV`, `a`, ...)
    pub tag_name: String,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Boxes the element renders as, in native order
    #[serde(default)]
    pub client_rects: Vec<Rect>,

    /// Explicit bounding rect; derived from the client rects when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_client_rect: Option<Rect>,

    /// Element children in document order
    #[serde(default)]
    pub children: Vec<DomNode>,
}

impl DomNode {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.client_rects.push(rect);
        self
    }

    pub fn with_bounds(mut self, rect: Rect) -> Self {
        self.bounding_client_rect = Some(rect);
        self
    }

    pub fn with_child(mut self, child: DomNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// The element's id, or `""` when it has none.
    pub fn id(&self) -> &str {
        self.attribute("id").unwrap_or("")
    }

    /// Lowercase element name.
    pub fn local_name(&self) -> String {
        self.tag_name.to_ascii_lowercase()
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Class tokens in authored order. Like `classList`, a repeated token is
    /// kept only at its first occurrence.
    pub fn class_list(&self) -> Vec<String> {
        let mut classes: Vec<String> = Vec::new();
        for token in self.attribute("class").unwrap_or_default().split_ascii_whitespace() {
            if !classes.iter().any(|seen| seen == token) {
                classes.push(token.to_string());
            }
        }
        classes
    }

    pub fn client_rects(&self) -> &[Rect] {
        &self.client_rects
    }

    /// Same contract as `getBoundingClientRect`: the union of the client rects,
    /// or an empty rect at the origin when the element has none.
    pub fn bounding_client_rect(&self) -> Rect {
        self.bounding_client_rect
            .or_else(|| geometry::union_all(&self.client_rects))
            .unwrap_or_default()
    }

    /// Strict descendants in depth-first pre-order (document order).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First node, `self` included, matching `predicate` in document order.
    pub fn find_inclusive(&self, predicate: impl Fn(&DomNode) -> bool) -> Option<&DomNode> {
        if predicate(self) {
            return Some(self);
        }
        self.find(predicate)
    }

    /// First strict descendant matching `predicate` in document order.
    pub fn find(&self, predicate: impl Fn(&DomNode) -> bool) -> Option<&DomNode> {
        self.descendants().find(|node| predicate(*node))
    }
}

/// Depth-first pre-order iterator over a node's descendants.
pub struct Descendants<'a> {
    stack: Vec<&'a DomNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a DomNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
