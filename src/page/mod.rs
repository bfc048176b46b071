//! Page introspection for the renderer's currently displayed page.
//!
//! This module provides:
//! - Resolution of the page surface for a page index
//! - Extraction of addressable elements (id, name or link target)
//! - Page-relative rectangles for annotation overlays

mod extractor;

pub use extractor::*;
