// Paginator - page-state introspection for a paginated web renderer
//
// Describes the addressable elements of the page a paginated document viewer
// currently shows, with page-relative rectangles a host can turn into PDF
// annotations, and resolves the viewer's rewritten in-document links.

pub mod config;
pub mod dom;
pub mod error;
pub mod geometry;
pub mod href;
pub mod page;
pub mod paginator;
pub mod renderer;

#[cfg(feature = "tauri")]
mod commands;

#[cfg(feature = "tauri")]
pub use commands::{init, PaginatorState, WebviewRunner};

pub use config::{PageViewMode, PaginatorConfig};
pub use dom::DomNode;
pub use error::PaginatorError;
pub use geometry::Rect;
pub use href::demangle_href;
pub use page::{elements_of_page, ElementDescriptor};
pub use paginator::{ChannelSink, HostMessage, HostSink, Paginator};
pub use renderer::{
    LoadOptions, PageSize, ReadyState, Renderer, RendererEvent, RendererEvents, RendererMessage,
    ScriptRunner, SnapshotRenderer,
};
