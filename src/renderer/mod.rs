//! The external pagination engine, seen through a narrow interface.
//!
//! The renderer owns layout. This crate asks it to load documents and move
//! between pages, reads the DOM it produced, and listens on its two event
//! channels: ready state changes and finished navigations.

mod snapshot;

pub use snapshot::*;

use crate::config::PageViewMode;
use crate::dom::DomNode;
use crate::error::PaginatorError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::warn;
use url::Url;

/// Navigation notifications buffered per subscriber before it lags.
const NAVIGATION_CAPACITY: usize = 16;

/// Loading state reported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    #[default]
    Loading,
    Interactive,
    Complete,
}

/// Size of one laid-out page in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// Options handed to the renderer with a document load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadOptions {
    pub page_view_mode: PageViewMode,
    pub zoom: f64,
    /// Re-run layout on window resize
    pub auto_resize: bool,
}

/// A pagination engine.
///
/// Loading and navigation return as soon as the request is issued; completion
/// arrives later on [`Renderer::events`].
pub trait Renderer {
    fn load_document(&mut self, url: &Url, options: &LoadOptions) -> Result<(), PaginatorError>;

    /// Show the page at `index`. Out-of-range indices are the renderer's concern.
    fn navigate_to_page(&mut self, index: usize) -> Result<(), PaginatorError>;

    fn page_sizes(&self) -> Vec<PageSize>;

    /// The rendered DOM, or `None` before anything was laid out.
    fn document(&self) -> Option<&DomNode>;

    fn events(&self) -> &RendererEvents;

    /// The page currently shown, for renderers that can tell.
    fn current_page_index(&self) -> Option<usize> {
        None
    }
}

/// Something the renderer announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererEvent {
    ReadyStateChanged(ReadyState),
    NavigationFinished,
}

/// Publishing side of the renderer's two event channels.
#[derive(Debug, Clone)]
pub struct RendererEvents {
    ready_state: Arc<watch::Sender<ReadyState>>,
    navigation: broadcast::Sender<()>,
}

impl Default for RendererEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererEvents {
    pub fn new() -> Self {
        let (ready_state, _) = watch::channel(ReadyState::default());
        let (navigation, _) = broadcast::channel(NAVIGATION_CAPACITY);
        Self {
            ready_state: Arc::new(ready_state),
            navigation,
        }
    }

    pub fn ready_state(&self) -> ReadyState {
        *self.ready_state.borrow()
    }

    pub fn ready_state_changed(&self, state: ReadyState) {
        self.ready_state.send_replace(state);
    }

    pub fn navigation_finished(&self) {
        // No subscribers is fine.
        let _ = self.navigation.send(());
    }

    pub fn subscribe(&self) -> RendererSubscription {
        RendererSubscription {
            ready_state: self.ready_state.subscribe(),
            navigation: self.navigation.subscribe(),
        }
    }
}

/// Receiving side of the event channels. Only events published after
/// subscribing are observed.
#[derive(Debug)]
pub struct RendererSubscription {
    ready_state: watch::Receiver<ReadyState>,
    navigation: broadcast::Receiver<()>,
}

impl RendererSubscription {
    /// Next pending event without waiting. Ready state changes collapse to the
    /// latest value and are reported before navigations.
    pub fn try_next(&mut self) -> Option<RendererEvent> {
        if self.ready_state.has_changed().unwrap_or(false) {
            let state = *self.ready_state.borrow_and_update();
            return Some(RendererEvent::ReadyStateChanged(state));
        }

        match self.navigation.try_recv() {
            Ok(()) => Some(RendererEvent::NavigationFinished),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "dropped navigation notifications");
                Some(RendererEvent::NavigationFinished)
            }
            Err(_) => None,
        }
    }
}
