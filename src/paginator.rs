//! The bridge surface the host application talks to.
//!
//! `Paginator` owns the renderer, keeps track of the current page (the viewer can
//! navigate but cannot say where it is) and forwards renderer notifications to the
//! host as named messages.

use crate::config::PaginatorConfig;
use crate::error::PaginatorError;
use crate::page::{self, ElementDescriptor};
use crate::renderer::{LoadOptions, PageSize, Renderer, RendererEvent, RendererSubscription};
use serde::Serialize;
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

/// Host message sent when the renderer's ready state changes.
pub const READY_STATE_DID_CHANGE: &str = "readyStateDidChange";

/// Host message sent when a navigation has been laid out.
pub const DID_FINISH_NAVIGATION: &str = "didFinishNavigation";

/// A named notification for the host, with an optional payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostMessage {
    pub name: String,
    pub object: Option<serde_json::Value>,
}

impl HostMessage {
    pub fn new(name: &str, object: Option<serde_json::Value>) -> Self {
        Self {
            name: name.to_string(),
            object,
        }
    }
}

/// Where host messages go.
pub trait HostSink {
    fn post_message(&self, message: HostMessage) -> Result<(), PaginatorError>;
}

/// Host sink backed by a channel, for hosts that consume messages on their own loop.
#[derive(Debug, Clone)]
pub struct ChannelSink(pub mpsc::UnboundedSender<HostMessage>);

impl ChannelSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<HostMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self(tx), rx)
    }
}

impl HostSink for ChannelSink {
    fn post_message(&self, message: HostMessage) -> Result<(), PaginatorError> {
        self.0
            .send(message)
            .map_err(|e| PaginatorError::Emit(format!("host channel closed: {}", e.0.name)))
    }
}

/// Bridge between a host application and a [`Renderer`].
pub struct Paginator<R> {
    renderer: R,
    config: PaginatorConfig,
    sink: Box<dyn HostSink + Send>,
    subscription: RendererSubscription,
    /// Written only by `show_page`.
    current_page_index: usize,
}

impl<R: Renderer> Paginator<R> {
    pub fn new(renderer: R, config: PaginatorConfig, sink: impl HostSink + Send + 'static) -> Self {
        let subscription = renderer.events().subscribe();
        Self {
            renderer,
            config,
            sink: Box::new(sink),
            subscription,
            current_page_index: 0,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    /// Start loading and paginating a document. Completion is reported later
    /// through the ready state notification.
    ///
    /// `url` may be an absolute URL or a filesystem path.
    pub fn load_document(&mut self, url: &str, zoom: f64) -> Result<(), PaginatorError> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(PaginatorError::InvalidZoom(zoom));
        }
        let url = document_url(url)?;
        let options = LoadOptions {
            page_view_mode: self.config.page_view_mode,
            zoom,
            auto_resize: self.config.auto_resize,
        };
        info!(%url, zoom, "loading document");
        self.renderer.load_document(&url, &options)
    }

    /// Navigate to the page at `index` and remember it as current.
    pub fn show_page(&mut self, index: usize) -> Result<(), PaginatorError> {
        debug!(index, "showing page");
        self.renderer.navigate_to_page(index)?;
        self.current_page_index = index;
        Ok(())
    }

    /// The page extraction works on. Prefers the renderer's own answer.
    pub fn current_page_index(&self) -> usize {
        self.renderer
            .current_page_index()
            .unwrap_or(self.current_page_index)
    }

    /// Describe every addressable element on the current page.
    pub fn elements_of_current_page(&self) -> Vec<ElementDescriptor> {
        match self.renderer.document() {
            Some(document) => page::elements_of_page(document, self.current_page_index()),
            None => Vec::new(),
        }
    }

    pub fn get_page_sizes(&self) -> Vec<PageSize> {
        self.renderer.page_sizes()
    }

    /// Forward every pending renderer event to the host. Returns how many
    /// messages were posted.
    ///
    /// The queue is always drained. A message the host refused is dropped and the
    /// first such failure is returned once the remaining events were offered.
    pub fn dispatch_events(&mut self) -> Result<usize, PaginatorError> {
        let mut posted = 0;
        let mut first_error = None;
        while let Some(event) = self.subscription.try_next() {
            let result = host_message(event).and_then(|message| {
                debug!(name = %message.name, "notifying host");
                self.sink.post_message(message)
            });
            match result {
                Ok(()) => posted += 1,
                Err(e) => {
                    warn!("host notification dropped: {}", e);
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(posted),
        }
    }
}

fn host_message(event: RendererEvent) -> Result<HostMessage, PaginatorError> {
    Ok(match event {
        RendererEvent::ReadyStateChanged(state) => HostMessage::new(
            READY_STATE_DID_CHANGE,
            Some(serde_json::to_value(state).map_err(|e| PaginatorError::Emit(e.to_string()))?),
        ),
        RendererEvent::NavigationFinished => HostMessage::new(DID_FINISH_NAVIGATION, None),
    })
}

/// Resolve a document location to a URL. Absolute paths and paths relative to the
/// working directory become `file://` URLs.
pub fn document_url(location: &str) -> Result<Url, PaginatorError> {
    let path = Path::new(location);
    if path.is_absolute() {
        return Url::from_file_path(path).map_err(|_| PaginatorError::InvalidUrl(location.to_string()));
    }
    match Url::parse(location) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) if !location.is_empty() => {
            let cwd = std::env::current_dir().map_err(|e| PaginatorError::InvalidUrl(e.to_string()))?;
            Url::from_file_path(cwd.join(path)).map_err(|_| PaginatorError::InvalidUrl(location.to_string()))
        }
        Err(e) => Err(PaginatorError::InvalidUrl(format!("{}: {}", location, e))),
    }
}
