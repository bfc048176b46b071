//! Renderer adapter for a viewer running inside a web view.
//!
//! Requests go into the web view as scripts. The page answers with messages
//! carrying a serialized DOM snapshot, page sizes and lifecycle events, which
//! the host feeds back through [`SnapshotRenderer::receive`].

use super::{LoadOptions, PageSize, ReadyState, Renderer, RendererEvents};
use crate::config::PaginatorConfig;
use crate::dom::DomNode;
use crate::error::PaginatorError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

const BOOTSTRAP: &str = include_str!("bootstrap.js");

/// Evaluates JavaScript in the web view hosting the viewer.
pub trait ScriptRunner {
    fn evaluate(&self, script: &str) -> Result<(), PaginatorError>;
}

/// A message posted by the page to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RendererMessage {
    /// Fresh snapshot of the viewport after layout changed
    Layout {
        document: DomNode,
        #[serde(rename = "pageSizes", default)]
        page_sizes: Vec<PageSize>,
    },
    ReadyState { state: ReadyState },
    Navigation,
}

/// Script that creates the viewer and wires its listeners to `window.paginatorHost`.
pub fn bootstrap_script(config: &PaginatorConfig) -> Result<String, PaginatorError> {
    let config = serde_json::to_string(config).map_err(|e| PaginatorError::Script(e.to_string()))?;
    Ok(format!("window.paginatorConfig = {};\n{}", config, BOOTSTRAP))
}

/// [`Renderer`] backed by the latest snapshot the web view published.
pub struct SnapshotRenderer<S> {
    runner: S,
    events: RendererEvents,
    document: Option<DomNode>,
    page_sizes: Vec<PageSize>,
}

impl<S: ScriptRunner> SnapshotRenderer<S> {
    pub fn new(runner: S) -> Self {
        Self {
            runner,
            events: RendererEvents::new(),
            document: None,
            page_sizes: Vec::new(),
        }
    }

    pub fn runner(&self) -> &S {
        &self.runner
    }

    /// Install the viewer in the web view.
    pub fn bootstrap(&self, config: &PaginatorConfig) -> Result<(), PaginatorError> {
        info!(viewport = %config.viewport_element_id, "bootstrapping viewer");
        self.runner.evaluate(&bootstrap_script(config)?)
    }

    /// Apply a message from the page and publish the matching event.
    pub fn receive(&mut self, message: RendererMessage) {
        match message {
            RendererMessage::Layout {
                document,
                page_sizes,
            } => {
                debug!(pages = page_sizes.len(), "layout snapshot received");
                self.document = Some(document);
                self.page_sizes = page_sizes;
            }
            RendererMessage::ReadyState { state } => {
                debug!(?state, "ready state changed");
                self.events.ready_state_changed(state);
            }
            RendererMessage::Navigation => {
                debug!("navigation finished");
                self.events.navigation_finished();
            }
        }
    }

    fn call(&self, function: &str, args: &[serde_json::Value]) -> Result<(), PaginatorError> {
        let args = args
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PaginatorError::Script(e.to_string()))?;
        self.runner
            .evaluate(&format!("window.paginator.{}({});", function, args.join(", ")))
    }
}

impl<S: ScriptRunner> Renderer for SnapshotRenderer<S> {
    fn load_document(&mut self, url: &Url, options: &LoadOptions) -> Result<(), PaginatorError> {
        let options = serde_json::to_value(options).map_err(|e| PaginatorError::Script(e.to_string()))?;
        self.call("loadDocument", &[serde_json::Value::from(url.as_str()), options])
    }

    fn navigate_to_page(&mut self, index: usize) -> Result<(), PaginatorError> {
        self.call("navigateToPage", &[serde_json::Value::from(index)])
    }

    fn page_sizes(&self) -> Vec<PageSize> {
        self.page_sizes.clone()
    }

    fn document(&self) -> Option<&DomNode> {
        self.document.as_ref()
    }

    fn events(&self) -> &RendererEvents {
        &self.events
    }
}
