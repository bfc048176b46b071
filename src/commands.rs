//! Tauri plugin exposing the paginator to the host application.
//!
//! The viewer runs in the web view labelled `window_label`. Host code calls the
//! bridge commands over IPC; the page pushes layout snapshots and lifecycle
//! events back through `publish`, which are then re-emitted as Tauri events
//! (`readyStateDidChange`, `didFinishNavigation`).

use crate::config::PaginatorConfig;
use crate::error::PaginatorError;
use crate::page::ElementDescriptor;
use crate::paginator::{HostMessage, HostSink, Paginator};
use crate::renderer::{PageSize, RendererMessage, ScriptRunner, SnapshotRenderer};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tauri::plugin::{Builder, TauriPlugin};
use tauri::{AppHandle, Emitter, Manager, Runtime};
use tracing::{debug, warn};

/// Routes the page's messages to the `publish` command.
const HOST_INIT_SCRIPT: &str = r#"window.paginatorHost = (message) =>
    window.__TAURI_INTERNALS__
        .invoke("plugin:paginator|publish", { message: message })
        .catch((error) => console.error("paginator: publish failed", error));"#;

/// Evaluates scripts in the web view hosting the viewer.
pub struct WebviewRunner<R: Runtime> {
    app: AppHandle<R>,
    label: String,
}

impl<R: Runtime> ScriptRunner for WebviewRunner<R> {
    fn evaluate(&self, script: &str) -> Result<(), PaginatorError> {
        let window = self
            .app
            .get_webview_window(&self.label)
            .ok_or_else(|| PaginatorError::Script(format!("No web view labelled '{}'", self.label)))?;
        window.eval(script).map_err(|e| PaginatorError::Script(e.to_string()))
    }
}

/// Emits host messages as Tauri events.
struct EventSink<R: Runtime>(AppHandle<R>);

impl<R: Runtime> HostSink for EventSink<R> {
    fn post_message(&self, message: HostMessage) -> Result<(), PaginatorError> {
        self.0.emit(&message.name, message.object).map_err(|e| {
            warn!(name = %message.name, "failed to emit host event: {}", e);
            PaginatorError::Emit(e.to_string())
        })
    }
}

/// Managed state holding the paginator for the app's viewer.
pub struct PaginatorState<R: Runtime>(pub Mutex<Paginator<SnapshotRenderer<WebviewRunner<R>>>>);

impl<R: Runtime> PaginatorState<R> {
    fn lock(&self) -> MutexGuard<'_, Paginator<SnapshotRenderer<WebviewRunner<R>>>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Create the plugin. Register it with `tauri::Builder::plugin`.
pub fn init<R: Runtime>(config: PaginatorConfig) -> TauriPlugin<R> {
    Builder::new("paginator")
        .js_init_script(HOST_INIT_SCRIPT.to_string())
        .invoke_handler(tauri::generate_handler![
            bootstrap,
            load_document,
            show_page,
            elements_of_current_page,
            get_page_sizes,
            publish,
        ])
        .setup(move |app, _api| {
            let runner = WebviewRunner {
                app: app.clone(),
                label: config.window_label.clone(),
            };
            let paginator = Paginator::new(SnapshotRenderer::new(runner), config, EventSink(app.clone()));
            app.manage(PaginatorState(Mutex::new(paginator)));
            debug!("paginator plugin ready");
            Ok(())
        })
        .build()
}

/// Create the viewer in the web view. Called by the page once the viewer
/// library is available.
#[tauri::command]
fn bootstrap<R: Runtime>(app: AppHandle<R>) -> Result<(), PaginatorError> {
    let state = app.state::<PaginatorState<R>>();
    let paginator = state.lock();
    paginator.renderer().bootstrap(paginator.config())
}

/// Begin loading a document.
///
/// # Arguments
/// * `url` - Document URL or filesystem path
/// * `zoom` - Zoom factor (1.0 = 100%)
#[tauri::command]
fn load_document<R: Runtime>(app: AppHandle<R>, url: String, zoom: f64) -> Result<(), PaginatorError> {
    let state = app.state::<PaginatorState<R>>();
    let mut paginator = state.lock();
    paginator.load_document(&url, zoom)
}

/// Navigate to a page (0-based).
#[tauri::command]
fn show_page<R: Runtime>(app: AppHandle<R>, index: usize) -> Result<(), PaginatorError> {
    let state = app.state::<PaginatorState<R>>();
    let mut paginator = state.lock();
    paginator.show_page(index)
}

/// Describe the addressable elements of the current page.
#[tauri::command]
fn elements_of_current_page<R: Runtime>(app: AppHandle<R>) -> Vec<ElementDescriptor> {
    let state = app.state::<PaginatorState<R>>();
    let paginator = state.lock();
    paginator.elements_of_current_page()
}

/// Sizes of all laid-out pages.
#[tauri::command]
fn get_page_sizes<R: Runtime>(app: AppHandle<R>) -> Vec<PageSize> {
    let state = app.state::<PaginatorState<R>>();
    let paginator = state.lock();
    paginator.get_page_sizes()
}

/// Messages posted by the page: layout snapshots and lifecycle events.
#[tauri::command]
fn publish<R: Runtime>(app: AppHandle<R>, message: RendererMessage) -> Result<(), PaginatorError> {
    let state = app.state::<PaginatorState<R>>();
    let mut paginator = state.lock();
    paginator.renderer_mut().receive(message);
    paginator.dispatch_events().map(|_| ())
}
