//! Viewer configuration.

use crate::error::PaginatorError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the viewer arranges pages in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageViewMode {
    #[default]
    SinglePage,
    Spread,
    AutoSpread,
}

/// Settings for the viewer inside the web view and for the bridge around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatorConfig {
    #[serde(default)]
    pub page_view_mode: PageViewMode,

    /// Re-run layout when the window is resized
    #[serde(default)]
    pub auto_resize: bool,

    /// Viewer debug mode
    #[serde(default)]
    pub debug: bool,

    /// Run the math baseline fixup after every navigation
    #[serde(default = "default_true")]
    pub fix_math_baselines: bool,

    /// Keep the math typesetter from re-rendering behind the paginator's back
    #[serde(default = "default_true")]
    pub disable_automatic_math_updates: bool,

    /// Element the viewer paginates into
    #[serde(default = "default_viewport_element_id")]
    pub viewport_element_id: String,

    /// Label of the web view window hosting the viewer
    #[serde(default = "default_window_label")]
    pub window_label: String,
}

fn default_true() -> bool { true }
fn default_viewport_element_id() -> String { "pagination-viewport".to_string() }
fn default_window_label() -> String { "main".to_string() }

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            page_view_mode: PageViewMode::default(),
            auto_resize: false,
            debug: false,
            fix_math_baselines: default_true(),
            disable_automatic_math_updates: default_true(),
            viewport_element_id: default_viewport_element_id(),
            window_label: default_window_label(),
        }
    }
}

impl PaginatorConfig {
    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, PaginatorError> {
        serde_json::from_str(json).map_err(|e| PaginatorError::Config(e.to_string()))
    }

    /// Load a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PaginatorError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PaginatorError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = PaginatorConfig::from_json("{}").unwrap();
        assert_eq!(config, PaginatorConfig::default());
        assert_eq!(config.page_view_mode, PageViewMode::SinglePage);
        assert!(!config.auto_resize);
        assert!(config.fix_math_baselines);
        assert_eq!(config.viewport_element_id, "pagination-viewport");
    }

    #[test]
    fn overrides_are_camel_case() {
        let config = PaginatorConfig::from_json(
            r#"{ "pageViewMode": "autoSpread", "fixMathBaselines": false, "windowLabel": "reader" }"#,
        )
        .unwrap();
        assert_eq!(config.page_view_mode, PageViewMode::AutoSpread);
        assert!(!config.fix_math_baselines);
        assert_eq!(config.window_label, "reader");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = PaginatorConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, PaginatorError::Config(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = PaginatorConfig::from_file("/nonexistent/paginator.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/paginator.json"));
    }
}
