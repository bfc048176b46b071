//! Errors for the fallible glue around the renderer.
//!
//! Page introspection itself never fails; only URL handling, script evaluation,
//! configuration loading and host notification can.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while driving the renderer or talking to the host.
#[derive(Error, Debug)]
pub enum PaginatorError {
    #[error("Invalid document URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid zoom factor: {0}")]
    InvalidZoom(f64),

    #[error("Script evaluation failed: {0}")]
    Script(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to notify host: {0}")]
    Emit(String),
}

impl Serialize for PaginatorError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_display_string() {
        let err = PaginatorError::InvalidZoom(-1.0);
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Invalid zoom factor: -1\"");
    }
}
