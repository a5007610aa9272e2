//! Core error types for catalog loading and chart rendering
//!
//! Drawing anomalies (orphan relations, empty categories, unmeasurable
//! containers) are never errors; they are skipped during a redraw. The
//! variants here cover the places where the caller handed us something we
//! cannot work with at all.

use thiserror::Error;

/// Core error types for the scent wheel pipeline
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Duplicate item id: {id}")]
    DuplicateItem { id: String },

    #[error("Unknown category: {symbol}")]
    UnknownCategory { symbol: String },

    #[error("Layout error: {message}")]
    LayoutError { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },
}

impl DiagramError {
    /// Create a new catalog error
    pub fn catalog_error(message: impl Into<String>) -> Self {
        Self::CatalogError {
            message: message.into(),
        }
    }

    /// Create a new duplicate item error
    pub fn duplicate_item(id: impl Into<String>) -> Self {
        Self::DuplicateItem { id: id.into() }
    }

    /// Create a new unknown category error
    pub fn unknown_category(symbol: impl Into<String>) -> Self {
        Self::UnknownCategory {
            symbol: symbol.into(),
        }
    }

    /// Create a new layout error
    pub fn layout_error(message: impl Into<String>) -> Self {
        Self::LayoutError {
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render_error(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }
}
