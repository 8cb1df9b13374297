//! Error types for Atelier operations.
//!
//! This module provides the main error type [`AtelierError`] which wraps the
//! error conditions that can occur around a layout pass. The planners and
//! router themselves are infallible pure functions; errors arise at the
//! edges: configuration, persisted state, and export.

use std::io;

use thiserror::Error;

/// The main error type for Atelier operations.
#[derive(Debug, Error)]
pub enum AtelierError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}
