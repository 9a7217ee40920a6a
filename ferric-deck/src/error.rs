//! Error types for ferric-deck
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation. Backend failures are caught at the engine's call sites and
//! logged rather than propagated: transport commands never fail outward.

use thiserror::Error;

/// Main error type for ferric-deck
#[derive(Error, Debug)]
pub enum Error {
    /// Audio backend rejected an acquire/transport call
    #[error("audio backend error: {0}")]
    Backend(String),

    /// No audio resource is currently held
    #[error("audio resource not loaded")]
    NotLoaded,
}

/// Convenience Result type using ferric-deck Error
pub type Result<T> = std::result::Result<T, Error>;
