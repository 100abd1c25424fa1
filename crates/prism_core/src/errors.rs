//! Error Types
//!
//! This module defines the error type shared by every Prism crate.
//!
//! # Overview
//!
//! [`PrismError`] covers the fatal failure modes of the render queue:
//! - Setup mistakes (invalid arguments, duplicate registrations)
//! - Enumeration invalidation (a collection changed under a cursor)
//! - Property persistence failures
//!
//! Expected runtime conditions such as dequeuing an object twice are *not*
//! errors; those operations return `bool` or `Option` instead.
//!
//! ```rust,ignore
//! use prism_core::errors::{PrismError, Result};
//!
//! fn setup() -> Result<()> {
//!     let id = RenderBucketId::register_id("Shadow")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::ids::{RenderBucketId, RenderPropertyId};

/// The main error type for the Prism render queue.
#[derive(Error, Debug)]
pub enum PrismError {
    // ========================================================================
    // Setup Errors
    // ========================================================================
    /// An argument handed to a setup call was out of range or invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A bucket name was registered twice.
    #[error("Render bucket name already registered: {0}")]
    DuplicateBucketName(String),

    /// A bucket id was added twice to the same queue.
    #[error("Render bucket already present in queue: {0}")]
    DuplicateBucket(RenderBucketId),

    /// A property of the same type was added twice to one collection.
    #[error("Render property already present in collection: {0}")]
    DuplicateProperty(RenderPropertyId),

    /// Two render stages share a name.
    #[error("Render stage already registered: {0}")]
    DuplicateStage(String),

    // ========================================================================
    // Enumeration Errors
    // ========================================================================
    /// The collection was modified after the cursor was created.
    #[error("Collection was modified; enumeration operation may not execute")]
    CollectionModified,

    // ========================================================================
    // Persistence Errors
    // ========================================================================
    /// Property (de)serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while reading or writing persisted properties.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, PrismError>`.
pub type Result<T> = std::result::Result<T, PrismError>;
