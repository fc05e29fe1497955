//! Error Types
//!
//! This module defines the error types used throughout the stage.
//!
//! # Overview
//!
//! The main error type [`StageError`] covers the few fallible paths:
//! - Model assets whose node/material layout does not match the slot table
//! - Broken frame invariants (reported, then self-corrected in release)
//! - Timeline targets that disappeared before their segment started
//! - Settings files that fail to load or parse
//!
//! Frame-time code never returns these to the host; it degrades the visual
//! and logs instead. Only setup paths (`Stage::attach_model`,
//! `StageSettings::from_path`) hand a [`Result<T>`] back.

use thiserror::Error;

/// The main error type for the stage.
#[derive(Error, Debug)]
pub enum StageError {
    // ========================================================================
    // Asset Boundary
    // ========================================================================
    /// A loaded node does not follow the expected child / material-slot layout.
    ///
    /// The offending node is left with whatever materials it arrived with.
    #[error("Asset shape error at '{node}': {reason}")]
    AssetShape {
        /// Name of the node that failed the check
        node: String,
        /// What was expected
        reason: String,
    },

    // ========================================================================
    // Runtime Invariants
    // ========================================================================
    /// A per-frame invariant was broken (leaked vault entry, double completion).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A timeline segment's target no longer exists.
    #[error("Missing timeline target: {0}")]
    MissingTarget(String),

    // ========================================================================
    // Configuration
    // ========================================================================
    /// A settings value is outside its documented range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, StageError>`.
pub type Result<T> = std::result::Result<T, StageError>;
