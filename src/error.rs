//! Error types for envmatch operations.
//!
//! This module defines [`EnvMatchError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Malformed descriptors are rejected where they are built (`InvalidRange`,
//!   `InvalidRepeat`, ...), never discovered lazily during matching
//! - A requirement that a capability cannot satisfy is a normal outcome and
//!   travels as [`Incompatible`], carrying the full verdict trail
//! - Use `anyhow::Error` (via `EnvMatchError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::verdict::Incompatible;

/// Core error type for envmatch operations.
#[derive(Debug, Error)]
pub enum EnvMatchError {
    /// A range whose bounds do not describe any value.
    #[error("Invalid range: {message}")]
    InvalidRange { message: String },

    /// A machine descriptor standing for zero machines.
    #[error("Invalid repeat count {repeat}: a machine entry must stand for at least one machine")]
    InvalidRepeat { repeat: u32 },

    /// A discrete set declared as both allow-list and deny-list.
    #[error("Invalid set: {message}")]
    InvalidSet { message: String },

    /// A count space with no ranges at all.
    #[error("Count space must contain at least one range")]
    EmptyCountSpace,

    /// The requirement cannot be satisfied by the capability.
    #[error(transparent)]
    Incompatible(#[from] Incompatible),

    /// Catalog file not found at expected location.
    #[error("Catalog not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse catalog file.
    #[error("Failed to parse catalog at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid catalog structure or values.
    #[error("Invalid catalog: {message}")]
    ConfigValidationError { message: String },

    /// Referenced test case is not declared in the catalog.
    #[error("Unknown case: {name}")]
    UnknownCase { name: String },

    /// Referenced platform is not declared in the catalog.
    #[error("Unknown platform: {name}")]
    UnknownPlatform { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for envmatch operations.
pub type Result<T> = std::result::Result<T, EnvMatchError>;
