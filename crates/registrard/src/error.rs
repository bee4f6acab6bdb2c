//! Error types for the registrard binary.

use thiserror::Error;

use super::*;

/// Error type alias used throughout the binary.
pub type Result<T> = core::result::Result<T, RegistrardError>;

/// Errors that can end a registrard command.
#[derive(Error, Debug)]
pub enum RegistrardError {
  /// A library operation failed.
  #[error(transparent)]
  Registrar(#[from] RegistrarError),

  /// Reading input or serving connections failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A submission file held invalid JSON, or output could not be encoded.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// `init` would overwrite an existing configuration.
  #[error("Configuration already exists at {0}; pass --force to overwrite it")]
  ConfigExists(PathBuf),

  /// The server could not listen on the requested address.
  #[error("Failed to bind {addr}: {source}")]
  Bind {
    /// Requested listen address
    addr:   String,
    /// Underlying socket error
    source: std::io::Error,
  },
}
