//! Error types for the registrar library.
//!
//! Failures fall into three groups:
//! - Validation failures caused by the caller ([`RegistrarError::EmptyField`],
//!   [`RegistrarError::AmbiguousLookup`], [`RegistrarError::InvalidRecord`])
//! - A store that accepted a write but returned a confirmation that cannot be read
//!   ([`RegistrarError::UnconfirmedAppend`])
//! - Everything below that: transport, API, filesystem and configuration faults, which are
//!   propagated as-is and never retried
//!
//! # Examples
//!
//! ```
//! use registrar::{error::RegistrarError, validate::validate};
//! use serde_json::json;
//!
//! let submission = json!({ "name": "Ann" });
//! let result = validate(&submission);
//! match result {
//!   Err(RegistrarError::EmptyField(field)) => assert_eq!(field, "surname"),
//!   _ => unreachable!(),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`registrar`](crate) crate.
pub type Result<T> = core::result::Result<T, RegistrarError>;

/// Errors that can occur while registering or looking up papers.
#[derive(Error, Debug)]
pub enum RegistrarError {
  /// A required field is missing or empty.
  ///
  /// The parameter names the first offending field, checked in declared order for the
  /// top-level record and then per co-author.
  #[error("Field {0} is empty")]
  EmptyField(String),

  /// A lookup did not name exactly one key.
  ///
  /// Exactly one of `telegram_id`, `discord_id` or `email` must be non-empty.
  #[error("Only one argument is allowed")]
  AmbiguousLookup,

  /// The submission has the wrong shape.
  ///
  /// This occurs when:
  /// - The body is not a JSON object
  /// - `coauthors` is not a list, or holds something other than objects
  /// - A string field holds a nested object or list
  #[error("Invalid record: {0}")]
  InvalidRecord(String),

  /// The store acknowledged an append but the written range carries no row number.
  ///
  /// The row may or may not exist; the caller cannot treat the registration as stored.
  /// The string parameter is the range the store returned.
  #[error("Store returned an append confirmation without a row number: {0:?}")]
  UnconfirmedAppend(String),

  /// A network request to the store failed.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The store API answered with an error response.
  ///
  /// The string parameter holds the status and message returned by the API.
  #[error("API error: {0}")]
  ApiError(String),

  /// JSON could not be encoded or decoded.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A file system operation failed, typically while reading or writing configuration.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// The configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be serialized.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// The configuration is incomplete or inconsistent.
  #[error("{0}")]
  Config(String),
}

impl RegistrarError {
  /// Whether the error was caused by the caller's input rather than the store.
  pub fn is_validation(&self) -> bool {
    matches!(
      self,
      RegistrarError::EmptyField(_)
        | RegistrarError::AmbiguousLookup
        | RegistrarError::InvalidRecord(_)
    )
  }
}
