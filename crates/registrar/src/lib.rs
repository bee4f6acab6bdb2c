//! Paper registration records kept in a spreadsheet.
//!
//! `registrar` accepts paper registrations (author, co-authors, title, adviser,
//! university), validates them, appends them as rows to a spreadsheet acting as the
//! datastore, and looks stored registrations back up by one identifying key.
//!
//! # Features
//!
//! - **Validation**: required fields are enforced on the untyped submission before any
//!   store call, so a rejected registration never leaves a partial row behind
//! - **Fixed row layout**: a single ordered [`schema::Field`] table drives both encoding and
//!   decoding of rows
//! - **Pluggable store**: anything implementing [`sheet::Sheet`] can back the registry, with a
//!   Google Sheets client and an in-memory sheet provided
//! - **Command pattern**: [`instruction::Submit`] and [`instruction::Lookup`] run against any
//!   store
//!
//! # Getting Started
//!
//! ```no_run
//! use registrar::{instruction::LookupParams, sheet::MemorySheet, Registrar};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registrar = Registrar::new(MemorySheet::new());
//!
//! let node = registrar
//!   .submit(json!({
//!     "name": "Ann",
//!     "surname": "Lee",
//!     "email": "a@x.com",
//!     "university": "MIT",
//!     "title": "T",
//!     "adviser": "Dr. X"
//!   }))
//!   .await?;
//! assert_eq!(node.id, "2");
//!
//! let found = registrar.lookup(LookupParams::email("a@x.com")).await?;
//! assert_eq!(found.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`schema`]: record types and the column table
//! - [`validate`]: required-field checks and projection into [`schema::Node`]
//! - [`codec`]: row encoding and decoding
//! - [`sheet`]: the backing store trait and its implementations
//! - [`instruction`]: submit and lookup operations
//! - [`config`]: configuration file handling
//! - [`error`]: the crate error type

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
  sync::Arc,
};

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod codec;
pub mod config;
pub mod error;
pub mod instruction;
pub mod schema;
pub mod sheet;
pub mod validate;

use crate::{config::*, error::*, instruction::*, schema::*, sheet::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use registrar::{prelude::*, sheet::MemorySheet, Registrar};
///
/// async fn example() -> Result<(), RegistrarError> {
///   let sheet = MemorySheet::new();
///   let nodes = registrar::instruction::Lookup::by_email("a@x.com").execute(&sheet).await?;
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{error::RegistrarError, instruction::SheetInstruction, sheet::Sheet};
}

/// Entry point tying a backing store to the submit and lookup operations.
///
/// The store handle is created once and shared by every request; cloning a
/// [`Registrar`] is cheap and keeps pointing at the same store.
#[derive(Clone)]
pub struct Registrar {
  /// Backing store every operation runs against
  sheet: Arc<dyn Sheet>,
}

impl Registrar {
  /// Wraps a store into a new [`Registrar`].
  pub fn new(sheet: impl Sheet + 'static) -> Self { Self { sheet: Arc::new(sheet) } }

  /// Builds a [`Registrar`] around an already shared store.
  pub fn from_shared(sheet: Arc<dyn Sheet>) -> Self { Self { sheet } }

  /// Opens the store described by `config`.
  pub fn from_config(config: &Config) -> Result<Self> {
    Ok(Self::from_shared(config.store.open()?))
  }

  /// The backing store.
  pub fn sheet(&self) -> &dyn Sheet { self.sheet.as_ref() }

  /// Validates and stores a registration, returning it with its assigned id.
  pub async fn submit(&self, submission: Value) -> Result<Node> {
    Submit::new(submission).execute(self.sheet()).await
  }

  /// Returns every stored registration matching the single key in `params`.
  pub async fn lookup(&self, params: LookupParams) -> Result<Vec<Node>> {
    Lookup::from_params(params)?.execute(self.sheet()).await
  }
}

impl std::fmt::Debug for Registrar {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Registrar").field("sheet", &self.sheet.describe()).finish()
  }
}
