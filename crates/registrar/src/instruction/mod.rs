//! Operations executed against a backing [`Sheet`].
//!
//! Each operation is a small command object implementing [`SheetInstruction`], so the same
//! operation runs unchanged against a Google worksheet or an in-memory sheet.
//!
//! ```no_run
//! use registrar::{
//!   instruction::{Lookup, SheetInstruction, Submit},
//!   sheet::MemorySheet,
//! };
//! use serde_json::json;
//!
//! # async fn example() -> registrar::error::Result<()> {
//! let sheet = MemorySheet::new();
//! let stored = Submit::new(json!({ "name": "Ann" })).execute(&sheet).await;
//! assert!(stored.is_err());
//!
//! let found = Lookup::by_email("a@x.com").execute(&sheet).await?;
//! assert!(found.is_empty());
//! # Ok(())
//! # }
//! ```

use super::*;

mod lookup;
mod submit;

pub use lookup::*;
pub use submit::*;

/// An operation that runs against a backing store.
#[async_trait]
pub trait SheetInstruction {
  /// What the operation produces.
  type Output;

  /// Runs the operation, making at most one call to `sheet`.
  async fn execute<S: Sheet + ?Sized>(&self, sheet: &S) -> Result<Self::Output>;
}
