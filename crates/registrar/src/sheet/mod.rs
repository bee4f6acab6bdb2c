//! Backing stores for registration rows.
//!
//! The registry treats a spreadsheet as its only persistence. A store is anything
//! implementing [`Sheet`]: it appends a row and reports where the row landed, and it returns
//! every row with the header first. Two stores ship with the crate:
//!
//! - [`GoogleSheet`]: a worksheet reached through the Google Sheets v4 REST API
//! - [`MemorySheet`]: an in-process sheet, used for tests and local runs
//!
//! # Examples
//!
//! ```
//! use registrar::sheet::{MemorySheet, Sheet};
//!
//! # async fn example() -> registrar::error::Result<()> {
//! let sheet = MemorySheet::new();
//! let confirmation = sheet.append_row(&["@ann".to_string()]).await?;
//! assert_eq!(confirmation.row_index(), Some("2"));
//! # Ok(())
//! # }
//! ```

use super::*;

mod google;
mod memory;

pub use google::*;
pub use memory::*;

lazy_static! {
  /// The row number at the end of an A1 range such as `Sheet1!A5:L5`.
  static ref TRAILING_DIGITS: Regex = Regex::new(r"\d+$").unwrap();
}

/// A row-oriented store the registry appends to and scans.
///
/// Implementations are shared across concurrent requests and must not rely on callers to
/// serialize access. No operation is retried by the registry.
#[async_trait]
pub trait Sheet: Send + Sync {
  /// Appends `cells` as a new row after the last used row.
  ///
  /// # Returns
  ///
  /// The confirmation naming the range that was written.
  async fn append_row(&self, cells: &[String]) -> Result<AppendConfirmation>;

  /// Returns every row of the sheet, header first.
  async fn get_all_values(&self) -> Result<Vec<Vec<String>>>;

  /// Short human-readable description of where this sheet lives.
  fn describe(&self) -> String;
}

/// The store's acknowledgement of an appended row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendConfirmation {
  /// A1 range of the written cells, e.g. `Sheet1!A5:L5`
  #[serde(default)]
  pub updated_range: String,
}

impl AppendConfirmation {
  /// Creates a confirmation for the given range.
  pub fn new(updated_range: impl Into<String>) -> Self {
    Self { updated_range: updated_range.into() }
  }

  /// The row number the range ends on, as written by the store.
  ///
  /// `None` when the range does not end in digits.
  pub fn row_index(&self) -> Option<&str> {
    TRAILING_DIGITS.find(&self.updated_range).map(|found| found.as_str())
  }
}

/// The header row a fresh registry sheet starts with.
pub fn header_row() -> Vec<String> {
  Field::columns().iter().map(|field| field.as_str().to_string()).collect()
}

/// Spreadsheet column letters for a one-based column number (`1` is `A`, `27` is `AA`).
pub fn column_letters(mut column: usize) -> String {
  let mut letters = Vec::new();
  while column > 0 {
    let remainder = (column - 1) % 26;
    letters.push(char::from(b'A' + remainder as u8));
    column = (column - 1) / 26;
  }
  letters.iter().rev().collect()
}
