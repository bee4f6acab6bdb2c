use tokio::sync::Mutex;

use super::*;

/// A sheet held in process memory.
///
/// Starts with the registry [`header_row`] unless built with [`MemorySheet::with_rows`].
/// Appends report ranges the way Google Sheets does, so row numbering is identical to a real
/// worksheet.
#[derive(Debug)]
pub struct MemorySheet {
  /// Worksheet title used in reported ranges
  title: String,
  /// Every row, header included
  rows:  Mutex<Vec<Vec<String>>>,
}

impl Default for MemorySheet {
  fn default() -> Self { Self::new() }
}

impl MemorySheet {
  /// Creates a sheet holding only the header row.
  pub fn new() -> Self { Self::with_rows(vec![header_row()]) }

  /// Creates a sheet from raw rows; the first row is treated as the header by readers.
  pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
    Self { title: "Sheet1".into(), rows: Mutex::new(rows) }
  }

  /// Sets the worksheet title used in reported ranges.
  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = title.into();
    self
  }

  /// Number of rows, header included.
  pub async fn len(&self) -> usize { self.rows.lock().await.len() }

  /// Whether the sheet has no rows at all, not even a header.
  pub async fn is_empty(&self) -> bool { self.rows.lock().await.is_empty() }

  /// Title as it appears in an A1 range, quoted when it is not a plain word.
  fn range_title(&self) -> String {
    if self.title.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
      self.title.clone()
    } else {
      format!("'{}'", self.title.replace('\'', "''"))
    }
  }
}

#[async_trait]
impl Sheet for MemorySheet {
  async fn append_row(&self, cells: &[String]) -> Result<AppendConfirmation> {
    let mut rows = self.rows.lock().await;
    rows.push(cells.to_vec());
    let row = rows.len();
    let range =
      format!("{}!A{row}:{}{row}", self.range_title(), column_letters(cells.len().max(1)));
    trace!("Appended row {row} to in-memory sheet");
    Ok(AppendConfirmation::new(range))
  }

  async fn get_all_values(&self) -> Result<Vec<Vec<String>>> { Ok(self.rows.lock().await.clone()) }

  fn describe(&self) -> String { format!("in-memory sheet {:?}", self.title) }
}
