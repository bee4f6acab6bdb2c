use reqwest::{Client, RequestBuilder, Response, Url};

use super::*;

/// A worksheet reached through the Google Sheets v4 REST API.
///
/// Requests carry an OAuth bearer token issued elsewhere; this client does not mint or
/// refresh tokens.
///
/// # Examples
///
/// ```no_run
/// use registrar::sheet::{GoogleSheet, Sheet};
///
/// # async fn example() -> registrar::error::Result<()> {
/// let spreadsheet_id = "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms";
/// let sheet = GoogleSheet::new(spreadsheet_id, "Sheet1", "ya29.token")?;
/// let rows = sheet.get_all_values().await?;
/// println!("{} registrations", rows.len().saturating_sub(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GoogleSheet {
  /// HTTP client reused across requests
  client:         Client,
  /// Root of the Sheets API, e.g. `https://sheets.googleapis.com/v4/`
  api_base:       Url,
  /// Spreadsheet id from the document URL
  spreadsheet_id: String,
  /// Title of the worksheet holding the registrations
  worksheet:      String,
  /// OAuth bearer token
  access_token:   String,
}

/// Body of a `values:append` response.
#[derive(Debug, Deserialize)]
struct AppendResponse {
  /// Details of the written range
  #[serde(default)]
  updates: AppendConfirmation,
}

/// Body of a `values.get` response.
#[derive(Debug, Deserialize)]
struct ValueRange {
  /// Rows of formatted cell values; omitted for an empty sheet
  #[serde(default)]
  values: Vec<Vec<String>>,
}

/// Error envelope returned by Google APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
  /// Error details
  error: ErrorBody,
}

/// Error details returned by Google APIs.
#[derive(Debug, Deserialize)]
struct ErrorBody {
  /// Human-readable message
  #[serde(default)]
  message: String,
  /// Canonical status, e.g. `PERMISSION_DENIED`
  #[serde(default)]
  status:  String,
}

impl GoogleSheet {
  /// Root of the public Sheets API.
  pub const DEFAULT_API_BASE: &'static str = "https://sheets.googleapis.com/v4/";

  /// Creates a client for one worksheet of a spreadsheet.
  pub fn new(
    spreadsheet_id: impl Into<String>,
    worksheet: impl Into<String>,
    access_token: impl Into<String>,
  ) -> Result<Self> {
    Ok(Self {
      client:         Client::new(),
      api_base:       parse_api_base(Self::DEFAULT_API_BASE)?,
      spreadsheet_id: spreadsheet_id.into(),
      worksheet:      worksheet.into(),
      access_token:   access_token.into(),
    })
  }

  /// Points the client at a different API root, such as a local emulator.
  pub fn with_api_base(mut self, api_base: &str) -> Result<Self> {
    self.api_base = parse_api_base(api_base)?;
    Ok(self)
  }

  /// URL of the worksheet's `values` resource, with `suffix` appended to the range segment.
  fn values_url(&self, suffix: &str) -> Result<Url> {
    let range = format!("{}{suffix}", self.worksheet);
    let mut url = self.api_base.clone();
    let cannot_hold_path =
      || RegistrarError::Config(format!("API base {} cannot hold a path", self.api_base));
    url
      .path_segments_mut()
      .map_err(|_| cannot_hold_path())?
      .pop_if_empty()
      .extend(["spreadsheets", self.spreadsheet_id.as_str(), "values", range.as_str()]);
    Ok(url)
  }

  /// Sends an authorized request, turning non-success statuses into [`RegistrarError::ApiError`].
  async fn send(&self, request: RequestBuilder) -> Result<Response> {
    let response = request.bearer_auth(&self.access_token).send().await?;
    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }

    let body = response.text().await?;
    let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
      Ok(ErrorEnvelope { error }) => format!("{status} {}: {}", error.status, error.message),
      Err(_) => format!("{status}: {body}"),
    };
    warn!("Sheets API request failed with {message}");
    Err(RegistrarError::ApiError(message))
  }
}

#[async_trait]
impl Sheet for GoogleSheet {
  async fn append_row(&self, cells: &[String]) -> Result<AppendConfirmation> {
    let mut url = self.values_url(":append")?;
    url.query_pairs_mut().append_pair("valueInputOption", "RAW");
    debug!("Appending row to {}", self.describe());

    let body = serde_json::json!({ "values": [cells] });
    let response = self.send(self.client.post(url).json(&body)).await?;
    let AppendResponse { updates } = response.json().await?;
    trace!("Sheets API wrote {}", updates.updated_range);
    Ok(updates)
  }

  async fn get_all_values(&self) -> Result<Vec<Vec<String>>> {
    let url = self.values_url("")?;
    debug!("Reading all rows from {}", self.describe());

    let response = self.send(self.client.get(url)).await?;
    let ValueRange { values } = response.json().await?;
    Ok(fill_gaps(values))
  }

  fn describe(&self) -> String {
    format!("worksheet {:?} of spreadsheet {}", self.worksheet, self.spreadsheet_id)
  }
}

/// Parses an API root, making sure it ends with a slash so paths extend it.
fn parse_api_base(api_base: &str) -> Result<Url> {
  let normalized =
    if api_base.ends_with('/') { api_base.to_string() } else { format!("{api_base}/") };
  Url::parse(&normalized)
    .map_err(|e| RegistrarError::Config(format!("Invalid API base {api_base:?}: {e}")))
}

/// Pads every row to the width of the widest one.
///
/// The Sheets API drops trailing empty cells, so rows come back ragged.
pub fn fill_gaps(mut rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
  let width = rows.iter().map(Vec::len).max().unwrap_or_default();
  for row in &mut rows {
    row.resize(width, String::new());
  }
  rows
}
