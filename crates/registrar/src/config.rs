//! Configuration for a registrar deployment.
//!
//! Configuration lives in a TOML file, by default at
//! `<platform config dir>/registrar/config.toml`:
//!
//! ```toml
//! bind = "127.0.0.1:8000"
//!
//! [store]
//! backend = "google"
//! spreadsheet_id = "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms"
//! worksheet = "Sheet1"
//! # Either inline, or read from the variable named by `access_token_env`.
//! # access_token = "ya29...."
//! access_token_env = "REGISTRAR_ACCESS_TOKEN"
//! ```
//!
//! With `backend = "memory"` registrations are kept in process and lost on exit.

use super::*;

/// Environment variable read for the Sheets access token when none is configured inline.
pub const DEFAULT_ACCESS_TOKEN_ENV: &str = "REGISTRAR_ACCESS_TOKEN";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  /// Address the HTTP server listens on
  #[serde(default = "default_bind")]
  pub bind:  String,
  /// Backing store selection
  #[serde(default)]
  pub store: StoreConfig,
}

/// Which backing store to open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
  /// A Google Sheets worksheet
  Google(GoogleSheetConfig),
  /// An in-process sheet
  #[default]
  Memory,
}

/// Location and credentials of a Google Sheets worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleSheetConfig {
  /// Spreadsheet id from the document URL
  pub spreadsheet_id:   String,
  /// Worksheet title
  #[serde(default = "default_worksheet")]
  pub worksheet:        String,
  /// Root of the Sheets API
  #[serde(default = "default_api_base")]
  pub api_base:         String,
  /// Inline bearer token; takes precedence over `access_token_env`
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub access_token:     Option<String>,
  /// Environment variable holding the bearer token
  #[serde(default = "default_access_token_env")]
  pub access_token_env: String,
}

/// Default listen address.
fn default_bind() -> String { "127.0.0.1:8000".into() }

/// Default worksheet title.
fn default_worksheet() -> String { "Sheet1".into() }

/// Default Sheets API root.
fn default_api_base() -> String { GoogleSheet::DEFAULT_API_BASE.into() }

/// Default token variable.
fn default_access_token_env() -> String { DEFAULT_ACCESS_TOKEN_ENV.into() }

impl Default for Config {
  fn default() -> Self { Self { bind: default_bind(), store: StoreConfig::default() } }
}

impl Config {
  /// Returns the default path of the configuration file.
  ///
  /// - On Linux: `~/.config/registrar/config.toml`
  /// - On macOS: `~/Library/Application Support/registrar/config.toml`
  /// - On Windows: `%APPDATA%\registrar\config.toml`
  /// - Fallback: `./registrar/config.toml`
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("registrar").join("config.toml")
  }

  /// Reads a configuration file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
  }

  /// Writes this configuration, creating parent directories as needed.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    debug!("Saved configuration to {}", path.display());
    Ok(())
  }

  /// Sets the listen address.
  pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
    self.bind = bind.into();
    self
  }

  /// Sets the backing store.
  pub fn with_store(mut self, store: StoreConfig) -> Self {
    self.store = store;
    self
  }
}

impl GoogleSheetConfig {
  /// Configuration for `worksheet` of `spreadsheet_id` with default API root and token variable.
  pub fn new(spreadsheet_id: impl Into<String>, worksheet: impl Into<String>) -> Self {
    Self {
      spreadsheet_id:   spreadsheet_id.into(),
      worksheet:        worksheet.into(),
      api_base:         default_api_base(),
      access_token:     None,
      access_token_env: default_access_token_env(),
    }
  }

  /// Resolves the bearer token, preferring the inline value.
  pub fn access_token(&self) -> Result<String> {
    if let Some(token) = self.access_token.as_ref().filter(|token| !token.is_empty()) {
      return Ok(token.clone());
    }
    std::env::var(&self.access_token_env).map_err(|_| {
      RegistrarError::Config(format!(
        "No Sheets access token configured; set `access_token` or the {} environment variable",
        self.access_token_env
      ))
    })
  }
}

impl StoreConfig {
  /// Opens the configured store.
  pub fn open(&self) -> Result<Arc<dyn Sheet>> {
    match self {
      StoreConfig::Google(google) => {
        if google.spreadsheet_id.is_empty() {
          return Err(RegistrarError::Config("`spreadsheet_id` must not be empty".into()));
        }
        let sheet =
          GoogleSheet::new(&google.spreadsheet_id, &google.worksheet, google.access_token()?)?
            .with_api_base(&google.api_base)?;
        debug!("Opened {}", sheet.describe());
        Ok(Arc::new(sheet))
      },
      StoreConfig::Memory => {
        warn!("Using an in-memory sheet; registrations are lost when the process exits");
        Ok(Arc::new(MemorySheet::new()))
      },
    }
  }
}
