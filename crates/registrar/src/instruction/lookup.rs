use super::*;

/// The optional keys a caller may look registrations up by.
///
/// Exactly one of them must be non-empty for [`Lookup::from_params`] to accept it. This is
/// the shape of the `GET /` query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupParams {
  /// Telegram handle to match
  #[serde(default)]
  pub telegram_id: Option<String>,
  /// Discord handle to match
  #[serde(default)]
  pub discord_id:  Option<String>,
  /// Email to match
  #[serde(default)]
  pub email:       Option<String>,
}

impl LookupParams {
  /// Parameters naming only a Telegram handle.
  pub fn telegram_id(value: impl Into<String>) -> Self {
    Self { telegram_id: Some(value.into()), ..Self::default() }
  }

  /// Parameters naming only a Discord handle.
  pub fn discord_id(value: impl Into<String>) -> Self {
    Self { discord_id: Some(value.into()), ..Self::default() }
  }

  /// Parameters naming only an email.
  pub fn email(value: impl Into<String>) -> Self {
    Self { email: Some(value.into()), ..Self::default() }
  }
}

/// Column a lookup matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKey {
  /// Match the Telegram handle column
  TelegramId,
  /// Match the Discord handle column
  DiscordId,
  /// Match the email column
  Email,
}

impl LookupKey {
  /// The record field this key matches.
  pub fn field(&self) -> Field {
    match self {
      LookupKey::TelegramId => Field::TelegramId,
      LookupKey::DiscordId => Field::DiscordId,
      LookupKey::Email => Field::Email,
    }
  }

  /// Zero-based sheet column this key matches.
  pub fn column(&self) -> usize { self.field().column().unwrap_or_default() }
}

/// Finds every stored registration whose key column equals a value exactly.
///
/// Rows are scanned in sheet order after the header. Row ids count every data row, starting
/// from `"2"`, whether or not the row matches. Comparison is plain string equality with no
/// trimming or case folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
  /// Column to match
  key:   LookupKey,
  /// Value the column must equal
  value: String,
}

impl Lookup {
  /// Creates a lookup for `value` in the column of `key`.
  ///
  /// No check is made that `value` is non-empty; an empty value matches rows whose key cell
  /// is empty. Use [`Lookup::from_params`] for caller input.
  pub fn new(key: LookupKey, value: impl Into<String>) -> Self { Self { key, value: value.into() } }

  /// Looks up by Telegram handle.
  pub fn by_telegram_id(value: impl Into<String>) -> Self {
    Self::new(LookupKey::TelegramId, value)
  }

  /// Looks up by Discord handle.
  pub fn by_discord_id(value: impl Into<String>) -> Self { Self::new(LookupKey::DiscordId, value) }

  /// Looks up by email.
  pub fn by_email(value: impl Into<String>) -> Self { Self::new(LookupKey::Email, value) }

  /// Builds a lookup from caller parameters.
  ///
  /// # Errors
  ///
  /// [`RegistrarError::AmbiguousLookup`] unless exactly one parameter is non-empty.
  pub fn from_params(params: LookupParams) -> Result<Self> {
    let supplied = [
      (LookupKey::TelegramId, params.telegram_id),
      (LookupKey::DiscordId, params.discord_id),
      (LookupKey::Email, params.email),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| Self::new(key, v)))
    .collect::<Vec<_>>();

    match <[Lookup; 1]>::try_from(supplied) {
      Ok([lookup]) => Ok(lookup),
      Err(supplied) => {
        debug!("Rejecting lookup with {} keys", supplied.len());
        Err(RegistrarError::AmbiguousLookup)
      },
    }
  }

  /// The column being matched.
  pub fn key(&self) -> LookupKey { self.key }

  /// The value being matched.
  pub fn value(&self) -> &str { &self.value }
}

#[async_trait]
impl SheetInstruction for Lookup {
  type Output = Vec<Node>;

  async fn execute<S: Sheet + ?Sized>(&self, sheet: &S) -> Result<Self::Output> {
    let rows = sheet.get_all_values().await?;
    let column = self.key.column();
    debug!(
      "Scanning {} rows of {} for {} = {:?}",
      rows.len().saturating_sub(1),
      sheet.describe(),
      self.key.field(),
      self.value
    );

    let nodes = rows
      .iter()
      .enumerate()
      // The header is row 1, so data rows start at id 2.
      .skip(1)
      .filter(|(_, row)| row.get(column).map(String::as_str).unwrap_or_default() == self.value)
      .map(|(index, row)| {
        trace!("Row {} matches", index + 1);
        codec::decode((index + 1).to_string(), row)
      })
      .collect();

    Ok(nodes)
  }
}
