//! Registration record types and the column layout of the backing sheet.
//!
//! A stored registration is one sheet row. The position of every field within that row is
//! fixed by [`Field`], which is the single table both directions of the [`codec`](crate::codec)
//! read from.
//!
//! # Examples
//!
//! ```
//! use registrar::schema::Field;
//!
//! assert_eq!(Field::Email.column(), Some(2));
//! assert_eq!(Field::Id.column(), None);
//! assert_eq!(Field::Coauthors.to_string(), "coauthors");
//! ```

use super::*;

/// Number of cells a registration occupies in a sheet row.
pub const ROW_WIDTH: usize = 12;

/// Fields required on every top-level registration, in the order they are checked.
pub const REQUIRED_FIELDS: [Field; 6] =
  [Field::Name, Field::Surname, Field::Email, Field::University, Field::Title, Field::Adviser];

/// Fields required on every co-author, in the order they are checked.
pub const REQUIRED_COAUTHOR_FIELDS: [&str; 2] = ["name", "surname"];

/// A named field of a registration.
///
/// The declaration order is the order of fields in a decoded row: the row id first, then
/// the sheet columns left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
  /// Row number assigned by the store; not stored in a cell
  Id,
  /// Telegram handle
  TelegramId,
  /// Discord handle
  DiscordId,
  /// Contact email
  Email,
  /// Contact phone number
  Phone,
  /// Author's given name
  Name,
  /// Author's family name
  Surname,
  /// Author's patronymic
  Patronymic,
  /// Author's university
  University,
  /// Author's study group
  StudentGroup,
  /// Paper title
  Title,
  /// Scientific adviser
  Adviser,
  /// Co-authors, stored as one joined display string
  Coauthors,
}

impl Field {
  /// Every field in decoded-row order.
  pub const ALL: [Field; ROW_WIDTH + 1] = [
    Field::Id,
    Field::TelegramId,
    Field::DiscordId,
    Field::Email,
    Field::Phone,
    Field::Name,
    Field::Surname,
    Field::Patronymic,
    Field::University,
    Field::StudentGroup,
    Field::Title,
    Field::Adviser,
    Field::Coauthors,
  ];

  /// The fields stored in sheet cells, in column order.
  pub fn columns() -> &'static [Field] { &Self::ALL[1..] }

  /// The key this field uses in JSON records.
  pub fn as_str(&self) -> &'static str {
    match self {
      Field::Id => "id",
      Field::TelegramId => "telegram_id",
      Field::DiscordId => "discord_id",
      Field::Email => "email",
      Field::Phone => "phone",
      Field::Name => "name",
      Field::Surname => "surname",
      Field::Patronymic => "patronymic",
      Field::University => "university",
      Field::StudentGroup => "student_group",
      Field::Title => "title",
      Field::Adviser => "adviser",
      Field::Coauthors => "coauthors",
    }
  }

  /// Zero-based sheet column holding this field, or `None` for the row id.
  pub fn column(&self) -> Option<usize> {
    Self::columns().iter().position(|field| field == self)
  }
}

impl Display for Field {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// A secondary author attached to a registration.
///
/// Serialization leaves out empty fields, so a co-author decoded from a malformed cell never
/// reports an empty `surname`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coauthor {
  /// Given name
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub name:       String,
  /// Family name
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub surname:    String,
  /// Optional patronymic
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub patronymic: Option<String>,
}

impl Coauthor {
  /// Creates a co-author without a patronymic.
  pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
    Self { name: name.into(), surname: surname.into(), patronymic: None }
  }

  /// Sets the patronymic.
  pub fn with_patronymic(mut self, patronymic: impl Into<String>) -> Self {
    self.patronymic = Some(patronymic.into());
    self
  }

  /// Drops an empty patronymic. Applying it twice changes nothing.
  pub fn stripped(mut self) -> Self {
    self.patronymic = self.patronymic.filter(|p| !p.is_empty());
    self
  }
}

/// One paper registration: the unit of storage and lookup.
///
/// Optional fields are `None` when absent, and the serialized form never carries empty
/// strings, empty lists or `null`s once the record has been [`stripped`](Node::stripped).
/// `id` is serialized first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
  /// Row number assigned by the store
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub id:            String,
  /// Telegram handle
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub telegram_id:   Option<String>,
  /// Discord handle
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub discord_id:    Option<String>,
  /// Contact email, required
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub email:         String,
  /// Contact phone number
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:         Option<String>,
  /// Given name, required
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub name:          String,
  /// Family name, required
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub surname:       String,
  /// Author's patronymic
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub patronymic:    Option<String>,
  /// University, required
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub university:    String,
  /// Study group
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub student_group: Option<String>,
  /// Paper title, required
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub title:         String,
  /// Scientific adviser, required
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub adviser:       String,
  /// Co-authors in submission order
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub coauthors:     Vec<Coauthor>,
}

impl Node {
  /// Borrows the text value of a single-valued field.
  ///
  /// Returns `None` for an absent optional field and for [`Field::Coauthors`], which is not a
  /// single string.
  pub fn get(&self, field: Field) -> Option<&str> {
    match field {
      Field::Id => Some(&self.id),
      Field::TelegramId => self.telegram_id.as_deref(),
      Field::DiscordId => self.discord_id.as_deref(),
      Field::Email => Some(&self.email),
      Field::Phone => self.phone.as_deref(),
      Field::Name => Some(&self.name),
      Field::Surname => Some(&self.surname),
      Field::Patronymic => self.patronymic.as_deref(),
      Field::University => Some(&self.university),
      Field::StudentGroup => self.student_group.as_deref(),
      Field::Title => Some(&self.title),
      Field::Adviser => Some(&self.adviser),
      Field::Coauthors => None,
    }
  }

  /// Sets a single-valued field. An empty value clears an optional field.
  ///
  /// [`Field::Coauthors`] is ignored; use [`Node::coauthors`] directly.
  pub fn set(&mut self, field: Field, value: String) {
    let optional = if value.is_empty() { None } else { Some(value.clone()) };
    match field {
      Field::Id => self.id = value,
      Field::TelegramId => self.telegram_id = optional,
      Field::DiscordId => self.discord_id = optional,
      Field::Email => self.email = value,
      Field::Phone => self.phone = optional,
      Field::Name => self.name = value,
      Field::Surname => self.surname = value,
      Field::Patronymic => self.patronymic = optional,
      Field::University => self.university = value,
      Field::StudentGroup => self.student_group = optional,
      Field::Title => self.title = value,
      Field::Adviser => self.adviser = value,
      Field::Coauthors => warn!("Ignoring attempt to set coauthors from a plain string"),
    }
  }

  /// Removes empty optional fields, here and inside each co-author.
  ///
  /// Stripping an already stripped record returns it unchanged.
  pub fn stripped(self) -> Self {
    let keep = |value: Option<String>| value.filter(|v| !v.is_empty());
    Self {
      telegram_id: keep(self.telegram_id),
      discord_id: keep(self.discord_id),
      phone: keep(self.phone),
      patronymic: keep(self.patronymic),
      student_group: keep(self.student_group),
      coauthors: self.coauthors.into_iter().map(Coauthor::stripped).collect(),
      ..self
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn columns_follow_declaration_order() {
    let names: Vec<_> = Field::columns().iter().map(Field::as_str).collect();
    assert_eq!(names, [
      "telegram_id",
      "discord_id",
      "email",
      "phone",
      "name",
      "surname",
      "patronymic",
      "university",
      "student_group",
      "title",
      "adviser",
      "coauthors",
    ]);
    assert_eq!(Field::TelegramId.column(), Some(0));
    assert_eq!(Field::DiscordId.column(), Some(1));
    assert_eq!(Field::Coauthors.column(), Some(ROW_WIDTH - 1));
  }

  #[test]
  fn serialization_skips_empty_fields_and_puts_id_first() {
    let node = Node {
      id: "7".into(),
      email: "a@x.com".into(),
      name: "Ann".into(),
      surname: "Lee".into(),
      university: "MIT".into(),
      title: "T".into(),
      adviser: "Dr. X".into(),
      ..Default::default()
    };

    let json = serde_json::to_string(&node).unwrap();
    assert!(json.starts_with(r#"{"id":"7""#));
    assert!(!json.contains("telegram_id"));
    assert!(!json.contains("coauthors"));
    assert!(!json.contains("null"));
  }

  #[test]
  fn stripping_is_idempotent() {
    let node = Node {
      id: "3".into(),
      phone: Some(String::new()),
      telegram_id: Some("@ann".into()),
      coauthors: vec![Coauthor { patronymic: Some(String::new()), ..Coauthor::new("Ben", "Ng") }],
      ..Default::default()
    };

    let once = node.stripped();
    assert_eq!(once.phone, None);
    assert_eq!(once.telegram_id.as_deref(), Some("@ann"));
    assert_eq!(once.coauthors[0].patronymic, None);
    assert_eq!(once.clone().stripped(), once);
  }

  #[test]
  fn set_clears_optional_fields_on_empty_values() {
    let mut node = Node::default();
    node.set(Field::Phone, "123".into());
    assert_eq!(node.get(Field::Phone), Some("123"));
    node.set(Field::Phone, String::new());
    assert_eq!(node.get(Field::Phone), None);
    node.set(Field::Email, String::new());
    assert_eq!(node.get(Field::Email), Some(""));
  }
}
