//! Required-field checks on untyped submissions and projection into [`Node`].
//!
//! Submissions arrive as loosely typed JSON. [`validate`] enforces the required fields in
//! declared order and reports the first one that is missing or empty; [`project`] then turns
//! the accepted mapping into a strict [`Node`], ignoring keys the schema does not know.
//!
//! A value counts as empty when it is missing, `null`, `""`, `[]`, `{}`, `false` or zero.
//!
//! # Examples
//!
//! ```
//! use registrar::validate::{project, validate};
//! use serde_json::json;
//!
//! let submission = json!({
//!   "name": "Ann",
//!   "surname": "Lee",
//!   "email": "a@x.com",
//!   "university": "MIT",
//!   "title": "T",
//!   "adviser": "Dr. X",
//!   "favourite_colour": "green"
//! });
//!
//! let node = project(validate(&submission).unwrap()).unwrap();
//! assert_eq!(node.name, "Ann");
//! ```

use super::*;

/// Whether a submitted value counts as empty.
pub fn is_blank(value: &Value) -> bool {
  match value {
    Value::Null => true,
    Value::Bool(flag) => !flag,
    Value::Number(number) => number.as_f64() == Some(0.0),
    Value::String(text) => text.is_empty(),
    Value::Array(items) => items.is_empty(),
    Value::Object(map) => map.is_empty(),
  }
}

/// Checks that every required field of `submission` is present and non-empty.
///
/// Top-level fields are checked first, in the order of [`REQUIRED_FIELDS`]. When `coauthors`
/// is present and non-empty, each entry must then carry a non-empty `name` and `surname`.
///
/// # Errors
///
/// - [`RegistrarError::EmptyField`] naming the first missing field
/// - [`RegistrarError::InvalidRecord`] if the submission or its co-author list has the wrong
///   shape
pub fn validate(submission: &Value) -> Result<&Map<String, Value>> {
  let record = submission
    .as_object()
    .ok_or_else(|| RegistrarError::InvalidRecord("submission must be a JSON object".into()))?;

  for field in REQUIRED_FIELDS {
    if record.get(field.as_str()).map_or(true, is_blank) {
      debug!("Rejecting submission without {field}");
      return Err(RegistrarError::EmptyField(field.to_string()));
    }
  }

  for coauthor in coauthor_entries(record)? {
    for field in REQUIRED_COAUTHOR_FIELDS {
      if coauthor.get(field).map_or(true, is_blank) {
        debug!("Rejecting submission with a co-author without {field}");
        return Err(RegistrarError::EmptyField(field.to_string()));
      }
    }
  }

  Ok(record)
}

/// Projects a validated mapping into a [`Node`].
///
/// The `id` field is left empty: ids come from the store, never from the caller. Scalars are
/// rendered as text, `null` counts as absent, and empty optional fields come out as `None`.
///
/// # Errors
///
/// [`RegistrarError::InvalidRecord`] when a string field holds a list or an object.
pub fn project(record: &Map<String, Value>) -> Result<Node> {
  let mut node = Node::default();
  for &field in Field::columns() {
    if field == Field::Coauthors {
      continue;
    }
    node.set(field, text(record, field.as_str())?);
  }

  node.coauthors = coauthor_entries(record)?
    .map(|entry| -> Result<Coauthor> {
      let patronymic = text(entry, "patronymic")?;
      Ok(Coauthor {
        name:       text(entry, "name")?,
        surname:    text(entry, "surname")?,
        patronymic: (!patronymic.is_empty()).then_some(patronymic),
      })
    })
    .collect::<Result<Vec<_>>>()?;

  Ok(node)
}

/// Validates `submission` and projects it in one step.
pub fn validated_node(submission: &Value) -> Result<Node> { project(validate(submission)?) }

/// Iterates over the co-author objects of a record.
///
/// A missing or empty `coauthors` value yields nothing.
fn coauthor_entries(
  record: &Map<String, Value>,
) -> Result<impl Iterator<Item = &Map<String, Value>>> {
  let entries = match record.get(Field::Coauthors.as_str()) {
    Some(value) if !is_blank(value) => value.as_array().ok_or_else(|| {
      RegistrarError::InvalidRecord(format!("{} must be a list", Field::Coauthors))
    })?,
    _ => return Ok(Vec::new().into_iter()),
  };

  entries
    .iter()
    .map(|entry| {
      entry.as_object().ok_or_else(|| {
        RegistrarError::InvalidRecord(format!(
          "every entry of {} must be an object",
          Field::Coauthors
        ))
      })
    })
    .collect::<Result<Vec<_>>>()
    .map(Vec::into_iter)
}

/// Reads a field as text, treating absence and `null` as the empty string.
fn text(record: &Map<String, Value>, key: &str) -> Result<String> {
  match record.get(key) {
    None | Some(Value::Null) => Ok(String::new()),
    Some(Value::String(text)) => Ok(text.clone()),
    Some(scalar @ (Value::Bool(_) | Value::Number(_))) => Ok(scalar.to_string()),
    Some(Value::Array(_) | Value::Object(_)) => {
      Err(RegistrarError::InvalidRecord(format!("{key} must be a string")))
    },
  }
}
