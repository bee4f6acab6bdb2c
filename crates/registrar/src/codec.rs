//! Conversion between [`Node`]s and sheet rows.
//!
//! A row is [`ROW_WIDTH`] text cells laid out as [`Field::columns`]. Co-authors share one
//! cell: each becomes `"Name Surname"` or `"Name Surname Patronymic"`, and the entries are
//! joined with `", "`. Decoding splits the same way, so a name or surname containing a space
//! or `", "` does not survive a round trip.
//!
//! # Examples
//!
//! ```
//! use registrar::codec::{decode_coauthors, encode_coauthors};
//!
//! let coauthors = decode_coauthors("Ben Ng, Cy Ray K");
//! assert_eq!(coauthors[1].patronymic.as_deref(), Some("K"));
//! assert_eq!(encode_coauthors(&coauthors), "Ben Ng, Cy Ray K");
//! ```

use super::*;

/// Separator between co-author entries inside the co-authors cell.
pub const COAUTHOR_SEPARATOR: &str = ", ";

/// Encodes a registration into the cells of one sheet row.
///
/// Absent optional fields become empty cells. The row id is not stored.
pub fn encode(node: &Node) -> Vec<String> {
  Field::columns()
    .iter()
    .map(|&field| match field {
      Field::Coauthors => encode_coauthors(&node.coauthors),
      field => node.get(field).unwrap_or_default().to_string(),
    })
    .collect()
}

/// Decodes a sheet row into a stripped registration carrying `id`.
///
/// Missing trailing cells are read as empty and cells past [`ROW_WIDTH`] are ignored.
pub fn decode(id: impl Into<String>, row: &[String]) -> Node {
  let mut node = Node { id: id.into(), ..Node::default() };
  for (column, &field) in Field::columns().iter().enumerate() {
    let cell = row.get(column).map(String::as_str).unwrap_or_default();
    match field {
      Field::Coauthors => node.coauthors = decode_coauthors(cell),
      field => node.set(field, cell.to_string()),
    }
  }
  node.stripped()
}

/// Joins co-authors into the display string stored in the co-authors cell.
pub fn encode_coauthors(coauthors: &[Coauthor]) -> String {
  coauthors
    .iter()
    .map(|coauthor| match coauthor.patronymic.as_deref() {
      Some(patronymic) if !patronymic.is_empty() => {
        format!("{} {} {}", coauthor.name, coauthor.surname, patronymic)
      },
      _ => format!("{} {}", coauthor.name, coauthor.surname),
    })
    .collect::<Vec<_>>()
    .join(COAUTHOR_SEPARATOR)
}

/// Splits the co-authors cell back into co-authors.
///
/// Each entry is split on whitespace: the first token is the name, the second the surname and
/// the third the patronymic; further tokens are dropped. Entries without tokens are skipped.
pub fn decode_coauthors(cell: &str) -> Vec<Coauthor> {
  if cell.is_empty() {
    return Vec::new();
  }

  cell
    .split(COAUTHOR_SEPARATOR)
    .filter_map(|entry| {
      let mut tokens = entry.split_whitespace();
      let Some(name) = tokens.next() else {
        warn!("Skipping empty co-author entry in {cell:?}");
        return None;
      };
      let coauthor = Coauthor {
        name:       name.to_string(),
        surname:    tokens.next().unwrap_or_default().to_string(),
        patronymic: tokens.next().map(str::to_string),
      };
      if tokens.next().is_some() {
        trace!("Co-author entry {entry:?} has more than three names, keeping the first three");
      }
      Some(coauthor)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ann() -> Node {
    Node {
      email: "a@x.com".into(),
      name: "Ann".into(),
      surname: "Lee".into(),
      university: "MIT".into(),
      title: "T".into(),
      adviser: "Dr. X".into(),
      ..Default::default()
    }
  }

  #[test]
  fn encodes_in_column_order() {
    let node = Node {
      telegram_id: Some("@ann".into()),
      student_group: Some("CS-1".into()),
      coauthors: vec![Coauthor::new("Ben", "Ng")],
      ..ann()
    };

    assert_eq!(encode(&node), [
      "@ann", "", "a@x.com", "", "Ann", "Lee", "", "MIT", "CS-1", "T", "Dr. X", "Ben Ng"
    ]);
  }

  #[test]
  fn encodes_coauthors_with_optional_patronymic() {
    let coauthors = [
      Coauthor::new("Ben", "Ng"),
      Coauthor::new("Cy", "Ray").with_patronymic("K"),
      Coauthor::new("Di", "Yu").with_patronymic(""),
    ];
    assert_eq!(encode_coauthors(&coauthors), "Ben Ng, Cy Ray K, Di Yu");
    assert_eq!(encode_coauthors(&[]), "");
  }

  #[test]
  fn decodes_coauthor_cell() {
    assert_eq!(decode_coauthors("Ben Ng, Cy Ray K"), vec![
      Coauthor::new("Ben", "Ng"),
      Coauthor::new("Cy", "Ray").with_patronymic("K"),
    ]);
    assert!(decode_coauthors("").is_empty());
  }

  #[test]
  fn decoding_keeps_only_three_names() {
    assert_eq!(decode_coauthors("Cy Ray K Extra"), vec![
      Coauthor::new("Cy", "Ray").with_patronymic("K")
    ]);
  }

  #[test]
  fn decoding_tolerates_malformed_entries() {
    let coauthors = decode_coauthors("Ben, , Cy Ray");
    assert_eq!(coauthors, vec![Coauthor::new("Ben", ""), Coauthor::new("Cy", "Ray")]);
    let json = serde_json::to_value(&coauthors[0]).unwrap();
    assert_eq!(json, serde_json::json!({ "name": "Ben" }));
  }

  #[test]
  fn decodes_short_and_long_rows() {
    let short: Vec<String> = ["", "", "a@x.com"].map(String::from).to_vec();
    let node = decode("5", &short);
    assert_eq!(node.id, "5");
    assert_eq!(node.email, "a@x.com");
    assert_eq!(node.name, "");
    assert!(node.coauthors.is_empty());

    let mut long = encode(&ann());
    long.push("stray".into());
    assert_eq!(decode("6", &long), Node { id: "6".into(), ..ann() });
  }

  #[test]
  fn round_trip_preserves_record() {
    let node = Node {
      id: "9".into(),
      discord_id: Some("ann#1".into()),
      phone: Some("+100".into()),
      patronymic: Some("Mae".into()),
      coauthors: vec![Coauthor::new("Ben", "Ng"), Coauthor::new("Cy", "Ray").with_patronymic("K")],
      ..ann()
    };

    assert_eq!(decode("9", &encode(&node)), node);
  }
}
