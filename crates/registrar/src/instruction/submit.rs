use super::*;

/// Stores a new registration.
///
/// The submission is validated and projected into a [`Node`], encoded as one row, and
/// appended. The id of the returned record is the row number the store reports; any id the
/// caller supplied is replaced.
///
/// # Errors
///
/// - Validation errors from [`validate`](crate::validate::validate); the store is not called
/// - [`RegistrarError::UnconfirmedAppend`] when the store's confirmation carries no row number
/// - Any error the store itself returns
#[derive(Debug, Clone)]
pub struct Submit {
  /// The untyped submission as received
  submission: Value,
}

impl Submit {
  /// Creates a submit operation for an untyped submission.
  pub fn new(submission: Value) -> Self { Self { submission } }
}

#[async_trait]
impl SheetInstruction for Submit {
  type Output = Node;

  async fn execute<S: Sheet + ?Sized>(&self, sheet: &S) -> Result<Self::Output> {
    let node = validate::validated_node(&self.submission)?;
    let cells = codec::encode(&node);

    let confirmation = sheet.append_row(&cells).await?;
    let Some(id) = confirmation.row_index() else {
      warn!(
        "{} accepted a row but reported range {:?}",
        sheet.describe(),
        confirmation.updated_range
      );
      return Err(RegistrarError::UnconfirmedAppend(confirmation.updated_range.clone()));
    };

    debug!("Stored registration for {} as row {id}", node.email);
    Ok(Node { id: id.to_string(), ..node.stripped() })
  }
}
