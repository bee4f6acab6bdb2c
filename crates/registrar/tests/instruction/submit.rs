use super::*;

mod basic_operations {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_first_row_gets_id_two() -> TestResult<()> {
    let sheet = MemorySheet::new();

    let node = Submit::new(ann()).execute(&sheet).await?;

    assert_eq!(node.id, "2");
    assert_eq!(node.name, "Ann");
    assert_eq!(sheet.len().await, 2);
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_ids_follow_row_numbers() -> TestResult<()> {
    let sheet = MemorySheet::new();

    let ids = [
      Submit::new(ann()).execute(&sheet).await?.id,
      Submit::new(ann()).execute(&sheet).await?.id,
      Submit::new(ann()).execute(&sheet).await?.id,
    ];

    assert_eq!(ids, ["2", "3", "4"]);
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_writes_cells_in_column_order() -> TestResult<()> {
    let sheet = ScriptedSheet::new("Sheet1!A2:L2", Vec::new());
    let mut submission = ann();
    submission["telegram_id"] = json!("@ann");
    submission["coauthors"] = json!([
      { "name": "Ben", "surname": "Ng" },
      { "name": "Cy", "surname": "Ray", "patronymic": "K" }
    ]);

    Submit::new(submission).execute(&sheet).await?;

    assert_eq!(sheet.appended(), vec![row(&[
      "@ann",
      "",
      "a@x.com",
      "",
      "Ann",
      "Lee",
      "",
      "MIT",
      "",
      "T",
      "Dr. X",
      "Ben Ng, Cy Ray K"
    ])]);
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_client_id_is_overwritten() -> TestResult<()> {
    let sheet = ScriptedSheet::new("Sheet1!A17:L17", Vec::new());
    let mut submission = ann();
    submission["id"] = json!("1");

    let node = Submit::new(submission).execute(&sheet).await?;

    assert_eq!(node.id, "17");
    Ok(())
  }
}

mod response_shape {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_response_strips_empty_fields() -> TestResult<()> {
    let sheet = MemorySheet::new();
    let mut submission = ann();
    submission["phone"] = json!("");
    submission["discord_id"] = json!(null);
    submission["coauthors"] = json!([{ "name": "Ben", "surname": "Ng", "patronymic": "" }]);
    submission["shoe_size"] = json!(42);

    let node = Submit::new(submission).execute(&sheet).await?;
    let response = serde_json::to_value(&node)?;

    assert_eq!(
      response,
      json!({
        "id": "2",
        "email": "a@x.com",
        "name": "Ann",
        "surname": "Lee",
        "university": "MIT",
        "title": "T",
        "adviser": "Dr. X",
        "coauthors": [{ "name": "Ben", "surname": "Ng" }]
      })
    );
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_empty_coauthor_list_is_dropped() -> TestResult<()> {
    let sheet = MemorySheet::new();
    let mut submission = ann();
    submission["coauthors"] = json!([]);

    let node = Submit::new(submission).execute(&sheet).await?;

    assert!(node.coauthors.is_empty());
    assert!(serde_json::to_value(&node)?.get("coauthors").is_none());
    Ok(())
  }
}

mod failures {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_missing_field_never_reaches_store() {
    let sheet = ScriptedSheet::new("Sheet1!A2:L2", Vec::new());
    let mut submission = ann();
    submission.as_object_mut().unwrap().remove("university");

    let err = Submit::new(submission).execute(&sheet).await.unwrap_err();

    assert!(matches!(&err, RegistrarError::EmptyField(field) if field == "university"));
    assert_eq!(err.to_string(), "Field university is empty");
    assert!(sheet.appended().is_empty());
  }

  #[traced_test]
  #[tokio::test]
  async fn test_bad_coauthor_never_reaches_store() {
    let sheet = ScriptedSheet::new("Sheet1!A2:L2", Vec::new());
    let mut submission = ann();
    submission["coauthors"] = json!([{ "name": "Ben", "surname": "" }]);

    let err = Submit::new(submission).execute(&sheet).await.unwrap_err();

    assert!(matches!(&err, RegistrarError::EmptyField(field) if field == "surname"));
    assert!(sheet.appended().is_empty());
  }

  #[traced_test]
  #[tokio::test]
  async fn test_unparseable_confirmation() {
    let sheet = ScriptedSheet::new("Sheet1!A:L", Vec::new());

    let err = Submit::new(ann()).execute(&sheet).await.unwrap_err();

    assert!(matches!(&err, RegistrarError::UnconfirmedAppend(range) if range == "Sheet1!A:L"));
    assert!(!err.is_validation());
    // The row was still sent; only its confirmation is unusable.
    assert_eq!(sheet.appended().len(), 1);
  }
}
