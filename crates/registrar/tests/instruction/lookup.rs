use super::*;

mod parameters {
  use super::*;

  #[test]
  fn test_exactly_one_key_is_required() {
    let none = Lookup::from_params(LookupParams::default());
    assert!(matches!(none, Err(RegistrarError::AmbiguousLookup)));

    let two = Lookup::from_params(LookupParams {
      telegram_id: Some("@ann".into()),
      email: Some("a@x.com".into()),
      ..LookupParams::default()
    });
    assert!(matches!(two, Err(RegistrarError::AmbiguousLookup)));
    assert_eq!(RegistrarError::AmbiguousLookup.to_string(), "Only one argument is allowed");
  }

  #[test]
  fn test_empty_values_do_not_count() {
    let lookup = Lookup::from_params(LookupParams {
      telegram_id: Some(String::new()),
      discord_id: Some("bob#1".into()),
      email: Some(String::new()),
    })
    .unwrap();

    assert_eq!(lookup.key(), LookupKey::DiscordId);
    assert_eq!(lookup.value(), "bob#1");
  }

  #[test]
  fn test_keys_map_to_first_three_columns() {
    assert_eq!(LookupKey::TelegramId.column(), 0);
    assert_eq!(LookupKey::DiscordId.column(), 1);
    assert_eq!(LookupKey::Email.column(), 2);
  }
}

mod matching {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_ids_count_unmatched_rows() -> TestResult<()> {
    let sheet = seeded_sheet();

    let nodes = Lookup::by_email("a@x.com").execute(&sheet).await?;

    let ids: Vec<_> = nodes.iter().map(|node| node.id.as_str()).collect();
    assert_eq!(ids, ["2", "4"]);
    assert_eq!(nodes[1].title, "Second paper");
    assert_eq!(nodes[1].coauthors, vec![Coauthor::new("Di", "Yu")]);
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_decodes_full_row() -> TestResult<()> {
    let sheet = seeded_sheet();

    let nodes = Lookup::by_telegram_id("@bob").execute(&sheet).await?;

    assert_eq!(nodes, vec![Node {
      id:            "3".into(),
      telegram_id:   Some("@bob".into()),
      discord_id:    Some("bob#1".into()),
      email:         "b@y.org".into(),
      phone:         Some("555".into()),
      name:          "Bob".into(),
      surname:       "Ray".into(),
      patronymic:    Some("Ivanovich".into()),
      university:    "ETH".into(),
      student_group: Some("G-2".into()),
      title:         "U".into(),
      adviser:       "Dr. Y".into(),
      coauthors:     vec![
        Coauthor::new("Ben", "Ng"),
        Coauthor::new("Cy", "Ray").with_patronymic("K"),
      ],
    }]);
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_matching_is_exact() -> TestResult<()> {
    let sheet = seeded_sheet();

    assert!(Lookup::by_email("A@X.COM").execute(&sheet).await?.is_empty());
    assert!(Lookup::by_email(" a@x.com").execute(&sheet).await?.is_empty());
    assert!(Lookup::by_discord_id("bob").execute(&sheet).await?.is_empty());
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_header_is_never_matched() -> TestResult<()> {
    let sheet = seeded_sheet();

    assert!(Lookup::by_email("email").execute(&sheet).await?.is_empty());
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_one_read_per_lookup() -> TestResult<()> {
    let sheet = ScriptedSheet::new("", vec![header_row(), row(&["@ann", "", "a@x.com"])]);

    let nodes = Lookup::by_telegram_id("@ann").execute(&sheet).await?;

    assert_eq!(sheet.reads(), 1);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].email, "a@x.com");
    assert_eq!(nodes[0].name, "");
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_empty_sheet_returns_nothing() -> TestResult<()> {
    let sheet = MemorySheet::with_rows(Vec::new());

    assert!(Lookup::by_email("a@x.com").execute(&sheet).await?.is_empty());
    Ok(())
  }
}
