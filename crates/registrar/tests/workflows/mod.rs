use std::sync::Arc;

use registrar::{instruction::LookupParams, schema::Coauthor, Registrar};

use super::*;

#[traced_test]
#[tokio::test]
async fn test_submit_then_lookup_round_trip() -> TestResult<()> {
  let registrar = Registrar::new(MemorySheet::new());
  let mut submission = ann();
  submission["telegram_id"] = json!("@ann");
  submission["patronymic"] = json!("Mae");
  submission["coauthors"] = json!([
    { "name": "Ben", "surname": "Ng" },
    { "name": "Cy", "surname": "Ray", "patronymic": "K" }
  ]);

  let stored = registrar.submit(submission).await?;
  let found = registrar.lookup(LookupParams::telegram_id("@ann")).await?;

  assert_eq!(found, vec![stored.clone()]);
  assert_eq!(stored.coauthors, vec![
    Coauthor::new("Ben", "Ng"),
    Coauthor::new("Cy", "Ray").with_patronymic("K")
  ]);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_lookup_by_each_key() -> TestResult<()> {
  let registrar = Registrar::new(seeded_sheet());

  assert_eq!(registrar.lookup(LookupParams::telegram_id("@ann")).await?.len(), 1);
  assert_eq!(registrar.lookup(LookupParams::discord_id("ann#7")).await?[0].id, "4");
  assert_eq!(registrar.lookup(LookupParams::email("a@x.com")).await?.len(), 2);
  assert!(registrar.lookup(LookupParams::email("nobody@x.com")).await?.is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_clones_share_one_store() -> TestResult<()> {
  let sheet: Arc<dyn Sheet> = Arc::new(MemorySheet::new());
  let first = Registrar::from_shared(sheet.clone());
  let second = first.clone();

  first.submit(ann()).await?;
  let node = second.submit(ann()).await?;

  assert_eq!(node.id, "3");
  assert_eq!(sheet.get_all_values().await?.len(), 3);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_ambiguous_lookup_reads_nothing() {
  let sheet = Arc::new(ScriptedSheet::new("", Vec::new()));
  let registrar = Registrar::from_shared(sheet.clone());

  let err = registrar.lookup(LookupParams::default()).await.unwrap_err();

  assert!(err.is_validation());
  assert_eq!(sheet.reads(), 0);
}
