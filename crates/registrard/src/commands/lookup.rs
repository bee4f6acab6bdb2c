//! Module for finding registrations from the command line

use super::*;

/// The key to look registrations up by; exactly one must be given.
#[derive(Args, Clone)]
#[group(required = true, multiple = false)]
pub struct LookupKeyArgs {
  /// Telegram handle
  #[arg(long)]
  pub telegram_id: Option<String>,
  /// Discord handle
  #[arg(long)]
  pub discord_id:  Option<String>,
  /// Contact email
  #[arg(long)]
  pub email:       Option<String>,
}

/// Options for [`Commands::Lookup`].
#[derive(Args, Clone)]
pub struct LookupArgs {
  #[command(flatten)]
  #[allow(missing_docs)]
  pub key:  LookupKeyArgs,
  /// Print the matches as JSON
  #[arg(long, action = ArgAction::SetTrue)]
  pub json: bool,
}

impl From<LookupKeyArgs> for LookupParams {
  fn from(key: LookupKeyArgs) -> Self {
    let LookupKeyArgs { telegram_id, discord_id, email } = key;
    LookupParams { telegram_id, discord_id, email }
  }
}

/// Function for the [`Commands::Lookup`] in the CLI.
pub async fn lookup(config: &Config, lookup_args: LookupArgs) -> Result<()> {
  let registrar = Registrar::from_config(config)?;
  let nodes = registrar.lookup(lookup_args.key.into()).await?;
  debug!("Lookup matched {} rows", nodes.len());

  if lookup_args.json {
    println!("{}", serde_json::to_string_pretty(&nodes)?);
    return Ok(());
  }

  if nodes.is_empty() {
    println!("{} No registrations found", style(WARNING_PREFIX).yellow());
    return Ok(());
  }

  println!("{} Found {} registration(s):", style(SUCCESS_PREFIX).green(), nodes.len());
  for node in &nodes {
    print_node(node);
  }
  Ok(())
}

/// Prints one registration as a small tree.
fn print_node(node: &Node) {
  println!(
    "\n{} Row {}: {}",
    style(TREE_BRANCH).cyan(),
    style(&node.id).yellow(),
    style(&node.title).white().bold()
  );

  let mut author = format!("{} {}", node.name, node.surname);
  if let Some(patronymic) = &node.patronymic {
    author = format!("{author} {patronymic}");
  }
  println!("{}   {} {}", style(CONTINUE_PREFIX).cyan(), style("Author:").green(), author);
  println!("{}   {} {}", style(CONTINUE_PREFIX).cyan(), style("Email:").green(), node.email);
  for (label, value) in [
    ("Telegram:", &node.telegram_id),
    ("Discord:", &node.discord_id),
    ("Phone:", &node.phone),
    ("Group:", &node.student_group),
  ] {
    if let Some(value) = value {
      println!("{}   {} {}", style(CONTINUE_PREFIX).cyan(), style(label).green(), value);
    }
  }
  println!(
    "{}   {} {}",
    style(CONTINUE_PREFIX).cyan(),
    style("University:").green(),
    node.university
  );

  let coauthors = registrar::codec::encode_coauthors(&node.coauthors);
  if !coauthors.is_empty() {
    println!("{}   {} {}", style(CONTINUE_PREFIX).cyan(), style("Co-authors:").green(), coauthors);
  }
  println!("{}   {} {}", style(TREE_LEAF).cyan(), style("Adviser:").green(), node.adviser);
}
