//! Module for registering a paper from the command line

use tokio::io::AsyncReadExt;

use super::*;

/// Options for [`Commands::Submit`].
#[derive(Args, Clone)]
pub struct SubmitArgs {
  /// JSON file holding the registration, or `-` to read stdin
  pub file: PathBuf,
}

/// Function for the [`Commands::Submit`] in the CLI.
///
/// Prints the stored registration, including its assigned id, as JSON.
pub async fn submit(config: &Config, submit_args: SubmitArgs) -> Result<()> {
  let content = if submit_args.file.as_os_str() == "-" {
    let mut content = String::new();
    tokio::io::stdin().read_to_string(&mut content).await?;
    content
  } else {
    tokio::fs::read_to_string(&submit_args.file).await?
  };
  let submission: Value = serde_json::from_str(&content)?;

  let registrar = Registrar::from_config(config)?;
  let node = registrar.submit(submission).await?;
  info!("Registered {:?} as row {}", node.title, node.id);

  println!("{}", serde_json::to_string_pretty(&node)?);
  Ok(())
}
