//! Module for writing a registrard configuration

use super::*;

/// Options for [`Commands::Init`].
#[derive(Args, Clone)]
pub struct InitArgs {
  /// Spreadsheet id from the Google Sheets document URL
  #[arg(long, required_unless_present = "memory", conflicts_with = "memory")]
  pub spreadsheet_id: Option<String>,
  /// Worksheet title inside the spreadsheet
  #[arg(long, default_value = "Sheet1")]
  pub worksheet:      String,
  /// Keep registrations in memory instead of a spreadsheet
  #[arg(long, action = ArgAction::SetTrue)]
  pub memory:         bool,
  /// Address the HTTP server listens on
  #[arg(long)]
  pub bind:           Option<String>,
  /// Overwrite an existing configuration
  #[arg(long, action = ArgAction::SetTrue)]
  pub force:          bool,
}

/// Function for the [`Commands::Init`] in the CLI.
pub fn init(config_path: &Path, init_args: InitArgs) -> Result<()> {
  let InitArgs { spreadsheet_id, worksheet, memory, bind, force } = init_args;

  if config_path.exists() && !force {
    println!(
      "{} Configuration already exists at {}",
      style(WARNING_PREFIX).yellow(),
      style(config_path.display()).yellow()
    );
    return Err(RegistrardError::ConfigExists(config_path.to_path_buf()));
  }

  let store = match spreadsheet_id {
    Some(spreadsheet_id) if !memory => {
      StoreConfig::Google(GoogleSheetConfig::new(spreadsheet_id, worksheet))
    },
    _ => StoreConfig::Memory,
  };
  let config = match bind {
    Some(bind) => Config::default().with_bind(bind),
    None => Config::default(),
  }
  .with_store(store);

  config.save(config_path)?;
  info!("Wrote configuration to {}", config_path.display());

  println!(
    "{} Configuration written to {}",
    style(SUCCESS_PREFIX).green(),
    style(config_path.display()).yellow()
  );
  match &config.store {
    StoreConfig::Google(google) => println!(
      "{} Export a Sheets access token as {} before serving",
      style(INFO_PREFIX).cyan(),
      style(&google.access_token_env).bold()
    ),
    StoreConfig::Memory => println!(
      "{} Registrations are kept in memory and lost when the process exits",
      style(INFO_PREFIX).cyan()
    ),
  }
  Ok(())
}
