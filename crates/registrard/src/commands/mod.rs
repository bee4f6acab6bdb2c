use super::*;

pub mod init;
pub mod lookup;
pub mod serve;
pub mod submit;

pub use init::{init, InitArgs};
pub use lookup::{lookup, LookupArgs};
pub use serve::{serve, ServeArgs};
pub use submit::{submit, SubmitArgs};

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Write a configuration file pointing at a worksheet
  Init(InitArgs),

  /// Serve registrations over HTTP
  Serve(ServeArgs),

  /// Register a paper from a JSON file (or `-` for stdin)
  Submit(SubmitArgs),

  /// Find registrations by Telegram handle, Discord handle or email
  Lookup(LookupArgs),
}
