//! Module for running the HTTP server

use tokio::net::TcpListener;

use super::*;

/// Options for [`Commands::Serve`].
#[derive(Args, Clone)]
pub struct ServeArgs {
  /// Address to listen on, overriding the configured one
  #[arg(long)]
  pub bind:    Option<String>,
  /// Directory for a daily rotated log file
  #[arg(long)]
  pub log_dir: Option<PathBuf>,
}

/// Function for the [`Commands::Serve`] in the CLI.
///
/// Runs until interrupted with Ctrl-C, finishing in-flight requests before returning.
pub async fn serve(config: Config, serve_args: ServeArgs) -> Result<()> {
  let addr = serve_args.bind.unwrap_or_else(|| config.bind.clone());
  let registrar = Registrar::from_config(&config)?;
  debug!("Serving {registrar:?}");

  let listener = TcpListener::bind(&addr)
    .await
    .map_err(|source| RegistrardError::Bind { addr: addr.clone(), source })?;
  let local_addr = listener.local_addr()?;
  info!("Listening on {local_addr}");
  println!("{} Listening on http://{}", style(SUCCESS_PREFIX).green(), style(local_addr).yellow());

  axum::serve(listener, server::router(registrar))
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  info!("Server stopped");
  Ok(())
}

/// Resolves once the process receives Ctrl-C.
async fn shutdown_signal() {
  match tokio::signal::ctrl_c().await {
    Ok(()) => info!("Received Ctrl-C, shutting down"),
    Err(e) => {
      error!("Failed to listen for Ctrl-C: {e}");
      std::future::pending::<()>().await;
    },
  }
}
