//! Folio server binary.
//!
//! Reads `folio.toml` (or the path given with `--config`) plus `FOLIO_*`
//! environment overrides, opens the configured contact store, and serves the
//! site over HTTP until Ctrl-C or SIGTERM.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use folio_core::{
  application::ContactService,
  id::UuidIds,
  seed,
  store::{CatalogRepository, ContactRepository},
  validate::ContactRules,
};
use folio_mail::SmtpMailer;
use folio_store_memory::{MemoryCatalog, MemoryContactRepository};
use folio_store_sqlite::SqliteStore;
use folio_web::{
  AppState, Settings,
  config::{DatabaseKind, LogFormat, LogOutput, LoggingConfig},
};
use tokio::net::TcpListener;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Folio portfolio and contact server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "folio.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  let settings = Settings::load(&cli.config)
    .with_context(|| format!("invalid configuration ({})", cli.config.display()))?;

  init_tracing(&settings.logging);

  match settings.database.kind {
    DatabaseKind::Memory => {
      warn!("using the in-memory contact store; submissions are lost on restart");
      let contacts = Arc::new(MemoryContactRepository::new());
      let catalog = Arc::new(MemoryCatalog::seeded().context("failed to build catalog")?);
      run(settings, contacts, catalog).await
    }
    DatabaseKind::Sqlite => {
      let path = &settings.database.path;
      if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
          .with_context(|| format!("failed to create {}", parent.display()))?;
      }
      let store = SqliteStore::open(path, settings.database.busy_timeout())
        .await
        .with_context(|| format!("failed to open store at {}", path.display()))?;
      let catalog = seed::catalog().context("failed to build catalog")?;
      if store.seed_if_empty(catalog).await.context("failed to seed catalog")? {
        info!("seeded empty catalog");
      }
      let store = Arc::new(store);
      run(settings, Arc::clone(&store), store).await
    }
  }
}

async fn run<R, C>(settings: Settings, contacts: Arc<R>, catalog: Arc<C>) -> anyhow::Result<()>
where
  R: ContactRepository + 'static,
  C: CatalogRepository + 'static,
{
  let mailer = SmtpMailer::new(settings.mail.clone()).context("failed to configure mailer")?;
  info!(mode = ?mailer.mode(), "mailer configured");

  let service = ContactService::new(
    contacts,
    Arc::new(mailer),
    Arc::new(ContactRules),
    Arc::new(UuidIds),
  );
  let app = folio_web::router(AppState::new(service, catalog), &settings.server);

  let address = settings.server.address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  info!(
    environment = %settings.server.environment,
    production = settings.server.is_production(),
    "listening on http://{address}",
  );
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  info!("server stopped");
  Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
  let level = logging.level_filter().unwrap_or(LevelFilter::INFO);
  let filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();
  let builder = tracing_subscriber::fmt().with_env_filter(filter);

  match (logging.format, logging.output) {
    (LogFormat::Text, LogOutput::Stdout) => builder.init(),
    (LogFormat::Text, LogOutput::Stderr) => builder.with_writer(std::io::stderr).init(),
    (LogFormat::Json, LogOutput::Stdout) => builder.json().init(),
    (LogFormat::Json, LogOutput::Stderr) => builder.json().with_writer(std::io::stderr).init(),
  }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
  let ctrl_c = async {
    match tokio::signal::ctrl_c().await {
      Ok(()) => info!("received Ctrl-C, shutting down"),
      Err(e) => {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(unix)]
  let terminate = async {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
        info!("received SIGTERM, shutting down");
      }
      Err(e) => {
        warn!(error = %e, "failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
}
