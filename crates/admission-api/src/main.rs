//! admission-api server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `ADMISSION_*` environment variables, builds the in-memory registry and
//! serves the REST API over HTTP.
//!
//! Nested keys use a double underscore, e.g. `ADMISSION_GENAI__API_KEY`.

use std::path::PathBuf;

use admission_api::{AppState, ServerConfig};
use admission_genai::GeminiClient;
use admission_store_memory::MemoryStore;
use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Admission portal REST server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("ADMISSION")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true),
    )
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  if server_cfg.genai.api_key.is_none() {
    tracing::warn!("no generative AI key configured; assistant replies will use fallback text");
  }

  let store = if server_cfg.seed {
    MemoryStore::seeded()
  } else {
    MemoryStore::new()
  };
  let generator = GeminiClient::new(&server_cfg.genai);
  let address = server_cfg.address();

  let app = admission_api::router(AppState::new(store, generator, server_cfg));

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
