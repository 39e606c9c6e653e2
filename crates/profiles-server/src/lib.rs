//! HTTP server assembly for the profile service.
//!
//! Wraps [`profiles_api::api_router`] in the transport layers the service
//! runs with (CORS, request tracing) and owns the runtime configuration.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, http::Request};
use profiles_core::store::ProfileStore;
use serde::Deserialize;
use tower_http::{
  cors::CorsLayer,
  trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// SQLite file holding the profiles; a leading `~/` is expanded.
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub const ENV_PREFIX: &'static str = "PROFILES";

  /// Layer built-in defaults, the optional TOML file at `path`, a bare
  /// `PORT` variable, and `PROFILES_*` environment variables, in that order
  /// of precedence.
  pub fn load(path: impl Into<PathBuf>) -> Result<Self, config::ConfigError> {
    Self::load_with_port(path, std::env::var("PORT").ok())
  }

  fn load_with_port(
    path: impl Into<PathBuf>,
    port: Option<String>,
  ) -> Result<Self, config::ConfigError> {
    // Hosting platforms inject an unprefixed `PORT`; read only that key.
    let platform: config::Map<String, String> =
      port.map(|p| ("PORT".to_owned(), p)).into_iter().collect();

    let mut cfg: ServerConfig = config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 4000)?
      .set_default("store_path", "profiles.db")?
      .add_source(config::File::from(path.into()).required(false))
      .add_source(config::Environment::default().source(Some(platform)))
      .add_source(config::Environment::with_prefix(Self::ENV_PREFIX))
      .build()?
      .try_deserialize()?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: API routes, permissive CORS, and a trace span
/// per request.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: ProfileStore + 'static,
{
  profiles_api::api_router(store)
    .layer(CorsLayer::permissive())
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
          tracing::info_span!(
            "http-request",
            method = %request.method(),
            uri = %request.uri(),
          )
        })
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}

// ─── Shutdown ─────────────────────────────────────────────────────────────────

/// Resolve on Ctrl-C, or on SIGTERM where available.
pub async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!("failed to listen for Ctrl-C: {e}");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!("failed to listen for SIGTERM: {e}");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => tracing::info!("received Ctrl-C, shutting down"),
    () = terminate => tracing::info!("received SIGTERM, shutting down"),
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
