//! JSON REST API for the profile service.
//!
//! Exposes an axum [`Router`] backed by any
//! [`profiles_core::store::ProfileStore`]. CORS, tracing, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = profiles_api::api_router(Arc::new(store));
//! ```

pub mod error;
pub mod profiles;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use profiles_core::store::ProfileStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ProfileStore + 'static,
{
  Router::new()
    .route("/", get(profiles::list::<S>))
    .route("/{profile_key}", get(profiles::get_one::<S>))
    .route("/api/save-profile", post(profiles::create::<S>))
    .route("/api/update-profile/{profile_key}", put(profiles::update::<S>))
    .route("/api/profiles/{profile_key}", delete(profiles::delete_one::<S>))
    .method_not_allowed_fallback(unmatched)
    .fallback(unmatched)
    .with_state(store)
}

/// Unknown paths and unsupported methods on known paths.
async fn unmatched() -> ApiError { ApiError::NotFound("Route not found".to_owned()) }

// ─── Integration tests ────────────────────────────────────────────────────────
