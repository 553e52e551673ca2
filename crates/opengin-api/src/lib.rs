//! JSON proxy API in front of the OpenGIN backends.
//!
//! Exposes an axum [`Router`] backed by any [`EntityGateway`]. This is the
//! boundary the admin UI talks to; TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", opengin_api::api_router(gateway.clone()))
//! ```

pub mod entities;
pub mod error;
pub mod kinds;
pub mod search;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use opengin_core::gateway::EntityGateway;

pub use entities::DEGRADED_HEADER;
pub use error::ApiError;

/// Build a fully-materialised API router for `gateway`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<G>(gateway: Arc<G>) -> Router<()>
where
  G: EntityGateway + 'static,
{
  Router::new()
    // Entities
    .route("/entities", get(entities::list::<G>).post(entities::create::<G>))
    .route("/entities/{id}", get(entities::get_one::<G>).put(entities::update::<G>))
    // Search passthrough
    .route("/v1/entities/search", post(search::handler::<G>))
    // Taxonomy
    .route("/kinds", get(kinds::list::<G>))
    .with_state(gateway)
}

// ─── Integration tests ────────────────────────────────────────────────────────
