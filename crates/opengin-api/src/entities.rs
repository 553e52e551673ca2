//! Handlers for `/entities` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/entities` | Aggregated per-kind search; always 200 |
//! | `POST` | `/entities` | Body: full [`Entity`]; returns 201 + persisted entity |
//! | `GET`  | `/entities/:id` | 404 if absent |
//! | `PUT`  | `/entities/:id` | Body: full [`Entity`]; the path id wins |
//!
//! Read responses built from incomplete or fallback data carry
//! `x-opengin-degraded: true`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderName, HeaderValue, StatusCode},
  response::{IntoResponse, Response},
};
use opengin_core::{
  entity::Entity,
  gateway::{EntityGateway, Lookup},
};

use crate::error::ApiError;

pub const DEGRADED_HEADER: HeaderName = HeaderName::from_static("x-opengin-degraded");

fn degraded(mut resp: Response) -> Response {
  resp
    .headers_mut()
    .insert(DEGRADED_HEADER, HeaderValue::from_static("true"));
  resp
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /entities`
pub async fn list<G>(State(gateway): State<Arc<G>>) -> Response
where
  G: EntityGateway,
{
  let listing = gateway.list_detailed().await;
  let is_degraded = listing.degraded();
  let resp = Json(listing.entities).into_response();
  if is_degraded { degraded(resp) } else { resp }
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /entities/:id`
pub async fn get_one<G>(
  State(gateway): State<Arc<G>>,
  Path(id): Path<String>,
) -> Result<Response, ApiError>
where
  G: EntityGateway,
{
  match gateway.lookup(&id).await {
    Lookup::Found(entity) => Ok(Json(entity).into_response()),
    Lookup::Degraded(Some(entity)) => Ok(degraded(Json(entity).into_response())),
    Lookup::NotFound | Lookup::Degraded(None) => {
      Err(ApiError::NotFound(format!("entity {id} not found")))
    }
  }
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /entities` — returns 201 + the entity as persisted by ingestion.
pub async fn create<G>(
  State(gateway): State<Arc<G>>,
  Json(entity): Json<Entity>,
) -> Result<impl IntoResponse, ApiError>
where
  G: EntityGateway,
{
  let created = gateway.create(&entity).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /entities/:id`
pub async fn update<G>(
  State(gateway): State<Arc<G>>,
  Path(id): Path<String>,
  Json(mut entity): Json<Entity>,
) -> Result<Json<Entity>, ApiError>
where
  G: EntityGateway,
{
  entity.id = id;
  let updated = gateway.update(&entity).await?;
  Ok(Json(updated))
}
