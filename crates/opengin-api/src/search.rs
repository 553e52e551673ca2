//! Handler for `POST /v1/entities/search`.
//!
//! Forwards the query to the READ service unchanged. Unlike `GET /entities`,
//! backend errors (404 included) are passed through to the caller.

use std::sync::Arc;

use axum::{Json, extract::State};
use opengin_core::{entity::Entity, gateway::EntityGateway, search::SearchQuery};

use crate::error::ApiError;

/// `POST /v1/entities/search` — body: `{"kind":{"major":"..."}}` or `{"id":"..."}`
pub async fn handler<G>(
  State(gateway): State<Arc<G>>,
  Json(query): Json<SearchQuery>,
) -> Result<Json<Vec<Entity>>, ApiError>
where
  G: EntityGateway,
{
  let entities = gateway.search(&query).await?;
  Ok(Json(entities))
}
