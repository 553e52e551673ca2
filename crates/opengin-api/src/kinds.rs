//! Handler for `GET /kinds`: the major/minor taxonomy for form pickers.

use std::sync::Arc;

use axum::{Json, extract::State};
use opengin_core::{gateway::EntityGateway, kind::KindEntry};

use crate::error::ApiError;

pub async fn list<G>(State(gateway): State<Arc<G>>) -> Result<Json<Vec<KindEntry>>, ApiError>
where
  G: EntityGateway,
{
  let entries = gateway
    .kinds()?
    .into_iter()
    .map(|(major, minors)| KindEntry { major, minors })
    .collect();
  Ok(Json(entries))
}
