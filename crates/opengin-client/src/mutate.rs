//! Create and update against the INGESTION service.
//!
//! This is the one path that propagates failure: a rejected write is
//! returned as [`Error::Backend`] with the backend's raw body attached.

use opengin_core::{Error, Result, entity::Entity, validate::validate};
use tracing::{error, info};

use crate::{HttpGateway, client::backend_error, route::Operation};

impl HttpGateway {
  /// Send the full entity and return the record the backend persisted.
  pub(crate) async fn send_entity(&self, op: Operation<'_>, entity: &Entity) -> Result<Entity> {
    validate(entity)?;

    let resp = self.dispatch(op, entity).await.inspect_err(|e| {
      error!(id = %entity.id, error = %e, "ingestion request failed");
    })?;

    if !resp.status().is_success() {
      let err = backend_error(resp).await;
      error!(id = %entity.id, status = ?err.status(), error = %err, "ingestion rejected entity");
      return Err(err);
    }

    let persisted: Entity = resp
      .json()
      .await
      .map_err(|e| Error::Decode(e.to_string()))?;
    info!(id = %persisted.id, ?op, "entity written");
    Ok(persisted)
  }
}
