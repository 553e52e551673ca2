//! HTTP access layer for the OpenGIN READ and INGESTION services.
//!
//! [`HttpGateway`] implements [`opengin_core::gateway::EntityGateway`]:
//! reads go to the READ service's search endpoint and degrade to fallback
//! data on failure; writes go to the INGESTION service and propagate every
//! failure.

mod aggregate;
mod client;
mod lookup;
mod mutate;

pub mod config;
pub mod route;

pub use client::{GatewayBuilder, HttpGateway};
pub use config::{BackendUrls, RequestPolicy};
