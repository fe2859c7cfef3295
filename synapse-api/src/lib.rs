//! SYNAPSE API - REST Gateway
//!
//! The axum gateway for the SYNAPSE knowledge-base service: brain lifecycle,
//! document ingestion, synchronous and streaming retrieval queries, and
//! conversation management.
//!
//! Layering:
//! - `routes/` - thin axum handlers, one module per entity
//! - `services/` - brain registry, document service, conversation manager,
//!   query executor, stream orchestrator
//! - `store/` - the byte-level document store seam (memory and filesystem)
//! - `error`/`validation`/`types` - wire contracts

pub mod config;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod types;
pub mod validation;

pub use config::GatewayConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;
