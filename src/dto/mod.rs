//! DTOs compartidos entre el cliente REST y el gateway

pub mod envelope;
pub mod query_dto;

pub use envelope::{unwrap_payload, ApiEnvelope};
