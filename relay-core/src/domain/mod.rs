//! Core domain types
//!
//! These types are built once from configuration (the registry) or live for a
//! single request/response cycle (payloads, workflow descriptors). None of
//! them is mutated after construction.

pub mod payload;
pub mod registry;
pub mod workflow;
