//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gateway` owns request construction and 401 interception, `api` declares
//! the endpoints, `fetch` is the browser transport, and `types` defines the
//! wire schema.

pub mod api;
pub mod fetch;
pub mod gateway;
pub mod types;
