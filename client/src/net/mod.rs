//! Networking modules for the contacts REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the call contract and error type, `http` implements it with
//! `reqwest`, and `types` defines the JSON wire schema.

pub mod api;
pub mod http;
pub mod types;
