//! Application state owned by the client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` owns the signed-in session and everything that mutates it. The other
//! modules hold page-level state and the notice queue that feeds the toasts.

pub mod auth;
pub mod contacts;
pub mod dashboard;
pub mod notice;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;
