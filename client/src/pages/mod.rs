//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration: form state, validation, and the
//! `AuthContext` calls it makes. Validators are plain functions so they can be
//! tested without a reactive runtime.

pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod not_found;
pub mod register;
pub mod reset_password;
