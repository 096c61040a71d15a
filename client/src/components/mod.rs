//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome and read/write state from Leptos context
//! providers.

pub mod toasts;
