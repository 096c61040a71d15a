//! Contact operations that ride on the signed-in session.
//!
//! ERROR HANDLING
//! ==============
//! A `401` from any contact endpoint means the bearer token is no longer
//! accepted: the session is expired through [`AuthContext`] before the error
//! message is returned to the page.

#[cfg(test)]
#[path = "contacts_test.rs"]
mod contacts_test;

use super::auth::{AuthContext, NOT_SIGNED_IN_MESSAGE};
use crate::net::api::ApiError;
use crate::net::types::{Contact, ContactStats};

pub const CREATE_CONTACT_FAILED_MESSAGE: &str = "Failed to create contact";
pub const CONTACT_NOT_FOUND_MESSAGE: &str = "No contact found for that registration number";
pub const STATS_FAILED_MESSAGE: &str = "Failed to load contact stats";

impl AuthContext {
    /// Create a contact record.
    ///
    /// # Errors
    ///
    /// Returns the message to display when signed out or when the request is
    /// rejected or fails.
    pub async fn create_contact(&self, contact: &Contact) -> Result<(), String> {
        let token = self.require_token()?;
        let result = self.api().create_contact(&token, contact).await;
        self.settle(result, CREATE_CONTACT_FAILED_MESSAGE).await
    }

    /// Look a contact up by registration number.
    ///
    /// # Errors
    ///
    /// Returns the message to display when signed out, when nothing matches,
    /// or when the request fails.
    pub async fn search_contact(&self, registration_number: &str) -> Result<Contact, String> {
        let token = self.require_token()?;
        let result = self.api().search_contact(&token, registration_number.trim()).await;
        self.settle(result, CONTACT_NOT_FOUND_MESSAGE).await
    }

    /// Fetch the dashboard counters.
    ///
    /// # Errors
    ///
    /// Returns the message to display when signed out or when the request
    /// fails.
    pub async fn contact_stats(&self) -> Result<ContactStats, String> {
        let token = self.require_token()?;
        let result = self.api().contact_stats(&token).await;
        self.settle(result, STATS_FAILED_MESSAGE).await
    }

    fn require_token(&self) -> Result<String, String> {
        self.token().ok_or_else(|| NOT_SIGNED_IN_MESSAGE.to_owned())
    }

    async fn settle<T>(&self, result: Result<T, ApiError>, fallback: &str) -> Result<T, String> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                log::warn!("contact request failed: {err}");
                if err.is_unauthorized() {
                    self.expire_session().await;
                }
                Err(err.user_message(fallback))
            }
        }
    }
}
