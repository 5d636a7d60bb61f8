//! Customer operations.

use leafpress_core::{Customer, CustomerDetails, UserId};
use tracing::instrument;

use super::types::{Ack, MassEmailBody, UserDetailsResponse, UserListResponse};
use super::{ApiClient, ApiError};

impl ApiClient {
    /// List customers.
    ///
    /// `sort` is passed through to the backend (`newest`, `oldest`,
    /// `most_orders`, `highest_spent`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn list_customers(&self, sort: &str) -> Result<Vec<Customer>, ApiError> {
        let response: UserListResponse = self.get(&format!("/admin/users?sort={sort}")).await?;
        Ok(response.users)
    }

    /// Fetch one customer with full order history.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id, or another error if
    /// the request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_customer_details(&self, id: &UserId) -> Result<CustomerDetails, ApiError> {
        let response: UserDetailsResponse = self.get(&format!("/admin/users/{id}")).await?;
        Ok(response.user)
    }

    /// Send one email to a list of customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, emails, body), fields(recipient_count = emails.len()))]
    pub async fn send_mass_email(
        &self,
        emails: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), ApiError> {
        let payload = MassEmailBody {
            user_emails: emails,
            subject,
            body,
        };
        let _: Ack = self.post("/admin/mass-email", &payload).await?;
        Ok(())
    }
}
