//! Abstraction boundary to the external persistence service.
//!
//! `ApiClient` is the production implementation; everything else in the
//! crate depends only on these traits, which is the sole route to the network.

use async_trait::async_trait;

use crate::api::RepositoryError;
use crate::models::{ContactMessage, Event, RegistrationRequest};

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// All events, newest scheduled time first. Never cached.
    async fn fetch_events(&self) -> Result<Vec<Event>, RepositoryError>;

    /// One create operation scoped to `request.event_id()`. No internal retry.
    async fn submit_registration(&self, request: &RegistrationRequest) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn submit_contact_message(&self, message: &ContactMessage) -> Result<(), RepositoryError>;
}
