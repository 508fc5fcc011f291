use std::sync::Arc;

use async_trait::async_trait;

use super::{FormCoordinator, Submission};
use crate::api::RepositoryError;
use crate::models::{ContactForm, ContactMessage, ValidationError};
use crate::repository::ContactRepository;

/// Contact page message to the club organisers
pub struct ContactSubmission {
    repository: Arc<dyn ContactRepository>,
}

#[async_trait]
impl Submission for ContactSubmission {
    type Form = ContactForm;
    type Request = ContactMessage;

    fn validate(&self, form: &ContactForm) -> Result<ContactMessage, ValidationError> {
        form.validate()
    }

    async fn send(&self, request: &ContactMessage) -> Result<(), RepositoryError> {
        self.repository.submit_contact_message(request).await
    }

    fn success_title(&self) -> String {
        "Message Sent!".to_string()
    }
}

pub type ContactCoordinator = FormCoordinator<ContactSubmission>;

impl FormCoordinator<ContactSubmission> {
    pub fn open(repository: Arc<dyn ContactRepository>) -> Self {
        Self::new(ContactSubmission { repository })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::test_support::MockRepository;
    use crate::coordinator::{AttemptState, FailureReason, SubmitOutcome, SubmitResult};

    #[tokio::test]
    async fn test_contact_round_through_state_machine() {
        let repo = Arc::new(MockRepository::default());
        repo.respond_with(Err(RepositoryError::Unknown("Status 503".to_string())));
        let coordinator = ContactCoordinator::open(repo.clone());

        assert_eq!(
            coordinator.submit().await,
            SubmitResult::Invalid(ValidationError::MissingName)
        );

        coordinator.update_form(|form| {
            form.name = "Grace".to_string();
            form.email = "grace@navy.mil".to_string();
            form.message = "Workshop on COBOL forensics?".to_string();
        });

        assert_eq!(
            coordinator.submit().await,
            SubmitResult::Completed(SubmitOutcome::Failure(FailureReason::Unknown))
        );
        assert_eq!(coordinator.form().name, "Grace");

        assert_eq!(
            coordinator.submit().await,
            SubmitResult::Completed(SubmitOutcome::Success { title: "Message Sent!".to_string() })
        );
        assert_eq!(coordinator.state(), AttemptState::Succeeded);
        assert_eq!(repo.messages.lock().unwrap().len(), 2);

        coordinator.reset();
        assert_eq!(coordinator.form(), ContactForm::default());
    }
}
