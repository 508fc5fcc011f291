use std::sync::Arc;

use async_trait::async_trait;

use super::{FormCoordinator, Submission};
use crate::api::RepositoryError;
use crate::models::{Event, RegistrationForm, RegistrationRequest, ValidationError};
use crate::repository::EventRepository;

/// Registration for one event. The event id is fixed when the dialog opens.
pub struct Registration {
    event_id: String,
    event_title: String,
    repository: Arc<dyn EventRepository>,
}

impl Registration {
    pub fn new(event: &Event, repository: Arc<dyn EventRepository>) -> Self {
        Self {
            event_id: event.id.clone(),
            event_title: event.title.clone(),
            repository,
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn event_title(&self) -> &str {
        &self.event_title
    }
}

#[async_trait]
impl Submission for Registration {
    type Form = RegistrationForm;
    type Request = RegistrationRequest;

    fn validate(&self, form: &RegistrationForm) -> Result<RegistrationRequest, ValidationError> {
        form.validate(&self.event_id)
    }

    async fn send(&self, request: &RegistrationRequest) -> Result<(), RepositoryError> {
        self.repository.submit_registration(request).await
    }

    fn success_title(&self) -> String {
        self.event_title.clone()
    }
}

pub type RegistrationCoordinator = FormCoordinator<Registration>;

impl FormCoordinator<Registration> {
    /// Open a registration dialog for `event`.
    pub fn open(event: &Event, repository: Arc<dyn EventRepository>) -> Self {
        Self::new(Registration::new(event, repository))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use tokio::sync::Notify;

    use super::*;
    use crate::coordinator::test_support::MockRepository;
    use crate::coordinator::{AttemptState, FailureReason, SubmitOutcome, SubmitResult};

    fn quantum_break() -> Event {
        Event {
            id: "e1".to_string(),
            title: "Quantum Break".to_string(),
            description: String::new(),
            starts_at: Utc::now() + Duration::days(7),
            ends_at: None,
            status_override: None,
            registration_link: None,
        }
    }

    fn fill(coordinator: &RegistrationCoordinator, name: &str, email: &str, team: &str) {
        assert!(coordinator.update_form(|form| {
            form.name = name.to_string();
            form.email = email.to_string();
            form.team_name = team.to_string();
        }));
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_network() {
        let repo = Arc::new(MockRepository::default());
        let coordinator = RegistrationCoordinator::open(&quantum_break(), repo.clone());
        fill(&coordinator, "", "a@b.com", "");

        let result = coordinator.submit().await;

        assert_eq!(result, SubmitResult::Invalid(ValidationError::MissingName));
        assert_eq!(coordinator.state(), AttemptState::Idle);
        assert_eq!(coordinator.validation_error(), Some(ValidationError::MissingName));
        assert_eq!(coordinator.outcome(), Some(SubmitOutcome::Failure(FailureReason::Validation)));
        assert_eq!(repo.call_count(), 0);
    }

    #[tokio::test]
    async fn test_double_submit_sends_once() {
        let gate = Arc::new(Notify::new());
        let repo = Arc::new(MockRepository::gated(gate.clone()));
        let coordinator = RegistrationCoordinator::open(&quantum_break(), repo.clone());
        fill(&coordinator, "Ada", "ada@club.edu", "");

        let (first, second, _) = tokio::join!(coordinator.submit(), coordinator.submit(), async {
            gate.notify_one();
        });

        assert_eq!(
            first,
            SubmitResult::Completed(SubmitOutcome::Success { title: "Quantum Break".to_string() })
        );
        assert_eq!(second, SubmitResult::InFlight);
        assert_eq!(repo.call_count(), 1);
    }

    #[tokio::test]
    async fn test_rejection_keeps_fields_and_allows_retry() {
        let repo = Arc::new(MockRepository::default());
        repo.respond_with(Err(RepositoryError::Rejected("duplicate registration".to_string())));
        let coordinator = RegistrationCoordinator::open(&quantum_break(), repo.clone());
        fill(&coordinator, "Ada", "ada@club.edu", "Root Cause");

        let result = coordinator.submit().await;
        assert_eq!(result, SubmitResult::Completed(SubmitOutcome::Failure(FailureReason::Conflict)));
        assert_eq!(coordinator.state(), AttemptState::Failed);
        let form = coordinator.form();
        assert_eq!(form.name, "Ada");
        assert_eq!(form.email, "ada@club.edu");
        assert_eq!(form.team_name, "Root Cause");

        // Fields stay editable and a new explicit submit goes through
        assert!(coordinator.update_form(|form| form.team_name.clear()));
        let retry = coordinator.submit().await;
        assert_eq!(
            retry,
            SubmitResult::Completed(SubmitOutcome::Success { title: "Quantum Break".to_string() })
        );
        assert_eq!(repo.call_count(), 2);

        let sent = repo.registrations.lock().unwrap();
        assert_eq!(sent[0].team_name(), Some("Root Cause"));
        assert_eq!(sent[1].team_name(), None);
        assert_eq!(sent[1].event_id(), "e1");
    }

    #[tokio::test]
    async fn test_success_then_reset_clears_fields() {
        let repo = Arc::new(MockRepository::default());
        let coordinator = RegistrationCoordinator::open(&quantum_break(), repo.clone());
        fill(&coordinator, "Ada", "ada@club.edu", "");

        coordinator.submit().await;
        assert_eq!(coordinator.state(), AttemptState::Succeeded);

        // Terminal until reset: no resubmission, no edits
        assert_eq!(coordinator.submit().await, SubmitResult::AlreadySucceeded);
        assert!(!coordinator.update_form(|form| form.name.push('!')));
        assert_eq!(repo.call_count(), 1);

        assert!(coordinator.reset());
        assert_eq!(coordinator.state(), AttemptState::Idle);
        assert_eq!(coordinator.form(), RegistrationForm::default());
        assert_eq!(coordinator.outcome(), None);
    }

    #[tokio::test]
    async fn test_failure_reason_clears_when_next_attempt_starts() {
        let gate = Arc::new(Notify::new());
        let repo = Arc::new(MockRepository::gated(gate.clone()));
        repo.respond_with(Err(RepositoryError::Network("connection refused".to_string())));
        let coordinator = RegistrationCoordinator::open(&quantum_break(), repo.clone());
        fill(&coordinator, "Ada", "ada@club.edu", "");

        gate.notify_one();
        coordinator.submit().await;
        assert_eq!(coordinator.outcome(), Some(SubmitOutcome::Failure(FailureReason::Network)));

        let (_, observed) = tokio::join!(coordinator.submit(), async {
            let snapshot = coordinator.snapshot();
            gate.notify_one();
            snapshot
        });
        assert_eq!(observed.state, AttemptState::Submitting);
        assert_eq!(observed.outcome, None);
        assert_eq!(coordinator.state(), AttemptState::Succeeded);
    }

    #[tokio::test]
    async fn test_cancelled_submit_releases_attempt() {
        let gate = Arc::new(Notify::new());
        let repo = Arc::new(MockRepository::gated(gate.clone()));
        let coordinator = RegistrationCoordinator::open(&quantum_break(), repo.clone());
        fill(&coordinator, "Ada", "ada@club.edu", "");

        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(20), coordinator.submit()).await;
        assert!(timed_out.is_err());
        assert_eq!(coordinator.state(), AttemptState::Idle);
        assert_eq!(coordinator.form().name, "Ada");

        // Fields are editable again and a fresh submit goes through
        assert!(coordinator.update_form(|form| form.team_name = "Root Cause".to_string()));
        gate.notify_one();
        assert_eq!(
            coordinator.submit().await,
            SubmitResult::Completed(SubmitOutcome::Success { title: "Quantum Break".to_string() })
        );
        assert_eq!(repo.call_count(), 2);
    }

    #[tokio::test]
    async fn test_close_discards_in_flight_result() {
        let gate = Arc::new(Notify::new());
        let repo = Arc::new(MockRepository::gated(gate.clone()));
        let coordinator = RegistrationCoordinator::open(&quantum_break(), repo.clone());
        fill(&coordinator, "Ada", "ada@club.edu", "");

        let (result, _) = tokio::join!(coordinator.submit(), async {
            coordinator.close();
            gate.notify_one();
        });

        assert_eq!(result, SubmitResult::Discarded);
        assert_eq!(coordinator.outcome(), None);
        assert_eq!(coordinator.submit().await, SubmitResult::Closed);
        assert_eq!(repo.call_count(), 1);
    }
}
