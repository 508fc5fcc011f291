//! Submission lifecycle for one open form dialog.
//!
//! A `FormCoordinator` walks a single attempt through
//! `Idle -> Validating -> Submitting -> {Succeeded, Failed}` and is the only
//! place the at-most-one-in-flight rule is enforced. One coordinator is
//! scoped to one open dialog; the presentation layer creates a new one per
//! dialog and calls `close` when the dialog goes away.

pub mod contact;
pub mod registration;

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::api::RepositoryError;
use crate::models::ValidationError;

pub use contact::{ContactCoordinator, ContactSubmission};
pub use registration::{Registration, RegistrationCoordinator};

/// Where the current attempt is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Why an attempt failed, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Network,
    Validation,
    Conflict,
    Unknown,
}

impl From<&RepositoryError> for FailureReason {
    fn from(err: &RepositoryError) -> Self {
        match err {
            RepositoryError::Network(_) => FailureReason::Network,
            RepositoryError::Rejected(_) => FailureReason::Conflict,
            RepositoryError::Decode(_) | RepositoryError::Unknown(_) => FailureReason::Unknown,
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Network => write!(f, "network"),
            FailureReason::Validation => write!(f, "validation"),
            FailureReason::Conflict => write!(f, "conflict"),
            FailureReason::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of a finished attempt. `Success` echoes what was submitted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success { title: String },
    Failure(FailureReason),
}

/// What a call to `submit` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// The request was sent and resolved
    Completed(SubmitOutcome),
    /// Local validation refused the form; nothing was sent
    Invalid(ValidationError),
    /// Another submission on this dialog is still running; no-op
    InFlight,
    /// The attempt already succeeded and must be `reset` first; no-op
    AlreadySucceeded,
    /// The dialog was closed while the request was in flight
    Discarded,
    /// The dialog is closed
    Closed,
}

/// The form-specific half of a coordinator: how to validate and where to send.
#[async_trait]
pub trait Submission: Send + Sync {
    type Form: Clone + Default + Send;
    type Request: Send + Sync;

    fn validate(&self, form: &Self::Form) -> Result<Self::Request, ValidationError>;

    async fn send(&self, request: &Self::Request) -> Result<(), RepositoryError>;

    /// Echoed back in `SubmitOutcome::Success`
    fn success_title(&self) -> String;
}

#[derive(Debug)]
struct Attempt<F> {
    state: AttemptState,
    form: F,
    outcome: Option<SubmitOutcome>,
    validation: Option<ValidationError>,
    closed: bool,
}

impl<F: Default> Attempt<F> {
    fn fresh() -> Self {
        Self {
            state: AttemptState::Idle,
            form: F::default(),
            outcome: None,
            validation: None,
            closed: false,
        }
    }
}

/// Point-in-time copy of an attempt for rendering
#[derive(Debug, Clone)]
pub struct AttemptSnapshot<F> {
    pub state: AttemptState,
    pub form: F,
    pub outcome: Option<SubmitOutcome>,
    pub validation: Option<ValidationError>,
}

/// Puts an attempt back to `Idle` if the `submit` future is dropped mid-send.
struct SendGuard<'a, S: Submission> {
    coordinator: &'a FormCoordinator<S>,
    armed: bool,
}

impl<S: Submission> SendGuard<'_, S> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S: Submission> Drop for SendGuard<'_, S> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut attempt = self.coordinator.lock();
        if attempt.state == AttemptState::Submitting {
            debug!("Submission cancelled before it resolved");
            attempt.state = AttemptState::Idle;
        }
    }
}

pub struct FormCoordinator<S: Submission> {
    submission: S,
    attempt: Mutex<Attempt<S::Form>>,
}

impl<S: Submission> FormCoordinator<S> {
    pub fn new(submission: S) -> Self {
        Self {
            submission,
            attempt: Mutex::new(Attempt::fresh()),
        }
    }

    // The lock is never held across an await, so a poisoned lock only means a
    // panic elsewhere mid-update; the state inside is still a valid variant.
    fn lock(&self) -> MutexGuard<'_, Attempt<S::Form>> {
        self.attempt.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn submission(&self) -> &S {
        &self.submission
    }

    pub fn state(&self) -> AttemptState {
        self.lock().state
    }

    pub fn form(&self) -> S::Form {
        self.lock().form.clone()
    }

    pub fn outcome(&self) -> Option<SubmitOutcome> {
        self.lock().outcome.clone()
    }

    pub fn validation_error(&self) -> Option<ValidationError> {
        self.lock().validation
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state(), AttemptState::Submitting)
    }

    pub fn snapshot(&self) -> AttemptSnapshot<S::Form> {
        let attempt = self.lock();
        AttemptSnapshot {
            state: attempt.state,
            form: attempt.form.clone(),
            outcome: attempt.outcome.clone(),
            validation: attempt.validation,
        }
    }

    /// Edit the form fields. Refused while submitting, after success, or once closed.
    pub fn update_form(&self, edit: impl FnOnce(&mut S::Form)) -> bool {
        let mut attempt = self.lock();
        if attempt.closed
            || matches!(attempt.state, AttemptState::Submitting | AttemptState::Succeeded)
        {
            return false;
        }
        edit(&mut attempt.form);
        true
    }

    /// Validate the current fields and, if they pass, send them once.
    pub async fn submit(&self) -> SubmitResult {
        let request = {
            let mut attempt = self.lock();
            if attempt.closed {
                return SubmitResult::Closed;
            }
            match attempt.state {
                AttemptState::Validating | AttemptState::Submitting => {
                    debug!("Submission already in flight, ignoring");
                    return SubmitResult::InFlight;
                }
                AttemptState::Succeeded => return SubmitResult::AlreadySucceeded,
                AttemptState::Idle | AttemptState::Failed => {}
            }

            attempt.state = AttemptState::Validating;
            attempt.outcome = None;
            attempt.validation = None;

            match self.submission.validate(&attempt.form) {
                Ok(request) => {
                    attempt.state = AttemptState::Submitting;
                    request
                }
                Err(e) => {
                    debug!(error = %e, "Form failed validation");
                    attempt.state = AttemptState::Idle;
                    attempt.validation = Some(e);
                    attempt.outcome = Some(SubmitOutcome::Failure(FailureReason::Validation));
                    return SubmitResult::Invalid(e);
                }
            }
        };

        let guard = SendGuard {
            coordinator: self,
            armed: true,
        };
        let result = self.submission.send(&request).await;
        guard.disarm();

        let mut attempt = self.lock();
        if attempt.closed {
            debug!("Dialog closed during submission, discarding result");
            return SubmitResult::Discarded;
        }

        let outcome = match result {
            Ok(()) => {
                let title = self.submission.success_title();
                info!(title = %title, "Submission succeeded");
                attempt.state = AttemptState::Succeeded;
                SubmitOutcome::Success { title }
            }
            Err(e) => {
                warn!(error = %e, "Submission failed");
                attempt.state = AttemptState::Failed;
                SubmitOutcome::Failure(FailureReason::from(&e))
            }
        };
        attempt.outcome = Some(outcome.clone());
        SubmitResult::Completed(outcome)
    }

    /// Start a fresh attempt with empty fields. Refused while a submission is in flight.
    pub fn reset(&self) -> bool {
        let mut attempt = self.lock();
        if matches!(attempt.state, AttemptState::Submitting) {
            return false;
        }
        let closed = attempt.closed;
        *attempt = Attempt::fresh();
        attempt.closed = closed;
        true
    }

    /// Tear down the dialog. A request still in flight resolves as `Discarded`.
    pub fn close(&self) {
        self.lock().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}
