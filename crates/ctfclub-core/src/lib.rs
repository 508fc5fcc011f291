//! Core library for the CTF club event directory.
//!
//! This crate owns everything that is not presentation:
//!
//! - `api`: REST client for the managed backend and the repository error taxonomy
//! - `repository`: the async traits the rest of the crate talks to
//! - `models`: events, registration/contact forms and their validated requests
//! - `classify`: time/override based event status
//! - `filter`: status selection, sort policies and status counts
//! - `coordinator`: the per-dialog submission state machine
//! - `directory`: once-per-view event loading with cancellation on drop
//! - `config`: backend location and classifier tuning
//! - `winners`: the static hall of fame

pub mod api;
pub mod classify;
pub mod config;
pub mod coordinator;
pub mod directory;
pub mod filter;
pub mod models;
pub mod repository;
pub mod utils;
pub mod winners;

pub use api::{ApiClient, RepositoryError};
pub use classify::{classify, ActiveWindow, DEFAULT_ACTIVE_WINDOW_HOURS, MAX_ACTIVE_WINDOW_HOURS};
pub use config::Config;
pub use coordinator::{
    AttemptSnapshot, AttemptState, ContactCoordinator, ContactSubmission, FailureReason, FormCoordinator,
    Registration, RegistrationCoordinator, SubmitOutcome, SubmitResult, Submission,
};
pub use directory::{EventDirectory, LoadState, Pending};
pub use filter::{
    empty_message, event_view, filter_events, sort_events, EventOrder, StatusCounts,
    StatusFilter,
};
pub use models::{
    ContactForm, ContactMessage, Event, EventRecord, EventStatus, RegistrationForm,
    RegistrationRequest, ValidationError,
};
pub use repository::{ContactRepository, EventRepository};
