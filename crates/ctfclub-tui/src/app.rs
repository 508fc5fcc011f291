//! Application state management for the ctfclub terminal front end.
//!
//! `App` holds only view state: which tab and filter are selected, the open
//! dialog, and the last notification. Everything with rules behind it lives
//! in `ctfclub_core`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use ctfclub_core::{
    ActiveWindow, ApiClient, Config, ContactCoordinator, ContactRepository, Event,
    EventDirectory, EventOrder, EventRepository, FailureReason, Pending,
    RegistrationCoordinator, StatusFilter, SubmitOutcome, SubmitResult,
};
use ctfclub_core::winners::{hall_of_fame, EventWinners};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for single-line form inputs (name, email, team)
const MAX_FIELD_LENGTH: usize = 80;

/// Maximum length for the contact message body
const MAX_MESSAGE_LENGTH: usize = 1000;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Events,
    Winners,
    Contact,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Events => "Events",
            Tab::Winners => "Hall of Fame",
            Tab::Contact => "Contact",
        }
    }

    pub const ALL: [Tab; 3] = [Tab::Events, Tab::Winners, Tab::Contact];

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Events => Tab::Winners,
            Tab::Winners => Tab::Contact,
            Tab::Contact => Tab::Events,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Events => Tab::Contact,
            Tab::Winners => Tab::Events,
            Tab::Contact => Tab::Winners,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Registering,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Focused control in the registration dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationFocus {
    Name,
    Email,
    Team,
    Button,
}

impl RegistrationFocus {
    pub fn next(&self) -> Self {
        match self {
            RegistrationFocus::Name => RegistrationFocus::Email,
            RegistrationFocus::Email => RegistrationFocus::Team,
            RegistrationFocus::Team => RegistrationFocus::Button,
            RegistrationFocus::Button => RegistrationFocus::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            RegistrationFocus::Name => RegistrationFocus::Button,
            RegistrationFocus::Email => RegistrationFocus::Name,
            RegistrationFocus::Team => RegistrationFocus::Email,
            RegistrationFocus::Button => RegistrationFocus::Team,
        }
    }
}

/// Focused control on the contact tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactFocus {
    Name,
    Email,
    Message,
    Button,
}

impl ContactFocus {
    pub fn next(&self) -> Self {
        match self {
            ContactFocus::Name => ContactFocus::Email,
            ContactFocus::Email => ContactFocus::Message,
            ContactFocus::Message => ContactFocus::Button,
            ContactFocus::Button => ContactFocus::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            ContactFocus::Name => ContactFocus::Button,
            ContactFocus::Email => ContactFocus::Name,
            ContactFocus::Message => ContactFocus::Email,
            ContactFocus::Button => ContactFocus::Message,
        }
    }
}

/// Toast-style notification shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub detail: String,
    pub is_error: bool,
}

impl Notice {
    pub fn registration(outcome: &SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Success { title } => Notice {
                title: "Registration Successful!".to_string(),
                detail: format!("You're registered for {}. Check your email for confirmation.", title),
                is_error: false,
            },
            SubmitOutcome::Failure(reason) => Notice {
                title: "Registration Failed".to_string(),
                detail: failure_detail(*reason).to_string(),
                is_error: true,
            },
        }
    }

    pub fn contact(outcome: &SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Success { title } => Notice {
                title: title.clone(),
                detail: "We'll be in touch soon.".to_string(),
                is_error: false,
            },
            SubmitOutcome::Failure(reason) => Notice {
                title: "Submission Failed".to_string(),
                detail: failure_detail(*reason).to_string(),
                is_error: true,
            },
        }
    }
}

fn failure_detail(reason: FailureReason) -> &'static str {
    match reason {
        FailureReason::Validation => "Please check the highlighted fields.",
        FailureReason::Network | FailureReason::Conflict | FailureReason::Unknown => {
            "Something went wrong. Please try again."
        }
    }
}

/// Open registration dialog for one event
pub struct RegistrationDialog {
    pub coordinator: Arc<RegistrationCoordinator>,
    pub focus: RegistrationFocus,
    pending: Option<Pending<SubmitResult>>,
}

/// Contact tab form
pub struct ContactPanel {
    pub coordinator: Arc<ContactCoordinator>,
    pub focus: ContactFocus,
    pending: Option<Pending<SubmitResult>>,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub api: Arc<ApiClient>,
    pub active_window: ActiveWindow,

    pub directory: EventDirectory,

    // UI State
    pub state: AppState,
    pub current_tab: Tab,
    pub filter: StatusFilter,
    pub order: EventOrder,
    pub event_selection: usize,
    pub winner_selection: usize,
    pub registration: Option<RegistrationDialog>,
    pub contact: ContactPanel,
    pub notice: Option<Notice>,
}

impl App {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let api = Arc::new(ApiClient::new(config)?);
        let contact_repo: Arc<dyn ContactRepository> = api.clone();

        Ok(Self {
            api,
            active_window: config.active_window(),
            directory: EventDirectory::new(),
            state: AppState::Normal,
            current_tab: Tab::Events,
            filter: StatusFilter::All,
            order: EventOrder::default(),
            event_selection: 0,
            winner_selection: 0,
            registration: None,
            contact: ContactPanel {
                coordinator: Arc::new(ContactCoordinator::open(contact_repo)),
                focus: ContactFocus::Name,
                pending: None,
            },
            notice: None,
        })
    }

    fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.api.clone()
    }

    /// Kick off the one event fetch for this session
    pub fn start(&mut self) {
        let repo = self.event_repository();
        self.directory.start_load(repo);
    }

    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Events under the current filter and order, classified against the current time.
    pub fn visible_events(&self) -> Vec<&Event> {
        self.directory
            .view(self.filter, self.order, self.now(), self.active_window)
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.visible_events().get(self.event_selection).copied()
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
        self.event_selection = 0;
    }

    pub fn move_selection(&mut self, down: bool) {
        self.event_selection = step_selection(self.event_selection, self.visible_events().len(), down);
    }

    // ===== Hall of fame =====

    pub fn selected_winners(&self) -> Option<&'static EventWinners> {
        hall_of_fame().get(self.winner_selection)
    }

    pub fn move_winner_selection(&mut self, down: bool) {
        self.winner_selection = step_selection(self.winner_selection, hall_of_fame().len(), down);
    }

    // ===== Registration dialog =====

    /// Open the dialog for the selected event if it takes registrations.
    pub fn open_registration(&mut self) -> bool {
        let now = self.now();
        let window = self.active_window;
        let event = match self.selected_event() {
            Some(e) if e.status_at(now, window).accepts_registration() => e.clone(),
            _ => return false,
        };
        debug!(event = %event.id, "Opening registration dialog");
        self.registration = Some(RegistrationDialog {
            coordinator: Arc::new(RegistrationCoordinator::open(&event, self.event_repository())),
            focus: RegistrationFocus::Name,
            pending: None,
        });
        self.state = AppState::Registering;
        true
    }

    /// Close the dialog; an unfinished submission is aborted and its result dropped.
    pub fn close_registration(&mut self) {
        if let Some(dialog) = self.registration.take() {
            dialog.coordinator.close();
        }
        self.state = AppState::Normal;
    }

    pub fn submit_registration(&mut self) {
        let Some(dialog) = self.registration.as_mut() else {
            return;
        };
        if dialog.pending.is_some() {
            return;
        }
        let coordinator = Arc::clone(&dialog.coordinator);
        dialog.pending = Some(Pending::spawn(async move { coordinator.submit().await }));
    }

    pub fn edit_registration(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(dialog) = self.registration.as_ref() else {
            return;
        };
        let focus = dialog.focus;
        dialog.coordinator.update_form(|form| match focus {
            RegistrationFocus::Name => edit(&mut form.name),
            RegistrationFocus::Email => edit(&mut form.email),
            RegistrationFocus::Team => edit(&mut form.team_name),
            RegistrationFocus::Button => {}
        });
    }

    // ===== Contact form =====

    pub fn submit_contact(&mut self) {
        if self.contact.pending.is_some() {
            return;
        }
        let coordinator = Arc::clone(&self.contact.coordinator);
        self.contact.pending = Some(Pending::spawn(async move { coordinator.submit().await }));
    }

    /// "Send Another Message": clear the form after a successful send
    pub fn reset_contact(&mut self) {
        if self.contact.coordinator.reset() {
            self.contact.focus = ContactFocus::Name;
        }
    }

    pub fn edit_contact(&mut self, edit: impl FnOnce(&mut String)) {
        let focus = self.contact.focus;
        self.contact.coordinator.update_form(|form| match focus {
            ContactFocus::Name => edit(&mut form.name),
            ContactFocus::Email => edit(&mut form.email),
            ContactFocus::Message => edit(&mut form.message),
            ContactFocus::Button => {}
        });
    }

    // ===== Background work =====

    /// Apply finished fetches and submissions
    pub fn check_background_tasks(&mut self) {
        if self.directory.poll() {
            self.event_selection = 0;
        }

        let finished = self
            .registration
            .as_mut()
            .and_then(|dialog| dialog.pending.as_mut().and_then(Pending::try_take));
        if let Some(result) = finished {
            if let Some(dialog) = self.registration.as_mut() {
                dialog.pending = None;
            }
            if let Some(notice) = notice_for(&result, Notice::registration) {
                self.notice = Some(notice);
            }
            // A successful registration closes the dialog
            if is_success(&result) {
                self.close_registration();
            }
        }

        if let Some(result) = self.contact.pending.as_mut().and_then(Pending::try_take) {
            self.contact.pending = None;
            if let Some(notice) = notice_for(&result, Notice::contact) {
                self.notice = Some(notice);
            }
        }
    }
}

/// One row up or down in a list of `len`, staying in bounds
fn step_selection(current: usize, len: usize, down: bool) -> usize {
    if down {
        (current + 1).min(len.saturating_sub(1))
    } else {
        current.saturating_sub(1)
    }
}

fn is_success(result: &SubmitResult) -> bool {
    matches!(result, SubmitResult::Completed(SubmitOutcome::Success { .. }))
}

/// Notification for a submit call, if it produced one worth showing
fn notice_for(result: &SubmitResult, build: fn(&SubmitOutcome) -> Notice) -> Option<Notice> {
    match result {
        SubmitResult::Completed(outcome) => {
            info!(?outcome, "Submission finished");
            Some(build(outcome))
        }
        SubmitResult::Invalid(e) => Some(Notice {
            title: "Check the form".to_string(),
            detail: e.to_string(),
            is_error: true,
        }),
        SubmitResult::InFlight
        | SubmitResult::AlreadySucceeded
        | SubmitResult::Discarded
        | SubmitResult::Closed => None,
    }
}

/// Check if an input character should be accepted
pub fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a character fits in a single-line field
pub fn can_add_field_char(current_len: usize, c: char) -> bool {
    current_len < MAX_FIELD_LENGTH && is_valid_input_char(c)
}

/// Check if a character fits in the contact message
pub fn can_add_message_char(current_len: usize, c: char) -> bool {
    current_len < MAX_MESSAGE_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ctfclub_core::ValidationError;

    #[test]
    fn test_tab_cycle_wraps() {
        assert_eq!(Tab::Events.next(), Tab::Winners);
        assert_eq!(Tab::Winners.next(), Tab::Contact);
        assert_eq!(Tab::Contact.next(), Tab::Events);
        for tab in Tab::ALL {
            assert_eq!(tab.next().prev(), tab);
        }
    }

    #[test]
    fn test_step_selection_clamps() {
        assert_eq!(step_selection(0, 2, true), 1);
        assert_eq!(step_selection(1, 2, true), 1);
        assert_eq!(step_selection(0, 2, false), 0);
        assert_eq!(step_selection(0, 0, true), 0);
    }

    #[test]
    fn test_registration_focus_cycle() {
        let mut focus = RegistrationFocus::Name;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, RegistrationFocus::Name);
        assert_eq!(RegistrationFocus::Name.prev(), RegistrationFocus::Button);
        assert_eq!(ContactFocus::Message.next(), ContactFocus::Button);
    }

    #[test]
    fn test_registration_notices() {
        let ok = Notice::registration(&SubmitOutcome::Success { title: "Quantum Break".to_string() });
        assert_eq!(ok.title, "Registration Successful!");
        assert!(ok.detail.contains("Quantum Break"));
        assert!(!ok.is_error);

        let dup = Notice::registration(&SubmitOutcome::Failure(FailureReason::Conflict));
        assert_eq!(dup.title, "Registration Failed");
        assert_eq!(dup.detail, "Something went wrong. Please try again.");
        assert!(dup.is_error);
    }

    #[test]
    fn test_notice_for_ignores_no_ops() {
        assert_eq!(notice_for(&SubmitResult::InFlight, Notice::registration), None);
        assert_eq!(notice_for(&SubmitResult::Discarded, Notice::registration), None);
        let invalid = notice_for(&SubmitResult::Invalid(ValidationError::InvalidEmail), Notice::contact)
            .expect("validation is shown");
        assert_eq!(invalid.detail, "A valid email address is required");
    }

    #[test]
    fn test_only_completed_success_closes_dialog() {
        assert!(is_success(&SubmitResult::Completed(SubmitOutcome::Success {
            title: "x".to_string()
        })));
        assert!(!is_success(&SubmitResult::Completed(SubmitOutcome::Failure(
            FailureReason::Network
        ))));
        assert!(!is_success(&SubmitResult::AlreadySucceeded));
    }

    #[test]
    fn test_contact_notice_uses_success_title() {
        let sent = Notice::contact(&SubmitOutcome::Success { title: "Message Sent!".to_string() });
        assert_eq!(sent.title, "Message Sent!");
        assert_eq!(sent.detail, "We'll be in touch soon.");
        let failed = Notice::contact(&SubmitOutcome::Failure(FailureReason::Unknown));
        assert_eq!(failed.title, "Submission Failed");
    }

    #[test]
    fn test_can_add_field_char() {
        assert!(can_add_field_char(0, 'a'));
        assert!(can_add_field_char(79, '@'));
        assert!(!can_add_field_char(80, 'a'));
        assert!(!can_add_field_char(0, '\n'));
        assert!(can_add_message_char(500, ' '));
        assert!(!can_add_message_char(1000, 'a'));
    }
}
