use serde::Serialize;
use thiserror::Error;

use crate::utils::is_valid_email;

/// Locally detected bad input. Never reaches the network.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    MissingName,

    #[error("A valid email address is required")]
    InvalidEmail,

    #[error("Message is required")]
    MissingMessage,
}

/// Editable registration dialog fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub team_name: String,
}

impl RegistrationForm {
    /// Build a request for `event_id`, or report the first invalid field.
    pub fn validate(&self, event_id: &str) -> Result<RegistrationRequest, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        let team_name = self.team_name.trim();

        Ok(RegistrationRequest {
            event_id: event_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            team_name: (!team_name.is_empty()).then(|| team_name.to_string()),
        })
    }
}

/// One validated registration, serialized as a `registrations` row.
///
/// Only `RegistrationForm::validate` constructs these, so a request in hand
/// always has a non-empty name and a syntactically valid email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    event_id: String,
    name: String,
    email: String,
    team_name: Option<String>,
}

impl RegistrationRequest {
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn team_name(&self) -> Option<&str> {
        self.team_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, team: &str) -> RegistrationForm {
        RegistrationForm {
            name: name.to_string(),
            email: email.to_string(),
            team_name: team.to_string(),
        }
    }

    #[test]
    fn test_validate_trims_and_drops_empty_team() {
        let req = form("  Ada  ", " ada@club.edu ", "   ").validate("e1").expect("valid");
        assert_eq!(req.event_id(), "e1");
        assert_eq!(req.name(), "Ada");
        assert_eq!(req.email(), "ada@club.edu");
        assert_eq!(req.team_name(), None);
    }

    #[test]
    fn test_validate_rejects_blank_name_first() {
        assert_eq!(form("", "a@b.com", "").validate("e1"), Err(ValidationError::MissingName));
        assert_eq!(form("   ", "nope", "").validate("e1"), Err(ValidationError::MissingName));
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        assert_eq!(form("Ada", "ada.club.edu", "").validate("e1"), Err(ValidationError::InvalidEmail));
        assert_eq!(form("Ada", "", "").validate("e1"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_wire_shape() {
        let req = form("Ada", "ada@club.edu", "Root Cause").validate("e1").expect("valid");
        let json = serde_json::to_value(&req).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({
                "event_id": "e1",
                "name": "Ada",
                "email": "ada@club.edu",
                "team_name": "Root Cause"
            })
        );

        let solo = form("Ada", "ada@club.edu", "").validate("e1").expect("valid");
        assert_eq!(serde_json::to_value(&solo).expect("serializes")["team_name"], serde_json::Value::Null);
    }
}
