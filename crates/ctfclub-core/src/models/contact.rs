use serde::Serialize;

use super::ValidationError;
use crate::utils::is_valid_email;

/// Contact page fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<ContactMessage, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        let message = self.message.trim();
        if message.is_empty() {
            return Err(ValidationError::MissingMessage);
        }
        Ok(ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}

/// A `contact_messages` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    name: String,
    email: String,
    message: String,
}

impl ContactMessage {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_validation_order() {
        let mut form = ContactForm::default();
        assert_eq!(form.validate(), Err(ValidationError::MissingName));
        form.name = "Grace".to_string();
        assert_eq!(form.validate(), Err(ValidationError::InvalidEmail));
        form.email = "grace@navy.mil".to_string();
        assert_eq!(form.validate(), Err(ValidationError::MissingMessage));
        form.message = "  Can we host a workshop?  ".to_string();
        let msg = form.validate().expect("valid");
        assert_eq!(msg.message(), "Can we host a workshop?");
        assert_eq!(msg.name(), "Grace");
    }
}
