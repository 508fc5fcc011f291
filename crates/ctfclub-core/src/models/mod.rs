//! Data models for the club's backend entities.
//!
//! - `Event`, `EventStatus`, `EventRecord`: competitions and their wire rows
//! - `RegistrationForm`, `RegistrationRequest`: event sign-up
//! - `ContactForm`, `ContactMessage`: contact page lead capture

pub mod contact;
pub mod event;
pub mod registration;

pub use contact::{ContactForm, ContactMessage};
pub use event::{parse_timestamp, Event, EventRecord, EventStatus};
pub use registration::{RegistrationForm, RegistrationRequest, ValidationError};
