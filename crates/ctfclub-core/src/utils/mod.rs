//! Utility functions for string formatting and input checks.

pub mod format;
pub mod validate;

pub use format::{cmp_ignore_case, truncate_string};
pub use validate::is_valid_email;
