use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Whole-string match: local part, then dotted domain ending in an alphabetic TLD
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$"
    )
    .expect("email pattern compiles");
}

/// Purely syntactic email check. Callers trim before validating.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+ctf@cs.university.edu"));
        assert!(is_valid_email("Root_Cause-42@ctf-club.io"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@localhost"));
        assert!(!is_valid_email("a@b..com"));
        assert!(!is_valid_email("a@.b.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b.c"));
    }

    #[test]
    fn test_pattern_is_anchored() {
        // A valid address embedded in other text is not an address
        assert!(!is_valid_email("mail a@b.com now"));
        assert!(!is_valid_email("a@b.com\n"));
    }
}
