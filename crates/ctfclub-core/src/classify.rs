//! Event status classification.
//!
//! `classify` is pure: the caller passes the instant to classify against, so
//! results are never cached against a stale clock.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Event, EventStatus};

/// Hours an event counts as active after its start when it has no end time.
/// Overridable through configuration.
pub const DEFAULT_ACTIVE_WINDOW_HOURS: i64 = 24;

/// Upper bound on the active window: ten years of hours.
pub const MAX_ACTIVE_WINDOW_HOURS: i64 = 24 * 365 * 10;

/// How long an event without an explicit end stays `active` after it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveWindow(Duration);

impl ActiveWindow {
    /// Clamped to `0..=MAX_ACTIVE_WINDOW_HOURS`.
    pub fn hours(hours: i64) -> Self {
        Self(Duration::hours(hours.clamp(0, MAX_ACTIVE_WINDOW_HOURS)))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl Default for ActiveWindow {
    fn default() -> Self {
        Self::hours(DEFAULT_ACTIVE_WINDOW_HOURS)
    }
}

/// Status of `event` at `now`.
///
/// An override always wins. Otherwise the event is upcoming before it
/// starts, active from its start until its end (or until `window` has
/// elapsed when no end is recorded), and past after that.
pub fn classify(event: &Event, now: DateTime<Utc>, window: ActiveWindow) -> EventStatus {
    if let Some(status) = event.status_override {
        return status;
    }
    if now < event.starts_at {
        return EventStatus::Upcoming;
    }
    let ends_at = match event.ends_at {
        Some(end) => Some(end),
        None => event.starts_at.checked_add_signed(window.duration()),
    };
    // An end past the representable range never arrives
    match ends_at {
        Some(end) if now >= end => EventStatus::Past,
        _ => EventStatus::Active,
    }
}

impl Event {
    pub fn status_at(&self, now: DateTime<Utc>, window: ActiveWindow) -> EventStatus {
        classify(self, now, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(starts_at: DateTime<Utc>) -> Event {
        Event {
            id: "e1".to_string(),
            title: "Quantum Break".to_string(),
            description: String::new(),
            starts_at,
            ends_at: None,
            status_override: None,
            registration_link: None,
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_future_event_is_upcoming() {
        let e = event(start());
        let now = start() - Duration::days(3);
        assert_eq!(classify(&e, now, ActiveWindow::default()), EventStatus::Upcoming);
    }

    #[test]
    fn test_window_boundaries() {
        let e = event(start());
        let window = ActiveWindow::hours(24);
        assert_eq!(classify(&e, start(), window), EventStatus::Active);
        assert_eq!(classify(&e, start() + Duration::hours(23), window), EventStatus::Active);
        assert_eq!(classify(&e, start() + Duration::hours(24), window), EventStatus::Past);
    }

    #[test]
    fn test_zero_window_skips_active() {
        let e = event(start());
        let window = ActiveWindow::hours(0);
        assert_eq!(classify(&e, start() - Duration::seconds(1), window), EventStatus::Upcoming);
        assert_eq!(classify(&e, start(), window), EventStatus::Past);
    }

    #[test]
    fn test_explicit_end_beats_window() {
        let mut e = event(start());
        e.ends_at = Some(start() + Duration::hours(48));
        let window = ActiveWindow::hours(1);
        assert_eq!(classify(&e, start() + Duration::hours(30), window), EventStatus::Active);
        assert_eq!(classify(&e, start() + Duration::hours(48), window), EventStatus::Past);
    }

    #[test]
    fn test_override_wins_at_any_instant() {
        let instants = [
            start() - Duration::days(365),
            start(),
            start() + Duration::hours(2),
            start() + Duration::days(365),
        ];
        for status in EventStatus::ALL {
            let mut e = event(start());
            e.status_override = Some(status);
            for now in instants {
                assert_eq!(classify(&e, now, ActiveWindow::default()), status);
            }
        }
    }

    #[test]
    fn test_negative_window_clamps_to_zero() {
        assert_eq!(ActiveWindow::hours(-5).duration(), Duration::zero());
    }

    #[test]
    fn test_huge_window_is_capped() {
        let window = ActiveWindow::hours(1_000_000_000_000);
        assert_eq!(window, ActiveWindow::hours(MAX_ACTIVE_WINDOW_HOURS));
        assert_eq!(
            classify(&event(start()), start() + Duration::hours(1), window),
            EventStatus::Active
        );
    }

    #[test]
    fn test_window_past_end_of_time_stays_active() {
        let e = event(DateTime::<Utc>::MAX_UTC - Duration::hours(1));
        let window = ActiveWindow::hours(MAX_ACTIVE_WINDOW_HOURS);
        assert_eq!(classify(&e, DateTime::<Utc>::MAX_UTC, window), EventStatus::Active);
    }
}
