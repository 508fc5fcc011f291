//! Filtered and ordered views over a fetched event collection.
//!
//! Every function here borrows the collection and returns a new `Vec<&Event>`;
//! the fetched order is never touched.

use chrono::{DateTime, Utc};

use crate::classify::{classify, ActiveWindow};
use crate::models::{Event, EventStatus};
use crate::utils::cmp_ignore_case;

/// Status selector offered by the filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Upcoming,
    Active,
    Past,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Upcoming,
        StatusFilter::Active,
        StatusFilter::Past,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Upcoming => "upcoming",
            StatusFilter::Active => "active",
            StatusFilter::Past => "past",
        }
    }

    /// The status this selector narrows to, `None` for `All`
    pub fn status(&self) -> Option<EventStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Upcoming => Some(EventStatus::Upcoming),
            StatusFilter::Active => Some(EventStatus::Active),
            StatusFilter::Past => Some(EventStatus::Past),
        }
    }

    pub fn matches(&self, status: EventStatus) -> bool {
        self.status().map_or(true, |wanted| wanted == status)
    }

    /// Get the next selector (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Upcoming,
            StatusFilter::Upcoming => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Past,
            StatusFilter::Past => StatusFilter::All,
        }
    }

    /// Get the previous selector (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Past,
            StatusFilter::Upcoming => StatusFilter::All,
            StatusFilter::Active => StatusFilter::Upcoming,
            StatusFilter::Past => StatusFilter::Active,
        }
    }
}

impl From<EventStatus> for StatusFilter {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Upcoming => StatusFilter::Upcoming,
            EventStatus::Active => StatusFilter::Active,
            EventStatus::Past => StatusFilter::Past,
        }
    }
}

// Sorting options for the event list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventOrder {
    /// Fetch order, which is scheduled time descending
    #[default]
    AsFetched,
    Date { ascending: bool },
    Title { ascending: bool },
}

impl EventOrder {
    /// Switch to date order, or flip direction if already sorting by date
    pub fn toggle_date(self) -> Self {
        match self {
            EventOrder::Date { ascending } => EventOrder::Date { ascending: !ascending },
            _ => EventOrder::Date { ascending: true },
        }
    }

    /// Switch to title order, or flip direction if already sorting by title
    pub fn toggle_title(self) -> Self {
        match self {
            EventOrder::Title { ascending } => EventOrder::Title { ascending: !ascending },
            _ => EventOrder::Title { ascending: true },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventOrder::AsFetched => "newest",
            EventOrder::Date { ascending: true } => "date ▲",
            EventOrder::Date { ascending: false } => "date ▼",
            EventOrder::Title { ascending: true } => "title ▲",
            EventOrder::Title { ascending: false } => "title ▼",
        }
    }
}

/// Events whose status at `now` matches `filter`, in input order.
pub fn filter_events<'a>(
    events: &'a [Event],
    filter: StatusFilter,
    now: DateTime<Utc>,
    window: ActiveWindow,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| filter.matches(classify(event, now, window)))
        .collect()
}

/// Stable sort of a view. `AsFetched` leaves it as is.
pub fn sort_events(view: &mut [&Event], order: EventOrder) {
    match order {
        EventOrder::AsFetched => {}
        EventOrder::Date { ascending } => view.sort_by(|a, b| {
            let cmp = a.starts_at.cmp(&b.starts_at);
            if ascending { cmp } else { cmp.reverse() }
        }),
        EventOrder::Title { ascending } => view.sort_by(|a, b| {
            let cmp = cmp_ignore_case(&a.title, &b.title).then_with(|| a.starts_at.cmp(&b.starts_at));
            if ascending { cmp } else { cmp.reverse() }
        }),
    }
}

/// Filter then order, the view the event list renders.
pub fn event_view<'a>(
    events: &'a [Event],
    filter: StatusFilter,
    order: EventOrder,
    now: DateTime<Utc>,
    window: ActiveWindow,
) -> Vec<&'a Event> {
    let mut view = filter_events(events, filter, now, window);
    sort_events(&mut view, order);
    view
}

/// Per-status totals for the filter bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub upcoming: usize,
    pub active: usize,
    pub past: usize,
}

impl StatusCounts {
    pub fn tally(events: &[Event], now: DateTime<Utc>, window: ActiveWindow) -> Self {
        events.iter().fold(Self::default(), |mut counts, event| {
            match classify(event, now, window) {
                EventStatus::Upcoming => counts.upcoming += 1,
                EventStatus::Active => counts.active += 1,
                EventStatus::Past => counts.past += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.upcoming + self.active + self.past
    }

    pub fn for_filter(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.total(),
            StatusFilter::Upcoming => self.upcoming,
            StatusFilter::Active => self.active,
            StatusFilter::Past => self.past,
        }
    }
}

/// Text shown when a filter leaves nothing to display
pub fn empty_message(filter: StatusFilter) -> String {
    match filter {
        StatusFilter::All => "There are currently no events. Please check back later.".to_string(),
        other => format!(
            "There are currently no {} events. Please check back later.",
            other.label()
        ),
    }
}
