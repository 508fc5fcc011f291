//! The event list held for the lifetime of one view.
//!
//! The list is fetched once, then treated as immutable. Background work is
//! owned by a `Pending` handle which aborts its task when dropped, so a view
//! that goes away never receives a late result.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::api::RepositoryError;
use crate::classify::ActiveWindow;
use crate::filter::{event_view, EventOrder, StatusCounts, StatusFilter};
use crate::models::Event;
use crate::repository::EventRepository;

/// A spawned task whose result is polled without blocking.
pub struct Pending<T> {
    handle: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> Pending<T> {
    /// Spawn `future` on the current tokio runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: Some(tokio::spawn(future)),
        }
    }

    /// The result, if the task has finished. Returns `None` after it has been taken.
    pub fn try_take(&mut self) -> Option<T> {
        let handle = self.handle.as_mut()?;
        if !handle.is_finished() {
            return None;
        }
        let joined = handle.now_or_never()?;
        self.handle = None;
        match joined {
            Ok(value) => Some(value),
            Err(e) => {
                error!(error = %e, "Background task did not complete");
                None
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl<T> Drop for Pending<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Loading lifecycle of the event list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotStarted,
    Loading,
    Ready,
    Failed(String),
}

type FetchResult = Result<Vec<Event>, RepositoryError>;

pub struct EventDirectory {
    events: Vec<Event>,
    state: LoadState,
    pending: Option<Pending<FetchResult>>,
}

impl Default for EventDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDirectory {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            state: LoadState::NotStarted,
            pending: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Spawn the one fetch for this view. Later calls are no-ops and return false.
    pub fn start_load(&mut self, repository: Arc<dyn EventRepository>) -> bool {
        if self.state != LoadState::NotStarted {
            return false;
        }
        debug!("Starting event fetch");
        self.state = LoadState::Loading;
        self.pending = Some(Pending::spawn(async move { repository.fetch_events().await }));
        true
    }

    /// Apply a finished fetch. Returns true when the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        if !pending.is_finished() {
            return false;
        }
        match pending.try_take() {
            Some(result) => {
                self.pending = None;
                self.apply(result);
                true
            }
            None => {
                self.pending = None;
                self.state = LoadState::Failed("event fetch was interrupted".to_string());
                true
            }
        }
    }

    /// Fetch in place and wait for it. Same once-only rule as `start_load`.
    pub async fn load(&mut self, repository: &dyn EventRepository) -> Result<&[Event], RepositoryError> {
        if self.state == LoadState::NotStarted {
            self.state = LoadState::Loading;
            match repository.fetch_events().await {
                Ok(events) => self.apply(Ok(events)),
                Err(e) => {
                    self.apply(Err(e.clone()));
                    return Err(e);
                }
            }
        }
        Ok(self.events.as_slice())
    }

    fn apply(&mut self, result: FetchResult) {
        match result {
            Ok(events) => {
                info!(count = events.len(), "Event directory ready");
                self.events = events;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                error!(error = %e, "Events fetch failed");
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Filtered, ordered view at `now`
    pub fn view(
        &self,
        filter: StatusFilter,
        order: EventOrder,
        now: DateTime<Utc>,
        window: ActiveWindow,
    ) -> Vec<&Event> {
        event_view(&self.events, filter, order, now, window)
    }

    pub fn counts(&self, now: DateTime<Utc>, window: ActiveWindow) -> StatusCounts {
        StatusCounts::tally(&self.events, now, window)
    }
}
