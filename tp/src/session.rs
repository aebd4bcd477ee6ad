//! Result slots for request/response features
//!
//! Each feature (destinations, food, hotels, itinerary) shows one result list.
//! Submitting again while a call is outstanding issues a newer ticket; when the
//! older call finishes its result is dropped instead of overwriting the newer one.

use std::fmt;

use tracing::{debug, warn};

/// Identifies one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// User-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

/// What became of a completed call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Failed,
    Stale,
}

/// The displayed result list of one feature
#[derive(Debug)]
pub struct ResultSlot<T> {
    items: Vec<T>,
    notice: Option<Notice>,
    latest: u64,
    loading: bool,
    failure: String,
}

impl<T> ResultSlot<T> {
    /// `failure` is the notification shown when a call fails, e.g.
    /// "Failed to suggest destinations. Please try again."
    pub fn new(failure: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            notice: None,
            latest: 0,
            loading: false,
            failure: failure.into(),
        }
    }

    /// Start a submission: clears the list and any notice
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.items.clear();
        self.notice = None;
        self.loading = true;
        debug!(ticket = self.latest, "ResultSlot::begin: called");
        Ticket(self.latest)
    }

    /// Finish a submission
    ///
    /// Only the latest ticket may change the slot. A failure leaves the list
    /// empty and records the notification.
    pub fn complete<E: fmt::Display>(&mut self, ticket: Ticket, result: Result<Vec<T>, E>) -> Outcome {
        if ticket.0 != self.latest {
            debug!(ticket = ticket.0, latest = self.latest, "ResultSlot::complete: stale response dropped");
            return Outcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                Outcome::Applied
            }
            Err(e) => {
                warn!(error = %e, "Request failed");
                self.items.clear();
                self.notice = Some(Notice {
                    title: "Error".to_string(),
                    description: self.failure.clone(),
                });
                Outcome::Failed
            }
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::{Mutex, oneshot};

    #[test]
    fn test_success_installs_items() {
        let mut slot = ResultSlot::new("Failed. Please try again.");
        let t = slot.begin();
        assert!(slot.is_loading());
        assert_eq!(slot.complete::<String>(t, Ok(vec!["Goa"])), Outcome::Applied);
        assert_eq!(slot.items(), &["Goa"]);
        assert!(!slot.is_loading());
        assert!(slot.notice().is_none());
    }

    #[test]
    fn test_failure_empties_and_notifies() {
        let mut slot = ResultSlot::new("Failed to suggest destinations. Please try again.");
        let t = slot.begin();
        slot.complete::<String>(t, Ok(vec!["Goa"]));

        let t = slot.begin();
        assert_eq!(slot.complete(t, Err::<Vec<&str>, _>("boom")), Outcome::Failed);
        assert!(slot.items().is_empty());
        let notice = slot.notice().unwrap();
        assert_eq!(notice.description, "Failed to suggest destinations. Please try again.");
    }

    #[test]
    fn test_stale_response_dropped() {
        let mut slot = ResultSlot::new("Failed");
        let first = slot.begin();
        let second = slot.begin();
        assert_eq!(slot.complete::<String>(second, Ok(vec!["Paris"])), Outcome::Applied);
        assert_eq!(slot.complete::<String>(first, Ok(vec!["Goa"])), Outcome::Stale);
        assert_eq!(slot.items(), &["Paris"]);
    }

    #[test]
    fn test_stale_failure_does_not_notify() {
        let mut slot = ResultSlot::new("Failed");
        let first = slot.begin();
        let second = slot.begin();
        assert_eq!(slot.complete(first, Err::<Vec<&str>, _>("late")), Outcome::Stale);
        assert!(slot.notice().is_none());
        assert!(slot.is_loading());
        slot.complete::<String>(second, Ok(vec!["Paris"]));
        assert_eq!(slot.items(), &["Paris"]);
    }

    #[tokio::test]
    async fn test_overlapping_tasks_latest_wins() {
        let slot = Arc::new(Mutex::new(ResultSlot::new("Failed")));
        let (release_first, wait_first) = oneshot::channel::<()>();

        let first = slot.lock().await.begin();
        let slow = {
            let slot = slot.clone();
            tokio::spawn(async move {
                let _ = wait_first.await;
                slot.lock().await.complete::<String>(first, Ok(vec!["old"]))
            })
        };

        let second = slot.lock().await.begin();
        slot.lock().await.complete::<String>(second, Ok(vec!["new"]));
        let _ = release_first.send(());

        assert_eq!(slow.await.unwrap(), Outcome::Stale);
        assert_eq!(slot.lock().await.items(), &["new"]);
    }
}
