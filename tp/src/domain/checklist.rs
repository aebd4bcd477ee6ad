//! Checklist domain types

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single checklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Unique within the owning list, derived from creation time in ms
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// Ordered list of checklist items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checklist {
    items: Vec<ChecklistItem>,
}

impl Default for Checklist {
    /// The three generic items every new trip starts with
    fn default() -> Self {
        Self {
            items: vec![
                ChecklistItem::new(1, "Book flights"),
                ChecklistItem::new(2, "Book accommodation"),
                ChecklistItem::new(3, "Pack passport and visas"),
            ],
        }
    }
}

impl Checklist {
    /// An empty checklist
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    pub fn from_items(items: Vec<ChecklistItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ChecklistItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True while the list still holds exactly the default items
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|i| i.completed).count()
    }

    /// Next free id: the creation time unless an existing id is already at or past it
    fn next_id(&self, now_ms: u64) -> u64 {
        let last = self.items.iter().map(|i| i.id).max().unwrap_or(0);
        let candidate = now_ms.max(last.saturating_add(1));
        if !self.contains(candidate) {
            return candidate;
        }
        // Ids exhausted at the top of the range; reuse the lowest free one
        debug!(last, "Checklist::next_id: id range exhausted");
        (1..).find(|id| !self.contains(*id)).unwrap_or(candidate)
    }

    fn contains(&self, id: u64) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    /// Append a user-entered item, returning its id
    ///
    /// Blank text is ignored.
    pub fn add(&mut self, text: &str) -> Option<u64> {
        self.add_at(text, super::now_ms())
    }

    pub(crate) fn add_at(&mut self, text: &str, now_ms: u64) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Checklist::add: blank text ignored");
            return None;
        }
        let id = self.next_id(now_ms);
        self.items.push(ChecklistItem::new(id, text));
        debug!(id, "Checklist::add: item added");
        Some(id)
    }

    /// Flip the completed flag of an item, returning the new state
    pub fn toggle(&mut self, id: u64) -> Option<bool> {
        debug!(id, "Checklist::toggle: called");
        let item = self.items.iter_mut().find(|i| i.id == id)?;
        item.completed = !item.completed;
        Some(item.completed)
    }

    /// Remove an item; false when no item has that id
    pub fn delete(&mut self, id: u64) -> bool {
        debug!(id, "Checklist::delete: called");
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Replace the whole list with generated item texts, all uncompleted
    pub fn replace_with<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.replace_with_at(texts, super::now_ms());
    }

    pub(crate) fn replace_with_at<I, S>(&mut self, texts: I, now_ms: u64)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        debug!(now_ms, "Checklist::replace_with: called");
        self.items.clear();
        for text in texts {
            self.add_at(text.as_ref(), now_ms);
        }
        debug!(count = self.items.len(), "Checklist::replace_with: list replaced");
    }
}
