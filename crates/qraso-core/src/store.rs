use std::sync::Arc;

use qraso_types::{AnalysisEntry, EntryId, VerdictRecord};
use tokio::sync::RwLock;

pub type SharedStore = Arc<RwLock<ResultStore>>;

/// Outcome of `ResultStore::update_report_count`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCountUpdate {
    Applied { previous: u32, current: u32 },
    /// Incoming count was lower than the stored one and was ignored
    Stale { current: u32, incoming: u32 },
    Missing,
}

/// Ordered working set of analysis entries.
///
/// Insertion order is display order. Every operation is keyed by an
/// independent `EntryId`, so concurrent surfaces can apply their results in
/// any order.
#[derive(Debug)]
pub struct ResultStore {
    entries: Vec<AnalysisEntry>,
    next_id: u64,
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn append(&mut self, record: VerdictRecord) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;

        tracing::debug!("Appending {} ({}, {})", id, record.original_url, record.label);
        self.entries.push(AnalysisEntry::new(id, record));
        id
    }

    /// Returns false when `id` was not present
    pub fn delete_one(&mut self, id: EntryId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn delete_all(&mut self) -> usize {
        let cleared = self.entries.len();
        self.entries.clear();
        cleared
    }

    /// Report counts only move forward
    pub fn update_report_count(&mut self, id: EntryId, count: u32) -> ReportCountUpdate {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return ReportCountUpdate::Missing;
        };

        if count < entry.reported_count {
            tracing::warn!(
                "Ignoring stale report count for {}: {} < {}",
                id,
                count,
                entry.reported_count
            );
            return ReportCountUpdate::Stale {
                current: entry.reported_count,
                incoming: count,
            };
        }

        let previous = entry.reported_count;
        entry.reported_count = count;
        ReportCountUpdate::Applied {
            previous,
            current: count,
        }
    }

    pub fn list_all(&self) -> Vec<AnalysisEntry> {
        self.entries.clone()
    }

    pub fn get(&self, id: EntryId) -> Option<&AnalysisEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
