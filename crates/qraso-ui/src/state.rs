use std::collections::HashSet;

use qraso_types::{AnalysisEntry, DashboardRow, DisplayIndex, EntryId, FacingMode};

/// UI-specific state (separate from AppState)
#[derive(Debug, Default)]
pub struct UiState {
    pub entries: Vec<AnalysisEntry>,
    pub expanded: HashSet<EntryId>,
    pub dashboard: Vec<DashboardRow>,
    pub modal: Option<DisplayIndex>,
    pub scanning: bool,
    pub facing: FacingMode,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entry snapshot, forgetting expansion of entries that are gone
    pub fn set_entries(&mut self, entries: Vec<AnalysisEntry>) {
        let live: HashSet<EntryId> = entries.iter().map(|e| e.id).collect();
        self.expanded.retain(|id| live.contains(id));
        self.entries = entries;
    }

    /// Entry at a 1-based list position
    pub fn entry_at(&self, position: usize) -> Option<&AnalysisEntry> {
        position
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
    }

    /// Flip the detail view of the entry at `position`. Returns the new state.
    pub fn toggle_detail(&mut self, position: usize) -> Option<bool> {
        let id = self.entry_at(position)?.id;
        if self.expanded.remove(&id) {
            Some(false)
        } else {
            self.expanded.insert(id);
            Some(true)
        }
    }

    pub fn is_expanded(&self, id: EntryId) -> bool {
        self.expanded.contains(&id)
    }

    /// Indices are re-derived on every fetch, so an open modal cannot survive a reload
    pub fn set_dashboard(&mut self, rows: Vec<DashboardRow>) {
        self.dashboard = rows;
        self.modal = None;
    }

    pub fn open_modal(&mut self, index: usize) -> Option<&DashboardRow> {
        let row = self.dashboard.iter().find(|r| r.index == DisplayIndex(index))?;
        self.modal = Some(row.index);
        Some(row)
    }

    pub fn modal_row(&self) -> Option<&DashboardRow> {
        let index = self.modal?;
        self.dashboard.iter().find(|r| r.index == index)
    }

    /// Returns whether a modal was open
    pub fn close_modal(&mut self) -> bool {
        self.modal.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qraso_types::{RiskLabel, VerdictRecord};

    fn entry(id: u64) -> AnalysisEntry {
        AnalysisEntry::new(
            EntryId(id),
            VerdictRecord {
                original_url: format!("http://{id}.example"),
                final_url: String::new(),
                domain: String::new(),
                ssl_valid: false,
                whois_creation_date: None,
                virustotal_score: None,
                phishtank_result: None,
                label: RiskLabel::Suspicious,
            },
        )
    }

    #[test]
    fn toggle_flips_expansion() {
        let mut state = UiState::new();
        state.set_entries(vec![entry(1), entry(2)]);

        assert_eq!(state.toggle_detail(2), Some(true));
        assert!(state.is_expanded(EntryId(2)));
        assert_eq!(state.toggle_detail(2), Some(false));
        assert!(!state.is_expanded(EntryId(2)));
        assert_eq!(state.toggle_detail(0), None);
        assert_eq!(state.toggle_detail(3), None);
    }

    #[test]
    fn expanded_ids_are_pruned_with_their_entries() {
        let mut state = UiState::new();
        state.set_entries(vec![entry(1), entry(2)]);
        state.toggle_detail(1);
        state.toggle_detail(2);

        state.set_entries(vec![entry(2)]);

        assert_eq!(state.expanded.len(), 1);
        assert!(state.is_expanded(EntryId(2)));
    }

    #[test]
    fn reloading_dashboard_closes_the_modal() {
        let mut state = UiState::new();
        let row = DashboardRow {
            index: DisplayIndex(1),
            record: entry(1).record,
        };
        state.set_dashboard(vec![row.clone()]);

        assert!(state.open_modal(1).is_some());
        assert!(state.open_modal(2).is_none());
        assert_eq!(state.modal_row(), Some(&row));

        state.set_dashboard(vec![row]);
        assert!(state.modal_row().is_none());
        assert!(!state.close_modal());
    }
}
