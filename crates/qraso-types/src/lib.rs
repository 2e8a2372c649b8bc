pub mod types;
pub mod verdict;

pub use types::*;
pub use verdict::{
    AnalysisEntry, DashboardRow, DisplayIndex, ESCALATION_THRESHOLD, EntryId, RiskLabel,
    VerdictRecord, VirusTotalScore,
};
