use qraso_types::AppEvent;

use crate::render;
use crate::state::UiState;

/// Apply an event from the app to the UI state. Returns text to print, if any.
pub fn handle_events(event: AppEvent, state: &mut UiState, max_rows: usize) -> Option<String> {
    match event {
        AppEvent::ShowEntries(entries) => {
            tracing::debug!("[UI] Showing {} entries", entries.len());
            state.set_entries(entries);
            Some(render::render_entries(state, max_rows))
        }
        AppEvent::ShowDashboard(rows) => {
            tracing::debug!("[UI] Showing {} dashboard rows", rows.len());
            state.set_dashboard(rows);
            Some(render::render_dashboard(&state.dashboard))
        }
        AppEvent::Notify(notice) => Some(render::render_notice(&notice)),
        AppEvent::CaptureStatus {
            scanning,
            facing,
            last_scanned,
        } => {
            let changed = state.scanning != scanning || state.facing != facing;
            state.scanning = scanning;
            state.facing = facing;
            changed.then(|| {
                render::render_capture_status(scanning, facing, last_scanned.as_deref())
            })
        }
        AppEvent::UploadStatus { busy, queued } => {
            tracing::debug!("[UI] Upload busy={busy} queued={queued}");
            (busy && queued > 0).then(|| format!("Analyzing upload ({queued} more queued)"))
        }
        AppEvent::BackendReady => Some("Ready. Type `help` for commands.".to_string()),
        other => {
            tracing::debug!("[UI] Ignoring event {:?}", std::mem::discriminant(&other));
            None
        }
    }
}
