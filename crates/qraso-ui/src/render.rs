use std::fmt::Write;

use colored::{ColoredString, Colorize};
use qraso_types::{
    AnalysisEntry, DashboardRow, FacingMode, Notice, NoticeLevel, RiskLabel, VerdictRecord,
};

use crate::state::UiState;

const NOT_AVAILABLE: &str = "N/A";

pub const HELP: &str = "\
Commands:
  scan <text>            analyze scanned QR text
  upload <path>          upload a QR image (or just paste/drop a path)
  paste                  upload the image currently on the clipboard
  list                   show analyzed results
  detail <n>             expand or collapse result n
  report <n>             report a SUSPICIOUS result
  delete <n>             remove result n
  clear                  remove all results
  copy <n>               copy the URL of result n
  dashboard              show reported URLs
  view <n> / close       open or close dashboard row n
  camera start|stop|flip control the capture session
  help                   this message
  quit                   exit";

pub fn label_badge(label: RiskLabel) -> ColoredString {
    let text = label.as_str();
    match label {
        RiskLabel::Safe => text.green().bold(),
        RiskLabel::Suspicious => text.truecolor(255, 165, 0).bold(),
        RiskLabel::Dangerous => text.red().bold(),
        RiskLabel::Unknown => text.normal(),
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { NOT_AVAILABLE } else { value }
}

fn ssl_text(valid: bool) -> &'static str {
    if valid { "valid" } else { "invalid" }
}

fn phishtank_text(result: Option<bool>) -> &'static str {
    match result {
        Some(true) => "detected",
        Some(false) => "not detected",
        None => NOT_AVAILABLE,
    }
}

fn optional(value: Option<impl ToString>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Result list with expanded entries inlined
pub fn render_entries(state: &UiState, max_rows: usize) -> String {
    let entries = &state.entries;
    if entries.is_empty() {
        return "No analyzed QR codes yet.".dimmed().to_string();
    }

    let mut out = format!("Analyzed results ({})\n", entries.len());
    for (i, entry) in entries.iter().take(max_rows).enumerate() {
        let position = i + 1;
        let _ = write!(
            out,
            "{position:>3}. {}  [{}]",
            entry.record.original_url,
            label_badge(entry.record.label)
        );
        if entry.reported_count > 0 {
            let _ = write!(out, "  reported {}x", entry.reported_count);
        }
        if entry.is_escalated() {
            let _ = write!(out, " {}", "(on warning list)".red());
        }
        out.push('\n');

        if state.is_expanded(entry.id) {
            out.push_str(&render_detail(entry, position));
        }
    }

    if entries.len() > max_rows {
        let _ = writeln!(out, "     … and {} more", entries.len() - max_rows);
    }

    out.trim_end().to_string()
}

pub fn render_detail(entry: &AnalysisEntry, position: usize) -> String {
    let record = &entry.record;
    let mut out = String::new();
    let _ = writeln!(out, "       domain:      {}", or_na(&record.domain));
    let _ = writeln!(out, "       final url:   {}", or_na(&record.final_url));
    let _ = writeln!(out, "       ssl:         {}", ssl_text(record.ssl_valid));
    let _ = writeln!(
        out,
        "       whois date:  {}",
        optional(record.whois_creation_date.as_deref())
    );
    let _ = writeln!(
        out,
        "       virustotal:  {}",
        optional(record.virustotal_score.as_ref())
    );
    let _ = writeln!(
        out,
        "       phishtank:   {}",
        phishtank_text(record.phishtank_result)
    );
    let _ = writeln!(out, "       reported:    {}", entry.reported_count);
    if entry.is_reportable() {
        let _ = writeln!(
            out,
            "       {}",
            format!("type `report {position}` to report this URL").yellow()
        );
    }
    out
}

pub fn render_dashboard(rows: &[DashboardRow]) -> String {
    if rows.is_empty() {
        return "No reported URLs.".dimmed().to_string();
    }

    let width = rows
        .iter()
        .map(|r| r.record.original_url.chars().count())
        .max()
        .unwrap_or(0)
        .max(3);

    let mut out = format!("{:>3} | {:<width$} | Risk\n", "No.", "URL");
    let _ = writeln!(out, "{}", "-".repeat(width + 13));
    for row in rows {
        let _ = writeln!(
            out,
            "{:>3} | {:<width$} | {}",
            row.index.0,
            row.record.original_url,
            label_badge(row.record.label)
        );
    }
    out.push_str("type `view <n>` for details");
    out
}

fn record_lines(out: &mut String, record: &VerdictRecord) {
    let _ = writeln!(out, "  Original URL: {}", or_na(&record.original_url));
    let _ = writeln!(out, "  Final URL:    {}", or_na(&record.final_url));
    let _ = writeln!(out, "  Domain:       {}", or_na(&record.domain));
    let _ = writeln!(out, "  SSL:          {}", ssl_text(record.ssl_valid));
    let _ = writeln!(
        out,
        "  WHOIS date:   {}",
        optional(record.whois_creation_date.as_deref())
    );
    let _ = writeln!(
        out,
        "  VirusTotal:   {}",
        optional(record.virustotal_score.as_ref())
    );
    let _ = writeln!(
        out,
        "  PhishTank:    {}",
        phishtank_text(record.phishtank_result)
    );
    let _ = writeln!(out, "  Risk:         {}", label_badge(record.label));
}

pub fn render_modal(row: &DashboardRow) -> String {
    let mut out = format!("Reported URL {}\n", row.index);
    record_lines(&mut out, &row.record);
    out.push_str("type `close` to dismiss");
    out
}

pub fn render_notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Info => format!("{} {}", "info:".cyan(), notice.message),
        NoticeLevel::Error => format!("{} {}", "error:".red().bold(), notice.message),
    }
}

pub fn render_capture_status(
    scanning: bool,
    facing: FacingMode,
    last_scanned: Option<&str>,
) -> String {
    let mut out = if scanning {
        format!("Camera on ({} facing)", facing.constraint())
    } else {
        "Camera off".to_string()
    };
    if let Some(last) = last_scanned {
        let _ = write!(out, ", last scan: {last}");
    }
    out
}
