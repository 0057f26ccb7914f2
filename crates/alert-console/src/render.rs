//! Plain-text rendering for the console views

use alerting::{Alert, AlertSummary, HistoryEntry, ProofAttachment};
use chrono::{DateTime, Utc};
use conveyor_data::{Conveyor, PlantStats};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIME_FORMAT).to_string()
}

/// Left-aligned table with a header row and a dashed rule
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.iter().map(|h| h.to_string()).collect())];
    out.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    out.extend(rows.iter().map(|row| line(row.clone())));
    out.join("\n")
}

/// Alert list with the same columns as the management table
pub fn alert_table(alerts: &[&Alert], total: usize) -> String {
    if alerts.is_empty() {
        return "No alerts match your filters".to_string();
    }

    let rows: Vec<Vec<String>> = alerts
        .iter()
        .map(|a| {
            vec![
                a.id.clone(),
                a.severity.label().to_string(),
                a.status().label().to_string(),
                a.category.to_string(),
                a.description.clone(),
                a.conveyor_name.clone(),
                timestamp(&a.timestamp),
                a.assigned().unwrap_or("Unassigned").to_string(),
            ]
        })
        .collect();

    format!(
        "{}\nShowing {} of {} alerts",
        table(
            &[
                "ID",
                "Severity",
                "Status",
                "Type",
                "Description",
                "Conveyor",
                "Timestamp",
                "Assigned To",
            ],
            &rows,
        ),
        alerts.len(),
        total
    )
}

pub fn alert_detail(alert: &Alert) -> String {
    let mut lines = vec![
        format!("{}  {}", alert.id, alert.description),
        format!("  Conveyor:  {} ({})", alert.conveyor_name, alert.conveyor_id),
        format!("  Type:      {}", alert.category),
        format!("  Severity:  {}", alert.severity.label()),
        format!("  Status:    {}", alert.status().label()),
        format!("  Raised:    {}", timestamp(&alert.timestamp)),
        format!("  Assigned:  {}", alert.assigned().unwrap_or("Unassigned")),
        format!("  History:   {} entries", alert.history().len()),
    ];
    let mut actions = Vec::new();
    if alert.status() == alerting::AlertStatus::New {
        actions.push("ack");
    }
    if alert.is_active() {
        actions.push("resolve");
    }
    actions.push(if alert.assigned().is_some() { "unassign" } else { "assign" });
    lines.push(format!("  Actions:   {}", actions.join(", ")));
    lines.join("\n")
}

/// Timeline in the order given
pub fn history<'a>(entries: impl IntoIterator<Item = &'a HistoryEntry>) -> String {
    let lines: Vec<String> = entries
        .into_iter()
        .map(|entry| {
            let mut text = format!("[{}] {}", timestamp(&entry.timestamp), entry.describe());
            if let Some(reason) = &entry.reason {
                text.push_str(&format!("\n    Reason: {}", reason));
            }
            if let Some(proof) = &entry.proof_file {
                text.push_str(&format!("\n    Proof attached: {}", proof));
            }
            text
        })
        .collect();

    if lines.is_empty() {
        "No history available".to_string()
    } else {
        lines.join("\n")
    }
}

/// Draft state of the acknowledgment form
pub fn dialog(
    alert: &Alert,
    reason: &str,
    proof: Option<&ProofAttachment>,
    can_confirm: bool,
) -> String {
    format!(
        "Acknowledge alert {}: {}\n  Reason:  {}\n  Proof:   {}\n  Confirm: {}",
        alert.id,
        alert.description,
        if reason.is_empty() { "(required)" } else { reason },
        proof.map(|p| p.name()).unwrap_or("(none)"),
        if can_confirm { "enabled" } else { "disabled (reason required)" },
    )
}

pub fn summary(summary: &AlertSummary, stats: &PlantStats) -> String {
    let distribution: Vec<String> = summary
        .severity_distribution()
        .iter()
        .map(|(severity, count)| format!("{} {}", severity.label(), count))
        .collect();

    [
        format!(
            "Alerts: {} total, {} active ({} critical, {} warning), {} unassigned",
            summary.total,
            summary.active,
            summary.critical_active,
            summary.warning_active,
            summary.unassigned_active
        ),
        format!("Active by severity: {}", distribution.join(", ")),
        format!(
            "Plant: {} conveyors ({} operational, {} warning, {} critical), {} t/h, {:.1}% avg efficiency",
            stats.total_conveyors,
            stats.operational,
            stats.warning,
            stats.critical,
            stats.total_throughput_tph,
            stats.avg_efficiency_pct
        ),
    ]
    .join("\n")
}

pub fn conveyors(conveyors: &[Conveyor]) -> String {
    let rows: Vec<Vec<String>> = conveyors
        .iter()
        .map(|c| {
            vec![
                c.id.clone(),
                c.name.clone(),
                c.status.to_string(),
                format!("{}%", c.efficiency_pct),
                format!("{:.1} mm", c.avg_particle_size_mm),
                format!("{} t/h", c.throughput_tph),
                c.alert_count.to_string(),
                c.location.clone(),
            ]
        })
        .collect();
    table(
        &["ID", "Name", "Status", "Efficiency", "Avg Size", "Throughput", "Alerts", "Location"],
        &rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::{AlertCategory, Severity};
    use chrono::TimeZone;

    fn alert() -> Alert {
        Alert::new(
            "a003",
            "c003",
            "Stockpile Reclaimer",
            AlertCategory::ForeignObject,
            Severity::Critical,
            Utc.with_ymd_and_hms(2025, 5, 30, 7, 28, 3).unwrap(),
            "Metal object detected on belt",
        )
    }

    #[test]
    fn test_alert_table_columns() {
        let alert = alert();
        let text = alert_table(&[&alert], 6);
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("ID"));
        assert!(lines[2].contains("Metal object detected on belt"));
        assert!(lines[2].contains("2025-05-30 07:28:03"));
        assert!(lines[2].contains("Unassigned"));
        assert_eq!(lines[3], "Showing 1 of 6 alerts");
    }

    #[test]
    fn test_empty_views() {
        assert_eq!(alert_table(&[], 6), "No alerts match your filters");
        assert_eq!(history(std::iter::empty()), "No history available");
    }

    #[test]
    fn test_detail_lists_available_actions() {
        let text = alert_detail(&alert());
        assert!(text.contains("Actions:   ack, resolve, assign"));
    }
}
