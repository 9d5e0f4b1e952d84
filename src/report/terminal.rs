use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use super::ReportData;
use crate::models::{ComplianceVerdict, DisplayStatus, DriverReport, Reminder};

/// Render a colored terminal report.
pub fn render(data: &ReportData<'_>, verbose: bool, quiet: bool) -> Result<()> {
    let summary = data.summary;
    let counts = &summary.counts;

    if quiet {
        let mut line = format!(
            "Drivers: {}  Critical: {}  Warning: {}  Compliant: {}  No Documents: {}",
            summary.drivers,
            summary.critical.to_string().red(),
            summary.warning.to_string().yellow(),
            summary.compliant.to_string().green(),
            summary.no_documents.to_string().dimmed(),
        );
        if let Some(reminders) = data.reminders {
            line.push_str(&format!("  Reminders: {}", reminders.len().to_string().cyan()));
        }
        println!("{}", line);
        return Ok(());
    }

    println!("\n {} v{}", "fleetdoc".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Source: {}", data.source);
    println!(" As of:  {}\n", data.as_of);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Drivers              : {:>4}", summary.drivers));
    println!(
        " │  {:<48} │",
        format!("{}  Critical          : {:>4}", "✗".red(), summary.critical)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Warning           : {:>4}", "⚠".yellow(), summary.warning)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Compliant         : {:>4}", "✓".green(), summary.compliant)
    );
    println!(
        " │  {:<48} │",
        format!("{}  No Documents      : {:>4}", "·".dimmed(), summary.no_documents)
    );
    println!(" │  {:<48} │", "");
    println!(" │  {:<48} │", format!("Documents            : {:>4}", counts.total));
    println!(
        " │  {:<48} │",
        format!("   expired {:>4}   expiring {:>4}", counts.expired, counts.expiring)
    );
    println!(
        " │  {:<48} │",
        format!("   pending {:>4}   verified {:>4}", counts.pending, counts.verified)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if !data.drivers.is_empty() {
        println!(" {} Drivers:\n", "[FLEET]".bold());
        render_driver_table(data.drivers);
        println!();
    }

    if data.show_documents {
        for report in data.drivers {
            let flagged = matches!(
                report.verdict,
                ComplianceVerdict::Critical | ComplianceVerdict::Warning
            );
            if report.documents.is_empty() || !(flagged || verbose) {
                continue;
            }
            let tag = match report.verdict {
                ComplianceVerdict::Critical => "[CRITICAL]".red().bold(),
                ComplianceVerdict::Warning => "[WARNING]".yellow().bold(),
                ComplianceVerdict::Compliant => "[OK]".green().bold(),
                ComplianceVerdict::NoDocuments => "[EMPTY]".dimmed().bold(),
            };
            println!(" {} {}:\n", tag, report.driver_name);
            render_document_table(report);
            println!();
        }
    }

    if let Some(reminders) = data.reminders {
        if reminders.is_empty() {
            println!(" {} Nothing expired or expiring.\n", "[REMINDERS]".cyan().bold());
        } else {
            println!(" {} Expired and expiring documents:\n", "[REMINDERS]".cyan().bold());
            render_reminder_table(reminders);
            println!();
        }
    }

    Ok(())
}

fn verdict_cell(verdict: ComplianceVerdict) -> Cell {
    let (label, color) = match verdict {
        ComplianceVerdict::Critical => ("✗ Critical", Color::Red),
        ComplianceVerdict::Warning => ("⚠ Warning", Color::Yellow),
        ComplianceVerdict::Compliant => ("✓ Compliant", Color::Green),
        ComplianceVerdict::NoDocuments => ("· No Documents", Color::DarkGrey),
    };
    Cell::new(label).fg(color).set_alignment(CellAlignment::Center)
}

fn status_cell(status: DisplayStatus) -> Cell {
    let color = match status {
        DisplayStatus::Expired => Color::Red,
        DisplayStatus::Expiring => Color::Yellow,
        DisplayStatus::Pending => Color::Magenta,
        DisplayStatus::Verified => Color::Green,
    };
    Cell::new(status.to_string()).fg(color)
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|n| Cell::new(n).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(columns));
    table
}

fn render_driver_table(drivers: &[DriverReport]) {
    let mut table = new_table(&[
        "Driver", "Docs", "Expected", "Expired", "Expiring", "Pending", "Verified", "Verdict",
    ]);

    for report in drivers {
        let c = &report.counts;
        table.add_row(vec![
            Cell::new(&report.driver_name),
            Cell::new(c.total),
            Cell::new(report.expected_total),
            Cell::new(c.expired),
            Cell::new(c.expiring),
            Cell::new(c.pending),
            Cell::new(c.verified),
            verdict_cell(report.verdict),
        ]);
    }

    println!("{}", table);
}

fn render_document_table(report: &DriverReport) {
    let mut table = new_table(&["Document", "Backend Status", "Expiry", "Days", "Status"]);

    for doc in &report.documents {
        table.add_row(vec![
            Cell::new(display_or_dash(&doc.document_type)),
            Cell::new(display_or_dash(&doc.status.to_string())),
            Cell::new(
                doc.expiry_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "—".to_string()),
            ),
            Cell::new(
                doc.days_until_expiry
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "—".to_string()),
            )
            .set_alignment(CellAlignment::Right),
            status_cell(doc.display_status),
        ]);
    }

    println!("{}", table);
}

fn render_reminder_table(reminders: &[Reminder]) {
    let mut table = new_table(&["Driver", "Document", "Expiry", "Due", "Status"]);

    for r in reminders {
        table.add_row(vec![
            Cell::new(&r.driver_name),
            Cell::new(display_or_dash(&r.document_type)),
            Cell::new(r.expiry_date),
            Cell::new(due_label(r.days_until_expiry)),
            status_cell(r.display_status),
        ]);
    }

    println!("{}", table);
}

fn display_or_dash(s: &str) -> &str {
    if s.trim().is_empty() {
        "—"
    } else {
        s
    }
}

/// Human wording for a signed day count.
fn due_label(days: i64) -> String {
    match days {
        d if d < -1 => format!("{} days ago", -d),
        -1 => "yesterday".to_string(),
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        d => format!("in {} days", d),
    }
}
