//! Terminal formatting shared by the wizard and the inspection commands.

use chrono::{DateTime, Local, TimeZone, Utc};
use console::style;

use reqform_core::schema::{self, FieldKind};
use reqform_types::form::{FieldValue, ResultsRecord};
use reqform_types::prompt::PromptKind;

const BAR_WIDTH: usize = 24;

/// Fixed-width text progress bar, e.g. `[██████░░░░░░] 50%`.
pub fn progress_bar(percent: f64) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        percent
    )
}

/// Human-readable rendering of a stored answer.
///
/// Range answers get their slider label; lists are comma-joined.
pub fn format_value(field: &str, value: &FieldValue) -> String {
    match value {
        FieldValue::Multi(items) if items.is_empty() => "(none)".to_string(),
        FieldValue::Multi(items) => items.join(", "),
        FieldValue::Text(text) => {
            let is_range = matches!(
                schema::field(field).map(|f| f.kind),
                Some(FieldKind::Range { .. })
            );
            match text.parse::<u32>() {
                Ok(years) if is_range => schema::years_label(years),
                _ => text.clone(),
            }
        }
    }
}

/// Truncate to `max` characters, appending `...` when shortened.
pub fn preview(text: &str, max: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() > max {
        let cut: String = single_line.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        single_line
    }
}

/// Local time for a millisecond epoch timestamp.
pub fn format_millis(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(at) => format_time(&at),
        None => "unknown".to_string(),
    }
}

pub fn format_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Heading shown above each prompt document.
pub fn prompt_title(kind: PromptKind) -> &'static str {
    match kind {
        PromptKind::Business => "Business Context",
        PromptKind::Audience => "Target Audience",
        PromptKind::Technical => "Technical Requirements",
        PromptKind::Master => "Master Prompt",
    }
}

/// Print every prompt document of `record`.
pub fn print_record(record: &ResultsRecord) {
    println!();
    println!(
        "  {} Results {} ({})",
        style("📋").bold(),
        style(&record.id).dim(),
        format_time(&record.timestamp)
    );

    for (kind, text) in record.prompts.iter() {
        print_prompt(kind, text);
    }
}

pub fn print_prompt(kind: PromptKind, text: &str) {
    println!();
    println!(
        "  {}",
        style(format!("── {} ──", prompt_title(kind))).dim()
    );
    println!();
    for line in text.lines() {
        println!("  {line}");
    }
}
