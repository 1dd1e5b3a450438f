//! Saved progress overview.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use reqform_core::schema;
use reqform_types::form::{ProgressSnapshot, TOTAL_STEPS};

use crate::cli::display::{format_millis, format_time, format_value, preview, progress_bar};
use crate::state::AppState;

/// Display where the form stands: current step, answers so far, results.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let storage = state.form_storage();
    let progress = storage.load_progress().await;
    let results = storage.load_results().await;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "progress": progress.as_ref().map(|p| serde_json::json!({
                "current_step": p.current_step,
                "total_steps": TOTAL_STEPS,
                "answered": p.form_data.len(),
                "saved_at": p.timestamp,
            })),
            "results": results.as_ref().map(|r| serde_json::json!({
                "id": r.id,
                "generated_at": r.timestamp,
            })),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} reqform v{}",
        style("📝").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Progress ──").dim());
    match &progress {
        Some(snapshot) => print_progress(snapshot),
        None => {
            println!("  No saved progress.");
            println!(
                "  Start with: {}",
                style("reqform fill").yellow()
            );
        }
    }
    println!();

    println!("  {}", style("── Results ──").dim());
    match &results {
        Some(record) => {
            println!("  Id:        {}", style(&record.id).cyan());
            println!(
                "  Generated: {}",
                format_time(&record.timestamp)
            );
            println!(
                "  View with: {}",
                style("reqform results").yellow()
            );
        }
        None => println!("  Not generated yet."),
    }
    println!();

    println!("  {}", style("── System ──").dim());
    println!(
        "  Data dir: {}",
        style(state.data_dir.display()).dim()
    );
    println!();

    Ok(())
}

fn print_progress(snapshot: &ProgressSnapshot) {
    let step = schema::step(snapshot.current_step);
    let percent = f64::from(snapshot.current_step) / f64::from(TOTAL_STEPS) * 100.0;

    println!(
        "  Step:     {} of {}{}",
        style(snapshot.current_step).bold(),
        TOTAL_STEPS,
        step.map(|s| format!(" · {}", s.title)).unwrap_or_default()
    );
    println!("  Progress: {}", progress_bar(percent));
    println!("  Saved:    {}", format_millis(snapshot.timestamp));

    if snapshot.form_data.is_empty() {
        return;
    }

    println!();
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Step").fg(Color::White),
        Cell::new("Field").fg(Color::White),
        Cell::new("Answer").fg(Color::White),
    ]);

    for step in schema::STEPS.iter() {
        for field in step.fields {
            let Some(value) = snapshot.form_data.get(field.name) else {
                continue;
            };
            table.add_row(vec![
                Cell::new(step.number).fg(Color::DarkGrey),
                Cell::new(field.label).fg(Color::Cyan),
                Cell::new(preview(&format_value(field.name, value), 60)),
            ]);
        }
    }

    println!("{table}");
}
