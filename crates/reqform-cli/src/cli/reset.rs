//! Discard saved progress (and optionally results).

use anyhow::Result;
use console::style;
use dialoguer::Confirm;

use crate::state::AppState;

pub async fn reset(state: &AppState, results: bool, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let what = if results {
            "saved progress and generated results"
        } else {
            "saved progress"
        };
        let confirmed = Confirm::new()
            .with_prompt(format!("Discard {}?", style(what).red().bold()))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let storage = state.form_storage();
    storage.clear_progress().await?;
    if results {
        storage.clear_results().await?;
    }
    tracing::info!(results, "form storage reset");

    if json {
        let out = serde_json::json!({
            "progress_cleared": true,
            "results_cleared": results,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!();
        println!("  {} Saved progress discarded.", style("✓").green().bold());
        if results {
            println!("  {} Results discarded.", style("✓").green().bold());
        }
        println!();
    }

    Ok(())
}
