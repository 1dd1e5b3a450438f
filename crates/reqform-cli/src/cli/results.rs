//! Print previously generated prompts.

use anyhow::Result;
use console::style;

use reqform_types::prompt::PromptKind;

use crate::cli::display::{print_prompt, print_record};
use crate::state::AppState;

/// Show the stored results, or a single prompt of them.
pub async fn show_results(state: &AppState, kind: Option<PromptKind>, json: bool) -> Result<()> {
    let Some(record) = state.form_storage().load_results().await else {
        if json {
            println!("null");
        } else {
            println!();
            println!("  No results yet. Complete the form with {}", style("reqform fill").yellow());
            println!();
        }
        return Ok(());
    };

    match (kind, json) {
        (Some(kind), true) => {
            let prompt = serde_json::json!({
                "id": record.id,
                "kind": kind,
                "prompt": record.prompts.get(kind),
            });
            println!("{}", serde_json::to_string_pretty(&prompt)?);
        }
        (None, true) => println!("{}", serde_json::to_string_pretty(&record)?),
        (Some(kind), false) => {
            print_prompt(kind, record.prompts.get(kind));
            println!();
        }
        (None, false) => {
            print_record(&record);
            println!();
        }
    }

    Ok(())
}
