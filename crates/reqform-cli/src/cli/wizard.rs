//! Interactive form wizard (`reqform fill`).
//!
//! The form session runs on the async runtime and owns the controller. The
//! dialoguer prompts block, so they run on a dedicated input thread:
//!
//! ```text
//!  session task ──UiCommand──▶ input thread (dialoguer)
//!       ▲                            │
//!       └────────FormEvent───────────┘
//! ```
//!
//! The terminal presenter forwards everything the controller reports to the
//! input thread, which prints it and prompts for the next step whenever a
//! step is rendered.
//!
//! With `--json` only the final record goes to stdout. Everything else the
//! wizard prints goes to stderr, where dialoguer draws its prompts.

use std::collections::HashMap;
use std::sync::mpsc as std_mpsc;

use anyhow::{anyhow, Result};
use console::{style, Term};
use dialoguer::{Input, MultiSelect, Select};
use tokio::sync::mpsc;

use reqform_core::form::controller::FormController;
use reqform_core::form::presenter::{
    FormPresenter, NavigationView, Notification, NotificationKind, SaveStatus,
};
use reqform_core::form::session::{run_session, AutosavePolicy, FormEvent, SessionEnd};
use reqform_core::schema::{self, FieldDefinition, FieldKind, StepDefinition};
use reqform_core::storage::adapter::FormStorage;
use reqform_core::storage::kv_store::KvStore;
use reqform_infra::memory::InMemoryKvStore;
use reqform_types::config::FormConfig;
use reqform_types::form::{FieldValue, FormData, ResultsRecord};
use reqform_types::validation::FieldStatus;

use crate::cli::display::{print_record, progress_bar};
use crate::state::AppState;

const EVENT_BUFFER: usize = 64;
const SKIP_OPTION: &str = "(leave blank)";

/// Fill the form against the persistent store.
pub async fn fill(state: &AppState, fresh: bool, json: bool) -> Result<()> {
    let policy = AutosavePolicy::from(&state.config.autosave);
    let end = run_wizard(state.form_storage(), policy, fresh, json).await?;
    finish(end, false, json)
}

/// Fill the form in memory only.
pub async fn fill_ephemeral(config: &FormConfig, json: bool) -> Result<()> {
    let policy = AutosavePolicy::from(&config.autosave);
    let storage = FormStorage::new(InMemoryKvStore::new(&config.storage));
    let end = run_wizard(storage, policy, true, json).await?;
    finish(end, true, json)
}

/// Where the wizard writes everything except the `--json` record.
fn chrome(json: bool) -> Term {
    if json {
        Term::stderr()
    } else {
        Term::stdout()
    }
}

async fn run_wizard<S>(
    storage: FormStorage<S>,
    policy: AutosavePolicy,
    fresh: bool,
    json: bool,
) -> Result<SessionEnd>
where
    S: KvStore + 'static,
{
    let resuming = !fresh && storage.load_progress().await.is_some();
    let term = chrome(json);

    term.write_line("")?;
    term.write_line(&format!(
        "  {} Website requirements",
        style("📝").bold()
    ))?;
    if resuming {
        term.write_line(&format!(
            "  {}",
            style("Resuming your saved progress.").dim()
        ))?;
    }
    term.write_line(&format!(
        "  {}",
        style("Answers are saved automatically. Press Ctrl+C to stop at any time.").dim()
    ))?;

    let (ui_tx, ui_rx) = std_mpsc::channel();
    let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);

    let mut controller = FormController::new(storage, TerminalPresenter::new(ui_tx));

    let prompter = Prompter::new(event_tx.clone(), term, json);
    let input = std::thread::spawn(move || prompter.run(ui_rx));

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = event_tx.send(FormEvent::Unload).await;
        }
    });

    if fresh {
        controller.render();
    } else {
        controller.restore().await;
    }

    let end = run_session(&mut controller, event_rx, policy).await;
    interrupt.abort();
    drop(controller);

    // After completion the input thread is idle and still has the results to
    // print. After an unload it may be stuck in a prompt, so it is left behind.
    if matches!(end, SessionEnd::Completed(_)) {
        tokio::task::spawn_blocking(move || input.join())
            .await?
            .map_err(|_| anyhow!("input thread panicked"))?;
    }

    Ok(end)
}

fn finish(end: SessionEnd, ephemeral: bool, json: bool) -> Result<()> {
    let term = chrome(json);
    match end {
        SessionEnd::Completed(record) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else if !ephemeral {
                term.write_line(&format!(
                    "  View again with: {}",
                    style("reqform results").yellow()
                ))?;
                term.write_line("")?;
            }
        }
        SessionEnd::Unloaded => {
            term.write_line("")?;
            if ephemeral {
                term.write_line("  Session ended. Nothing was kept.")?;
            } else {
                term.write_line(&format!(
                    "  Progress saved. Run {} to pick up where you left off.",
                    style("reqform fill").yellow()
                ))?;
            }
            term.write_line("")?;
        }
    }
    Ok(())
}

/// What the session asks the input thread to show.
#[derive(Debug)]
enum UiCommand {
    Step {
        number: u8,
        view: NavigationView,
        data: FormData,
    },
    Field(FieldStatus),
    Save(SaveStatus),
    Notice(Notification),
    Results(Box<ResultsRecord>),
}

/// Forwards controller output to the input thread.
pub struct TerminalPresenter {
    ui: std_mpsc::Sender<UiCommand>,
}

impl TerminalPresenter {
    fn new(ui: std_mpsc::Sender<UiCommand>) -> Self {
        Self { ui }
    }

    fn send(&self, command: UiCommand) {
        if self.ui.send(command).is_err() {
            tracing::trace!("input thread gone, dropping ui command");
        }
    }
}

impl FormPresenter for TerminalPresenter {
    fn render_step(&mut self, step: &StepDefinition, view: &NavigationView, data: &FormData) {
        self.send(UiCommand::Step {
            number: step.number,
            view: view.clone(),
            data: data.clone(),
        });
    }

    fn apply_field_status(&mut self, status: &FieldStatus) {
        self.send(UiCommand::Field(status.clone()));
    }

    fn update_save_status(&mut self, status: &SaveStatus) {
        self.send(UiCommand::Save(status.clone()));
    }

    fn notify(&mut self, notification: Notification) {
        self.send(UiCommand::Notice(notification));
    }

    fn show_results(&mut self, record: &ResultsRecord) {
        self.send(UiCommand::Results(Box::new(record.clone())));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavChoice {
    Next,
    Back,
    SaveAndExit,
}

impl NavChoice {
    fn for_view(view: &NavigationView) -> Vec<NavChoice> {
        let mut choices = vec![NavChoice::Next];
        if view.previous_enabled {
            choices.push(NavChoice::Back);
        }
        choices.push(NavChoice::SaveAndExit);
        choices
    }

    fn label(&self, view: &NavigationView) -> &'static str {
        match self {
            NavChoice::Next => view.next_label,
            NavChoice::Back => "← Back",
            NavChoice::SaveAndExit => "Save & exit",
        }
    }

    fn event(&self) -> FormEvent {
        match self {
            NavChoice::Next => FormEvent::Next,
            NavChoice::Back => FormEvent::Previous,
            NavChoice::SaveAndExit => FormEvent::Unload,
        }
    }
}

/// Input-thread side: prints what the session reports and prompts for answers.
struct Prompter {
    events: mpsc::Sender<FormEvent>,
    errors: HashMap<String, String>,
    last_save: Option<SaveStatus>,
    term: Term,
    json: bool,
}

impl Prompter {
    fn new(events: mpsc::Sender<FormEvent>, term: Term, json: bool) -> Self {
        Self {
            events,
            errors: HashMap::new(),
            last_save: None,
            term,
            json,
        }
    }

    /// Process commands until the session drops its presenter.
    fn run(mut self, ui: std_mpsc::Receiver<UiCommand>) {
        while let Ok(command) = ui.recv() {
            let result = match command {
                UiCommand::Step { number, view, data } => self.prompt_step(number, &view, &data),
                UiCommand::Field(status) => {
                    self.track_field(status);
                    Ok(())
                }
                UiCommand::Save(status) => self.show_save(status),
                UiCommand::Notice(notification) => self.show_notice(&notification),
                UiCommand::Results(record) => {
                    if !self.json {
                        print_record(&record);
                        println!();
                    }
                    Ok(())
                }
            };

            if let Err(e) = result {
                tracing::debug!(error = %e, "input stopped, unloading session");
                let _ = self.events.blocking_send(FormEvent::Unload);
                return;
            }
        }
    }

    fn emit(&self, event: FormEvent) -> Result<()> {
        self.events
            .blocking_send(event)
            .map_err(|_| anyhow!("form session has ended"))
    }

    fn track_field(&mut self, status: FieldStatus) {
        if status.valid {
            self.errors.remove(&status.field);
        } else {
            self.errors.insert(status.field, status.message);
        }
    }

    /// Failures are always shown; success only the first time and after a failure.
    fn show_save(&mut self, status: SaveStatus) -> Result<()> {
        let announce = match (&status, &self.last_save) {
            (SaveStatus::Failed(_), _) => true,
            (SaveStatus::Saved, None | Some(SaveStatus::Failed(_))) => true,
            (SaveStatus::Saved, Some(SaveStatus::Saved)) => false,
        };

        if announce {
            let line = match &status {
                SaveStatus::Saved => format!("  {}", style(status.indicator()).green().dim()),
                SaveStatus::Failed(reason) => format!(
                    "  {} {}",
                    style(status.indicator()).yellow(),
                    style(reason).dim()
                ),
            };
            self.term.write_line(&line)?;
        }
        self.last_save = Some(status);
        Ok(())
    }

    fn show_notice(&self, notification: &Notification) -> Result<()> {
        let (icon, message) = match notification.kind {
            NotificationKind::Success => (style("✓").green().bold(), style(&notification.message).green()),
            NotificationKind::Error => (style("✗").red().bold(), style(&notification.message).red()),
            NotificationKind::Info => (style("ℹ").cyan().bold(), style(&notification.message)),
        };
        self.term.write_line("")?;
        self.term.write_line(&format!("  {icon} {message}"))?;
        Ok(())
    }

    fn prompt_step(&mut self, number: u8, view: &NavigationView, data: &FormData) -> Result<()> {
        let Some(step) = schema::step(number) else {
            return Ok(());
        };

        self.term.write_line("")?;
        self.term.write_line(&format!(
            "  {} {}",
            style(format!("Step {} of {}", view.step, view.total_steps)).bold(),
            style(format!("· {}", step.title)).cyan()
        ))?;
        self.term
            .write_line(&format!("  {}", style(progress_bar(view.progress_percent)).dim()))?;
        self.term.write_line("")?;

        for field in step.fields {
            if let Some(message) = self.errors.get(field.name) {
                self.term
                    .write_line(&format!("  {} {}", style("✗").red(), style(message).red()))?;
            }

            let current = data.get(field.name);
            let value = prompt_field(&self.term, field, current)?;
            if current != Some(&value) {
                self.emit(FormEvent::FieldChanged {
                    field: field.name.to_string(),
                    value,
                })?;
            }
        }

        self.term.write_line("")?;
        let choices = NavChoice::for_view(view);
        let labels: Vec<&str> = choices.iter().map(|c| c.label(view)).collect();
        let selection = Select::new().items(&labels).default(0).interact()?;

        self.emit(choices[selection].event())
    }
}

/// One entry of a single-choice prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Choice {
    Listed(&'static str),
    /// A stored answer that is not one of the options.
    Saved(String),
    Blank,
}

impl Choice {
    fn label(&self) -> String {
        match self {
            Choice::Listed(option) => option.to_string(),
            Choice::Saved(value) => format!("{value} (saved answer)"),
            Choice::Blank => SKIP_OPTION.to_string(),
        }
    }

    fn into_value(self) -> FieldValue {
        match self {
            Choice::Listed(option) => FieldValue::Text(option.to_string()),
            Choice::Saved(value) => FieldValue::Text(value),
            Choice::Blank => FieldValue::Text(String::new()),
        }
    }
}

/// Entries for a select or radio field and the index the cursor starts on.
///
/// A stored answer outside the option list stays selectable and preselected,
/// so confirming the prompt keeps it.
fn single_choices(options: &'static [&'static str], current: &str) -> (Vec<Choice>, usize) {
    let mut choices: Vec<Choice> = options.iter().copied().map(Choice::Listed).collect();
    let default = match options.iter().position(|o| *o == current) {
        Some(index) => index,
        None => {
            if !current.trim().is_empty() {
                choices.push(Choice::Saved(current.to_string()));
            }
            options.len()
        }
    };
    choices.push(Choice::Blank);
    (choices, default)
}

fn prompt_field(
    term: &Term,
    field: &FieldDefinition,
    current: Option<&FieldValue>,
) -> Result<FieldValue> {
    let current_text = current.and_then(FieldValue::as_text).unwrap_or_default();

    let value = match field.kind {
        FieldKind::Text => {
            let text: String = Input::new()
                .with_prompt(field.label)
                .with_initial_text(current_text)
                .allow_empty(true)
                .interact_text()?;
            FieldValue::Text(text)
        }
        FieldKind::TextArea => {
            let text: String = Input::new()
                .with_prompt(field.label)
                .with_initial_text(current_text)
                .allow_empty(true)
                .interact_text()?;
            term.write_line(&format!(
                "  {}",
                style(format!("{} characters", text.chars().count())).dim()
            ))?;
            FieldValue::Text(text)
        }
        FieldKind::Select(options) | FieldKind::Radio(options) => {
            let (mut choices, default) = single_choices(options, current_text);
            let labels: Vec<String> = choices.iter().map(Choice::label).collect();

            let selection = Select::new()
                .with_prompt(field.label)
                .items(&labels)
                .default(default)
                .interact()?;
            choices.swap_remove(selection).into_value()
        }
        FieldKind::Checkbox(options) => {
            let selected = current.and_then(FieldValue::as_multi).unwrap_or_default();
            let defaults: Vec<bool> = options
                .iter()
                .map(|o| selected.iter().any(|s| s == o))
                .collect();

            let picks = MultiSelect::new()
                .with_prompt(format!("{} (space to toggle, enter to confirm)", field.label))
                .items(options)
                .defaults(&defaults)
                .interact()?;
            FieldValue::Multi(picks.into_iter().map(|i| options[i].to_string()).collect())
        }
        FieldKind::Range { min, max, default } => {
            let initial = current_text.parse::<u32>().unwrap_or(default);
            let years: u32 = Input::new()
                .with_prompt(format!("{} ({min}-{max})", field.label))
                .default(initial)
                .validate_with(move |v: &u32| -> Result<(), String> {
                    if (min..=max).contains(v) {
                        Ok(())
                    } else {
                        Err(format!("Enter a number from {min} to {max}"))
                    }
                })
                .interact_text()?;
            term.write_line(&format!("  {}", style(schema::years_label(years)).dim()))?;
            FieldValue::Text(years.to_string())
        }
    };

    Ok(value)
}
