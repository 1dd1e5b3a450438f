//! Presentation adapter interface.
//!
//! The controller never renders anything itself. It reports what changed
//! through `FormPresenter`, and the surface (terminal wizard, tests) decides
//! how to show it.

use reqform_types::form::{FormData, FormState, ResultsRecord, TOTAL_STEPS};
use reqform_types::validation::FieldStatus;

use crate::schema::StepDefinition;

/// Label of the forward button before the last step.
pub const CONTINUE_LABEL: &str = "Continue →";

/// Label of the forward button on the last step.
pub const GENERATE_LABEL: &str = "Generate Results →";

/// Derived navigation state: progress bar, step counter, button labels.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationView {
    pub step: u8,
    pub total_steps: u8,
    pub progress_percent: f64,
    pub previous_enabled: bool,
    pub next_label: &'static str,
}

impl NavigationView {
    pub fn for_state(state: &FormState) -> Self {
        Self {
            step: state.current_step(),
            total_steps: TOTAL_STEPS,
            progress_percent: state.progress_percent(),
            previous_enabled: !state.is_first_step(),
            next_label: if state.is_last_step() {
                GENERATE_LABEL
            } else {
                CONTINUE_LABEL
            },
        }
    }

    pub fn is_final_step(&self) -> bool {
        self.step == self.total_steps
    }
}

/// Outcome of the most recent persistence attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Failed(String),
}

impl SaveStatus {
    /// Short text for the status indicator.
    pub fn indicator(&self) -> &'static str {
        match self {
            SaveStatus::Saved => "✅ Auto-saved",
            SaveStatus::Failed(_) => "⚠️ Save failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// A transient, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Rendering side of the form.
pub trait FormPresenter: Send {
    /// Show `step` with the current answers and navigation state.
    fn render_step(&mut self, step: &StepDefinition, view: &NavigationView, data: &FormData);

    /// Mark a field valid/invalid and fill or clear its error slot.
    fn apply_field_status(&mut self, status: &FieldStatus);

    fn update_save_status(&mut self, status: &SaveStatus);

    fn notify(&mut self, notification: Notification);

    /// Display the generated results after completion.
    fn show_results(&mut self, record: &ResultsRecord);
}
