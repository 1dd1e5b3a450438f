//! Form controller: the step state machine.
//!
//! Owns the `FormState`, validates the current step before moving forward,
//! persists a snapshot after every transition, and generates the results on
//! the last step. All rendering goes through the `FormPresenter`.

use chrono::Utc;

use reqform_types::error::{FormError, StorageError};
use reqform_types::form::{FieldValue, FormState, NewResults, ResultsRecord};
use reqform_types::validation::FieldStatus;

use crate::form::presenter::{FormPresenter, NavigationView, Notification, SaveStatus};
use crate::prompt::generate_prompts;
use crate::schema;
use crate::storage::adapter::FormStorage;
use crate::storage::kv_store::KvStore;
use crate::validation::Validator;

const INVALID_STEP_MESSAGE: &str = "Please fill in all required fields correctly.";
const RESULTS_READY_MESSAGE: &str = "Results generated successfully!";
const RESULTS_FAILED_MESSAGE: &str = "Failed to generate results. Please try again.";

/// What a navigation request did.
#[derive(Debug, Clone, PartialEq)]
pub enum NavOutcome {
    /// Moved to another step.
    Moved { from: u8, to: u8 },
    /// Nothing to do (e.g. `previous` on the first step).
    Unchanged,
    /// The current step has invalid fields; only the failing ones are listed.
    Rejected(Vec<FieldStatus>),
    /// The last step was submitted and the results record was saved.
    Completed(ResultsRecord),
}

pub struct FormController<S, P> {
    state: FormState,
    validator: Validator,
    storage: FormStorage<S>,
    presenter: P,
    results_id: Option<String>,
}

impl<S: KvStore, P: FormPresenter> FormController<S, P> {
    /// Controller on a fresh form with the shipped validation rules.
    pub fn new(storage: FormStorage<S>, presenter: P) -> Self {
        Self::with_validator(storage, presenter, Validator::default())
    }

    pub fn with_validator(storage: FormStorage<S>, presenter: P, validator: Validator) -> Self {
        Self {
            state: FormState::new(),
            validator,
            storage,
            presenter,
            results_id: None,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn storage(&self) -> &FormStorage<S> {
        &self.storage
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Whether the results have been generated in this session.
    pub fn is_complete(&self) -> bool {
        self.results_id.is_some()
    }

    /// Adopt the persisted snapshot, if any, and show its step.
    ///
    /// Earlier steps are not re-validated. Returns whether a snapshot was found.
    pub async fn restore(&mut self) -> bool {
        let restored = match self.storage.load_progress().await {
            Some(snapshot) => {
                self.state = snapshot.into_state();
                tracing::info!(
                    step = self.state.current_step(),
                    fields = self.state.form_data.len(),
                    "restored form progress"
                );
                true
            }
            None => false,
        };
        self.render();
        restored
    }

    /// Show the current step without touching storage.
    pub fn render(&mut self) {
        let view = NavigationView::for_state(&self.state);
        if let Some(step) = schema::step(self.state.current_step()) {
            self.presenter
                .render_step(step, &view, &self.state.form_data);
        }
    }

    /// Record an edit and validate the edited field.
    ///
    /// Only updates memory; persistence is scheduled by the caller.
    pub fn field_changed(&mut self, field: &str, value: FieldValue) -> FieldStatus {
        self.state.form_data.set(field, value);
        let status = self.validator.validate(field, self.state.form_data.get(field));
        self.presenter.apply_field_status(&status);
        status
    }

    /// Validate the current step, then advance or, on the last step, complete.
    ///
    /// A rejected step is rendered again so the surface can show its errors.
    pub async fn next(&mut self) -> Result<NavOutcome, FormError> {
        let failed = self.validate_current_step();
        if !failed.is_empty() {
            tracing::debug!(
                step = self.state.current_step(),
                invalid = failed.len(),
                "step validation failed"
            );
            self.presenter.notify(Notification::error(INVALID_STEP_MESSAGE));
            self.render();
            return Ok(NavOutcome::Rejected(failed));
        }

        let from = self.state.current_step();
        if self.state.advance() {
            self.after_transition().await;
            return Ok(NavOutcome::Moved {
                from,
                to: self.state.current_step(),
            });
        }

        self.complete().await.map(NavOutcome::Completed)
    }

    /// Go back one step. No validation; a no-op on the first step.
    pub async fn previous(&mut self) -> NavOutcome {
        let from = self.state.current_step();
        if !self.state.retreat() {
            return NavOutcome::Unchanged;
        }
        self.after_transition().await;
        NavOutcome::Moved {
            from,
            to: self.state.current_step(),
        }
    }

    /// Persist a snapshot of the current state and report the outcome.
    pub async fn save_progress(&mut self) -> Result<(), StorageError> {
        let snapshot = self.state.snapshot(Utc::now());
        match self.storage.save_progress(&snapshot).await {
            Ok(()) => {
                self.presenter.update_save_status(&SaveStatus::Saved);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "progress save failed");
                self.presenter
                    .update_save_status(&SaveStatus::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn validate_current_step(&mut self) -> Vec<FieldStatus> {
        let Some(step) = schema::step(self.state.current_step()) else {
            return Vec::new();
        };

        let statuses = self
            .validator
            .validate_fields(step.field_names(), &self.state.form_data);
        for status in &statuses {
            self.presenter.apply_field_status(status);
        }
        statuses.into_iter().filter(|s| !s.valid).collect()
    }

    async fn after_transition(&mut self) {
        self.render();
        // Failure is already reported through the save status.
        let _ = self.save_progress().await;
    }

    async fn complete(&mut self) -> Result<ResultsRecord, FormError> {
        let results = NewResults {
            form_data: self.state.form_data.clone(),
            prompts: generate_prompts(&self.state.form_data),
            timestamp: Utc::now(),
        };

        match self.storage.save_results(results.clone()).await {
            Ok(id) => {
                let record = results.with_id(id.clone());
                self.results_id = Some(id);
                self.presenter.show_results(&record);
                self.presenter
                    .notify(Notification::success(RESULTS_READY_MESSAGE));
                Ok(record)
            }
            Err(e) => {
                self.presenter
                    .notify(Notification::error(RESULTS_FAILED_MESSAGE));
                self.render();
                Err(FormError::ResultsNotSaved(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use reqform_types::form::{FormData, TOTAL_STEPS};

    use crate::storage::adapter::PROGRESS_KEY;
    use crate::testing::{FailingStore, MemoryStore, RecordingPresenter, Rendered};

    type TestController = FormController<Arc<MemoryStore>, RecordingPresenter>;

    fn controller() -> (TestController, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let controller =
            FormController::new(FormStorage::new(store.clone()), RecordingPresenter::default());
        (controller, store)
    }

    fn fill_first_step(controller: &mut TestController) {
        controller.field_changed("companyName", "Acme".into());
        controller.field_changed("industry", "Retail".into());
        controller.field_changed("businessSize", "Small (2-10)".into());
        controller.field_changed("primaryGoal", "Sell Online".into());
    }

    async fn walk_to_last_step(controller: &mut TestController) {
        fill_first_step(controller);
        for _ in 1..TOTAL_STEPS {
            assert!(matches!(
                controller.next().await.unwrap(),
                NavOutcome::Moved { .. }
            ));
        }
        assert!(controller.state().is_last_step());
    }

    #[tokio::test]
    async fn test_next_rejects_invalid_step_and_keeps_data() {
        let (mut controller, _) = controller();
        controller.field_changed("companyName", "A".into());

        let outcome = controller.next().await.unwrap();

        let NavOutcome::Rejected(failed) = outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        let fields: Vec<&str> = failed.iter().map(|s| s.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["companyName", "industry", "businessSize", "primaryGoal"]
        );
        assert_eq!(controller.state().current_step(), 1);
        assert_eq!(controller.state().form_data.text("companyName"), Some("A"));

        let notices = controller.presenter().notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, INVALID_STEP_MESSAGE);
        assert_eq!(controller.presenter().last_step(), Some(1));
    }

    #[tokio::test]
    async fn test_next_advances_and_persists() {
        let (mut controller, store) = controller();
        fill_first_step(&mut controller);

        let outcome = controller.next().await.unwrap();

        assert_eq!(outcome, NavOutcome::Moved { from: 1, to: 2 });
        assert_eq!(controller.presenter().last_step(), Some(2));
        let saved = controller.storage().load_progress().await.unwrap();
        assert_eq!(saved.current_step, 2);
        assert_eq!(saved.form_data.text("companyName"), Some("Acme"));
        assert!(store.raw(PROGRESS_KEY).is_some());
    }

    #[tokio::test]
    async fn test_steps_without_rules_advance_freely() {
        let (mut controller, _) = controller();
        fill_first_step(&mut controller);
        controller.next().await.unwrap();

        let outcome = controller.next().await.unwrap();
        assert_eq!(outcome, NavOutcome::Moved { from: 2, to: 3 });
    }

    #[tokio::test]
    async fn test_previous_on_first_step_is_noop() {
        let (mut controller, store) = controller();

        assert_eq!(controller.previous().await, NavOutcome::Unchanged);
        assert_eq!(controller.state().current_step(), 1);
        assert!(controller.presenter().events.is_empty());
        assert!(store.raw(PROGRESS_KEY).is_none());
    }

    #[tokio::test]
    async fn test_previous_skips_validation() {
        let (mut controller, _) = controller();
        fill_first_step(&mut controller);
        controller.next().await.unwrap();
        controller.field_changed("companyName", "".into());

        let outcome = controller.previous().await;

        assert_eq!(outcome, NavOutcome::Moved { from: 2, to: 1 });
        let view = controller
            .presenter()
            .events
            .iter()
            .rev()
            .find_map(|e| match e {
                Rendered::Step { view, .. } => Some(view.clone()),
                _ => None,
            })
            .expect("step rendered");
        assert_eq!(view.step, 1);
        assert!(!view.previous_enabled);
    }

    #[tokio::test]
    async fn test_last_step_generates_results_without_advancing() {
        let (mut controller, _) = controller();
        walk_to_last_step(&mut controller).await;

        let outcome = controller.next().await.unwrap();

        let NavOutcome::Completed(record) = outcome else {
            panic!("expected completion, got {outcome:?}");
        };
        assert_eq!(controller.state().current_step(), TOTAL_STEPS);
        assert!(controller.is_complete());
        assert!(record.prompts.business.contains("Acme"));

        let stored = controller.storage().load_results().await.unwrap();
        assert_eq!(stored, record);

        let notices = controller.presenter().notices();
        assert_eq!(notices.last().unwrap().message, RESULTS_READY_MESSAGE);
        assert!(controller
            .presenter()
            .events
            .contains(&Rendered::Results(record.id.clone())));
    }

    #[tokio::test]
    async fn test_results_save_failure_stays_on_step() {
        let (mut controller, store) = controller();
        walk_to_last_step(&mut controller).await;
        store.set_fail_writes(true);

        let err = controller.next().await.unwrap_err();

        assert!(matches!(err, FormError::ResultsNotSaved(_)));
        assert!(!controller.is_complete());
        assert_eq!(controller.state().current_step(), TOTAL_STEPS);
        assert_eq!(
            controller.presenter().notices().last().unwrap().message,
            RESULTS_FAILED_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_save_failure_keeps_form_data() {
        let (mut controller, store) = controller();
        store.set_fail_writes(true);

        let status = controller.field_changed("companyName", "Acme".into());
        assert!(status.valid);

        let err = controller.save_progress().await.unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert_eq!(controller.state().form_data.text("companyName"), Some("Acme"));
        assert!(matches!(
            controller.presenter().save_statuses().last(),
            Some(SaveStatus::Failed(_))
        ));

        store.set_fail_writes(false);
        controller.save_progress().await.unwrap();
        assert_eq!(
            controller.presenter().save_statuses().last(),
            Some(&&SaveStatus::Saved)
        );
    }

    #[tokio::test]
    async fn test_transition_survives_unavailable_store() {
        let mut controller =
            FormController::new(FormStorage::new(FailingStore), RecordingPresenter::default());
        controller.field_changed("companyName", "Acme".into());
        controller.field_changed("industry", "Retail".into());
        controller.field_changed("businessSize", "Solo".into());
        controller.field_changed("primaryGoal", "Generate Leads".into());

        let outcome = controller.next().await.unwrap();

        assert_eq!(outcome, NavOutcome::Moved { from: 1, to: 2 });
        assert!(matches!(
            controller.presenter().save_statuses().last(),
            Some(SaveStatus::Failed(_))
        ));
    }

    #[tokio::test]
    async fn test_field_changed_applies_status() {
        let (mut controller, _) = controller();

        let status = controller.field_changed("companyName", "A".into());

        assert!(!status.valid);
        assert_eq!(status.error_slot_id(), "companyName-error");
        assert_eq!(
            controller.presenter().events,
            vec![Rendered::Field(status)]
        );
    }

    #[tokio::test]
    async fn test_restore_adopts_snapshot_without_validation() {
        let (mut first, store) = controller();
        walk_to_last_step(&mut first).await;
        first.field_changed("companyName", "".into());
        first.save_progress().await.unwrap();

        let mut second =
            FormController::new(FormStorage::new(store), RecordingPresenter::default());
        assert!(second.restore().await);

        assert_eq!(second.state().current_step(), TOTAL_STEPS);
        assert_eq!(second.state().form_data.text("industry"), Some("Retail"));
        assert_eq!(second.presenter().last_step(), Some(TOTAL_STEPS));
        assert!(second
            .presenter()
            .events
            .iter()
            .all(|e| !matches!(e, Rendered::Field(_))));
    }

    #[tokio::test]
    async fn test_restore_without_snapshot_starts_fresh() {
        let (mut controller, store) = controller();
        store.insert(PROGRESS_KEY, "corrupted");

        assert!(!controller.restore().await);
        assert_eq!(controller.state(), &FormState::new());
        assert_eq!(controller.state().form_data, FormData::new());
        assert_eq!(controller.presenter().last_step(), Some(1));
    }
}
