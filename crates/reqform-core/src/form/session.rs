//! Form session event loop.
//!
//! A single task owns the controller and serializes everything that can touch
//! it: user events, the debounce timer, the periodic save timer, and unload.
//! Every edit re-arms the debounce timer, so a burst of edits produces one
//! save once the user pauses.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

use reqform_types::config::AutosaveConfig;
use reqform_types::form::{FieldValue, ResultsRecord};

use crate::form::controller::{FormController, NavOutcome};
use crate::form::presenter::FormPresenter;
use crate::storage::kv_store::KvStore;

/// Input delivered to a running session.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    FieldChanged { field: String, value: FieldValue },
    Next,
    Previous,
    /// The surface is going away; save one last time and stop.
    Unload,
}

/// Why a session stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEnd {
    Completed(ResultsRecord),
    Unloaded,
}

/// Background persistence timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosavePolicy {
    pub debounce: Duration,
    pub interval: Duration,
}

impl Default for AutosavePolicy {
    fn default() -> Self {
        Self::from(&AutosaveConfig::default())
    }
}

impl From<&AutosaveConfig> for AutosavePolicy {
    fn from(config: &AutosaveConfig) -> Self {
        Self {
            debounce: config.debounce(),
            interval: config.interval(),
        }
    }
}

/// Drive `controller` until the form completes or the surface unloads.
///
/// A closed event channel is treated as an unload.
pub async fn run_session<S, P>(
    controller: &mut FormController<S, P>,
    mut events: mpsc::Receiver<FormEvent>,
    policy: AutosavePolicy,
) -> SessionEnd
where
    S: KvStore,
    P: FormPresenter,
{
    let debounce = tokio::time::sleep(policy.debounce);
    tokio::pin!(debounce);
    let mut save_pending = false;

    let mut periodic = tokio::time::interval_at(Instant::now() + policy.interval, policy.interval);
    periodic.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(FormEvent::FieldChanged { field, value }) => {
                    controller.field_changed(&field, value);
                    debounce.as_mut().reset(Instant::now() + policy.debounce);
                    save_pending = true;
                }
                Some(FormEvent::Next) => match controller.next().await {
                    Ok(NavOutcome::Completed(record)) => return SessionEnd::Completed(record),
                    Ok(_) => {}
                    Err(e) => tracing::warn!(error = %e, "could not complete form"),
                },
                Some(FormEvent::Previous) => {
                    controller.previous().await;
                }
                Some(FormEvent::Unload) | None => {
                    tracing::debug!("session unloading, final save");
                    let _ = controller.save_progress().await;
                    return SessionEnd::Unloaded;
                }
            },
            () = &mut debounce, if save_pending => {
                save_pending = false;
                let _ = controller.save_progress().await;
            }
            _ = periodic.tick() => {
                tracing::trace!("periodic save");
                let _ = controller.save_progress().await;
            }
        }
    }
}
