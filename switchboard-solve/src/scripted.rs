//! A deterministic engine that replays a fixed event script.
//!
//! [`ScriptedEngine`] stands in for a real optimization engine when testing
//! callback wiring: it fires a predetermined sequence of events through
//! whatever callback it is handed and records whether one was installed at
//! all. Termination requests and callback failures are handled the way a
//! real engine would — [`CallbackError::Terminate`] stops the replay and
//! reports [`Status::Interrupted`], while [`CallbackError::Failed`] aborts
//! the solve with an error.

use thiserror::Error;

use switchboard_core::{CallbackError, EventCode};

use crate::{Engine, EngineCallback};

/// One scripted solver event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedEvent {
    /// Event code fired at this point in the script.
    pub code: EventCode,
    /// Objective value the engine reports while handling this event.
    pub objective: f64,
}

impl ScriptedEvent {
    /// Creates a scripted event.
    pub fn new(code: impl Into<EventCode>, objective: f64) -> Self {
        Self {
            code: code.into(),
            objective,
        }
    }
}

/// Live solve state the scripted engine exposes to callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    /// Events fired so far, including the current one.
    pub events_seen: usize,
    /// Objective value attached to the current event.
    pub objective: f64,
}

/// Final status of a scripted solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The script ran to completion.
    Optimal,
    /// A callback requested termination mid-script.
    Interrupted,
}

/// Result of a scripted solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Final solve status.
    pub status: Status,
    /// Objective at the end of the solve.
    pub objective: f64,
    /// Whether a callback was installed for this solve.
    pub callback_installed: bool,
    /// Events delivered to the callback before the solve ended.
    pub events_delivered: usize,
}

/// Errors from a scripted solve.
#[derive(Debug, Error)]
pub enum Error {
    /// A callback failed during event replay.
    #[error("callback failed during event replay")]
    Callback(#[source] CallbackError),
}

/// Replays a fixed event script through the installed callback.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEngine {
    script: Vec<ScriptedEvent>,
    final_objective: f64,
}

impl ScriptedEngine {
    /// Creates an engine that fires the given events, in order, per solve.
    #[must_use]
    pub fn new(script: Vec<ScriptedEvent>) -> Self {
        Self {
            script,
            final_objective: 0.0,
        }
    }

    /// Sets the objective reported when the script runs to completion.
    #[must_use]
    pub fn with_final_objective(mut self, objective: f64) -> Self {
        self.final_objective = objective;
        self
    }
}

impl Engine for ScriptedEngine {
    type Context = Progress;
    type Outcome = Outcome;
    type Error = Error;

    fn solve(
        &mut self,
        callback: Option<EngineCallback<'_, Progress>>,
    ) -> Result<Outcome, Error> {
        let Some(dispatch) = callback else {
            return Ok(Outcome {
                status: Status::Optimal,
                objective: self.final_objective,
                callback_installed: false,
                events_delivered: 0,
            });
        };

        let mut progress = Progress::default();
        for (index, event) in self.script.iter().enumerate() {
            progress.events_seen = index + 1;
            progress.objective = event.objective;

            match dispatch(&mut progress, event.code) {
                Ok(()) => {}
                Err(CallbackError::Terminate) => {
                    return Ok(Outcome {
                        status: Status::Interrupted,
                        objective: event.objective,
                        callback_installed: true,
                        events_delivered: index + 1,
                    });
                }
                Err(err) => return Err(Error::Callback(err)),
            }
        }

        Ok(Outcome {
            status: Status::Optimal,
            objective: self.final_objective,
            callback_installed: true,
            events_delivered: self.script.len(),
        })
    }
}
