use switchboard_core::{CallbackError, EventCode};

/// The single callback slot an engine exposes per solve.
///
/// The engine invokes it zero or more times with its live solve context and
/// the event code of the phase that triggered it. An `Err` return is a
/// request to abort: [`CallbackError::Terminate`] asks for a clean stop,
/// [`CallbackError::Failed`] reports a failure the engine should surface.
pub type EngineCallback<'a, C> =
    &'a mut dyn FnMut(&mut C, EventCode) -> Result<(), CallbackError>;

/// An optimization engine, treated as a black box.
///
/// The engine owns the actual solve loop; this layer only decides whether to
/// hand it a callback. Event codes, context contents, and the meaning of a
/// termination request are all engine-defined.
pub trait Engine {
    /// Live solve state handed to the callback; passed through unexamined
    /// by the dispatch layer.
    type Context;

    /// Result of a completed solve.
    type Outcome;

    /// Engine-specific failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Runs the solve, invoking `callback` once per relevant event.
    ///
    /// `None` means no callback is installed and the engine should skip
    /// per-event dispatch entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the solve fails, including when a callback
    /// reports a failure the engine chooses to surface.
    fn solve(
        &mut self,
        callback: Option<EngineCallback<'_, Self::Context>>,
    ) -> Result<Self::Outcome, Self::Error>;
}
