use crate::{CallbackError, EventCode};

/// The contract every dispatchable entity satisfies.
///
/// Callbacks let callers observe or steer a solve without sharing one
/// function body: each registered callback declares the event code it
/// subscribes to and is invoked in isolation, in registration order, for
/// every matching engine event.
///
/// `C` is the engine's live solve context, passed through unexamined by the
/// dispatch layer. Implementations may read solve state, log, request
/// termination (by returning [`CallbackError::Terminate`]), or mutate the
/// context through whatever the engine exposes on it.
///
/// Implement this directly for a stateful callback type, or wrap a plain
/// closure with [`FnCallback`](crate::FnCallback).
pub trait Callback<C> {
    /// The event code this callback is subscribed to.
    fn event_code(&self) -> EventCode;

    /// Changes the subscribed event code.
    ///
    /// Note that the registry keys an entry by the code it had at
    /// registration time; mutating the code afterward does not re-index
    /// (see [`Registry`](crate::Registry)).
    fn set_event_code(&mut self, code: EventCode);

    /// Handles one matching engine event.
    ///
    /// # Errors
    ///
    /// Any `Err` aborts the rest of the dispatch chain for this event and
    /// propagates to the engine: [`CallbackError::Terminate`] to stop the
    /// solve, [`CallbackError::Failed`] for an ordinary failure.
    fn on_event(&mut self, ctx: &mut C) -> Result<(), CallbackError>;
}
