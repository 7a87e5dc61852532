use tracing::debug;

use switchboard_core::{
    Callback, CallbackError, CallbackHandle, EventCode, Params, Registry, RegistryError,
};

use crate::Engine;

/// An engine plus its per-model callback registry.
///
/// The registry is created empty when the model is constructed and dropped
/// with it; it is never shared across models. On every [`solve`](Self::solve)
/// call the model re-checks whether any callback is registered and installs
/// the dispatcher only then, so registrations and removals between solves
/// take effect on the next call and an unobserved solve pays no dispatch
/// overhead.
pub struct Model<E: Engine> {
    engine: E,
    registry: Registry<E::Context>,
}

impl<E: Engine> Model<E>
where
    E::Context: 'static,
{
    /// Wraps an engine with an empty registry.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            registry: Registry::new(),
        }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the underlying engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Unwraps the model, discarding all registrations.
    pub fn into_engine(self) -> E {
        self.engine
    }

    /// The model's callback registry.
    pub fn registry(&self) -> &Registry<E::Context> {
        &self.registry
    }

    /// Mutable access to the registry.
    ///
    /// Must not be used while a solve is in progress on this model; the
    /// borrow checker enforces this within one thread.
    pub fn registry_mut(&mut self) -> &mut Registry<E::Context> {
        &mut self.registry
    }

    /// Registers a callback object under its own event code.
    pub fn add_callback(
        &mut self,
        callback: impl Callback<E::Context> + 'static,
    ) -> CallbackHandle {
        self.registry.add(callback)
    }

    /// Wraps a plain closure and registers it under `code`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingEventCode`] if `code` is `None`.
    pub fn add_callback_fn<F>(
        &mut self,
        func: F,
        code: impl Into<Option<EventCode>>,
        params: Params,
    ) -> Result<CallbackHandle, RegistryError>
    where
        F: FnMut(&mut Params, &mut E::Context) -> Result<(), CallbackError> + 'static,
    {
        self.registry.add_fn(func, code, params)
    }

    /// Removes one registered callback.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if the handle is unknown.
    pub fn remove_callback(&mut self, handle: CallbackHandle) -> Result<(), RegistryError> {
        self.registry.remove(handle)
    }

    /// Drops every registration for every event code.
    pub fn clear_callbacks(&mut self) {
        self.registry.clear();
    }

    /// Runs the engine's solve, installing the dispatcher only if at least
    /// one callback is registered.
    ///
    /// # Errors
    ///
    /// Passes the engine's error through unchanged; a callback failure
    /// surfaces however the engine chooses to report it.
    pub fn solve(&mut self) -> Result<E::Outcome, E::Error> {
        let Self { engine, registry } = self;

        if registry.has_callbacks() {
            debug!(callbacks = registry.len(), "installing callback dispatcher");
            let mut dispatcher =
                |ctx: &mut E::Context, code: EventCode| registry.dispatch(code, ctx);
            engine.solve(Some(&mut dispatcher))
        } else {
            debug!("no callbacks registered; solving without dispatcher");
            engine.solve(None)
        }
    }
}
