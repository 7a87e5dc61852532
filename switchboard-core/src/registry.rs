use std::collections::BTreeMap;

use crate::{Callback, CallbackError, EventCode, FnCallback, Params, RegistryError};

/// Identifies one registered callback for later removal or mutation.
///
/// The handle captures the event code the entry was registered under, so
/// removal targets the right list even if the callback's own code is
/// mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackHandle {
    id: u64,
    code: EventCode,
}

impl CallbackHandle {
    /// The event code this entry was registered under.
    #[must_use]
    pub fn event_code(&self) -> EventCode {
        self.code
    }
}

struct Entry<C> {
    id: u64,
    callback: Box<dyn Callback<C>>,
}

/// Per-model ordered mapping from [`EventCode`] to registered callbacks.
///
/// Each model owns exactly one registry, created empty alongside the model
/// and dropped with it. Within an event code, callbacks are dispatched in
/// registration order; duplicates are allowed and dispatched once per entry.
///
/// An entry is keyed by the event code its callback had *at registration
/// time*. Calling [`Callback::set_event_code`] on a registered callback does
/// not re-index: the entry keeps firing for, and must be removed under, its
/// original code. The [`CallbackHandle`] returned by [`add`](Self::add)
/// remembers that code for you.
///
/// The registry provides no interior locking; registration and removal must
/// not race a solve in progress on the same model.
pub struct Registry<C> {
    entries: BTreeMap<EventCode, Vec<Entry<C>>>,
    next_id: u64,
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<C: 'static> Registry<C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback object under its own event code.
    ///
    /// The object already declares its code, so no validation applies on
    /// this path. Returns the handle used to remove this exact entry later.
    pub fn add(&mut self, callback: impl Callback<C> + 'static) -> CallbackHandle {
        self.insert(Box::new(callback))
    }

    /// Wraps a plain closure in a [`FnCallback`] and registers it.
    ///
    /// `params` are attached to the adapter and handed back to the closure
    /// on every dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingEventCode`] if `code` is `None`; a
    /// plain function carries no event code of its own.
    pub fn add_fn<F>(
        &mut self,
        func: F,
        code: impl Into<Option<EventCode>>,
        params: Params,
    ) -> Result<CallbackHandle, RegistryError>
    where
        F: FnMut(&mut Params, &mut C) -> Result<(), CallbackError> + 'static,
    {
        let code = code.into().ok_or(RegistryError::MissingEventCode)?;
        Ok(self.insert(Box::new(FnCallback::with_params(func, code, params))))
    }

    /// Removes the entry identified by `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if no entry with this
    /// handle exists under its registration-time event code; removing the
    /// same handle twice fails the second time.
    pub fn remove(&mut self, handle: CallbackHandle) -> Result<(), RegistryError> {
        let list = self
            .entries
            .get_mut(&handle.code)
            .ok_or(RegistryError::NotRegistered)?;
        let position = list
            .iter()
            .position(|entry| entry.id == handle.id)
            .ok_or(RegistryError::NotRegistered)?;
        list.remove(position);
        Ok(())
    }

    /// Drops every registration for every event code.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Mutable access to a registered callback, if still present.
    pub fn callback_mut(&mut self, handle: CallbackHandle) -> Option<&mut dyn Callback<C>> {
        let entry = self
            .entries
            .get_mut(&handle.code)?
            .iter_mut()
            .find(|entry| entry.id == handle.id)?;
        Some(&mut *entry.callback)
    }

    /// Whether any event code has at least one registered callback.
    ///
    /// Event codes whose lists have been emptied by removals do not count.
    #[must_use]
    pub fn has_callbacks(&self) -> bool {
        self.entries.values().any(|list| !list.is_empty())
    }

    /// Total number of registered callbacks across all event codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Whether no callbacks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_callbacks()
    }

    /// Fans one engine event out to every callback registered under `code`.
    ///
    /// Callbacks run synchronously on the calling thread, in registration
    /// order. An unknown or empty code is a no-op; this is the common case
    /// for phases nobody subscribed to.
    ///
    /// # Errors
    ///
    /// The first `Err` from a callback aborts the rest of the chain for
    /// this event and propagates to the engine unmodified.
    pub fn dispatch(&mut self, code: EventCode, ctx: &mut C) -> Result<(), CallbackError> {
        let Some(list) = self.entries.get_mut(&code) else {
            return Ok(());
        };
        for entry in list {
            entry.callback.on_event(ctx)?;
        }
        Ok(())
    }

    fn insert(&mut self, callback: Box<dyn Callback<C>>) -> CallbackHandle {
        let code = callback.event_code();
        let id = self.next_id;
        self.next_id += 1;
        self.entries
            .entry(code)
            .or_default()
            .push(Entry { id, callback });
        CallbackHandle { id, code }
    }
}
