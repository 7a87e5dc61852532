use std::error::Error as StdError;

use thiserror::Error;

/// Error surfaced by a callback during dispatch.
///
/// The dispatcher never catches these: the first `Err` in a chain aborts the
/// remaining callbacks for that event and propagates to the engine.
#[derive(Debug, Error)]
pub enum CallbackError {
    /// The callback asked the engine to terminate the solve.
    ///
    /// This is the distinguished "raise to stop" signal. Engines that
    /// receive it are expected to wind the solve down cleanly rather than
    /// report a failure.
    #[error("callback requested solve termination")]
    Terminate,

    /// The callback failed; the cause passes through unmodified.
    #[error("callback failed")]
    Failed(#[source] Box<dyn StdError + Send + Sync>),
}

impl CallbackError {
    /// Wraps an arbitrary error as an opaque callback failure.
    pub fn failed(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Failed(err.into())
    }
}

/// Errors raised synchronously by registry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A plain function was registered without an event code.
    #[error("an event code is required when registering a plain function")]
    MissingEventCode,

    /// The handle does not match any entry under its event code.
    #[error("callback is not registered under its event code")]
    NotRegistered,
}
