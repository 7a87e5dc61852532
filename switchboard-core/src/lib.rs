//! Callback contract, registry, and dispatch for the Switchboard layer.
//!
//! Optimization engines expose a single callback slot per solve: one
//! function, invoked with an event code identifying the solver phase that
//! triggered it. This crate multiplexes any number of independently
//! registered callbacks onto that one slot:
//!
//! - [`Callback`] — the contract every dispatchable entity satisfies
//! - [`FnCallback`] — adapts a plain closure plus a [`Params`] bag into a
//!   [`Callback`]
//! - [`Registry`] — per-model ordered map from [`EventCode`] to registered
//!   callbacks, with [`Registry::dispatch`] fanning one engine event out to
//!   every match in registration order
//!
//! The engine itself, and the decision of whether to install a dispatcher
//! for a given solve, live in `switchboard-solve`.

mod callback;
mod error;
mod event_code;
mod fn_callback;
mod params;
mod registry;

pub use callback::Callback;
pub use error::{CallbackError, RegistryError};
pub use event_code::EventCode;
pub use fn_callback::FnCallback;
pub use params::{Params, Value};
pub use registry::{CallbackHandle, Registry};
