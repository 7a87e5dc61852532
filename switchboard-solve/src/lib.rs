//! Solve orchestration for the Switchboard callback layer.
//!
//! This crate sits between application code and an optimization engine's
//! single callback slot:
//!
//! - [`Engine`] — the black-box engine collaborator, abstracted over its
//!   live context, outcome, and error types
//! - [`Model`] — owns an engine plus a per-model callback
//!   [`Registry`](switchboard_core::Registry); on each solve it installs
//!   the dispatcher only if at least one callback is registered
//! - [`scripted`] — a deterministic engine that replays a fixed event
//!   script, for exercising callback wiring without a real solver

mod engine;
mod model;

pub mod scripted;

pub use engine::{Engine, EngineCallback};
pub use model::Model;
