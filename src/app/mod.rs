//! Application orchestration layer
//!
//! `state` holds the pure session state machine; `controller` feeds it
//! overlay events and executes its commands against the platform.

pub mod controller;
pub mod state;

pub use controller::{AppError, ControllerConfig, SessionController};
pub use state::{Session, SessionOutcome};
