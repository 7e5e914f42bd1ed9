//! State management module
//! 
//! This module contains the session state machine and the shared state
//! wrapped around it.

pub mod app_state;
pub mod controller;
pub mod error;
pub mod session;

// Re-export main types
pub use app_state::AppState;
pub use controller::{
    Direction, DurationBounds, RunTransition, SessionController, TickOutcome, BREAK_BOUNDS,
    FOCUS_BOUNDS,
};
pub use error::StateError;
pub use session::{Phase, Session};
