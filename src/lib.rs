//! Pomodoro Server - A state-managed HTTP server driving a focus/break timer
//! 
//! This library provides the session state machine, the tick scheduler that
//! drives it, and the HTTP API clients use to read it and send intents.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, SessionController};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
