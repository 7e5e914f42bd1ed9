//! Utility functions module
//! 
//! This module contains utility functions used throughout the application.

pub mod duration;
pub mod signals;

// Re-export main functions
pub use duration::{minutes_to_duration, seconds_to_duration};
pub use signals::shutdown_signal;
