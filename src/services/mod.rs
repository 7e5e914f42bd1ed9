//! Side effects performed on behalf of the timer
//! 
//! This module contains the end-of-phase alert.

pub mod alert;

// Re-export main types
pub use alert::{PhaseAlert, TerminalBell, ALERT_SOUND_URL};
