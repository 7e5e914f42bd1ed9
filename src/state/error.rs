//! Errors raised by the shared state

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to lock {0}: lock poisoned")]
    LockPoisoned(&'static str),
}
