//! End-of-phase alert

use std::io::Write;
use tracing::{info, warn};

use crate::state::Phase;

/// Sound clients play when a phase ends
pub const ALERT_SOUND_URL: &str = "https://bigsoundbank.com/UPLOAD/mp3/1482.mp3";

/// Side effect fired when a phase runs out and the next one begins
pub trait PhaseAlert: Send + Sync {
    fn phase_ended(&self, from: Phase, to: Phase);
}

/// Rings the terminal bell on the server's stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl PhaseAlert for TerminalBell {
    fn phase_ended(&self, from: Phase, to: Phase) {
        info!("{} finished, {} started", from.label(), to.label());

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }
}
