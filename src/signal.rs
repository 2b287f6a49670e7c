//! Ctrl+C handling.
//!
//! The handler only flips a shared flag; the scan checks it between files and
//! stops with [`ScanError::Interrupted`](crate::error::ScanError::Interrupted).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

/// Exit code for SIGINT (128 + 2)
pub const EXIT_CODE_INTERRUPTED: i32 = 130;

/// Cooperative cancellation flag shared between the signal handler and a scan.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Install a Ctrl+C handler that cancels the returned token.
///
/// If a handler cannot be registered the token still works for manual
/// cancellation; the failure is only logged.
pub fn install_handler() -> CancelToken {
    let token = CancelToken::new();
    let handler_token = token.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        info!("Interrupt received, stopping after the current file");
        handler_token.cancel();
    }) {
        debug!("Ctrl+C handler not installed: {e}");
    }

    token
}
