//! Graceful shutdown for `backtail serve`.
//!
//! The first SIGINT/SIGTERM sets a flag that stops the accept loop and cancels
//! in-flight scans at their next window boundary. A second signal exits
//! immediately with code 1.

use signal_hook::consts::TERM_SIGNALS;
use signal_hook::flag;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Install the handlers and return the shutdown flag they set.
pub fn setup_shutdown_handlers() -> Result<Arc<AtomicBool>, std::io::Error> {
    let term_now = Arc::new(AtomicBool::new(false));

    for sig in TERM_SIGNALS {
        // Order matters: the conditional exit only fires once term_now is already set
        flag::register_conditional_shutdown(*sig, 1, Arc::clone(&term_now))?;
        flag::register(*sig, Arc::clone(&term_now))?;
    }

    Ok(term_now)
}
