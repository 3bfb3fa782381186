//! # Runtime Validation Toggle
//!
//! One process-wide flag, on by default, read by every function compiled
//! with the `Conditional` decision on every call.
//!
//! Reads and writes use `Ordering::Relaxed`. The flag is never torn, and a
//! flip becomes visible to other threads without any further ordering: calls
//! already in flight may still see the old value. `Always` functions never
//! read the flag, and `Off` functions have no code path that could.

use std::sync::atomic::{AtomicBool, Ordering};

static VALIDATION_ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn runtime validation on or off for the whole process.
///
/// Returns the previous value.
pub fn set_validation_enabled(enabled: bool) -> bool {
    let previous = VALIDATION_ENABLED.swap(enabled, Ordering::Relaxed);
    if previous != enabled {
        tracing::info!(enabled, "runtime validation toggled");
    }
    previous
}

/// Current value of the toggle. Lock-free and allocation-free.
#[inline]
pub fn validation_enabled() -> bool {
    VALIDATION_ENABLED.load(Ordering::Relaxed)
}
