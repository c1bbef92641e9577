//! Leveled progress notifications for the orchestrator.
//!
//! A single process-wide `AtomicI32` level plus a macro that gates
//! `eprintln!` calls. 0 = silent, 1 = errors only, 2 = group/batch
//! outcomes, 3 = dispatch detail, 4+ = verbose.

use std::sync::atomic::{AtomicI32, Ordering};

/// Process-wide notification level. Defaults to 2 (group/batch outcomes).
pub static NOTIFICATION_LEVEL: AtomicI32 = AtomicI32::new(2);

/// Sets the notification level. Returns the previous value.
pub fn set_notification_level(level: i32) -> i32 {
    NOTIFICATION_LEVEL.swap(level, Ordering::Relaxed)
}

/// Returns the current notification level.
pub fn notification_level() -> i32 {
    NOTIFICATION_LEVEL.load(Ordering::Relaxed)
}

/// Writes `msg` to stderr if the current notification level is `>= level`.
pub fn notify_at(level: i32, msg: &str) {
    if notification_level() >= level {
        eprintln!("{msg}");
    }
}

/// Formats and conditionally writes a progress message, mirroring the
/// teacher's `DISPLAYLEVEL` / `displaylevel!` macro.
#[macro_export]
macro_rules! compactlevel {
    ($level:expr, $($arg:tt)*) => {
        $crate::logging::notify_at($level, &format!($($arg)*))
    };
}
