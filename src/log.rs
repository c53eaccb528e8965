//! Diagnostics switch.
//!
//! Stdout belongs to the wire protocol, so every diagnostic goes through the `log` facade
//! (backed by `env_logger` on stderr) and can be silenced at runtime as a whole.

use std::sync::atomic::{AtomicBool, Ordering};

static ENABLED: AtomicBool = AtomicBool::new(true);

#[inline(always)]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::SeqCst)
}

pub fn disable() {
    ENABLED.store(false, Ordering::SeqCst)
}

pub fn enable() {
    ENABLED.store(true, Ordering::SeqCst)
}

/// Install a stderr logger (level from `RUST_LOG`), `quiet` turns diagnostics off entirely.
pub fn init(quiet: bool) {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();
    if quiet {
        disable();
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! _gated_log {
    ($level:ident, target: $target:expr, $($arg:tt)+) => {
        if $crate::log::is_enabled() {
            ::log::$level!(target: $target, $($arg)+)
        }
    };
    ($level:ident, $($arg:tt)+) => {
        if $crate::log::is_enabled() {
            ::log::$level!($($arg)+)
        }
    };
}

#[macro_export]
macro_rules! gdbjs_info {
    ($($arg:tt)+) => { $crate::_gated_log!(info, $($arg)+) };
}

#[macro_export]
macro_rules! gdbjs_warn {
    ($($arg:tt)+) => { $crate::_gated_log!(warn, $($arg)+) };
}

#[macro_export]
macro_rules! gdbjs_error {
    ($($arg:tt)+) => { $crate::_gated_log!(error, $($arg)+) };
}

#[macro_export]
macro_rules! gdbjs_debug {
    ($($arg:tt)+) => { $crate::_gated_log!(debug, $($arg)+) };
}
