//! Debugging helpers.
//!
//! Debugging is governed by the `debug_prints` feature. When enabled, the scanner and the parser
//! print the tokens and events they emit to stderr. The feature is meant for working on this
//! crate, not for consumers, and noticeably slows parsing down.

/// If the `debug_prints` feature is enabled, print the given message to stderr.
#[cfg(feature = "debug_prints")]
macro_rules! debug_print {
    ($($arg:tt)*) => {
        eprintln!($($arg)*)
    };
}

/// If the `debug_prints` feature is enabled, print the given message to stderr.
#[cfg(not(feature = "debug_prints"))]
macro_rules! debug_print {
    ($($arg:tt)*) => {};
}
