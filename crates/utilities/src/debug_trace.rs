//! Debug tracing that is only compiled in when the `trsconv_debug-trace`
//! feature is enabled, since tracing every term of a large rule set is costly
//! even when the log level filters it out.

/// Prints trace information only when the `trsconv_debug-trace` feature is
/// enabled. When enabled, this macro delegates to [`log::trace!`].
///
/// # Examples
///
/// ```
/// use trsconv_utilities::debug_trace;
///
/// let name = "f";
/// debug_trace!("Resolved symbol {}", name);
/// ```
#[macro_export]
#[cfg(feature = "trsconv_debug-trace")]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        {
            log::trace!($($arg)*);
        }
    };
}

#[macro_export]
#[cfg(not(feature = "trsconv_debug-trace"))]
macro_rules! debug_trace {
    ($($arg:tt)*) => {{
        // No-op when trsconv_debug-trace is not enabled
    }};
}
