//! Colored console logging.
//!
//! Every line carries a tag and a millisecond UTC timestamp. Warnings and errors go to
//! stderr so they stay visible when stdout is piped.

/// Formats one tagged line. Not meant to be used directly.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_line {
    (out, $color:literal, $tag:literal, $($arg:tt)*) => {
        println!("{}", $crate::__log_line!(@fmt $color, $tag, $($arg)*))
    };
    (err, $color:literal, $tag:literal, $($arg:tt)*) => {
        eprintln!("{}", $crate::__log_line!(@fmt $color, $tag, $($arg)*))
    };
    (@fmt $color:literal, $tag:literal, $($arg:tt)*) => {
        format!(
            concat!("\x1b[", $color, "m{:<7}[{}]\x1b[0m {}"),
            concat!("[", $tag, "]"),
            chrono::Utc::now().format("%H:%M:%S%.3f"),
            format_args!($($arg)*)
        )
    };
}

/// Startup and shutdown milestones.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::__log_line!(out, "32", "INFO", $($arg)*) };
}

/// Routine operational detail (settings, recoveries, failed console commands).
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => { $crate::__log_line!(out, "33", "LOG", $($arg)*) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::__log_line!(err, "35", "WARN", $($arg)*) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::__log_line!(err, "31", "ERROR", $($arg)*) };
}

/// Logs and aborts.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => { panic!("{}", $crate::__log_line!(@fmt "1;31", "FATAL", $($arg)*)) };
}

/// Plane lifecycle messages (catch, release, launch acknowledgements).
#[macro_export]
macro_rules! plane {
    ($($arg:tt)*) => { $crate::__log_line!(out, "1;34", "PLANE", $($arg)*) };
}

/// High frequency messages (poll merges, samples), only printed if `LOG_PLANES_EVENTS` is set.
#[macro_export]
macro_rules! event {
    ($($arg:tt)*) => {
        if std::env::var_os("LOG_PLANES_EVENTS").is_some() {
            $crate::__log_line!(out, "36", "EVENT", $($arg)*)
        }
    };
}
