use chrono::Local;
use std::sync::OnceLock;

static LOGGER: OnceLock<Logger> = OnceLock::new();

struct Logger;

impl Logger {
    fn log(&self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        println!("[{}] {}", timestamp, message);
    }
}

/// Turns logging on for this process. Until this is called, `log!` is a no-op,
/// so embedding callers that render their own diagnostics stay quiet.
pub fn init_logger() {
    LOGGER.get_or_init(|| Logger);
}

pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}
