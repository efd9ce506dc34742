//! Console Logger
//!
//! Routes `log` records from the app and the core crate to the browser
//! console, one console method per level.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format_line(record.level(), record.target(), &record.args().to_string()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn format_line(level: Level, target: &str, message: &str) -> String {
    // Crate name is enough; drop the module path
    let target = target.split("::").next().unwrap_or(target);
    format!("[{}] {}: {}", level, target, message)
}

fn max_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the console logger. Safe to call more than once.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_keeps_crate_name() {
        let line = format_line(Level::Warn, "boltflow_core::repository::task_repo", "loading tasks failed");
        assert_eq!(line, "[WARN] boltflow_core: loading tasks failed");
    }

    #[test]
    fn test_format_line_plain_target() {
        assert_eq!(format_line(Level::Info, "boltflow_ui", "ready"), "[INFO] boltflow_ui: ready");
    }
}
