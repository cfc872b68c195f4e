//! Console logging
//!
//! Library code logs through the `log` facade. `init()` installs this logger,
//! which forwards records to the browser console on wasm32 and to stderr on
//! native targets (tests, tools).

use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct ConsoleLogger {
    level: Level,
}

static LOGGER: ConsoleLogger = ConsoleLogger { level: Level::Info };

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[visigen] [{}] {}", record.level(), record.args());
        emit(record.level(), &line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the console logger. Safe to call more than once; only the first
/// call wins.
pub fn install() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}
