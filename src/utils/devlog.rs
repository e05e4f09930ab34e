//! Query bench lines for developers.
//!
//! Every `apply`, `count` and `find` call reports one JSON line
//! (`{"bench":"query","op":..,"record":..,"duration_us":..}` plus counters).
//! Lines go to the `recordquery::devlog` log target at TRACE and, when a test
//! enables it, to a per-thread capture buffer.

use std::cell::RefCell;
use std::time::Instant;

use serde_json::{Map, Value};

pub const TARGET: &str = "recordquery::devlog";

thread_local! {
    static CAPTURE: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Stops capturing on the current thread when dropped.
pub struct CaptureGuard;

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        CAPTURE.with(|c| c.borrow_mut().take());
    }
}

/// Capture bench lines emitted on this thread until the guard is dropped.
pub fn enable_thread_sink() -> CaptureGuard {
    CAPTURE.with(|c| *c.borrow_mut() = Some(Vec::new()));
    CaptureGuard
}

pub fn write_str(line: &str) {
    CAPTURE.with(|c| {
        if let Some(lines) = c.borrow_mut().as_mut() {
            lines.push(line.to_owned());
        }
    });
}

/// Take the lines captured so far; empty when capture is off.
pub fn drain() -> Vec<String> {
    CAPTURE.with(|c| c.borrow_mut().as_mut().map(std::mem::take).unwrap_or_default())
}

pub fn snapshot() -> Vec<String> {
    CAPTURE.with(|c| c.borrow().clone().unwrap_or_default())
}

/// Emit a preformatted developer line to the capture buffer and the log target.
#[macro_export]
macro_rules! devlog {
    ($($arg:tt)*) => {{
        let __line = format!($($arg)*);
        $crate::utils::devlog::write_str(&__line);
        log::log!(target: $crate::utils::devlog::TARGET, log::Level::Trace, "{}", __line);
    }};
}

/// Timer for one query operation on one record type.
pub struct QueryBench {
    op: &'static str,
    record: &'static str,
    started: Instant,
}

impl QueryBench {
    #[must_use]
    pub fn start(op: &'static str, record: &'static str) -> Self {
        Self { op, record, started: Instant::now() }
    }

    /// Format the line with `counters` appended, e.g. `result_count`, `skip`, `take`.
    #[must_use]
    pub fn line(&self, counters: &[(&str, usize)]) -> String {
        let mut obj = Map::new();
        obj.insert("bench".into(), Value::from("query"));
        obj.insert("op".into(), Value::from(self.op));
        obj.insert("record".into(), Value::from(self.record));
        let micros = u64::try_from(self.started.elapsed().as_micros()).unwrap_or(u64::MAX);
        obj.insert("duration_us".into(), Value::from(micros));
        for (name, n) in counters {
            obj.insert((*name).to_owned(), Value::from(*n));
        }
        Value::Object(obj).to_string()
    }

    pub fn finish(self, counters: &[(&str, usize)]) {
        let line = self.line(counters);
        crate::devlog!("{line}");
    }
}
