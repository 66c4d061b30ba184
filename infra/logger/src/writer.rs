use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Console method a formatted line is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        if level == Level::ERROR {
            Self::Error
        } else if level == Level::WARN {
            Self::Warn
        } else if level == Level::INFO {
            Self::Info
        } else {
            Self::Debug
        }
    }
}

/// [`MakeWriter`] that sends every formatted event to the browser console.
///
/// On `wasm32` each line goes to `console.error`/`warn`/`info`/`debug` according to the event
/// level, so the devtools level filter works. Native builds write to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleWriter;

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine::new(Severity::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleLine::new((*meta.level()).into())
    }
}

/// One buffered log line, flushed to the console when dropped.
#[derive(Debug)]
pub struct ConsoleLine {
    severity: Severity,
    buf: Vec<u8>,
}

impl ConsoleLine {
    const fn new(severity: Severity) -> Self {
        Self { severity, buf: Vec::new() }
    }
}

impl io::Write for ConsoleLine {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        emit(self.severity, line.trim_end());
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(severity: Severity, line: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let line = JsValue::from_str(line);
    match severity {
        Severity::Error => console::error_1(&line),
        Severity::Warn => console::warn_1(&line),
        Severity::Info => console::info_1(&line),
        Severity::Debug => console::debug_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_severity: Severity, line: &str) {
    use std::io::Write;

    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{line}");
}
