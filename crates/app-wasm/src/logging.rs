//! Tracing output for the browser console
//!
//! A `tracing-subscriber` fmt layer whose writer forwards each formatted
//! line to `console.error`/`warn`/`info`/`debug` according to its level.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Default verbosity of the browser build
pub const LOG_LEVEL: Level = Level::INFO;

/// Install the console subscriber. Later calls are ignored.
pub fn init() {
    let installed = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(LOG_LEVEL)
        // No wall clock on wasm32-unknown-unknown; the console stamps lines
        .without_time()
        .with_ansi(false)
        .try_init();
    if let Err(e) = installed {
        web_sys::console::debug_1(&format!("Inspecta: tracing already initialised: {e}").into());
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and hands it to the console on drop
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let Some(line) = console_line(&self.buffer) else {
            return;
        };
        let line = line.into();
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// The text to print for a buffered event, without its trailing newline
fn console_line(buffer: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(buffer);
    let line = text.trim_end();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
