use std::io::{self, Write};

use colored::*;

/// Where skip and failure notices go. The aggregator only produces the
/// message text; how it is shown is up to the sink.
pub trait Diagnostics {
    fn report(&mut self, message: &str);
}

/// Writes each notice as its own red line.
pub struct StderrDiagnostics {
    writer: Box<dyn Write>,
}

impl StderrDiagnostics {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stderr()))
    }

    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        StderrDiagnostics { writer }
    }
}

impl Default for StderrDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics for StderrDiagnostics {
    fn report(&mut self, message: &str) {
        let _ = writeln!(self.writer, "{}", message.red());
        let _ = self.writer.flush();
    }
}

/// Keeps every notice in memory.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    pub messages: Vec<String>,
}

impl Diagnostics for CollectingDiagnostics {
    fn report(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::control;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("buffer lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stderr_diagnostics_writes_one_line_per_report() {
        control::set_override(false);
        let buffer = SharedBuffer::default();
        let mut sink = StderrDiagnostics::with_writer(Box::new(buffer.clone()));
        sink.report("first");
        sink.report("second");
        let written = String::from_utf8(buffer.0.lock().expect("buffer lock").clone())
            .expect("utf-8 output");
        assert_eq!(written, "first\nsecond\n");
    }

    #[test]
    fn test_collecting_diagnostics_keeps_order() {
        let mut sink = CollectingDiagnostics::default();
        sink.report("a");
        sink.report("b");
        assert_eq!(sink.messages, vec!["a", "b"]);
    }
}
