use super::{RecordSink, SinkError};
use crate::domain::LogRecord;
use parking_lot::Mutex;
use std::io::{self, Stdout, Write};

/// Writes each record as one line of JSON (NDJSON).
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

/// The default sink: one JSON object per line on standard output.
pub type StdoutSink = JsonLinesSink<Stdout>;

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl StdoutSink {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write + Send> RecordSink for JsonLinesSink<W> {
    fn write(&self, record: &LogRecord) -> Result<(), SinkError> {
        let mut line = Vec::with_capacity(256);
        serde_json::to_writer(&mut line, record)?;
        line.push(b'\n');

        // Single write_all per record so concurrent writers never interleave lines.
        let mut writer = self.writer.lock();
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }
}
