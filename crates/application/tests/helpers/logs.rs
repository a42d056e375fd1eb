#![allow(dead_code)]
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::dispatcher::DefaultGuard;
use tracing::Dispatch;
use tracing_subscriber::layer::SubscriberExt;

/// Collects formatted log lines emitted on the current thread.
#[derive(Clone, Default)]
pub struct LogWriter(Arc<Mutex<Vec<u8>>>);

impl LogWriter {
    pub fn contains(&self, needle: &str) -> bool {
        self.logs().contains(needle)
    }

    pub fn logs(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Installs a thread-local subscriber writing into the returned buffer until
/// the guard drops. Needs a current-thread runtime.
pub fn capture_logs() -> (LogWriter, DefaultGuard) {
    let logs = LogWriter::default();
    let sink = logs.clone();

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(move || sink.clone())
        .with_ansi(false);
    let dispatch = Dispatch::new(tracing_subscriber::registry().with(layer));

    (logs, tracing::dispatcher::set_default(&dispatch))
}
