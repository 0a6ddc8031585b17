//! Tracing subscriber setup.
//!
//! With `--log-file` every event goes to the file. Otherwise events go to
//! stderr through a [`LogGate`] that is closed while the dashboard owns the
//! terminal, so nothing is written over the full-screen frame. Loop events
//! stay visible in the dashboard's status panel.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::Metadata;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::{MakeWriter, MakeWriterExt, WithFilter};

/// Switch that mutes a writer without touching the subscriber.
#[derive(Debug, Clone)]
pub struct LogGate(Arc<AtomicBool>);

impl Default for LogGate {
    fn default() -> Self {
        Self::new()
    }
}

impl LogGate {
    /// A gate that starts open.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn open(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn close(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_open(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Wrap `inner` so events are dropped while `gate` is closed.
pub fn gated<M>(inner: M, gate: LogGate) -> WithFilter<M, impl Fn(&Metadata<'_>) -> bool>
where
    M: for<'a> MakeWriter<'a>,
{
    inner.with_filter(move |_: &Metadata<'_>| gate.is_open())
}

/// Install the global subscriber.
///
/// Returns the stderr gate, or `None` when logging to a file.
pub fn init(level: &str, log_file: Option<&Path>) -> io::Result<Option<LogGate>> {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_max_level(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
            Ok(None)
        }
        None => {
            let gate = LogGate::new();
            tracing_subscriber::fmt()
                .with_max_level(filter)
                .with_target(false)
                .with_writer(gated(io::stderr, gate.clone()))
                .init();
            Ok(Some(gate))
        }
    }
}

/// In-memory log sink for tests.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl CapturedLogs {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Plain-text subscriber writing into this sink at every level.
    pub(crate) fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let sink = self.clone();
        tracing_subscriber::fmt()
            .with_max_level(LevelFilter::TRACE)
            .with_target(false)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish()
    }
}

#[cfg(test)]
impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::info;

    #[test]
    fn test_closed_gate_drops_events() {
        let logs = CapturedLogs::default();
        let gate = LogGate::new();
        let sink = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_target(false)
            .with_ansi(false)
            .with_writer(gated(move || sink.clone(), gate.clone()))
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            info!("before dashboard");
            gate.close();
            info!("while dashboard is up");
            gate.open();
            info!("after dashboard");
        });

        let text = logs.contents();
        assert!(text.contains("before dashboard"));
        assert!(!text.contains("while dashboard is up"));
        assert!(text.contains("after dashboard"));
    }

    #[test]
    fn test_gate_starts_open() {
        let gate = LogGate::default();
        assert!(gate.is_open());
        gate.close();
        assert!(!gate.is_open());
    }
}
