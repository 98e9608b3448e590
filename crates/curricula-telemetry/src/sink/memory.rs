//! In-process recording sink.

use std::sync::{Arc, Mutex, MutexGuard};

use curricula_core::traits::sink::{Channel, LogRecord, LogSink};

/// Keeps every emitted record in memory, in emission order.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<(Channel, LogRecord)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records on every channel.
    pub fn records(&self) -> Vec<(Channel, LogRecord)> {
        self.lock().clone()
    }

    /// Records emitted on one channel.
    pub fn on(&self, channel: Channel) -> Vec<LogRecord> {
        self.lock()
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// Number of records on one channel.
    pub fn count(&self, channel: Channel) -> usize {
        self.lock().iter().filter(|(c, _)| *c == channel).count()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(Channel, LogRecord)>> {
        // A panic while holding the lock leaves the buffer intact.
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemorySink {
    fn emit(&self, channel: Channel, record: LogRecord) {
        self.lock().push((channel, record));
    }
}
