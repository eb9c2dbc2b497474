use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Hands out record ids derived from the wall clock.
///
/// Ids are epoch milliseconds, strictly increasing for the lifetime of the
/// generator: two ids requested in the same millisecond (or after the clock
/// stepped backwards) get `last + 1`.
#[derive(Debug, Default)]
pub struct RecordIdGenerator {
    last: AtomicI64,
}

impl RecordIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        self.next_at(Utc::now().timestamp_millis()).to_string()
    }

    /// Make sure future ids sort after an id already in the collection.
    pub fn observe(&self, id: &str) {
        if let Ok(value) = id.parse::<i64>() {
            self.last.fetch_max(value, Ordering::SeqCst);
        }
    }

    fn next_at(&self, now_millis: i64) -> i64 {
        let mut previous = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now_millis.max(previous + 1);
            match self.last.compare_exchange(
                previous,
                candidate,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return candidate,
                Err(actual) => previous = actual,
            }
        }
    }
}
