use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use login_throttle_application::AttemptStore;
use login_throttle_domain::{AttemptRecord, ClientKey};

#[cfg(test)]
mod tests;

/// In-memory attempt store adapter.
///
/// Records live in a sharded map; every read-modify-write happens under the
/// entry lock of the key's shard, so updates to one key are linearizable and
/// unrelated keys rarely contend.
#[derive(Debug, Default)]
pub struct InMemoryAttemptStore {
    records: DashMap<ClientKey, AttemptRecord>,
}

impl InMemoryAttemptStore {
    /// Creates an empty in-memory attempt store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttemptStore for InMemoryAttemptStore {
    fn record_failure(
        &self,
        key: &ClientKey,
        now: Instant,
        ban_duration: Duration,
    ) -> AttemptRecord {
        match self.records.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                if record.is_expired_at(now, ban_duration) {
                    *record = AttemptRecord::first_failure(now);
                } else {
                    record.register_failure(now);
                }
                *record
            }
            Entry::Vacant(entry) => *entry.insert(AttemptRecord::first_failure(now)),
        }
    }

    fn find_active(
        &self,
        key: &ClientKey,
        now: Instant,
        ban_duration: Duration,
    ) -> Option<AttemptRecord> {
        // The shard guard must be released before the conditional remove below.
        let record = self.records.get(key).map(|entry| *entry)?;

        if record.is_expired_at(now, ban_duration) {
            self.records
                .remove_if(key, |_, current| current.is_expired_at(now, ban_duration));
            return None;
        }

        Some(record)
    }

    fn purge_expired(&self, now: Instant, ban_duration: Duration) -> usize {
        let mut purged = 0;
        self.records.retain(|_, record| {
            let keep = !record.is_expired_at(now, ban_duration);
            if !keep {
                purged += 1;
            }
            keep
        });
        purged
    }

    fn tracked_clients(&self) -> usize {
        self.records.len()
    }
}
