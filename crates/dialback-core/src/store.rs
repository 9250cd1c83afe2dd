//! Durable single-slot storage for the scheduled call, on redb.
//!
//! # Table design
//!
//! One `SCHEDULED_CALL` table with a single fixed key. The scheduler never
//! queues calls — `put` is a full overwrite of whatever was in the slot, and
//! the previous record (pending or terminal) is simply gone. The record
//! survives process restarts; `CallScheduler::resume` re-arms the wake timer
//! from it on startup.

use std::path::Path;

use redb::{Database, TableDefinition};

use crate::call::ScheduledCall;
use crate::error::{DialbackError, Result};

/// Key: fixed slot name. Value: JSON-encoded `ScheduledCall`.
const SCHEDULED_CALL: TableDefinition<&str, &[u8]> = TableDefinition::new("scheduled_call");

const SLOT_KEY: &str = "current";

/// Persistent store for the one `ScheduledCall` record.
pub struct CallStore {
    db: Database,
}

impl CallStore {
    /// Open or create the redb database at `path`.
    ///
    /// Creates the `SCHEDULED_CALL` table if it doesn't already exist.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Database::create(path).map_err(|e| DialbackError::Store(e.to_string()))?;
        // Ensure the table exists before any reads
        let wt = db
            .begin_write()
            .map_err(|e| DialbackError::Store(e.to_string()))?;
        wt.open_table(SCHEDULED_CALL)
            .map_err(|e| DialbackError::Store(e.to_string()))?;
        wt.commit()
            .map_err(|e| DialbackError::Store(e.to_string()))?;
        Ok(Self { db })
    }

    /// Read the current record, if any.
    pub fn get(&self) -> Result<Option<ScheduledCall>> {
        let rt = self
            .db
            .begin_read()
            .map_err(|e| DialbackError::Store(e.to_string()))?;
        let table = rt
            .open_table(SCHEDULED_CALL)
            .map_err(|e| DialbackError::Store(e.to_string()))?;
        let value = table
            .get(SLOT_KEY)
            .map_err(|e| DialbackError::Store(e.to_string()))?;
        match value {
            Some(v) => {
                let call: ScheduledCall = serde_json::from_slice(v.value())
                    .map_err(|e| DialbackError::Store(e.to_string()))?;
                Ok(Some(call))
            }
            None => Ok(None),
        }
    }

    /// Write the record, replacing whatever occupied the slot.
    pub fn put(&self, call: &ScheduledCall) -> Result<()> {
        let value = serde_json::to_vec(call).map_err(|e| DialbackError::Store(e.to_string()))?;
        let wt = self
            .db
            .begin_write()
            .map_err(|e| DialbackError::Store(e.to_string()))?;
        {
            let mut table = wt
                .open_table(SCHEDULED_CALL)
                .map_err(|e| DialbackError::Store(e.to_string()))?;
            table
                .insert(SLOT_KEY, value.as_slice())
                .map_err(|e| DialbackError::Store(e.to_string()))?;
        }
        wt.commit()
            .map_err(|e| DialbackError::Store(e.to_string()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::{CallStatus, CallTarget};
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn open_tmp() -> (TempDir, CallStore) {
        let dir = TempDir::new().unwrap();
        let store = CallStore::open(&dir.path().join("calls.redb")).unwrap();
        (dir, store)
    }

    fn pending_in(minutes: i64) -> ScheduledCall {
        ScheduledCall::pending(
            Utc::now() + Duration::minutes(minutes),
            CallTarget {
                to_number: "+15551230001".into(),
                from_number: "+15551230002".into(),
            },
        )
    }

    #[test]
    fn empty_store_returns_none() {
        let (_dir, store) = open_tmp();
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn put_then_get_round_trips() {
        let (_dir, store) = open_tmp();
        let call = pending_in(5);
        store.put(&call).unwrap();

        let loaded = store.get().unwrap().unwrap();
        assert_eq!(loaded.status, CallStatus::Pending);
        assert_eq!(
            loaded.scheduled_at.timestamp_millis(),
            call.scheduled_at.timestamp_millis()
        );
        assert_eq!(loaded.target, call.target);
    }

    #[test]
    fn put_overwrites_the_slot() {
        let (_dir, store) = open_tmp();
        let first = pending_in(5);
        let second = pending_in(10);
        store.put(&first).unwrap();
        store.put(&second).unwrap();

        let loaded = store.get().unwrap().unwrap();
        assert_eq!(
            loaded.scheduled_at.timestamp_millis(),
            second.scheduled_at.timestamp_millis()
        );
    }

    #[test]
    fn record_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("calls.redb");
        let call = pending_in(3);
        {
            let store = CallStore::open(&path).unwrap();
            store.put(&call).unwrap();
        }

        let store = CallStore::open(&path).unwrap();
        let loaded = store.get().unwrap().unwrap();
        assert_eq!(
            loaded.scheduled_at.timestamp_millis(),
            call.scheduled_at.timestamp_millis()
        );
    }

    #[test]
    fn terminal_status_persists() {
        let (_dir, store) = open_tmp();
        let mut call = pending_in(1);
        call.status = CallStatus::Failed;
        store.put(&call).unwrap();

        assert_eq!(store.get().unwrap().unwrap().status, CallStatus::Failed);
    }
}
