//! The single-entity delayed-call scheduler.
//!
//! One durable record slot, one armed wake timer. `schedule`, `status`, and
//! `on_wake` all serialize behind a single async mutex, so no two operations
//! interleave their read-modify-write of the slot.
//!
//! The wake timer is a tokio task that sleeps until the due instant and then
//! delivers `on_wake`. Delivery is at-least-once: `resume` re-arms from the
//! persisted record after a restart, and a duplicate or stale delivery is
//! absorbed by the pending-and-due guard in `on_wake`, which always re-reads
//! the current record before acting. Re-scheduling aborts the previous timer
//! task, but correctness never depends on the abort winning the race.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::call::{CallStatus, CallTarget, ScheduleReceipt, ScheduledCall, StatusReport};
use crate::error::{DialbackError, Result};
use crate::provider::CallProvider;
use crate::store::CallStore;

pub const MIN_DELAY_MINUTES: i64 = 1;
pub const MAX_DELAY_MINUTES: i64 = 60;

// ---------------------------------------------------------------------------
// CallScheduler
// ---------------------------------------------------------------------------

/// Handle to the scheduler. Cheap to clone; all clones share the one record
/// slot and timer.
#[derive(Clone)]
pub struct CallScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    store: CallStore,
    provider: Arc<dyn CallProvider>,
    target: CallTarget,
    /// Serializes all scheduler operations and owns the armed timer task.
    lock: Mutex<TimerSlot>,
}

#[derive(Default)]
struct TimerSlot {
    handle: Option<JoinHandle<()>>,
}

impl CallScheduler {
    pub fn new(store: CallStore, provider: Arc<dyn CallProvider>, target: CallTarget) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                store,
                provider,
                target,
                lock: Mutex::new(TimerSlot::default()),
            }),
        }
    }

    /// Schedule a call `delay_minutes` from now, replacing any existing
    /// record and re-arming the wake timer. A second call before the first
    /// fires silently supersedes it — there is only one slot.
    pub async fn schedule(&self, delay_minutes: i64) -> Result<ScheduleReceipt> {
        if !(MIN_DELAY_MINUTES..=MAX_DELAY_MINUTES).contains(&delay_minutes) {
            return Err(DialbackError::InvalidDelay);
        }

        let mut slot = self.inner.lock.lock().await;
        let scheduled_at = Utc::now() + chrono::Duration::minutes(delay_minutes);
        let call = ScheduledCall::pending(scheduled_at, self.inner.target.clone());
        self.inner.store.put(&call)?;
        arm(&self.inner, &mut slot, scheduled_at);

        tracing::info!(delay_minutes, scheduled_at = %scheduled_at, "call scheduled");
        Ok(ScheduleReceipt {
            success: true,
            message: format!(
                "Call scheduled for {}. You can close this page.",
                scheduled_at.format("%H:%M:%S UTC")
            ),
            delay_minutes,
        })
    }

    /// Report the current record. Pure projection — never mutates the slot
    /// and never touches the timer.
    pub async fn status(&self) -> Result<StatusReport> {
        let _slot = self.inner.lock.lock().await;
        match self.inner.store.get()? {
            None => Ok(StatusReport::nothing_scheduled()),
            Some(call) => {
                let now = Utc::now();
                Ok(StatusReport::Scheduled {
                    status: call.status,
                    scheduled_time: call.scheduled_at.timestamp_millis(),
                    remaining_ms: call.remaining_ms(now),
                })
            }
        }
    }

    /// Deliver a wake. Safe to call spuriously, twice, or against a
    /// superseded record; errors never escape.
    pub async fn on_wake(&self) {
        self.inner.on_wake().await;
    }

    /// Re-arm the wake timer from the persisted record after a process
    /// restart. A past-due pending record fires promptly.
    pub async fn resume(&self) -> Result<()> {
        let mut slot = self.inner.lock.lock().await;
        if let Some(call) = self.inner.store.get()? {
            if call.status == CallStatus::Pending {
                tracing::info!(scheduled_at = %call.scheduled_at, "resuming pending call");
                arm(&self.inner, &mut slot, call.scheduled_at);
            }
        }
        Ok(())
    }
}

impl SchedulerInner {
    async fn on_wake(&self) {
        let _slot = self.lock.lock().await;

        // Re-read the slot: the record may have been superseded or already
        // driven to a terminal state since this wake was armed.
        let call = match self.store.get() {
            Ok(Some(call)) => call,
            Ok(None) => {
                tracing::debug!("wake fired against an empty slot, ignoring");
                return;
            }
            Err(e) => {
                tracing::error!("wake could not read the call slot: {e}");
                return;
            }
        };

        if call.status != CallStatus::Pending {
            tracing::debug!(status = ?call.status, "wake fired against a terminal record, ignoring");
            return;
        }
        let now = Utc::now();
        if !call.is_due(now) {
            // A timer armed for a superseded schedule got here first; the
            // live timer fires at the real due instant.
            tracing::debug!(scheduled_at = %call.scheduled_at, "wake fired before due time, ignoring");
            return;
        }

        tracing::info!(to = %call.target.to_number, "wake fired, placing call");
        let status = match self.provider.place_call(&call.target).await {
            Ok(confirmation) => {
                tracing::info!(sid = %confirmation.sid, "call placed");
                CallStatus::Completed
            }
            Err(e) => {
                tracing::error!("call placement failed: {e}");
                CallStatus::Failed
            }
        };

        let finished = ScheduledCall { status, ..call };
        if let Err(e) = self.store.put(&finished) {
            tracing::error!("could not persist call outcome: {e}");
        }
    }
}

/// Arm the timer for `due`, replacing any previously armed task. Must be
/// called with the scheduler lock held.
fn arm(inner: &Arc<SchedulerInner>, slot: &mut TimerSlot, due: DateTime<Utc>) {
    if let Some(handle) = slot.handle.take() {
        handle.abort();
    }
    let inner = Arc::clone(inner);
    slot.handle = Some(tokio::spawn(async move {
        let wait = (due - Utc::now())
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);
        tokio::time::sleep(wait).await;
        inner.on_wake().await;
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
