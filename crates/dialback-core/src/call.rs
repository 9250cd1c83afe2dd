//! Scheduled-call data model.
//!
//! `ScheduledCall` is the sole persisted entity: one record describing the
//! pending (or finished) delayed call. The store holds at most one of these
//! at a time — a new schedule request is a full overwrite, not an enqueue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CallTarget
// ---------------------------------------------------------------------------

/// Addressing handed to the telephony provider when the call fires.
///
/// Copied from configuration at schedule time (the caller picks only the
/// delay); immutable for the lifetime of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTarget {
    pub to_number: String,
    pub from_number: String,
}

// ---------------------------------------------------------------------------
// CallStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of the scheduled call.
///
/// Transitions: `Pending → Completed | Failed`. Terminal states are
/// absorbing — the only way forward is a fresh schedule request, which
/// replaces the record entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    /// Waiting for the wake timer to fire.
    Pending,
    /// The provider accepted the call.
    Completed,
    /// The provider rejected the call or was unreachable.
    Failed,
}

// ---------------------------------------------------------------------------
// ScheduledCall
// ---------------------------------------------------------------------------

/// The single persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledCall {
    /// Absolute instant the call must fire. Set once at creation.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub scheduled_at: DateTime<Utc>,
    pub target: CallTarget,
    pub status: CallStatus,
}

impl ScheduledCall {
    /// Create a fresh `Pending` record due at `scheduled_at`.
    pub fn pending(scheduled_at: DateTime<Utc>, target: CallTarget) -> Self {
        Self {
            scheduled_at,
            target,
            status: CallStatus::Pending,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_at <= now
    }

    /// Milliseconds until the due instant, floored at zero.
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        (self.scheduled_at - now).num_milliseconds().max(0)
    }
}

// ---------------------------------------------------------------------------
// Wire types — what the scheduler reports back to callers
// ---------------------------------------------------------------------------

/// Successful response to a schedule request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleReceipt {
    pub success: bool,
    pub message: String,
    pub delay_minutes: i64,
}

/// Projection returned by a status query. Never mutates anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatusReport {
    /// The slot is empty — nothing was ever scheduled.
    NothingScheduled { status: &'static str },
    Scheduled {
        status: CallStatus,
        /// Due instant as epoch milliseconds.
        #[serde(rename = "scheduledTime")]
        scheduled_time: i64,
        /// `max(0, scheduled_time - now)`.
        #[serde(rename = "remainingMs")]
        remaining_ms: i64,
    },
}

impl StatusReport {
    pub fn nothing_scheduled() -> Self {
        Self::NothingScheduled {
            status: "no_call_scheduled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn target() -> CallTarget {
        CallTarget {
            to_number: "+15551230001".into(),
            from_number: "+15551230002".into(),
        }
    }

    #[test]
    fn pending_record_starts_pending() {
        let call = ScheduledCall::pending(Utc::now(), target());
        assert_eq!(call.status, CallStatus::Pending);
    }

    #[test]
    fn remaining_ms_floors_at_zero() {
        let now = Utc::now();
        let call = ScheduledCall::pending(now - Duration::minutes(5), target());
        assert_eq!(call.remaining_ms(now), 0);
    }

    #[test]
    fn remaining_ms_counts_down_to_due_time() {
        let now = Utc::now();
        let call = ScheduledCall::pending(now + Duration::minutes(10), target());
        let remaining = call.remaining_ms(now);
        assert!(remaining > 599_000 && remaining <= 600_000, "got {remaining}");
    }

    #[test]
    fn is_due_at_exact_instant() {
        let now = Utc::now();
        let call = ScheduledCall::pending(now, target());
        assert!(call.is_due(now));
        assert!(!call.is_due(now - Duration::milliseconds(1)));
    }

    #[test]
    fn status_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&CallStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&CallStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(
            serde_json::to_string(&CallStatus::Failed).unwrap(),
            "\"failed\""
        );
    }

    #[test]
    fn record_round_trips_with_epoch_ms_timestamp() {
        let call = ScheduledCall::pending(Utc::now(), target());
        let json = serde_json::to_value(&call).unwrap();
        // Persisted layout carries the due instant as an int64 of epoch ms
        assert!(json["scheduled_at"].is_i64());
        assert_eq!(
            json["scheduled_at"].as_i64().unwrap(),
            call.scheduled_at.timestamp_millis()
        );

        let back: ScheduledCall = serde_json::from_value(json).unwrap();
        assert_eq!(
            back.scheduled_at.timestamp_millis(),
            call.scheduled_at.timestamp_millis()
        );
    }

    #[test]
    fn empty_slot_report_has_sentinel_status() {
        let json = serde_json::to_value(StatusReport::nothing_scheduled()).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "no_call_scheduled" }));
    }

    #[test]
    fn scheduled_report_uses_camel_case_keys() {
        let report = StatusReport::Scheduled {
            status: CallStatus::Pending,
            scheduled_time: 1_700_000_000_000,
            remaining_ms: 60_000,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["scheduledTime"], 1_700_000_000_000_i64);
        assert_eq!(json["remainingMs"], 60_000);
    }
}
