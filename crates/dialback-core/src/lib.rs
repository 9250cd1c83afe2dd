//! dialback-core
//!
//! Core of the dialback service: the durable single-slot call store, the
//! wake timer, the scheduler state machine, and the telephony provider
//! client. The HTTP surface lives in `dialback-server`.

pub mod call;
pub mod config;
pub mod error;
pub mod provider;
pub mod scheduler;
pub mod store;

pub use call::{CallStatus, CallTarget, ScheduleReceipt, ScheduledCall, StatusReport};
pub use config::Config;
pub use error::{DialbackError, Result};
pub use provider::{CallConfirmation, CallProvider, ProviderError, TwilioProvider};
pub use scheduler::CallScheduler;
pub use store::CallStore;
