use dialback_core::CallScheduler;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub scheduler: CallScheduler,
}

impl AppState {
    pub fn new(scheduler: CallScheduler) -> Self {
        Self { scheduler }
    }
}
