//! Process-wide logger instance
//!
//! Optional shared slot for applications that want one logger (and so one
//! credential cache) per process without threading it through every call.
//! The slot starts empty; `install_global` fills it, `reset_global` empties it
//! again so a later install starts from a clean credential cache.

use crate::services::logger::SupabaseLogger;
use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};
use tracing::debug;

static GLOBAL_LOGGER: Lazy<RwLock<Option<Arc<SupabaseLogger>>>> = Lazy::new(|| RwLock::new(None));

/// Install `logger` as the process-wide instance, replacing any previous one
pub fn install_global(logger: Arc<SupabaseLogger>) {
    let mut slot = GLOBAL_LOGGER.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    if slot.replace(logger).is_some() {
        debug!("Replaced process-wide Supabase logger");
    }
}

/// The process-wide instance, if one is installed
pub fn global() -> Option<Arc<SupabaseLogger>> {
    GLOBAL_LOGGER
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// The process-wide instance, installing the result of `init` if none exists
pub fn global_or_init<F>(init: F) -> Arc<SupabaseLogger>
where
    F: FnOnce() -> SupabaseLogger,
{
    let mut slot = GLOBAL_LOGGER.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    Arc::clone(slot.get_or_insert_with(|| Arc::new(init())))
}

/// Remove the process-wide instance
pub fn reset_global() {
    let mut slot = GLOBAL_LOGGER.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = None;
}
