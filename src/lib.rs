#![doc(test(attr(deny(warnings))))]

//! Select Foods keeps a rolling, date-windowed meal plan: menus drawn from a
//! catalog are assigned to lunch and dinner slots, and the shopping list for
//! the visible window is derived on demand.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Select Foods tracing initialized.");
    });
}
