#![doc(test(attr(deny(warnings))))]

//! Bill Core tracks a personal income schedule and one-off or recurring
//! bills, and projects which bills fall due within each upcoming pay period.

pub mod bills;
pub mod cli;
pub mod config;
pub mod errors;
pub mod playground;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bill Core tracing initialized.");
    });
}
