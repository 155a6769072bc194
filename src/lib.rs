#![doc(test(attr(deny(warnings))))]

//! Rentbook keeps track of rental properties, their recurring fees and the
//! payments received against them.
//!
//! The heavy lifting lives in the workspace crates re-exported here; this crate
//! adds portfolio persistence and the `rentbook_cli` shell.

pub mod cli;
pub mod errors;
pub mod utils;

pub use rentbook_config;
pub use rentbook_core;
pub use rentbook_domain;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the global tracing subscriber once and logs startup.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Rentbook tracing initialized.");
    });
}
