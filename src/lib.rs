#![doc(test(attr(deny(warnings))))]

//! Fit Intake runs the fitness onboarding questionnaire: it walks a user
//! through the intake screens, collects their answers and stores the
//! resulting profile before handing off to the rest of the app.

pub mod cli;
pub mod utils;

pub use intake_config as config;
pub use intake_core as core;
pub use intake_domain as domain;
pub use intake_storage_json as storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fit Intake tracing initialized.");
    });
}
