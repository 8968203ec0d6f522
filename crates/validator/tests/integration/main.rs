//! Integration tests for changeset-validator, one module per area.

mod addresses;
mod changeset;
mod domains;
mod messages;
mod pipeline;
mod properties;
mod temporal;

use changeset_validator::engine::Engine;
use chrono::NaiveDate;

pub(crate) fn engine() -> Engine {
    Engine::builder().without_host_resolver().build().unwrap()
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Routes the engine's `debug!`/`trace!` events to the test output.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
