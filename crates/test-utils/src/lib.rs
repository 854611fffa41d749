pub mod builders;

use std::sync::Once;

use chrono::{DateTime, TimeZone, Utc};
use projdag::model::Timeline;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Midnight UTC on day `n` of January 2025 (`day(1)` is 2025-01-01).
///
/// Days past 31 roll over into the following months.
pub fn day(n: u32) -> DateTime<Utc> {
    let base = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .expect("2025-01-01 is a valid date");
    base + chrono::Duration::days(i64::from(n) - 1)
}

/// Timeline from `day(start)` to `day(end)` with an effort estimate.
pub fn timeline(start: u32, end: u32, hours: u32) -> Timeline {
    Timeline::new(day(start), day(end), hours).expect("test timeline must have start <= end")
}
