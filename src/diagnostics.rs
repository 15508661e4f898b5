use chrono::{DateTime, Utc};
use tracing::debug;

/// Wall-clock start mark. `std::time::Instant` panics on wasm32, so timings
/// are taken from chrono's clock instead.
pub fn perf_start() -> DateTime<Utc> {
    Utc::now()
}

#[inline]
pub fn log_perf(scope: &str, started_at: DateTime<Utc>, details: &str) {
    let elapsed_ms = (Utc::now() - started_at).num_milliseconds().max(0);
    if details.trim().is_empty() {
        debug!(target: "scoutarr::perf", scope, elapsed_ms, "timing");
    } else {
        debug!(target: "scoutarr::perf", scope, elapsed_ms, details, "timing");
    }
}
