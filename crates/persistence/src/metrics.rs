//! Storage metrics collection.
//!
//! Query timings and pool gauges exported through the `metrics` facade;
//! the API crate installs the Prometheus recorder.

use metrics::{counter, gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Records one completed query: a duration sample and a count.
pub fn record_query_duration(query_name: &str, duration_secs: f64) {
    histogram!(
        "db_query_duration_seconds",
        "query" => query_name.to_string()
    )
    .record(duration_secs);
    counter!(
        "db_queries_total",
        "query" => query_name.to_string()
    )
    .increment(1);
}

/// Samples connection pool gauges. Called periodically by a background
/// task while a Postgres backend is active.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();

    gauge!("db_pool_connections_active").set(size.saturating_sub(idle) as f64);
    gauge!("db_pool_connections_idle").set(idle as f64);
    gauge!("db_pool_connections_total").set(size as f64);
}

/// Times one repository query.
///
/// Create before issuing the query and call [`QueryTimer::record`] once
/// it resolves; a timer that is dropped without recording emits nothing,
/// so cancelled futures do not skew the histogram.
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    pub fn record(self) {
        record_query_duration(self.query_name, self.start.elapsed().as_secs_f64());
    }
}
