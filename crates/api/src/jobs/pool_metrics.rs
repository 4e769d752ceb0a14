//! Periodic connection pool metrics sampling.

use sqlx::PgPool;
use std::time::Duration;

const SAMPLE_INTERVAL: Duration = Duration::from_secs(15);

/// Spawns a task that samples pool gauges every 15 seconds.
///
/// Runs for the lifetime of the process; only started when a PostgreSQL
/// backend is configured.
pub fn spawn(pool: PgPool) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SAMPLE_INTERVAL);
        loop {
            interval.tick().await;
            persistence::metrics::record_pool_metrics(&pool);
        }
    });
}
