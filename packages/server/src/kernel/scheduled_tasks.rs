//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! Currently only housekeeping: stale dashboard entries are already ignored
//! on read, this sweep just keeps the map from growing with communities
//! nobody looks at anymore.

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::dashboard::DashboardCache;

/// Start all scheduled tasks
pub async fn start_scheduler(dashboard_cache: DashboardCache) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // Cache sweep - every five minutes
    let purge_job = Job::new_async("0 */5 * * * *", move |_uuid, _lock| {
        let cache = dashboard_cache.clone();
        Box::pin(async move {
            let before = cache.len().await;
            cache.purge_expired().await;
            let after = cache.len().await;
            tracing::debug!(evicted = before.saturating_sub(after), "Dashboard cache sweep");
        })
    })?;

    scheduler.add(purge_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled tasks started (dashboard cache sweep every 5 minutes)");
    Ok(scheduler)
}
