//! Server dependencies shared by every action.
//!
//! Actions receive `&ServerDeps` instead of reaching for globals, so tests
//! can build one around a throwaway database and a fresh cache.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::dashboard::DashboardCache;
use crate::domains::reviews::{FinalizationPolicy, MajorityPolicy};

#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Memoized dashboard reads, invalidated by key on mutation
    pub dashboard_cache: DashboardCache,
    /// Decides when a post under review is published or rejected
    pub review_policy: Arc<dyn FinalizationPolicy>,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        dashboard_cache: DashboardCache,
        review_policy: Arc<dyn FinalizationPolicy>,
    ) -> Self {
        Self {
            db_pool,
            dashboard_cache,
            review_policy,
        }
    }

    /// Defaults: five-minute dashboard cache, majority finalization
    pub fn with_defaults(db_pool: PgPool) -> Self {
        Self::new(
            db_pool,
            DashboardCache::default(),
            Arc::new(MajorityPolicy),
        )
    }
}
