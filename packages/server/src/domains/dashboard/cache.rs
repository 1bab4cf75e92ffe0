//! Time-boxed memoization for dashboard reads.
//!
//! Entries are keyed by (resource, community) and served while younger than
//! the TTL. Every mutation names the resources it touches through
//! [`Mutation::affected_resources`], and the action invalidates those keys
//! before responding so the next read goes back to the database.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::common::CommunityId;

/// Default freshness window for dashboard entries.
pub const DEFAULT_TTL_SECS: i64 = 5 * 60;

// =============================================================================
// Generic TTL cache
// =============================================================================

#[derive(Clone, Debug)]
struct CacheEntry<V> {
    payload: V,
    stored_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.stored_at) < ttl
    }
}

/// Key-value cache whose entries expire `ttl` after they were stored.
///
/// Cloning shares the underlying map.
///
/// The generation counter moves on every invalidation. A reader that
/// snapshots it before a slow fetch can use [`TtlCache::insert_if_current`]
/// so a payload computed before an invalidation is never stored after it.
pub struct TtlCache<K, V> {
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    generation: Arc<AtomicU64>,
    ttl: Duration,
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            generation: self.generation.clone(),
            ttl: self.ttl,
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            generation: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    /// Current invalidation generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Utc::now()).await
    }

    /// Look up `key` as of `now`. A stale entry counts as a miss and is evicted.
    pub async fn get_at(&self, key: &K, now: DateTime<Utc>) -> Option<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_fresh(now, self.ttl) => {
                    debug!(?key, "Cache hit");
                    return Some(entry.payload.clone());
                }
                Some(_) => {}
                None => {
                    debug!(?key, "Cache miss");
                    return None;
                }
            }
        }

        // Stale: re-check under the write lock, a concurrent insert may have refreshed it.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.is_fresh(now, self.ttl) {
                return Some(entry.payload.clone());
            }
            entries.remove(key);
        }
        debug!(?key, "Cache entry expired");
        None
    }

    pub async fn insert(&self, key: K, payload: V) {
        self.insert_at(key, payload, Utc::now()).await
    }

    pub async fn insert_at(&self, key: K, payload: V, now: DateTime<Utc>) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                payload,
                stored_at: now,
            },
        );
    }

    /// Store `payload` only if nothing was invalidated since `seen` was read
    /// from [`TtlCache::generation`]. Returns whether it was stored.
    pub async fn insert_if_current(&self, key: K, payload: V, seen: u64) -> bool {
        let mut entries = self.entries.write().await;
        if self.generation.load(Ordering::SeqCst) != seen {
            debug!(?key, "Skipping insert of payload fetched before an invalidation");
            return false;
        }
        entries.insert(
            key,
            CacheEntry {
                payload,
                stored_at: Utc::now(),
            },
        );
        true
    }

    /// Remove one key. Returns whether an entry was present.
    ///
    /// The generation moves even when the key is absent: a fetch for it may
    /// already be in flight.
    pub async fn invalidate(&self, key: &K) -> bool {
        let mut entries = self.entries.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        entries.remove(key).is_some()
    }

    /// Remove every key matching `predicate`.
    pub async fn invalidate_where<F>(&self, mut predicate: F)
    where
        F: FnMut(&K) -> bool,
    {
        let mut entries = self.entries.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        entries.retain(|key, _| !predicate(key));
    }

    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        entries.clear();
    }

    /// Drop expired entries (housekeeping).
    pub async fn purge_expired(&self) {
        let now = Utc::now();
        let ttl = self.ttl;
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.is_fresh(now, ttl));
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

// =============================================================================
// Dashboard keys
// =============================================================================

/// Dashboard resources that are cached per community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardResource {
    Dashboard,
    Members,
    ContributorRequests,
    Posts,
}

impl DashboardResource {
    pub const ALL: [DashboardResource; 4] = [
        DashboardResource::Dashboard,
        DashboardResource::Members,
        DashboardResource::ContributorRequests,
        DashboardResource::Posts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardResource::Dashboard => "dashboard",
            DashboardResource::Members => "members",
            DashboardResource::ContributorRequests => "contributor-requests",
            DashboardResource::Posts => "posts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub resource: DashboardResource,
    pub community_id: CommunityId,
}

impl CacheKey {
    pub fn new(resource: DashboardResource, community_id: CommunityId) -> Self {
        Self {
            resource,
            community_id,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.resource.as_str(), self.community_id)
    }
}

/// State-changing actions and the cached resources they make stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    JoinCommunity,
    PromoteMember,
    DemoteMember,
    BanMember,
    CreateContributorRequest,
    ApproveContributorRequest,
    RejectContributorRequest,
    CreatePost,
    SubmitReview,
}

impl Mutation {
    pub fn affected_resources(&self) -> &'static [DashboardResource] {
        use DashboardResource::*;
        match self {
            // Every membership change moves the dashboard's role counts.
            Mutation::JoinCommunity
            | Mutation::PromoteMember
            | Mutation::DemoteMember
            | Mutation::BanMember => &[Members, Dashboard],
            Mutation::CreateContributorRequest | Mutation::RejectContributorRequest => {
                &[ContributorRequests, Dashboard]
            }
            Mutation::ApproveContributorRequest => &[ContributorRequests, Members, Dashboard],
            Mutation::CreatePost | Mutation::SubmitReview => &[Posts, Dashboard],
        }
    }
}

// =============================================================================
// Dashboard cache
// =============================================================================

/// The dashboard's cache: JSON payloads keyed by (resource, community).
#[derive(Clone)]
pub struct DashboardCache {
    inner: TtlCache<CacheKey, serde_json::Value>,
}

impl DashboardCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: TtlCache::new(ttl),
        }
    }

    pub fn with_ttl_secs(secs: i64) -> Self {
        Self::new(Duration::seconds(secs))
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl()
    }

    pub async fn get(&self, key: &CacheKey) -> Option<serde_json::Value> {
        self.inner.get(key).await
    }

    pub async fn get_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<serde_json::Value> {
        self.inner.get_at(key, now).await
    }

    pub async fn insert(&self, key: CacheKey, payload: serde_json::Value) {
        self.inner.insert(key, payload).await
    }

    pub async fn insert_at(&self, key: CacheKey, payload: serde_json::Value, now: DateTime<Utc>) {
        self.inner.insert_at(key, payload, now).await
    }

    pub fn generation(&self) -> u64 {
        self.inner.generation()
    }

    pub async fn insert_if_current(
        &self,
        key: CacheKey,
        payload: serde_json::Value,
        seen: u64,
    ) -> bool {
        self.inner.insert_if_current(key, payload, seen).await
    }

    pub async fn invalidate(&self, key: &CacheKey) -> bool {
        let removed = self.inner.invalidate(key).await;
        if removed {
            debug!(key = %key, "Cache invalidated");
        }
        removed
    }

    /// Invalidate what `mutation` makes stale for one community.
    pub async fn invalidate_for(&self, mutation: Mutation, community_id: CommunityId) {
        for resource in mutation.affected_resources() {
            self.invalidate(&CacheKey::new(*resource, community_id)).await;
        }
    }

    /// Invalidate all resources of one community.
    pub async fn invalidate_community(&self, community_id: CommunityId) {
        self.inner
            .invalidate_where(|key| key.community_id == community_id)
            .await;
    }

    pub async fn clear(&self) {
        self.inner.clear().await
    }

    pub async fn purge_expired(&self) {
        self.inner.purge_expired().await
    }

    pub async fn len(&self) -> usize {
        self.inner.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.is_empty().await
    }
}

impl Default for DashboardCache {
    fn default() -> Self {
        Self::with_ttl_secs(DEFAULT_TTL_SECS)
    }
}
