//! Read-through helper for cached dashboard resources

use serde::Serialize;
use std::future::Future;

use crate::common::{ApiError, ApiResult};
use crate::domains::dashboard::cache::{CacheKey, DashboardCache};

/// Serve `key` from the cache, or run `fetch`, store its JSON and return it.
///
/// The payload is not stored if an invalidation landed while `fetch` ran.
pub async fn cached_read<T, F, Fut>(
    cache: &DashboardCache,
    key: CacheKey,
    fetch: F,
) -> ApiResult<serde_json::Value>
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    if let Some(hit) = cache.get(&key).await {
        return Ok(hit);
    }

    let generation = cache.generation();
    let fresh = fetch().await?;
    let payload = serde_json::to_value(fresh).map_err(|e| ApiError::Internal(e.into()))?;
    cache.insert_if_current(key, payload.clone(), generation).await;

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CommunityId;
    use crate::domains::dashboard::cache::DashboardResource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn second_read_within_ttl_skips_fetch() {
        let cache = DashboardCache::default();
        let key = CacheKey::new(DashboardResource::Posts, CommunityId::new());
        let fetches = &AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cached_read(&cache, key, || async move {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok(vec!["post"])
            })
            .await
            .unwrap();
            assert_eq!(value, serde_json::json!(["post"]));
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_ttl_always_refetches() {
        let cache = DashboardCache::with_ttl_secs(0);
        let key = CacheKey::new(DashboardResource::Posts, CommunityId::new());
        let fetches = &AtomicUsize::new(0);

        for _ in 0..2 {
            cached_read(&cache, key, || async move {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok(0)
            })
            .await
            .unwrap();
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_fetch_caches_nothing() {
        let cache = DashboardCache::default();
        let key = CacheKey::new(DashboardResource::Members, CommunityId::new());

        let result = cached_read::<(), _, _>(&cache, key, || async move {
            Err(ApiError::NotFound("Community"))
        })
        .await;

        assert!(matches!(result, Err(ApiError::NotFound("Community"))));
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn invalidation_forces_refetch() {
        let cache = DashboardCache::default();
        let key = CacheKey::new(DashboardResource::Members, CommunityId::new());

        cached_read(&cache, key, || async move { Ok("old") }).await.unwrap();
        cache.invalidate(&key).await;
        let value = cached_read(&cache, key, || async move { Ok("new") }).await.unwrap();

        assert_eq!(value, serde_json::json!("new"));
    }

    #[tokio::test]
    async fn fetch_overtaken_by_a_mutation_is_not_cached() {
        let cache = &DashboardCache::default();
        let key = CacheKey::new(DashboardResource::Dashboard, CommunityId::new());

        let value = cached_read(cache, key, || async move {
            // A mutation commits and invalidates while the read is in flight.
            cache.invalidate(&key).await;
            Ok("before mutation")
        })
        .await
        .unwrap();

        assert_eq!(value, serde_json::json!("before mutation"));
        assert_eq!(cache.get(&key).await, None);

        let value = cached_read(cache, key, || async move { Ok("after mutation") })
            .await
            .unwrap();
        assert_eq!(value, serde_json::json!("after mutation"));
        assert_eq!(cache.get(&key).await, Some(serde_json::json!("after mutation")));
    }
}
