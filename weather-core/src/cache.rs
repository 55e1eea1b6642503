use std::{
    fmt,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use moka::{Expiry, future::Cache};

use crate::model::LocalizedWeatherResult;

/// Shared key/value store for localized results.
///
/// Entries expire on their own once their TTL has passed; there is no invalidation call.
#[async_trait]
pub trait ResponseCache: Send + Sync + fmt::Debug {
    async fn get(&self, key: &str) -> Option<LocalizedWeatherResult>;

    /// Store `value` under `key` for `ttl`, replacing whatever was there.
    async fn set(&self, key: String, value: LocalizedWeatherResult, ttl: Duration);
}

#[derive(Debug, Clone)]
struct Entry {
    result: LocalizedWeatherResult,
    ttl: Duration,
}

/// Expire each entry after the TTL it was stored with. Reads leave the deadline alone.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, value: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process bounded cache backed by `moka`.
#[derive(Clone)]
pub struct MokaResponseCache {
    inner: Cache<String, Entry>,
}

impl MokaResponseCache {
    pub fn new(max_entries: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryTtl)
            .build();
        Self { inner }
    }
}

impl fmt::Debug for MokaResponseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MokaResponseCache")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

#[async_trait]
impl ResponseCache for MokaResponseCache {
    async fn get(&self, key: &str) -> Option<LocalizedWeatherResult> {
        self.inner.get(key).await.map(|entry| entry.result)
    }

    async fn set(&self, key: String, value: LocalizedWeatherResult, ttl: Duration) {
        self.inner.insert(key, Entry { result: value, ttl }).await;
    }
}
