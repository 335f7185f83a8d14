use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::models::{Interview, InterviewerProfile, TimeBlock};

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Two-tier cache for matching reads
///
/// L1 is an in-process moka cache, L2 is Redis shared across instances.
/// Only read-side optimization: the booking transaction always re-reads
/// the store, so a stale entry can never cause a double booking, only a
/// rejected confirmation.
pub struct CacheManager {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let l1 = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1,
            ttl_secs,
        })
    }

    /// Cached eligible-interviewer list, if fresh
    pub async fn get_interviewers(&self) -> Option<Vec<InterviewerProfile>> {
        self.get_json(&keys::interviewers()).await
    }

    pub async fn put_interviewers(&self, profiles: &[InterviewerProfile]) {
        if let Err(e) = self.set_json(&keys::interviewers(), &profiles).await {
            tracing::warn!("Failed to cache interviewer list: {}", e);
        }
    }

    /// Cached block snapshot for one interviewer's horizon
    pub async fn get_blocks(&self, interviewer_id: &str) -> Option<Vec<TimeBlock>> {
        self.get_json(&keys::blocks(interviewer_id)).await
    }

    pub async fn put_blocks(&self, interviewer_id: &str, blocks: &[TimeBlock]) {
        if let Err(e) = self.set_json(&keys::blocks(interviewer_id), &blocks).await {
            tracing::warn!("Failed to cache blocks for {}: {}", interviewer_id, e);
        }
    }

    /// Cached interview snapshot for one interviewer's horizon
    pub async fn get_interviews(&self, interviewer_id: &str) -> Option<Vec<Interview>> {
        self.get_json(&keys::interviews(interviewer_id)).await
    }

    pub async fn put_interviews(&self, interviewer_id: &str, interviews: &[Interview]) {
        if let Err(e) = self
            .set_json(&keys::interviews(interviewer_id), &interviews)
            .await
        {
            tracing::warn!("Failed to cache interviews for {}: {}", interviewer_id, e);
        }
    }

    /// Drop every cached entry touching one interviewer, plus the shared
    /// list. Called after a booking or block change.
    pub async fn invalidate_interviewer(&self, interviewer_id: &str) -> Result<(), CacheError> {
        self.l1.invalidate_all();

        let mut conn = self.redis.lock().await;
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(format!("sched:{}:*", interviewer_id))
            .query_async(&mut *conn)
            .await?;

        let mut to_delete = keys;
        to_delete.push(keys::interviewers());

        redis::cmd("DEL")
            .arg(to_delete)
            .query_async::<()>(&mut *conn)
            .await?;

        tracing::debug!("Invalidated cache for interviewer {}", interviewer_id);
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if let Some(bytes) = self.l1.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return serde_json::from_slice(&bytes).ok();
        }

        let mut conn = self.redis.lock().await;
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut *conn)
            .await
            .ok()?;
        drop(conn);

        let json = value?;
        tracing::trace!("L2 cache hit: {}", key);

        self.l1.insert(key.to_string(), json.as_bytes().to_vec()).await;
        serde_json::from_str(&json).ok()
    }

    async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let json = serde_json::to_string(value)?;

        self.l1.insert(key.to_string(), json.as_bytes().to_vec()).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;

        Ok(())
    }
}

/// Cache key builders, all under the `sched:` namespace
pub mod keys {
    pub fn interviewers() -> String {
        "sched:interviewers".to_string()
    }

    pub fn blocks(interviewer_id: &str) -> String {
        format!("sched:{}:blocks", interviewer_id)
    }

    pub fn interviews(interviewer_id: &str) -> String {
        format!("sched:{}:interviews", interviewer_id)
    }
}
