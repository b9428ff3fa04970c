use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;
use tracing::debug;

use vcon_core::{Vcon, VconId};
use vcon_store::error::StoreError;
use vcon_store::store::VconStore;

use crate::config::RedisConfig;
use crate::key_render::render_key;

/// Redis-backed implementation of [`VconStore`].
///
/// Each record is stored as a plain JSON string under `prefix:uuid` with
/// `SET`/`GET`, with an optional expiry taken from [`RedisConfig::ttl`].
///
/// This is not the RedisJSON (`JSON.SET`/`JSON.GET`) layout used by the vcon
/// server, so the two cannot share a Redis database: a key written by one is
/// the wrong type for the other.
pub struct RedisVconStore {
    pool: Pool,
    prefix: String,
    ttl_ms: Option<u64>,
}

impl RedisVconStore {
    /// Create a new `RedisVconStore` from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configuration`] if `ttl` is shorter than one
    /// millisecond, and [`StoreError::Connection`] if the pool cannot be
    /// created.
    pub fn new(config: &RedisConfig) -> Result<Self, StoreError> {
        let ttl_ms = config.ttl.map(ttl_millis).transpose()?;

        let cfg = Config::from_url(&config.url);
        let pool = cfg
            .builder()
            .map(|b| {
                b.max_size(config.pool_size)
                    .wait_timeout(Some(config.connection_timeout))
                    .runtime(Runtime::Tokio1)
                    .build()
            })
            .map_err(|e| StoreError::Connection(e.to_string()))?
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            pool,
            prefix: config.prefix.clone(),
            ttl_ms,
        })
    }

    fn key(&self, id: &VconId) -> String {
        render_key(&self.prefix, id)
    }

    /// Obtain a connection from the pool.
    async fn conn(&self) -> Result<deadpool_redis::Connection, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))
    }
}

/// Convert a TTL to the millisecond argument of `SET ... PX`.
///
/// Redis rejects `PX 0`, so a TTL that rounds down to zero is refused here
/// rather than on every write.
fn ttl_millis(ttl: Duration) -> Result<u64, StoreError> {
    match u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX) {
        0 => Err(StoreError::Configuration(format!(
            "ttl must be at least 1ms, got {ttl:?}"
        ))),
        ms => Ok(ms),
    }
}

#[async_trait]
impl VconStore for RedisVconStore {
    async fn get_vcon(&self, id: &VconId) -> Result<Vcon, StoreError> {
        let key = self.key(id);
        let mut conn = self.conn().await?;

        let json: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let json = json.ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(Vcon::from_json(&json)?)
    }

    async fn store_vcon(&self, vcon: &Vcon) -> Result<(), StoreError> {
        let key = self.key(&vcon.uuid);
        let json = vcon.to_json()?;
        let mut conn = self.conn().await?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(&key).arg(&json);
        if let Some(ms) = self.ttl_ms {
            cmd.arg("PX").arg(ms);
        }
        let () = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        debug!(vcon_id = %vcon.uuid, key = %key, bytes = json.len(), "stored vcon in redis");
        Ok(())
    }

    async fn delete_vcon(&self, id: &VconId) -> Result<bool, StoreError> {
        let key = self.key(id);
        let mut conn = self.conn().await?;

        let deleted: i64 = conn
            .del(&key)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(deleted > 0)
    }
}
