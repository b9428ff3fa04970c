use std::time::Duration;

/// Configuration for the Redis vcon store backend.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection URL (e.g. `redis://127.0.0.1:6379`).
    pub url: String,

    /// Key prefix applied to every record key.
    pub prefix: String,

    /// Number of connections in the `deadpool-redis` pool.
    pub pool_size: usize,

    /// Timeout for acquiring a pooled connection.
    pub connection_timeout: Duration,

    /// Expiry applied to every stored record. `None` keeps records forever.
    pub ttl: Option<Duration>,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://127.0.0.1:6379"),
            prefix: String::from("vcon"),
            pool_size: 10,
            connection_timeout: Duration::from_secs(5),
            ttl: None,
        }
    }
}
