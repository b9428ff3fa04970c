use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use serde::Deserialize;

use vcon_store::VconStore;
use vcon_store_memory::MemoryVconStore;
use vcon_store_redis::{RedisConfig, RedisVconStore};

/// Top-level configuration for the link runner, loaded from a TOML file.
///
/// # Example
///
/// ```toml
/// [store]
/// backend = "redis"
/// url = "redis://localhost:6379"
/// ttl_seconds = 3600
///
/// [link]
/// name = "sample_link"
/// options = { attachment_type = "sample_data", custom_data = { foo = "bar" } }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct RunnerConfig {
    /// Storage backend configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Link invocation configuration.
    #[serde(default)]
    pub link: LinkConfig,
}

impl RunnerConfig {
    /// Load the config from `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }
}

/// Configuration for the vcon store backend.
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// Which backend to use: `"memory"` or `"redis"`.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Connection URL for the backend (e.g. `redis://localhost:6379`).
    pub url: Option<String>,

    /// Key prefix for backends that support it. Defaults to `"vcon"`.
    pub prefix: Option<String>,

    /// Connection pool size for backends that pool connections.
    pub pool_size: Option<usize>,

    /// Expiry applied to stored vcons, in seconds. Must be non-zero.
    pub ttl_seconds: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: None,
            prefix: None,
            pool_size: None,
            ttl_seconds: None,
        }
    }
}

impl StoreConfig {
    /// Whether records written through this backend outlive the process.
    pub fn is_persistent(&self) -> bool {
        self.backend != "memory"
    }

    /// Fail unless the backend keeps records across runs.
    ///
    /// `show` and `put` each run in a fresh process, so against the memory
    /// backend they can only ever see an empty store or write to a store
    /// that is discarded on exit.
    pub fn require_persistent(&self, command: &str) -> anyhow::Result<()> {
        if !self.is_persistent() {
            bail!(
                "`{command}` needs a persistent store backend; the \"{}\" backend \
                 does not outlive this process (set [store] backend = \"redis\")",
                self.backend
            );
        }
        Ok(())
    }
}

fn default_backend() -> String {
    "memory".to_owned()
}

/// Configuration for the link being invoked.
#[derive(Debug, Deserialize)]
pub struct LinkConfig {
    /// Label passed to the link for diagnostics.
    #[serde(default = "default_link_name")]
    pub name: String,

    /// Options mapping handed to the link. Absent means link defaults.
    pub options: Option<serde_json::Value>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            name: default_link_name(),
            options: None,
        }
    }
}

fn default_link_name() -> String {
    vcon_link_sample::SampleLink::DEFAULT_NAME.to_owned()
}

/// Build the store backend described by `config`.
pub fn build_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn VconStore>> {
    match config.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryVconStore::new())),
        "redis" => {
            let defaults = RedisConfig::default();
            let redis_config = RedisConfig {
                url: config.url.clone().unwrap_or(defaults.url),
                prefix: config.prefix.clone().unwrap_or(defaults.prefix),
                pool_size: config.pool_size.unwrap_or(defaults.pool_size),
                ttl: config.ttl_seconds.map(Duration::from_secs),
                ..defaults
            };
            let store = RedisVconStore::new(&redis_config)?;
            Ok(Arc::new(store))
        }
        other => bail!("unknown store backend: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: RunnerConfig = toml::from_str("").unwrap();
        assert_eq!(config.store.backend, "memory");
        assert!(config.store.url.is_none());
        assert_eq!(config.link.name, "sample_link");
        assert!(config.link.options.is_none());
    }

    #[test]
    fn full_config() {
        let toml = r#"
            [store]
            backend = "redis"
            url = "redis://cache:6379"
            prefix = "staging"
            pool_size = 4
            ttl_seconds = 60

            [link]
            name = "tagger"
            options = { attachment_type = "tags", custom_data = { tags = ["a", "b"] } }
        "#;

        let config: RunnerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.store.backend, "redis");
        assert_eq!(config.store.url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.store.prefix.as_deref(), Some("staging"));
        assert_eq!(config.store.pool_size, Some(4));
        assert_eq!(config.store.ttl_seconds, Some(60));
        assert_eq!(config.link.name, "tagger");
        assert_eq!(
            config.link.options,
            Some(json!({"attachment_type": "tags", "custom_data": {"tags": ["a", "b"]}}))
        );
    }

    #[test]
    fn load_without_path_is_default() {
        let config = RunnerConfig::load(None).unwrap();
        assert_eq!(config.store.backend, "memory");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[link]\nname = \"from_file\"").unwrap();

        let config = RunnerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.link.name, "from_file");
        assert_eq!(config.store.backend, "memory");
    }

    #[test]
    fn load_reports_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[store\nbackend =").unwrap();

        let err = RunnerConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("parsing config"));
    }

    #[test]
    fn builds_memory_and_redis_backends() {
        assert!(build_store(&StoreConfig::default()).is_ok());

        let redis = StoreConfig {
            backend: "redis".into(),
            ttl_seconds: Some(30),
            ..StoreConfig::default()
        };
        assert!(build_store(&redis).is_ok());
    }

    #[test]
    fn rejects_zero_ttl() {
        let config = StoreConfig {
            backend: "redis".into(),
            ttl_seconds: Some(0),
            ..StoreConfig::default()
        };
        let err = build_store(&config).err().unwrap();
        assert!(err.to_string().contains("ttl"), "error: {err}");
    }

    #[test]
    fn memory_backend_is_not_persistent() {
        let memory = StoreConfig::default();
        assert!(!memory.is_persistent());
        let err = memory.require_persistent("show").unwrap_err();
        assert!(err.to_string().contains("`show`"), "error: {err}");

        let redis = StoreConfig {
            backend: "redis".into(),
            ..StoreConfig::default()
        };
        assert!(redis.is_persistent());
        assert!(redis.require_persistent("put").is_ok());
    }

    #[test]
    fn rejects_unknown_backend() {
        let config = StoreConfig {
            backend: "postgres".into(),
            ..StoreConfig::default()
        };
        let err = build_store(&config).err().unwrap();
        assert_eq!(err.to_string(), "unknown store backend: postgres");
    }
}
