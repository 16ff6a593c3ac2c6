use serde::Deserialize;

/// Pool sizing and connection settings for one physical database target.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetSettings {
    /// The connection URL for this target. Treated as an opaque string;
    /// the driver decides whether it is reachable and well-formed.
    pub url: String,
    /// Number of connections the pool keeps warm.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Additional connections the pool may open under load, beyond `pool_size`.
    #[serde(default = "default_max_overflow")]
    pub max_overflow: u32,
    /// How long an `acquire` waits for a free connection before giving up.
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

/// One shard: a stable name plus its target settings.
///
/// Shard settings default to a smaller pool than the central database,
/// since load is spread across the shard set.
#[derive(Debug, Clone, Deserialize)]
pub struct ShardSettings {
    pub name: String,
    pub url: String,
    #[serde(default = "default_shard_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_shard_max_overflow")]
    pub max_overflow: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

/// The root configuration for the storage layer: the central database
/// plus an ordered list of shards.
///
/// Shard order is significant: routing hashes a key onto an index into
/// this list, so reordering shards remaps keys.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub central: TargetSettings,
    #[serde(default)]
    pub shards: Vec<ShardSettings>,
}

fn default_pool_size() -> u32 {
    10
}

fn default_max_overflow() -> u32 {
    20
}

fn default_shard_pool_size() -> u32 {
    5
}

fn default_shard_max_overflow() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

impl ShardSettings {
    /// The target settings for this shard, in the shape `ConnectionPool` consumes.
    pub fn target(&self) -> TargetSettings {
        TargetSettings {
            url: self.url.clone(),
            pool_size: self.pool_size,
            max_overflow: self.max_overflow,
            acquire_timeout_secs: self.acquire_timeout_secs,
        }
    }
}
