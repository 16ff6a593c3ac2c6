use crate::error::StoreError;
use crate::pool::{CENTRAL_TARGET, ConnectionPool};
use crate::router::ShardRouter;
use configuration::StorageConfig;
use std::collections::HashMap;

/// The explicit, process-wide handle to every connection pool.
///
/// Constructed once at process start and passed by reference to the
/// components that need pool access; there are no ambient globals. The
/// central pool must open for construction to succeed; a shard pool that
/// fails to open is recorded as dead, and keys routed to it transparently
/// fall back to the central database.
pub struct Registry {
    central: ConnectionPool,
    router: ShardRouter,
    shards: HashMap<String, ConnectionPool>,
}

impl Registry {
    /// Opens the central pool and one pool per configured shard.
    ///
    /// A shard whose pool cannot be opened is logged at warn level and left
    /// out of the live set; the shard keeps its slot in the routing order,
    /// so the keys of the remaining shards are unaffected.
    pub async fn connect(config: &StorageConfig) -> Result<Self, StoreError> {
        let central = ConnectionPool::open(CENTRAL_TARGET, &config.central).await?;

        let mut shards = HashMap::new();
        for shard in &config.shards {
            match ConnectionPool::open(&shard.name, &shard.target()).await {
                Ok(pool) => {
                    shards.insert(shard.name.clone(), pool);
                }
                Err(error) => {
                    tracing::warn!(
                        shard = %shard.name,
                        %error,
                        "shard pool failed to open; keys routed here will use the central database"
                    );
                }
            }
        }

        let router = ShardRouter::new(config.shards.iter().map(|s| s.name.clone()).collect());

        Ok(Self {
            central,
            router,
            shards,
        })
    }

    /// The pool for the distinguished default target.
    pub fn central(&self) -> &ConnectionPool {
        &self.central
    }

    /// Direct access to a shard's pool by name, for collaborators that
    /// address a shard explicitly. `None` for unknown or dead shards.
    pub fn shard(&self, name: &str) -> Option<&ConnectionPool> {
        self.shards.get(name)
    }

    /// Selects the pool for a shard key.
    ///
    /// Routing is a pure function of the key and the configured shard
    /// order. With zero shards configured, or when the selected shard's
    /// pool failed to open, this returns the central pool. The fallback
    /// is transparent to callers and emits a warn-level event only.
    pub fn route(&self, key: &str) -> &ConnectionPool {
        let Some(name) = self.router.route(key) else {
            return &self.central;
        };
        match self.shards.get(name) {
            Some(pool) => pool,
            None => {
                tracing::warn!(
                    shard = name,
                    key,
                    "routed shard is unavailable; falling back to the central database"
                );
                &self.central
            }
        }
    }
}
