use sha2::{Digest, Sha256};

/// Hashes a shard key with a stable, versioned content hash.
///
/// The value is the big-endian `u64` taken from the first 8 bytes of the
/// SHA-256 digest of the key. Unlike a process-local hasher, this is
/// reproducible across restarts and across languages, so a key routes to
/// the same shard for the lifetime of a configuration no matter which
/// process computes the route. Changing this function is a data-migration
/// event, not a refactor.
pub fn stable_hash(key: &str) -> u64 {
    let digest = Sha256::digest(key.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// Deterministically selects a shard for a given key.
///
/// The shard list is fixed at construction and ordered; routing is
/// `stable_hash(key) mod N` over that list. The router knows nothing about
/// shard health; availability fallback is the registry's concern.
#[derive(Debug, Clone)]
pub struct ShardRouter {
    shards: Vec<String>,
}

impl ShardRouter {
    pub fn new(shards: Vec<String>) -> Self {
        Self { shards }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Returns the name of the shard `key` routes to, or `None` when no
    /// shards are configured.
    pub fn route(&self, key: &str) -> Option<&str> {
        if self.shards.is_empty() {
            return None;
        }
        let index = (stable_hash(key) % self.shards.len() as u64) as usize;
        Some(self.shards[index].as_str())
    }
}
