//! # Configuration Crate
//!
//! Loads and validates the storage-layer configuration: the central
//! database target, the ordered shard list, and per-target pool sizing.
//!
//! The data-access core consumes the resulting `StorageConfig` as opaque
//! values; all file and environment parsing stays in this crate.

use std::collections::HashSet;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{ShardSettings, StorageConfig, TargetSettings};

/// Loads the storage configuration from the `config.toml` file, with an
/// environment-variable overlay (`STORE_*`).
///
/// This function is the primary entry point for this crate. It reads the
/// configuration sources, deserializes them into the strongly-typed
/// `StorageConfig`, and validates the result.
pub fn load_config() -> Result<StorageConfig, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        // Environment variables override the file, e.g. STORE_CENTRAL__URL.
        .add_source(config::Environment::with_prefix("STORE").separator("__"))
        .build()?;

    let config = builder.try_deserialize::<StorageConfig>()?;
    validate(&config)?;

    Ok(config)
}

/// Validates a deserialized configuration regardless of where it came from.
pub fn validate(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.central.pool_size == 0 {
        return Err(ConfigError::ValidationError(
            "central pool_size must be at least 1".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for shard in &config.shards {
        if shard.pool_size == 0 {
            return Err(ConfigError::ValidationError(format!(
                "shard '{}' pool_size must be at least 1",
                shard.name
            )));
        }
        if !seen.insert(shard.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate shard name '{}'",
                shard.name
            )));
        }
    }

    Ok(())
}
