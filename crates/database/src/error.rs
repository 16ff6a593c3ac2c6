use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to connect to database target '{target}': {source}")]
    Connection {
        target: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Timed out waiting for a pooled connection to '{target}'")]
    PoolExhausted { target: String },

    #[error("Storage fault during '{operation}' on '{target}': {source}")]
    Persistence {
        operation: &'static str,
        target: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Column '{column}' does not exist on table '{table}'")]
    UnknownColumn { table: &'static str, column: String },
}

impl StoreError {
    /// Translates a driver fault caught at an operation boundary, emitting
    /// the structured error event required for every caught storage fault.
    pub(crate) fn persistence(operation: &'static str, target: &str, source: sqlx::Error) -> Self {
        tracing::error!(operation, target, error = %source, "storage fault");
        StoreError::Persistence {
            operation,
            target: target.to_string(),
            source,
        }
    }
}
