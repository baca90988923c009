use thiserror::Error;

/// Core error type shared across Tabula crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The connection could not be queried (network, auth, privileges).
    #[error("database error: {0}")]
    Connection(String),
    /// A catalog query returned rows the dialect cannot interpret.
    #[error("invalid catalog row: {0}")]
    Catalog(String),
    /// The checkpoint options are contradictory.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// A reference cycle was found but the engine cannot suspend constraints.
    #[error("cannot order deletes: constraint suspension unavailable for cyclic tables {tables:?}")]
    CycleUnsupported { tables: Vec<String> },
    /// A rendered statement was rejected by the engine.
    #[error("statement failed: {statement}: {cause}")]
    Execution { statement: String, cause: String },
    /// Rollback after an execution error failed as well.
    #[error("rollback failed ({rollback}) after: {cause}")]
    RollbackFailed { cause: String, rollback: String },
}

/// Convenience alias for results returned by Tabula crates.
pub type Result<T> = std::result::Result<T, Error>;
