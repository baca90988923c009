use async_trait::async_trait;

use tabula_core::Result;

/// Minimal connection capability the checkpoint consumes.
///
/// Implementations own an open, authenticated connection; the checkpoint
/// borrows it for one reset and never retains it. Catalog queries select
/// text-typed columns only, so rows come back as optional strings. A client
/// that answers `false` from [`Self::supports_transactions`] is driven
/// without the begin/commit/rollback envelope and accepts the partial-failure
/// exposure that comes with it.
#[async_trait]
pub trait DatabaseClient: Send {
    /// Run a row-returning query (catalog discovery only).
    async fn query_rows(&mut self, sql: &str) -> Result<Vec<Vec<Option<String>>>>;

    /// Run a non-query statement, returning affected rows where the driver
    /// reports them.
    async fn execute(&mut self, sql: &str) -> Result<u64>;

    async fn begin(&mut self) -> Result<()>;
    async fn commit(&mut self) -> Result<()>;
    async fn rollback(&mut self) -> Result<()>;

    fn supports_transactions(&self) -> bool {
        true
    }
}
