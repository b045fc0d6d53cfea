use async_trait::async_trait;
use jenkin_domain::{DomainError, RetentionCutoff};

/// Source of connections to the append-only log table.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Fails with `DomainError::ConnectionError` when the store is unreachable.
    async fn open(&self) -> Result<Box<dyn LogStoreConnection>, DomainError>;
}

/// A connection owned by one retention run.
#[async_trait]
pub trait LogStoreConnection: Send {
    async fn begin<'a>(&'a mut self) -> Result<Box<dyn LogBatchTransaction + 'a>, DomainError>;

    /// Releases the connection. Dropping it without calling `close` also
    /// releases it, but skips the orderly shutdown.
    async fn close(self: Box<Self>);
}

/// One batch: a single bounded delete inside its own transaction.
#[async_trait]
pub trait LogBatchTransaction: Send {
    /// Deletes at most `limit` rows stamped strictly before the cutoff, in no
    /// particular order, and returns how many were removed.
    async fn delete_older_than(
        &mut self,
        cutoff: &RetentionCutoff,
        limit: u32,
    ) -> Result<u64, DomainError>;

    /// Consumes the transaction. On failure nothing from this batch is
    /// applied and the caller has no handle left to roll back; the adapter
    /// must discard the batch itself.
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;

    async fn rollback(self: Box<Self>) -> Result<(), DomainError>;
}
