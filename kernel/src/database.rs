use crate::KernelError;

/// Entry point to the catalog storage.
///
/// Snapshots are shared and may be held by any number of readers at once.
/// Transactions are exclusive: while one is open no other transaction or
/// snapshot can be acquired, so mutations never interleave and readers never
/// observe a half-applied change.
#[async_trait::async_trait]
pub trait DatabaseConnection: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn snapshot(&self) -> error_stack::Result<Self::Transaction, KernelError>;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError>;
}

pub trait DependOnDatabaseConnection: 'static + Sync + Send {
    type DatabaseConnection: DatabaseConnection;
    fn database_connection(&self) -> &Self::DatabaseConnection;
}

/// Dropping a transaction without committing discards its changes.
#[async_trait::async_trait]
pub trait Transaction: 'static + Sync + Send {
    async fn commit(self) -> error_stack::Result<(), KernelError>;
    async fn roll_back(self) -> error_stack::Result<(), KernelError>;
}
