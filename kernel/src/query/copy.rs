use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookCopy, CopyId, MetadataId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CopyQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &CopyId,
    ) -> error_stack::Result<Option<BookCopy>, KernelError>;
    async fn exists(
        &self,
        con: &mut Self::Transaction,
        id: &CopyId,
    ) -> error_stack::Result<bool, KernelError>;
    /// Fails with [`KernelError::NotExist`] when `id` is unknown.
    async fn is_lent(
        &self,
        con: &mut Self::Transaction,
        id: &CopyId,
    ) -> error_stack::Result<bool, KernelError>;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError>;
    async fn find_by_metadata_id(
        &self,
        con: &mut Self::Transaction,
        metadata_id: &MetadataId,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError>;
}

pub trait DependOnCopyQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type CopyQuery: CopyQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn copy_query(&self) -> &Self::CopyQuery;
}
