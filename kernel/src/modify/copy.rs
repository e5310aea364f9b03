use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookCopy, CopyId, MetadataId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CopyModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        metadata_id: &MetadataId,
    ) -> error_stack::Result<CopyId, KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        copy: &BookCopy,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        id: &CopyId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnCopyModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type CopyModifier: CopyModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn copy_modifier(&self) -> &Self::CopyModifier;
}
