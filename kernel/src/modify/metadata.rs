use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookMetadata, MetadataId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait MetadataModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Stores `metadata` unless an equal entry exists, returning the id either way.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        metadata: &BookMetadata,
    ) -> error_stack::Result<MetadataId, KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        id: &MetadataId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnMetadataModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type MetadataModifier: MetadataModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn metadata_modifier(&self) -> &Self::MetadataModifier;
}
