use std::collections::HashSet;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookMetadata, MetadataId, SearchCriteria};
use crate::KernelError;

#[async_trait::async_trait]
pub trait MetadataQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &MetadataId,
    ) -> error_stack::Result<Option<BookMetadata>, KernelError>;
    /// First entry matching `criteria`, in no particular order.
    async fn find_id_by_criteria(
        &self,
        con: &mut Self::Transaction,
        criteria: &SearchCriteria,
    ) -> error_stack::Result<Option<MetadataId>, KernelError>;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<BookMetadata>, KernelError>;
    async fn find_all_ids(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<HashSet<MetadataId>, KernelError>;
}

pub trait DependOnMetadataQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type MetadataQuery: MetadataQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn metadata_query(&self) -> &Self::MetadataQuery;
}
