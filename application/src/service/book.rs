use std::collections::HashSet;

use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{CopyQuery, DependOnCopyQuery, DependOnMetadataQuery, MetadataQuery};
use kernel::interface::update::{
    CopyModifier, DependOnCopyModifier, DependOnMetadataModifier, MetadataModifier,
};
use kernel::prelude::entity::{BookMetadata, CopyId, MetadataId, SearchCriteria};
use kernel::KernelError;

use crate::service::{copy_not_found, metadata_of};
use crate::transfer::{BookDto, CreateBookDto, GetBookDto, RemoveBookDto, SearchBookDto};

#[async_trait::async_trait]
pub trait AddBookService:
    'static + Sync + Send + DependOnMetadataModifier + DependOnCopyModifier
{
    /// Registers a new physical copy, reusing the metadata of an identical
    /// edition when one is already catalogued.
    #[tracing::instrument(skip(self))]
    async fn add_book(&self, dto: CreateBookDto) -> error_stack::Result<Uuid, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let metadata = BookMetadata::from(dto);
        let metadata_id = self
            .metadata_modifier()
            .create(&mut connection, &metadata)
            .await?;
        let copy_id = self
            .copy_modifier()
            .create(&mut connection, &metadata_id)
            .await?;

        connection.commit().await?;
        tracing::info!(copy_id = %copy_id.as_ref(), "book added");

        Ok(copy_id.into())
    }
}

impl<T> AddBookService for T where T: DependOnMetadataModifier + DependOnCopyModifier {}

#[async_trait::async_trait]
pub trait GetBookService:
    'static + Sync + Send + DependOnCopyQuery + DependOnMetadataQuery
{
    async fn get_book_by_id(&self, dto: GetBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().snapshot().await?;

        let id = CopyId::new(dto.id);
        let copy = self
            .copy_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| copy_not_found(&dto.id))?;
        let metadata = metadata_of(self, &mut connection, &copy).await?;

        Ok(BookDto::from(metadata))
    }

    /// One entry per distinct edition that still has at least one copy.
    async fn list_all_metadata(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().snapshot().await?;

        let metadata = self.metadata_query().find_all(&mut connection).await?;

        Ok(metadata.into_iter().map(BookDto::from).collect())
    }

    async fn is_lent(&self, dto: GetBookDto) -> error_stack::Result<bool, KernelError> {
        let mut connection = self.database_connection().snapshot().await?;

        self.copy_query()
            .is_lent(&mut connection, &CopyId::new(dto.id))
            .await
    }
}

impl<T> GetBookService for T where T: DependOnCopyQuery + DependOnMetadataQuery {}

#[async_trait::async_trait]
pub trait SearchBookService:
    'static + Sync + Send + DependOnCopyQuery + DependOnMetadataQuery
{
    /// Filters copies rather than editions: an edition with three matching
    /// copies appears three times.
    async fn search(&self, dto: SearchBookDto) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().snapshot().await?;

        let criteria = SearchCriteria::from(dto);
        let copies = self.copy_query().find_all(&mut connection).await?;

        let mut found = Vec::new();
        for copy in copies {
            let metadata = metadata_of(self, &mut connection, &copy).await?;
            if criteria.matches(&metadata) {
                found.push(BookDto::from(metadata));
            }
        }

        Ok(found)
    }
}

impl<T> SearchBookService for T where T: DependOnCopyQuery + DependOnMetadataQuery {}

#[async_trait::async_trait]
pub trait RemoveBookService:
    'static
    + Sync
    + Send
    + DependOnCopyQuery
    + DependOnCopyModifier
    + DependOnMetadataQuery
    + DependOnMetadataModifier
{
    /// Deletes an available copy and prunes editions left without copies.
    #[tracing::instrument(skip(self))]
    async fn remove_book(&self, dto: RemoveBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = CopyId::new(dto.id);
        if self.copy_query().is_lent(&mut connection, &id).await? {
            tracing::warn!(copy_id = %dto.id, "refused to remove a lent copy");
            return Err(Report::new(KernelError::AlreadyLent)
                .attach_printable(format!("Copy {} is currently lent", dto.id)));
        }
        self.copy_modifier().delete(&mut connection, &id).await?;

        let referenced = self
            .copy_query()
            .find_all(&mut connection)
            .await?
            .into_iter()
            .map(|copy| copy.metadata_id().clone())
            .collect::<HashSet<MetadataId>>();
        let orphans = self
            .metadata_query()
            .find_all_ids(&mut connection)
            .await?
            .into_iter()
            .filter(|id| !referenced.contains(id))
            .collect::<Vec<_>>();
        for orphan in orphans {
            self.metadata_modifier()
                .delete(&mut connection, &orphan)
                .await?;
        }

        connection.commit().await?;
        tracing::info!(copy_id = %dto.id, "book removed");

        Ok(())
    }
}

impl<T> RemoveBookService for T where
    T: DependOnCopyQuery + DependOnCopyModifier + DependOnMetadataQuery + DependOnMetadataModifier
{
}
