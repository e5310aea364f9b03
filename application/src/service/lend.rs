use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{CopyQuery, DependOnCopyQuery, DependOnMetadataQuery, MetadataQuery};
use kernel::interface::update::{CopyModifier, DependOnCopyModifier};
use kernel::prelude::entity::{BorrowerName, CopyId, SearchCriteria};
use kernel::KernelError;

use crate::service::{copy_not_found, metadata_of};
use crate::transfer::{BookDto, LendBookDto, LendByCriteriaDto};

#[async_trait::async_trait]
pub trait LendBookService:
    'static + Sync + Send + DependOnCopyQuery + DependOnCopyModifier + DependOnMetadataQuery
{
    #[tracing::instrument(skip(self))]
    async fn lend_by_copy_id(&self, dto: LendBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let mut copy = self
            .copy_query()
            .find_by_id(&mut connection, &CopyId::new(dto.id))
            .await?
            .ok_or_else(|| copy_not_found(&dto.id))?;
        copy.lend(BorrowerName::new(dto.borrower))?;
        self.copy_modifier().update(&mut connection, &copy).await?;
        let metadata = metadata_of(self, &mut connection, &copy).await?;

        connection.commit().await?;
        tracing::info!(copy_id = %dto.id, "book lent");

        Ok(BookDto::from(metadata))
    }

    /// Lends the first available copy of the first edition matching the
    /// criteria. Other matching editions are not considered.
    #[tracing::instrument(skip(self))]
    async fn lend_by_criteria(
        &self,
        dto: LendByCriteriaDto,
    ) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let criteria = SearchCriteria::from(dto.criteria);
        let metadata_id = self
            .metadata_query()
            .find_id_by_criteria(&mut connection, &criteria)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotExist)
                    .attach_printable(format!("No book matches {criteria:?}"))
            })?;
        let mut copy = self
            .copy_query()
            .find_by_metadata_id(&mut connection, &metadata_id)
            .await?
            .into_iter()
            .find(|copy| !copy.is_lent())
            .ok_or_else(|| {
                Report::new(KernelError::AlreadyLent)
                    .attach_printable("All books are currently lent")
            })?;
        copy.lend(BorrowerName::new(dto.borrower))?;
        self.copy_modifier().update(&mut connection, &copy).await?;
        let metadata = metadata_of(self, &mut connection, &copy).await?;

        connection.commit().await?;
        tracing::info!(copy_id = %copy.id().as_ref(), "book lent");

        Ok(BookDto::from(metadata))
    }
}

impl<T> LendBookService for T where
    T: DependOnCopyQuery + DependOnCopyModifier + DependOnMetadataQuery
{
}
