use std::collections::HashMap;

use uuid::Uuid;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{CopyQuery, DependOnCopyQuery, DependOnMetadataQuery};
use kernel::prelude::entity::{BookCopy, CopyId, MetadataId};
use kernel::KernelError;

use crate::service::{copy_not_found, metadata_of};
use crate::transfer::{BookDto, CopyDetailDto, GetBookDto, InventoryDto};

#[async_trait::async_trait]
pub trait DisplayBookService:
    'static + Sync + Send + DependOnCopyQuery + DependOnMetadataQuery
{
    /// Available and lent counts per edition, in no particular order.
    async fn display_all(&self) -> error_stack::Result<Vec<InventoryDto>, KernelError> {
        let mut connection = self.database_connection().snapshot().await?;

        let mut groups: HashMap<MetadataId, (BookCopy, usize, usize)> = HashMap::new();
        for copy in self.copy_query().find_all(&mut connection).await? {
            let lent = copy.is_lent();
            let entry = groups
                .entry(copy.metadata_id().clone())
                .or_insert_with(|| (copy, 0, 0));
            if lent {
                entry.2 += 1;
            } else {
                entry.1 += 1;
            }
        }

        let mut inventory = Vec::with_capacity(groups.len());
        for (representative, available, lent) in groups.into_values() {
            let metadata = metadata_of(self, &mut connection, &representative).await?;
            inventory.push(InventoryDto {
                book: BookDto::from(metadata),
                available,
                lent,
            });
        }

        Ok(inventory)
    }

    async fn display_one(&self, dto: GetBookDto) -> error_stack::Result<CopyDetailDto, KernelError> {
        let mut connection = self.database_connection().snapshot().await?;

        let copy = self
            .copy_query()
            .find_by_id(&mut connection, &CopyId::new(dto.id))
            .await?
            .ok_or_else(|| copy_not_found(&dto.id))?;
        let metadata = metadata_of(self, &mut connection, &copy).await?;

        Ok(CopyDetailDto {
            id: Uuid::from(copy.id().clone()),
            book: BookDto::from(metadata),
            is_lent: copy.is_lent(),
            last_borrower: copy.last_borrower().clone().map(String::from),
        })
    }
}

impl<T> DisplayBookService for T where T: DependOnCopyQuery + DependOnMetadataQuery {}
