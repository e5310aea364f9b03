use error_stack::Report;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{DependOnMetadataQuery, MetadataQuery};
use kernel::prelude::entity::{BookCopy, BookMetadata};
use kernel::KernelError;

pub use self::{book::*, lend::*, report::*};

mod book;
mod lend;
mod report;

type TransactionOf<T> =
    <<T as kernel::interface::database::DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction;

/// Metadata a stored copy points at. A dangling reference means the stores
/// have diverged, so it is reported as [`KernelError::Internal`].
async fn metadata_of<T>(
    module: &T,
    con: &mut TransactionOf<T>,
    copy: &BookCopy,
) -> error_stack::Result<BookMetadata, KernelError>
where
    T: DependOnMetadataQuery + ?Sized,
{
    module
        .metadata_query()
        .find_by_id(con, copy.metadata_id())
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::Internal).attach_printable(format!(
                "Copy {} references missing metadata {}",
                copy.id().as_ref(),
                copy.metadata_id().as_ref()
            ))
        })
}

fn copy_not_found(id: &uuid::Uuid) -> Report<KernelError> {
    Report::new(KernelError::NotExist).attach_printable(format!("No copy with id {id}"))
}
