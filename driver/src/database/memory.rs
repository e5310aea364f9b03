use std::sync::Arc;

use error_stack::Report;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::prelude::entity::{BookCopy, BookMetadata, CopyId, MetadataId};
use kernel::KernelError;

pub use self::{copy::*, metadata::*};

mod copy;
mod metadata;

/// Both stores of one catalog. Only reachable through an [`InMemoryTransaction`].
#[derive(Debug, Default)]
pub struct CatalogState {
    metadata: MetadataStore,
    copies: CopyStore,
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryDatabase {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;

    async fn snapshot(&self) -> error_stack::Result<InMemoryTransaction, KernelError> {
        let guard = Arc::clone(&self.state).read_owned().await;
        Ok(InMemoryTransaction {
            access: Access::Shared(guard),
        })
    }

    async fn transact(&self) -> error_stack::Result<InMemoryTransaction, KernelError> {
        let guard = Arc::clone(&self.state).write_owned().await;
        tracing::debug!("exclusive transaction opened");
        Ok(InMemoryTransaction {
            access: Access::Exclusive {
                guard,
                journal: Journal::default(),
            },
        })
    }
}

/// An exclusive transaction writes straight into the locked state and keeps
/// a journal of the records it displaced. Unless [`Transaction::commit`] is
/// called, the journal is replayed when the transaction is dropped.
#[derive(Debug)]
pub struct InMemoryTransaction {
    access: Access,
}

#[derive(Debug)]
enum Access {
    Shared(OwnedRwLockReadGuard<CatalogState>),
    Exclusive {
        guard: OwnedRwLockWriteGuard<CatalogState>,
        journal: Journal,
    },
}

/// Inverse of a single store mutation.
#[derive(Debug)]
enum Undo {
    MetadataAdded(MetadataId),
    MetadataRemoved(MetadataId, BookMetadata),
    CopyAdded(CopyId),
    CopyReplaced(BookCopy),
    CopyRemoved(BookCopy),
}

#[derive(Debug, Default)]
struct Journal(Vec<Undo>);

impl Journal {
    fn record(&mut self, undo: Undo) {
        self.0.push(undo);
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn clear(&mut self) {
        self.0.clear();
    }

    fn revert(&mut self, state: &mut CatalogState) {
        for undo in self.0.drain(..).rev() {
            match undo {
                Undo::MetadataAdded(id) => {
                    state.metadata.remove(&id);
                }
                Undo::MetadataRemoved(id, metadata) => state.metadata.restore(id, metadata),
                Undo::CopyAdded(id) => {
                    state.copies.remove(&id);
                }
                Undo::CopyReplaced(copy) | Undo::CopyRemoved(copy) => state.copies.restore(copy),
            }
        }
    }
}

impl InMemoryTransaction {
    pub(in crate::database) fn state(&self) -> &CatalogState {
        match &self.access {
            Access::Shared(guard) => &**guard,
            Access::Exclusive { guard, .. } => &**guard,
        }
    }

    fn exclusive(
        &mut self,
    ) -> error_stack::Result<(&mut CatalogState, &mut Journal), KernelError> {
        match &mut self.access {
            Access::Shared(_) => Err(Report::new(KernelError::Internal)
                .attach_printable("Cannot modify the catalog through a snapshot")),
            Access::Exclusive { guard, journal } => Ok((&mut **guard, journal)),
        }
    }
}

impl Drop for InMemoryTransaction {
    fn drop(&mut self) {
        if let Access::Exclusive { guard, journal } = &mut self.access {
            if !journal.is_empty() {
                journal.revert(&mut **guard);
                tracing::debug!("exclusive transaction rolled back");
            }
        }
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(mut self) -> error_stack::Result<(), KernelError> {
        if let Access::Exclusive { journal, .. } = &mut self.access {
            journal.clear();
            tracing::debug!("exclusive transaction committed");
        }
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        drop(self);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{CopyQuery, MetadataQuery};
    use kernel::interface::update::{CopyModifier, MetadataModifier};
    use kernel::prelude::entity::{
        BookAuthor, BookMetadata, BookTitle, BorrowerName, MetadataId, PublishYear,
    };
    use kernel::KernelError;

    use crate::database::{InMemoryCopyRepository, InMemoryDatabase, InMemoryMetadataRepository};

    fn metadata() -> BookMetadata {
        BookMetadata::new(
            BookTitle::new("Title 1"),
            BookAuthor::new("Author 1"),
            PublishYear::new(2000),
        )
    }

    #[tokio::test]
    async fn commit_publishes_changes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        InMemoryMetadataRepository
            .create(&mut con, &metadata())
            .await?;
        con.commit().await?;

        let mut con = db.snapshot().await?;
        let found = InMemoryMetadataRepository.find_all(&mut con).await?;
        assert_eq!(found, vec![metadata()]);
        Ok(())
    }

    #[tokio::test]
    async fn dropped_transaction_discards_changes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        {
            let mut con = db.transact().await?;
            InMemoryMetadataRepository
                .create(&mut con, &metadata())
                .await?;
        }
        let mut con = db.transact().await?;
        InMemoryMetadataRepository
            .create(&mut con, &metadata())
            .await?;
        con.roll_back().await?;

        let mut con = db.snapshot().await?;
        let found = InMemoryMetadataRepository.find_all(&mut con).await?;
        assert!(found.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn roll_back_restores_displaced_records() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let metadata_id = InMemoryMetadataRepository
            .create(&mut con, &metadata())
            .await?;
        let copy_id = InMemoryCopyRepository.create(&mut con, &metadata_id).await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        let mut copy = InMemoryCopyRepository
            .find_by_id(&mut con, &copy_id)
            .await?
            .expect("copy was committed");
        copy.lend(BorrowerName::new("Jan Kowalski"))?;
        InMemoryCopyRepository.update(&mut con, &copy).await?;
        InMemoryCopyRepository.delete(&mut con, &copy_id).await?;
        InMemoryMetadataRepository
            .delete(&mut con, &metadata_id)
            .await?;
        let other = InMemoryMetadataRepository
            .create(
                &mut con,
                &BookMetadata::new(
                    BookTitle::new("Title 2"),
                    BookAuthor::new("Author 2"),
                    PublishYear::new(2001),
                ),
            )
            .await?;
        InMemoryCopyRepository.create(&mut con, &other).await?;
        con.roll_back().await?;

        let mut con = db.snapshot().await?;
        assert_eq!(
            InMemoryMetadataRepository.find_all(&mut con).await?,
            vec![metadata()]
        );
        assert!(InMemoryMetadataRepository
            .find_by_id(&mut con, &metadata_id)
            .await?
            .is_some());
        let copies = InMemoryCopyRepository.find_all(&mut con).await?;
        assert_eq!(copies.len(), 1);
        assert_eq!(copies[0].id(), &copy_id);
        assert!(!copies[0].is_lent());
        assert!(copies[0].last_borrower().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn committed_work_survives_a_later_roll_back() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let id = InMemoryMetadataRepository
            .create(&mut con, &metadata())
            .await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        InMemoryCopyRepository
            .create(&mut con, &MetadataId::new(Uuid::new_v4()))
            .await?;
        con.roll_back().await?;

        let mut con = db.snapshot().await?;
        assert!(InMemoryMetadataRepository
            .find_by_id(&mut con, &id)
            .await?
            .is_some());
        assert!(InMemoryCopyRepository.find_all(&mut con).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn snapshot_rejects_writes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.snapshot().await?;
        let error = InMemoryMetadataRepository
            .create(&mut con, &metadata())
            .await
            .expect_err("snapshot is read only");
        assert_eq!(error.current_context(), &KernelError::Internal);
        Ok(())
    }

    #[tokio::test]
    async fn snapshots_are_shared() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let first = db.snapshot().await?;
        let second = db.snapshot().await?;
        first.commit().await?;
        second.commit().await?;
        Ok(())
    }
}
