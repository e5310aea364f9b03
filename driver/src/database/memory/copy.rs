use std::collections::HashMap;

use error_stack::Report;
use uuid::Uuid;

use kernel::interface::query::CopyQuery;
use kernel::interface::update::CopyModifier;
use kernel::prelude::entity::{BookCopy, CopyId, MetadataId};
use kernel::KernelError;

use crate::database::InMemoryTransaction;

use super::Undo;

pub struct InMemoryCopyRepository;

#[async_trait::async_trait]
impl CopyQuery for InMemoryCopyRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &CopyId,
    ) -> error_stack::Result<Option<BookCopy>, KernelError> {
        Ok(con.state().copies.get(id).cloned())
    }

    async fn exists(
        &self,
        con: &mut InMemoryTransaction,
        id: &CopyId,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(con.state().copies.exists(id))
    }

    async fn is_lent(
        &self,
        con: &mut InMemoryTransaction,
        id: &CopyId,
    ) -> error_stack::Result<bool, KernelError> {
        con.state().copies.is_lent(id)
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError> {
        Ok(con.state().copies.list_all())
    }

    async fn find_by_metadata_id(
        &self,
        con: &mut InMemoryTransaction,
        metadata_id: &MetadataId,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError> {
        Ok(con.state().copies.list_by_metadata(metadata_id))
    }
}

#[async_trait::async_trait]
impl CopyModifier for InMemoryCopyRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        metadata_id: &MetadataId,
    ) -> error_stack::Result<CopyId, KernelError> {
        let (state, journal) = con.exclusive()?;
        let id = state.copies.add(metadata_id.clone());
        journal.record(Undo::CopyAdded(id.clone()));
        Ok(id)
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        copy: &BookCopy,
    ) -> error_stack::Result<(), KernelError> {
        let (state, journal) = con.exclusive()?;
        let previous = state.copies.update(copy.clone())?;
        journal.record(Undo::CopyReplaced(previous));
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        id: &CopyId,
    ) -> error_stack::Result<(), KernelError> {
        let (state, journal) = con.exclusive()?;
        if let Some(copy) = state.copies.remove(id) {
            journal.record(Undo::CopyRemoved(copy));
        }
        Ok(())
    }
}

/// Physical copies keyed by generated id.
#[derive(Debug, Default)]
pub struct CopyStore {
    entries: HashMap<CopyId, BookCopy>,
}

impl CopyStore {
    pub fn add(&mut self, metadata_id: MetadataId) -> CopyId {
        let id = loop {
            let id = CopyId::new(Uuid::new_v4());
            if !self.entries.contains_key(&id) {
                break id;
            }
        };
        tracing::debug!(id = %id.as_ref(), metadata_id = %metadata_id.as_ref(), "copy stored");
        self.entries
            .insert(id.clone(), BookCopy::new(id.clone(), metadata_id));
        id
    }

    pub fn get(&self, id: &CopyId) -> Option<&BookCopy> {
        self.entries.get(id)
    }

    pub fn exists(&self, id: &CopyId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn is_lent(&self, id: &CopyId) -> error_stack::Result<bool, KernelError> {
        self.entries.get(id).map(BookCopy::is_lent).ok_or_else(|| {
            Report::new(KernelError::NotExist)
                .attach_printable(format!("No copy with id {}", id.as_ref()))
        })
    }

    /// Replaces the record stored under `copy.id()` and hands back the old one.
    pub fn update(&mut self, copy: BookCopy) -> error_stack::Result<BookCopy, KernelError> {
        match self.entries.get_mut(copy.id()) {
            Some(stored) => {
                tracing::debug!(id = %copy.id().as_ref(), lent = copy.is_lent(), "copy updated");
                Ok(std::mem::replace(stored, copy))
            }
            None => Err(Report::new(KernelError::NotExist)
                .attach_printable(format!("No copy with id {}", copy.id().as_ref()))),
        }
    }

    pub fn remove(&mut self, id: &CopyId) -> Option<BookCopy> {
        let removed = self.entries.remove(id);
        if removed.is_some() {
            tracing::debug!(id = %id.as_ref(), "copy removed");
        }
        removed
    }

    pub(in crate::database) fn restore(&mut self, copy: BookCopy) {
        self.entries.insert(copy.id().clone(), copy);
    }

    pub fn list_all(&self) -> Vec<BookCopy> {
        self.entries.values().cloned().collect()
    }

    pub fn list_by_metadata(&self, metadata_id: &MetadataId) -> Vec<BookCopy> {
        self.entries
            .values()
            .filter(|copy| copy.metadata_id() == metadata_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::CopyQuery;
    use kernel::interface::update::CopyModifier;
    use kernel::prelude::entity::{BorrowerName, CopyId, MetadataId};
    use kernel::KernelError;

    use crate::database::{CopyStore, InMemoryCopyRepository, InMemoryDatabase};

    #[test]
    fn added_copy_is_available() -> error_stack::Result<(), KernelError> {
        let mut store = CopyStore::default();
        let metadata_id = MetadataId::new(Uuid::new_v4());
        let id = store.add(metadata_id.clone());

        assert!(store.exists(&id));
        assert!(!store.is_lent(&id)?);
        let copy = store.get(&id).expect("copy was just added");
        assert_eq!(copy.metadata_id(), &metadata_id);
        assert!(copy.last_borrower().is_none());
        Ok(())
    }

    #[test]
    fn is_lent_fails_for_unknown_copy() {
        let store = CopyStore::default();
        let error = store
            .is_lent(&CopyId::new(Uuid::new_v4()))
            .expect_err("unknown copy");
        assert_eq!(error.current_context(), &KernelError::NotExist);
    }

    #[test]
    fn list_by_metadata_filters_copies() {
        let mut store = CopyStore::default();
        let odyssey = MetadataId::new(Uuid::new_v4());
        let iliad = MetadataId::new(Uuid::new_v4());
        store.add(odyssey.clone());
        store.add(odyssey.clone());
        store.add(iliad.clone());

        assert_eq!(store.list_by_metadata(&odyssey).len(), 2);
        assert_eq!(store.list_by_metadata(&iliad).len(), 1);
        assert_eq!(store.list_all().len(), 3);
    }

    #[test]
    fn update_unknown_copy_fails() {
        let mut store = CopyStore::default();
        let copy = kernel::prelude::entity::BookCopy::new(
            CopyId::new(Uuid::new_v4()),
            MetadataId::new(Uuid::new_v4()),
        );
        let error = store.update(copy).expect_err("unknown copy");
        assert_eq!(error.current_context(), &KernelError::NotExist);
    }

    #[tokio::test]
    async fn lend_is_persisted_through_update() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let id = InMemoryCopyRepository
            .create(&mut con, &MetadataId::new(Uuid::new_v4()))
            .await?;
        let mut copy = InMemoryCopyRepository
            .find_by_id(&mut con, &id)
            .await?
            .expect("copy was just created");
        copy.lend(BorrowerName::new("Jan Kowalski"))?;
        InMemoryCopyRepository.update(&mut con, &copy).await?;
        con.commit().await?;

        let mut con = db.snapshot().await?;
        assert!(InMemoryCopyRepository.is_lent(&mut con, &id).await?);
        assert!(InMemoryCopyRepository.exists(&mut con, &id).await?);

        drop(con);
        let mut con = db.transact().await?;
        InMemoryCopyRepository.delete(&mut con, &id).await?;
        con.commit().await?;

        let mut con = db.snapshot().await?;
        assert!(!InMemoryCopyRepository.exists(&mut con, &id).await?);
        Ok(())
    }
}
