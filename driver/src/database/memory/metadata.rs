use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use kernel::interface::query::MetadataQuery;
use kernel::interface::update::MetadataModifier;
use kernel::prelude::entity::{BookMetadata, MetadataId, SearchCriteria};
use kernel::KernelError;

use crate::database::InMemoryTransaction;

use super::Undo;

pub struct InMemoryMetadataRepository;

#[async_trait::async_trait]
impl MetadataQuery for InMemoryMetadataRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &MetadataId,
    ) -> error_stack::Result<Option<BookMetadata>, KernelError> {
        Ok(con.state().metadata.get(id).cloned())
    }

    async fn find_id_by_criteria(
        &self,
        con: &mut InMemoryTransaction,
        criteria: &SearchCriteria,
    ) -> error_stack::Result<Option<MetadataId>, KernelError> {
        Ok(con.state().metadata.find_id(criteria))
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<BookMetadata>, KernelError> {
        Ok(con.state().metadata.list_all())
    }

    async fn find_all_ids(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<HashSet<MetadataId>, KernelError> {
        Ok(con.state().metadata.keys())
    }
}

#[async_trait::async_trait]
impl MetadataModifier for InMemoryMetadataRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        metadata: &BookMetadata,
    ) -> error_stack::Result<MetadataId, KernelError> {
        let (state, journal) = con.exclusive()?;
        let known = state.metadata.len();
        let id = state.metadata.add(metadata.clone());
        if state.metadata.len() > known {
            journal.record(Undo::MetadataAdded(id.clone()));
        }
        Ok(id)
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        id: &MetadataId,
    ) -> error_stack::Result<(), KernelError> {
        let (state, journal) = con.exclusive()?;
        if let Some(metadata) = state.metadata.remove(id) {
            journal.record(Undo::MetadataRemoved(id.clone(), metadata));
        }
        Ok(())
    }
}

/// Deduplicated metadata keyed by generated id.
#[derive(Debug, Default)]
pub struct MetadataStore {
    entries: HashMap<MetadataId, BookMetadata>,
}

impl MetadataStore {
    pub fn add(&mut self, metadata: BookMetadata) -> MetadataId {
        if let Some(id) = self.find_id(&SearchCriteria::exact(&metadata)) {
            return id;
        }
        let id = loop {
            let id = MetadataId::new(Uuid::new_v4());
            if !self.entries.contains_key(&id) {
                break id;
            }
        };
        tracing::debug!(id = %id.as_ref(), ?metadata, "metadata stored");
        self.entries.insert(id.clone(), metadata);
        id
    }

    pub fn get(&self, id: &MetadataId) -> Option<&BookMetadata> {
        self.entries.get(id)
    }

    pub fn find_id(&self, criteria: &SearchCriteria) -> Option<MetadataId> {
        self.entries
            .iter()
            .find(|(_, metadata)| criteria.matches(metadata))
            .map(|(id, _)| id.clone())
    }

    pub fn list_all(&self) -> Vec<BookMetadata> {
        self.entries.values().cloned().collect()
    }

    /// Returns the removed entry. Unknown ids are ignored.
    pub fn remove(&mut self, id: &MetadataId) -> Option<BookMetadata> {
        let removed = self.entries.remove(id);
        if removed.is_some() {
            tracing::debug!(id = %id.as_ref(), "metadata pruned");
        }
        removed
    }

    pub(in crate::database) fn restore(&mut self, id: MetadataId, metadata: BookMetadata) {
        self.entries.insert(id, metadata);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> HashSet<MetadataId> {
        self.entries.keys().cloned().collect()
    }
}
