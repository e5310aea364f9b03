use std::ops::Deref;
use std::sync::Arc;

use driver::database::{InMemoryCopyRepository, InMemoryDatabase, InMemoryMetadataRepository};
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::{DependOnCopyQuery, DependOnMetadataQuery};
use kernel::interface::update::{DependOnCopyModifier, DependOnMetadataModifier};

/// Cheaply clonable handle to one catalog.
///
/// Every catalog operation is available on it through the service traits in
/// `application::service`. Clones share the same stores.
#[derive(Clone)]
pub struct Catalog(Arc<Handler>);

impl Catalog {
    pub fn new() -> Self {
        Self(Arc::new(Handler::init()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Catalog {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler {
    database: InMemoryDatabase,
    metadata_repository: InMemoryMetadataRepository,
    copy_repository: InMemoryCopyRepository,
}

impl Handler {
    pub fn init() -> Self {
        Self {
            database: InMemoryDatabase::new(),
            metadata_repository: InMemoryMetadataRepository,
            copy_repository: InMemoryCopyRepository,
        }
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = InMemoryDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.database
    }
}

impl DependOnMetadataQuery for Handler {
    type MetadataQuery = InMemoryMetadataRepository;
    fn metadata_query(&self) -> &Self::MetadataQuery {
        &self.metadata_repository
    }
}

impl DependOnMetadataModifier for Handler {
    type MetadataModifier = InMemoryMetadataRepository;
    fn metadata_modifier(&self) -> &Self::MetadataModifier {
        &self.metadata_repository
    }
}

impl DependOnCopyQuery for Handler {
    type CopyQuery = InMemoryCopyRepository;
    fn copy_query(&self) -> &Self::CopyQuery {
        &self.copy_repository
    }
}

impl DependOnCopyModifier for Handler {
    type CopyModifier = InMemoryCopyRepository;
    fn copy_modifier(&self) -> &Self::CopyModifier {
        &self.copy_repository
    }
}
