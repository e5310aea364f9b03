use uuid::Uuid;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct MetadataId(Uuid);

impl MetadataId {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self(id.into())
    }
}
