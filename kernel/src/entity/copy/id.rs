use uuid::Uuid;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct CopyId(Uuid);

impl CopyId {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self(id.into())
    }
}
