use vodca::{AsRefln, Fromln};

#[derive(Debug, Default, Clone, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct IsLent(bool);

impl IsLent {
    pub fn new(value: impl Into<bool>) -> Self {
        Self(value.into())
    }
}
