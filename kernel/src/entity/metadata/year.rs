use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct PublishYear(i32);

impl PublishYear {
    pub fn new(year: impl Into<i32>) -> Self {
        Self(year.into())
    }
}
