mod copy;
mod metadata;

pub use self::{copy::*, metadata::*};
