mod copy;
mod criteria;
mod metadata;

pub use self::{copy::*, criteria::*, metadata::*};
