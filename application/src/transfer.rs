pub use self::{book::*, lend::*, report::*};

mod book;
mod lend;
mod report;
