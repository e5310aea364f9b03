mod author;
mod id;
mod title;
mod year;

pub use self::{author::*, id::*, title::*, year::*};
use destructure::Destructure;
use vodca::References;

/// Descriptive data shared by every copy of one edition.
///
/// Two values are the same edition when title, author and year all match.
#[derive(Debug, Clone, Hash, Eq, PartialEq, References, Destructure)]
pub struct BookMetadata {
    title: BookTitle,
    author: BookAuthor,
    year: PublishYear,
}

impl BookMetadata {
    pub fn new(title: BookTitle, author: BookAuthor, year: PublishYear) -> Self {
        Self {
            title,
            author,
            year,
        }
    }
}
