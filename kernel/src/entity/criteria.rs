use vodca::References;

use crate::entity::{BookAuthor, BookMetadata, BookTitle, PublishYear};

/// Partial filter over [`BookMetadata`].
///
/// Every field that is set must match exactly, unset fields match anything.
#[derive(Debug, Default, Clone, Eq, PartialEq, References)]
pub struct SearchCriteria {
    title: Option<BookTitle>,
    author: Option<BookAuthor>,
    year: Option<PublishYear>,
}

impl SearchCriteria {
    pub fn new(
        title: Option<BookTitle>,
        author: Option<BookAuthor>,
        year: Option<PublishYear>,
    ) -> Self {
        Self {
            title,
            author,
            year,
        }
    }

    /// Criteria that only match metadata equal to `metadata`.
    pub fn exact(metadata: &BookMetadata) -> Self {
        Self::new(
            Some(metadata.title().clone()),
            Some(metadata.author().clone()),
            Some(metadata.year().clone()),
        )
    }

    pub fn with_title(mut self, title: BookTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_author(mut self, author: BookAuthor) -> Self {
        self.author = Some(author);
        self
    }

    pub fn with_year(mut self, year: PublishYear) -> Self {
        self.year = Some(year);
        self
    }

    pub fn matches(&self, metadata: &BookMetadata) -> bool {
        self.title.as_ref().map_or(true, |t| t == metadata.title())
            && self.author.as_ref().map_or(true, |a| a == metadata.author())
            && self.year.as_ref().map_or(true, |y| y == metadata.year())
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{BookAuthor, BookMetadata, BookTitle, PublishYear, SearchCriteria};

    fn odyssey() -> BookMetadata {
        BookMetadata::new(
            BookTitle::new("Odyseja"),
            BookAuthor::new("Homer"),
            PublishYear::new(1990),
        )
    }

    #[test]
    fn empty_criteria_match_everything() {
        assert!(SearchCriteria::default().matches(&odyssey()));
    }

    #[test]
    fn every_set_field_must_match() {
        let criteria = SearchCriteria::default()
            .with_title(BookTitle::new("Odyseja"))
            .with_author(BookAuthor::new("Homer"));
        assert!(criteria.matches(&odyssey()));

        let criteria = criteria.with_year(PublishYear::new(1991));
        assert!(!criteria.matches(&odyssey()));
    }

    #[test]
    fn exact_criteria_match_only_equal_metadata() {
        let criteria = SearchCriteria::exact(&odyssey());
        assert!(criteria.matches(&odyssey()));
        assert!(!criteria.matches(&BookMetadata::new(
            BookTitle::new("Iliada"),
            BookAuthor::new("Homer"),
            PublishYear::new(1990),
        )));
    }
}
