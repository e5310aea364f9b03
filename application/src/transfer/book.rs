use uuid::Uuid;

use kernel::prelude::entity::{
    BookAuthor, BookMetadata, BookTitle, DestructBookMetadata, PublishYear, SearchCriteria,
};

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct BookDto {
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl From<BookMetadata> for BookDto {
    fn from(value: BookMetadata) -> Self {
        let DestructBookMetadata {
            title,
            author,
            year,
        } = value.into_destruct();
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl CreateBookDto {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }
}

impl From<CreateBookDto> for BookMetadata {
    fn from(value: CreateBookDto) -> Self {
        BookMetadata::new(
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            PublishYear::new(value.year),
        )
    }
}

#[derive(Debug, Clone)]
pub struct GetBookDto {
    pub id: Uuid,
}

#[derive(Debug, Clone)]
pub struct RemoveBookDto {
    pub id: Uuid,
}

/// Unset fields match any book.
#[derive(Debug, Default, Clone)]
pub struct SearchBookDto {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
}

impl From<SearchBookDto> for SearchCriteria {
    fn from(value: SearchBookDto) -> Self {
        let mut criteria = SearchCriteria::default();
        if let Some(title) = value.title {
            criteria = criteria.with_title(BookTitle::new(title));
        }
        if let Some(author) = value.author {
            criteria = criteria.with_author(BookAuthor::new(author));
        }
        if let Some(year) = value.year {
            criteria = criteria.with_year(PublishYear::new(year));
        }
        criteria
    }
}
