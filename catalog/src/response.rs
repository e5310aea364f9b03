use std::fmt::{Display, Formatter};

use application::transfer::{BookDto, CopyDetailDto, InventoryDto};

use crate::controller::Exhaust;

#[derive(Debug)]
pub struct BookResponse {
    title: String,
    author: String,
    year: i32,
}

impl Display for BookResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.title, self.author, self.year)
    }
}

#[derive(Debug)]
pub struct InventoryResponse {
    book: BookResponse,
    available: usize,
    lent: usize,
}

impl Display for InventoryResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Book {}", self.book)?;
        writeln!(f, "Available amount in library {}", self.available)?;
        write!(f, "Lent amount {}", self.lent)
    }
}

#[derive(Debug)]
pub struct CopyDetailResponse {
    book: BookResponse,
    is_lent: bool,
    last_borrower: Option<String>,
}

impl Display for CopyDetailResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Book details {}", self.book)?;
        writeln!(
            f,
            "Book is {}",
            if self.is_lent { "lent" } else { "available" }
        )?;
        write!(
            f,
            "Last person that lent the book {}",
            self.last_borrower.as_deref().unwrap_or("-")
        )
    }
}

pub struct CatalogPresenter;

impl Exhaust<BookDto> for CatalogPresenter {
    type To = BookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        BookResponse {
            title: input.title,
            author: input.author,
            year: input.year,
        }
    }
}

impl Exhaust<Vec<BookDto>> for CatalogPresenter {
    type To = Vec<BookResponse>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        input
            .into_iter()
            .map(|book| Exhaust::<BookDto>::emit(self, book))
            .collect()
    }
}

impl Exhaust<Vec<InventoryDto>> for CatalogPresenter {
    type To = Vec<InventoryResponse>;
    fn emit(&self, input: Vec<InventoryDto>) -> Self::To {
        input
            .into_iter()
            .map(|entry| InventoryResponse {
                book: Exhaust::<BookDto>::emit(self, entry.book),
                available: entry.available,
                lent: entry.lent,
            })
            .collect()
    }
}

impl Exhaust<CopyDetailDto> for CatalogPresenter {
    type To = CopyDetailResponse;
    fn emit(&self, input: CopyDetailDto) -> Self::To {
        CopyDetailResponse {
            book: Exhaust::<BookDto>::emit(self, input.book),
            is_lent: input.is_lent,
            last_borrower: input.last_borrower,
        }
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use application::transfer::{BookDto, CopyDetailDto, InventoryDto};

    use crate::controller::Exhaust;
    use crate::response::CatalogPresenter;

    fn odyssey() -> BookDto {
        BookDto {
            title: "Odyseja".to_string(),
            author: "Homer".to_string(),
            year: 1990,
        }
    }

    #[test]
    fn inventory_lists_both_counts() {
        let rendered = CatalogPresenter.emit(vec![InventoryDto {
            book: odyssey(),
            available: 2,
            lent: 1,
        }]);
        assert_eq!(
            rendered[0].to_string(),
            "Book Odyseja Homer 1990\nAvailable amount in library 2\nLent amount 1"
        );
    }

    #[test]
    fn copy_detail_without_borrower() {
        let rendered = CatalogPresenter.emit(CopyDetailDto {
            id: Uuid::new_v4(),
            book: odyssey(),
            is_lent: false,
            last_borrower: None,
        });
        assert_eq!(
            rendered.to_string(),
            "Book details Odyseja Homer 1990\nBook is available\nLast person that lent the book -"
        );
    }
}
