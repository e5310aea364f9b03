use uuid::Uuid;

use crate::transfer::BookDto;

/// Copy counts of one edition.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct InventoryDto {
    pub book: BookDto,
    pub available: usize,
    pub lent: usize,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CopyDetailDto {
    pub id: Uuid,
    pub book: BookDto,
    pub is_lent: bool,
    pub last_borrower: Option<String>,
}
