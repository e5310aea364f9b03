use uuid::Uuid;

use crate::transfer::SearchBookDto;

#[derive(Debug, Clone)]
pub struct LendBookDto {
    pub id: Uuid,
    pub borrower: String,
}

#[derive(Debug, Clone)]
pub struct LendByCriteriaDto {
    pub criteria: SearchBookDto,
    pub borrower: String,
}
