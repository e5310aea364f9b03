mod borrower;
mod id;
mod lent;

pub use self::{borrower::*, id::*, lent::*};
use crate::entity::MetadataId;
use crate::KernelError;
use destructure::{Destructure, Mutation};
use error_stack::Report;
use vodca::References;

/// One physical, independently lendable copy of a [`BookMetadata`](crate::entity::BookMetadata).
///
/// A copy starts out available and moves to lent exactly once; there is no
/// transition back.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct BookCopy {
    id: CopyId,
    metadata_id: MetadataId,
    lent: IsLent,
    last_borrower: Option<BorrowerName>,
}

impl BookCopy {
    pub fn new(id: CopyId, metadata_id: MetadataId) -> Self {
        Self {
            id,
            metadata_id,
            lent: IsLent::default(),
            last_borrower: None,
        }
    }

    pub fn is_lent(&self) -> bool {
        *self.lent.as_ref()
    }

    pub fn lend(&mut self, borrower: BorrowerName) -> error_stack::Result<(), KernelError> {
        if self.is_lent() {
            return Err(Report::new(KernelError::AlreadyLent)
                .attach_printable(format!("copy {} is currently lent", self.id.as_ref())));
        }
        self.substitute(|copy| {
            *copy.lent = IsLent::new(true);
            *copy.last_borrower = Some(borrower);
        });
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::entity::{BookCopy, BorrowerName, CopyId, MetadataId};
    use crate::KernelError;

    #[test]
    fn new_copy_is_available() {
        let copy = BookCopy::new(CopyId::new(Uuid::new_v4()), MetadataId::new(Uuid::new_v4()));
        assert!(!copy.is_lent());
        assert!(copy.last_borrower().is_none());
    }

    #[test]
    fn lend_records_borrower() -> error_stack::Result<(), KernelError> {
        let mut copy =
            BookCopy::new(CopyId::new(Uuid::new_v4()), MetadataId::new(Uuid::new_v4()));
        copy.lend(BorrowerName::new("Jan Kowalski"))?;
        assert!(copy.is_lent());
        assert_eq!(
            copy.last_borrower(),
            &Some(BorrowerName::new("Jan Kowalski"))
        );
        Ok(())
    }

    #[test]
    fn lend_twice_is_rejected() -> error_stack::Result<(), KernelError> {
        let mut copy =
            BookCopy::new(CopyId::new(Uuid::new_v4()), MetadataId::new(Uuid::new_v4()));
        copy.lend(BorrowerName::new("Jan Kowalski"))?;

        let error = copy
            .lend(BorrowerName::new("Anna Kowalska"))
            .expect_err("second lend must fail");
        assert_eq!(error.current_context(), &KernelError::AlreadyLent);
        assert!(copy.is_lent());
        assert_eq!(
            copy.last_borrower(),
            &Some(BorrowerName::new("Jan Kowalski"))
        );
        Ok(())
    }
}
