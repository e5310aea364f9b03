use std::fmt::Display;

use error_stack::Context;

/// Error kinds surfaced by catalog operations.
///
/// `NotExist` and `AlreadyLent` are recoverable and meant to be matched on
/// through `Report::current_context`. `Internal` signals a broken storage
/// invariant.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    NotExist,
    AlreadyLent,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotExist => write!(f, "This book doesn't exist in library"),
            KernelError::AlreadyLent => write!(f, "This book is currently lent"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
