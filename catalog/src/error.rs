use error_stack::Report;
use kernel::KernelError;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

/// Human readable explanation of a recoverable catalog failure, `None` for
/// failures that should abort the caller.
pub fn describe(report: &Report<KernelError>) -> Option<String> {
    match report.current_context() {
        kind @ (KernelError::NotExist | KernelError::AlreadyLent) => Some(kind.to_string()),
        KernelError::Internal => None,
    }
}

#[cfg(test)]
mod test {
    use error_stack::Report;
    use kernel::KernelError;

    use crate::error::describe;

    #[test]
    fn recoverable_failures_are_described_by_their_kind() {
        let report = Report::new(KernelError::NotExist).attach_printable("No copy with id 1");
        assert_eq!(
            describe(&report).as_deref(),
            Some("This book doesn't exist in library")
        );

        let report = Report::new(KernelError::AlreadyLent);
        assert_eq!(
            describe(&report),
            Some(KernelError::AlreadyLent.to_string())
        );
    }

    #[test]
    fn internal_failures_are_not_described() {
        assert!(describe(&Report::new(KernelError::Internal)).is_none());
    }
}
