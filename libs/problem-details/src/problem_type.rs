//! Capability shared by every error that can be reported as a problem.

use crate::problem::ProblemDetails;

/// An error that can be rendered as a single human-readable message and,
/// from there, reported as [`ProblemDetails`].
///
/// Domain errors implement this to be handled the same way as a bare
/// `ProblemDetails`.
pub trait ProblemType {
    /// One-line description of the problem.
    fn to_message(&self) -> String;

    /// Report this error under `status`, using the message as the title.
    ///
    /// An empty message leaves the reason phrase of `status` as the title.
    fn to_problem(&self, status: u16) -> ProblemDetails {
        ProblemDetails::from_status(status).with_title(self.to_message())
    }
}

impl ProblemType for ProblemDetails {
    fn to_message(&self) -> String {
        self.to_string()
    }

    fn to_problem(&self, status: u16) -> ProblemDetails {
        ProblemDetails {
            status,
            ..self.clone()
        }
    }
}
