//! Failure modes of encoding and writing problem details.

use thiserror::Error;

/// Errors surfaced by the codecs and the response writers.
///
/// Constructors never fail; everything here comes from serializing a record
/// or pushing it onto a response stream. Use [`ProblemError::is_encoding`] and
/// [`ProblemError::is_write`] to branch without matching every variant.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProblemError {
    /// JSON serialization or deserialization failed
    #[error("JSON encoding failed: {0}")]
    JsonEncoding(#[from] serde_json::Error),

    /// XML serialization failed
    #[error("XML encoding failed: {0}")]
    XmlEncoding(#[from] quick_xml::se::SeError),

    /// XML deserialization failed
    #[error("XML decoding failed: {0}")]
    XmlDecoding(#[from] quick_xml::de::DeError),

    /// The underlying transport rejected the body (client went away, etc)
    #[error("Failed to write response body: {0}")]
    Write(#[from] std::io::Error),

    /// The record's status cannot be sent as an HTTP status line
    #[error("Status {0} is not a valid HTTP status code")]
    InvalidStatus(u16),
}

impl ProblemError {
    /// True for failures raised while turning a record into bytes (or back).
    #[must_use]
    pub fn is_encoding(&self) -> bool {
        matches!(
            self,
            Self::JsonEncoding(_) | Self::XmlEncoding(_) | Self::XmlDecoding(_) | Self::InvalidStatus(_)
        )
    }

    /// True when the transport failed while the body was being written.
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write(_))
    }
}
