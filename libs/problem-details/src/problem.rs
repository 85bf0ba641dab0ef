//! RFC 7807 Problem Details for HTTP APIs (data model and JSON codec)

use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

use crate::error::ProblemError;

/// Problem type meaning "nothing more specific than the status code".
pub const ABOUT_BLANK: &str = "about:blank";

/// Content type for the JSON encoding as per RFC 7807.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Content type for the XML encoding as per RFC 7807.
pub const APPLICATION_PROBLEM_XML: &str = "application/problem+xml";

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
pub(crate) fn is_unset(status: &u16) -> bool {
    *status == 0
}

/// Standard reason phrase for `status`, or an empty string when there is none.
#[must_use]
pub fn reason_phrase(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or_default()
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// `status`, `detail` and `instance` are optional: their zero values (`0` and
/// the empty string) are left out of both encodings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[cfg_attr(
    feature = "utoipa",
    schema(
        title = "ProblemDetails",
        description = "RFC 7807 Problem Details for HTTP APIs"
    )
)]
#[serde(default)]
#[must_use]
pub struct ProblemDetails {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub type_url: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// The HTTP status code for this occurrence of the problem, `0` when unset.
    #[serde(skip_serializing_if = "is_unset")]
    pub status: u16,
    /// A human-readable explanation specific to this occurrence of the problem.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
    /// A URI reference that identifies the specific occurrence of the problem.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instance: String,
}

impl Default for ProblemDetails {
    fn default() -> Self {
        Self {
            type_url: ABOUT_BLANK.to_owned(),
            title: String::new(),
            status: 0,
            detail: String::new(),
            instance: String::new(),
        }
    }
}

impl ProblemDetails {
    /// Problem of type `about:blank` titled with the reason phrase of `status`.
    ///
    /// Unknown codes (and `0`) get an empty title.
    pub fn from_status(status: u16) -> Self {
        Self {
            title: reason_phrase(status).to_owned(),
            status,
            ..Self::default()
        }
    }

    /// Create a fully specified Problem.
    ///
    /// An empty `problem_type` becomes `about:blank` and an empty `title`
    /// becomes the reason phrase of `status`. Nothing is validated: relative
    /// references and opaque identifiers are kept verbatim.
    pub fn new(
        status: u16,
        problem_type: impl Into<String>,
        title: impl Into<String>,
        detail: impl Into<String>,
        instance: impl Into<String>,
    ) -> Self {
        Self::from_status(status)
            .with_type(problem_type)
            .with_title(title)
            .with_detail(detail)
            .with_instance(instance)
    }

    /// Set the problem type, falling back to `about:blank` when empty.
    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        let type_url = type_url.into();
        self.type_url = if type_url.is_empty() {
            ABOUT_BLANK.to_owned()
        } else {
            type_url
        };
        self
    }

    /// Set the title, falling back to the reason phrase when empty.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = if title.is_empty() {
            reason_phrase(self.status).to_owned()
        } else {
            title
        };
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = uri.into();
        self
    }

    /// Status the response writers put on the wire.
    ///
    /// An unset status (`0`) is sent as `200 OK`.
    ///
    /// # Errors
    /// Returns [`ProblemError::InvalidStatus`] when `status` is outside `100..=999`.
    pub fn effective_status(&self) -> Result<StatusCode, ProblemError> {
        if self.status == 0 {
            return Ok(StatusCode::OK);
        }
        StatusCode::from_u16(self.status).map_err(|_| ProblemError::InvalidStatus(self.status))
    }

    /// Encode as `application/problem+json`.
    ///
    /// # Errors
    /// Returns [`ProblemError::JsonEncoding`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ProblemError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode as `application/problem+json` bytes.
    ///
    /// # Errors
    /// Returns [`ProblemError::JsonEncoding`] if serialization fails.
    pub fn to_json_vec(&self) -> Result<Vec<u8>, ProblemError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a JSON payload. Missing members take their zero values and a
    /// missing `type` reads as `about:blank`.
    ///
    /// # Errors
    /// Returns [`ProblemError::JsonEncoding`] on malformed input.
    pub fn from_json(input: &str) -> Result<Self, ProblemError> {
        Ok(serde_json::from_str(input)?)
    }
}

impl From<StatusCode> for ProblemDetails {
    fn from(status: StatusCode) -> Self {
        Self::from_status(status.as_u16())
    }
}

/// Single-line summary: `"{title}: {detail}"`, `"{title}"` or `"Status {status}"`.
impl fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.title.is_empty(), self.detail.is_empty()) {
            (false, false) => write!(f, "{}: {}", self.title, self.detail),
            (false, true) => f.write_str(&self.title),
            (true, _) => write!(f, "Status {}", self.status),
        }
    }
}

impl std::error::Error for ProblemDetails {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const ISSUE_JSON: &str = r#"{"type":"https://example.net/problem/issue","title":"Issue title","status":404,"detail":"Object with id was not found, another id should be given.","instance":"https://api.example.net/objects/1234"}"#;

    fn issue() -> ProblemDetails {
        ProblemDetails {
            type_url: "https://example.net/problem/issue".to_owned(),
            title: "Issue title".to_owned(),
            status: 404,
            detail: "Object with id was not found, another id should be given.".to_owned(),
            instance: "https://api.example.net/objects/1234".to_owned(),
        }
    }

    #[test]
    fn from_status_uses_reason_phrase() {
        let p = ProblemDetails::from_status(400);
        assert_eq!(
            p,
            ProblemDetails {
                type_url: "about:blank".to_owned(),
                title: "Bad Request".to_owned(),
                status: 400,
                detail: String::new(),
                instance: String::new(),
            }
        );
    }

    #[test]
    fn from_status_matches_reason_table() {
        for code in 100..=999u16 {
            let expected = StatusCode::from_u16(code)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("");
            let p = ProblemDetails::from_status(code);
            assert_eq!(p.title, expected, "status {code}");
            assert_eq!(p.type_url, ABOUT_BLANK);
            assert_eq!(p.status, code);
        }
    }

    #[test]
    fn reason_phrases_follow_http_crate_table() {
        assert_eq!(reason_phrase(203), "Non Authoritative Information");
        assert_eq!(reason_phrase(413), "Payload Too Large");
        assert_eq!(reason_phrase(414), "URI Too Long");
        assert_eq!(reason_phrase(404), "Not Found");
    }

    #[test]
    fn from_status_zero_has_empty_title() {
        let p = ProblemDetails::from_status(0);
        assert_eq!(p.type_url, "about:blank");
        assert_eq!(p.title, "");
        assert_eq!(p.status, 0);
    }

    #[test]
    fn from_status_unknown_code_has_empty_title() {
        assert_eq!(ProblemDetails::from_status(599).title, "");
        assert_eq!(ProblemDetails::from_status(1200).title, "");
    }

    #[test]
    fn from_http_status_code() {
        let p = ProblemDetails::from(StatusCode::NOT_FOUND);
        assert_eq!(p.status, 404);
        assert_eq!(p.title, "Not Found");
    }

    #[test]
    fn new_defaults_blank_fields() {
        let p = ProblemDetails::new(400, "", "", "", "");
        assert_eq!(p, ProblemDetails::from_status(400));
    }

    #[test]
    fn new_keeps_explicit_fields() {
        let p = ProblemDetails::new(
            404,
            "https://example.net/problem/not_found",
            "Not found",
            "Object with id was not found, another id should be given.",
            "https://api.example.net/objects/1234",
        );
        assert_eq!(p.type_url, "https://example.net/problem/not_found");
        assert_eq!(p.title, "Not found");
        assert_eq!(p.status, 404);
        assert_eq!(
            p.detail,
            "Object with id was not found, another id should be given."
        );
        assert_eq!(p.instance, "https://api.example.net/objects/1234");
    }

    #[test]
    fn new_accepts_relative_and_opaque_references() {
        let p = ProblemDetails::new(404, "/problem/not_found", "Not found", "", "objects-1234");
        assert_eq!(p.type_url, "/problem/not_found");
        assert_eq!(p.instance, "objects-1234");
    }

    #[test]
    fn builder_resets_empty_type() {
        let p = ProblemDetails::from_status(409)
            .with_type("https://example.net/problem/conflict")
            .with_type("");
        assert_eq!(p.type_url, ABOUT_BLANK);
        assert_eq!(p.title, "Conflict");
    }

    #[test]
    fn display_precedence() {
        let full = ProblemDetails::new(404, "", "Not found", "x", "");
        assert_eq!(full.to_string(), "Not found: x");

        let title_only = ProblemDetails {
            status: 404,
            title: "Not found".to_owned(),
            ..ProblemDetails::default()
        };
        assert_eq!(title_only.to_string(), "Not found");

        let status_only = ProblemDetails {
            status: 404,
            title: String::new(),
            ..ProblemDetails::default()
        };
        assert_eq!(status_only.to_string(), "Status 404");
    }

    #[test]
    fn display_ignores_detail_without_title() {
        let p = ProblemDetails {
            status: 500,
            title: String::new(),
            detail: "disk full".to_owned(),
            ..ProblemDetails::default()
        };
        assert_eq!(p.to_string(), "Status 500");
    }

    #[test]
    fn json_full_record() {
        assert_eq!(issue().to_json().unwrap(), ISSUE_JSON);
    }

    #[test]
    fn json_omits_zero_values() {
        let p = ProblemDetails::from_status(400);
        assert_eq!(
            p.to_json().unwrap(),
            r#"{"type":"about:blank","title":"Bad Request","status":400}"#
        );

        let p = ProblemDetails {
            type_url: "https://example.net/problem/issue".to_owned(),
            title: "Issue title".to_owned(),
            ..ProblemDetails::default()
        };
        let value: serde_json::Value = serde_json::from_slice(&p.to_json_vec().unwrap()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("type"));
        assert!(obj.contains_key("title"));
    }

    #[test]
    fn json_keeps_empty_title() {
        let p = ProblemDetails::from_status(0);
        assert_eq!(p.to_json().unwrap(), r#"{"type":"about:blank","title":""}"#);
    }

    #[test]
    fn json_round_trip() {
        for p in [
            issue(),
            ProblemDetails::from_status(400),
            ProblemDetails::new(0, "https://example.net/problem/issue", "Issue title", "", ""),
        ] {
            let decoded = ProblemDetails::from_json(&p.to_json().unwrap()).unwrap();
            assert_eq!(decoded, p);
        }
    }

    #[test]
    fn json_decode_fills_missing_members() {
        let p = ProblemDetails::from_json(r#"{"title":"Gone","status":410}"#).unwrap();
        assert_eq!(p.type_url, ABOUT_BLANK);
        assert_eq!(p.detail, "");
        assert_eq!(p.instance, "");
    }

    #[test]
    fn json_decode_rejects_garbage() {
        let err = ProblemDetails::from_json("not json").unwrap_err();
        assert!(err.is_encoding());
    }

    #[test]
    fn effective_status_defaults_to_ok() {
        assert_eq!(
            ProblemDetails::from_status(0).effective_status().unwrap(),
            StatusCode::OK
        );
        assert_eq!(
            ProblemDetails::from_status(503).effective_status().unwrap(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert!(matches!(
            ProblemDetails::from_status(42).effective_status(),
            Err(ProblemError::InvalidStatus(42))
        ));
    }
}
