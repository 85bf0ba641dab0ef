//! Writing problem details onto HTTP responses.
//!
//! The writers work on any `http::Response` whose body is a byte sink, so they
//! fit buffered responses (`Vec<u8>`) as well as streaming transports.

use std::io::Write;

use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Request, Response};

use crate::error::ProblemError;
use crate::problem::{APPLICATION_PROBLEM_JSON, APPLICATION_PROBLEM_XML, ProblemDetails};

impl ProblemDetails {
    /// Write this problem as `application/problem+json`.
    ///
    /// Sets `Content-Type`, sets the status (`200 OK` when `status` is unset)
    /// and writes the body. The request is accepted to match handler
    /// signatures; it does not influence the output.
    ///
    /// # Errors
    /// Returns an encoding error (response untouched) if the record cannot be
    /// encoded or its status is invalid, and [`ProblemError::Write`] if the
    /// body stream fails. Headers and status already set are not reverted.
    pub fn write_json<W, R>(
        &self,
        response: &mut Response<W>,
        _request: &Request<R>,
    ) -> Result<(), ProblemError>
    where
        W: Write,
    {
        let body = self.to_json_vec()?;
        self.write_body(response, APPLICATION_PROBLEM_JSON, &body)
    }

    /// Write this problem as `application/problem+xml`.
    ///
    /// Same contract as [`ProblemDetails::write_json`].
    ///
    /// # Errors
    /// See [`ProblemDetails::write_json`].
    pub fn write_xml<W, R>(
        &self,
        response: &mut Response<W>,
        _request: &Request<R>,
    ) -> Result<(), ProblemError>
    where
        W: Write,
    {
        let body = self.to_xml()?;
        self.write_body(response, APPLICATION_PROBLEM_XML, body.as_bytes())
    }

    fn write_body<W: Write>(
        &self,
        response: &mut Response<W>,
        content_type: &'static str,
        body: &[u8],
    ) -> Result<(), ProblemError> {
        let status = self.effective_status()?;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        *response.status_mut() = status;

        let sink = response.body_mut();
        sink.write_all(body)?;
        sink.flush()?;
        Ok(())
    }
}

/// Axum integration: make `ProblemDetails` directly usable as a response
#[cfg(feature = "axum")]
mod axum_impl {
    use axum::http::{HeaderValue, StatusCode, header};
    use axum::response::{IntoResponse, Response};

    use crate::problem::{APPLICATION_PROBLEM_JSON, APPLICATION_PROBLEM_XML, ProblemDetails};

    /// Responds with the XML encoding of the wrapped problem.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Xml(pub ProblemDetails);

    fn status_of(problem: &ProblemDetails) -> StatusCode {
        problem.effective_status().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Problem has invalid status, responding 500");
            StatusCode::INTERNAL_SERVER_ERROR
        })
    }

    fn respond(status: StatusCode, content_type: &'static str, body: Vec<u8>) -> Response {
        let mut resp = body.into_response();
        *resp.status_mut() = status;
        resp.headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        resp
    }

    impl IntoResponse for ProblemDetails {
        fn into_response(self) -> Response {
            let status = status_of(&self);
            match self.to_json_vec() {
                Ok(body) => respond(status, APPLICATION_PROBLEM_JSON, body),
                Err(err) => {
                    tracing::error!(error = %err, "Failed to encode problem as JSON");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }
    }

    impl IntoResponse for Xml {
        fn into_response(self) -> Response {
            let status = status_of(&self.0);
            match self.0.to_xml() {
                Ok(body) => respond(status, APPLICATION_PROBLEM_XML, body.into_bytes()),
                Err(err) => {
                    tracing::error!(error = %err, "Failed to encode problem as XML");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }
    }

}

#[cfg(feature = "axum")]
pub use axum_impl::Xml;
