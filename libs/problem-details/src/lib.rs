//! RFC 7807 Problem Details for HTTP APIs
//!
//! This crate provides a single record type, [`ProblemDetails`], with:
//! - constructors that default the type to `about:blank` and the title to
//!   the standard reason phrase
//! - JSON and XML encodings that omit unset optional members
//! - writers that put either encoding on an `http::Response`
//! - optional `axum` integration (`IntoResponse`) behind the `axum` feature
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod error;
pub mod problem;
pub mod problem_type;
pub mod response;
pub mod xml;

// Re-export commonly used types
pub use error::ProblemError;
pub use problem::{
    ABOUT_BLANK, APPLICATION_PROBLEM_JSON, APPLICATION_PROBLEM_XML, ProblemDetails, reason_phrase,
};
pub use problem_type::ProblemType;
#[cfg(feature = "axum")]
pub use response::Xml;
pub use xml::XML_NAMESPACE;
