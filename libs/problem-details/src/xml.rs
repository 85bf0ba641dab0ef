//! XML encoding of Problem Details (`application/problem+xml`)

use quick_xml::de::DeError;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;

use crate::error::ProblemError;
use crate::problem::ProblemDetails;

/// Namespace of the `<problem>` root element.
pub const XML_NAMESPACE: &str = "urn:ietf:rfc:7807";

/// Wire shape of the XML document. The namespace lives on the root element
/// only, so it is kept out of [`ProblemDetails`] and its JSON form.
#[derive(Serialize)]
#[serde(rename = "problem")]
struct XmlProblem<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "type")]
    type_url: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "crate::problem::is_unset")]
    status: u16,
    #[serde(skip_serializing_if = "str::is_empty")]
    detail: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    instance: &'a str,
}

impl<'a> From<&'a ProblemDetails> for XmlProblem<'a> {
    fn from(p: &'a ProblemDetails) -> Self {
        Self {
            xmlns: XML_NAMESPACE,
            type_url: &p.type_url,
            title: &p.title,
            status: p.status,
            detail: &p.detail,
            instance: &p.instance,
        }
    }
}

impl ProblemDetails {
    /// Encode as `application/problem+xml`, without an XML declaration.
    ///
    /// # Errors
    /// Returns [`ProblemError::XmlEncoding`] if serialization fails.
    pub fn to_xml(&self) -> Result<String, ProblemError> {
        Ok(quick_xml::se::to_string(&XmlProblem::from(self))?)
    }

    /// Decode a `<problem>` document. Root attributes, the namespace
    /// included, are not part of the record and are ignored.
    ///
    /// Element text is kept exactly as sent (no whitespace trimming), so a
    /// record encoded with [`ProblemDetails::to_xml`] decodes to itself.
    /// Missing members take their zero values and a missing `type` reads as
    /// `about:blank`.
    ///
    /// # Errors
    /// Returns [`ProblemError::XmlDecoding`] on malformed input.
    pub fn from_xml(input: &str) -> Result<Self, ProblemError> {
        let mut reader = Reader::from_str(input);
        let mut problem = Self::default();
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut member: Option<Member> = None;
        let mut text = String::new();

        loop {
            match reader.read_event().map_err(DeError::from)? {
                Event::Start(e) => {
                    depth += 1;
                    if depth == 1 {
                        seen_root = true;
                    } else if depth == 2 {
                        member = Member::from_name(e.local_name().as_ref());
                        text.clear();
                    }
                }
                Event::Empty(e) => {
                    if depth == 0 {
                        seen_root = true;
                    } else if depth == 1
                        && let Some(m) = Member::from_name(e.local_name().as_ref())
                    {
                        m.assign(&mut problem, String::new())?;
                    }
                }
                Event::Text(e) if depth == 2 && member.is_some() => {
                    text.push_str(&e.unescape().map_err(DeError::from)?);
                }
                Event::CData(e) if depth == 2 && member.is_some() => {
                    let raw = e.into_inner();
                    let chunk = std::str::from_utf8(&raw)
                        .map_err(|err| DeError::Custom(format!("invalid UTF-8 in CDATA: {err}")))?;
                    text.push_str(chunk);
                }
                Event::End(_) => {
                    if depth == 2
                        && let Some(m) = member.take()
                    {
                        m.assign(&mut problem, std::mem::take(&mut text))?;
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !seen_root {
            return Err(DeError::Custom("missing <problem> root element".to_owned()).into());
        }
        if depth != 0 {
            return Err(DeError::Custom("unexpected end of document".to_owned()).into());
        }
        Ok(problem)
    }
}

/// Child elements of `<problem>` that map onto record fields.
#[derive(Debug, Clone, Copy)]
enum Member {
    Type,
    Title,
    Status,
    Detail,
    Instance,
}

impl Member {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"type" => Some(Self::Type),
            b"title" => Some(Self::Title),
            b"status" => Some(Self::Status),
            b"detail" => Some(Self::Detail),
            b"instance" => Some(Self::Instance),
            _ => None,
        }
    }

    fn assign(self, problem: &mut ProblemDetails, text: String) -> Result<(), DeError> {
        match self {
            Self::Type => problem.type_url = text,
            Self::Title => problem.title = text,
            Self::Detail => problem.detail = text,
            Self::Instance => problem.instance = text,
            Self::Status => {
                let digits = text.trim();
                problem.status = if digits.is_empty() {
                    0
                } else {
                    digits
                        .parse()
                        .map_err(|err| DeError::Custom(format!("invalid status '{digits}': {err}")))?
                };
            }
        }
        Ok(())
    }
}
