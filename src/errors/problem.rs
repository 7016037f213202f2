use axum::{
    http::{self, header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::io::Read;
use thiserror::Error;
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use super::data::DataError;
use crate::config::ProblemConfig;

/// Media type for problem responses
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Response body for an error during an HTTP request.
///
/// Follows RFC 7807 with an additional `code` field which is machine readable
/// and gives clients enough information to handle the error appropriately.
/// Absent or `null` fields decode as empty strings (or `0` for `status`) and
/// empty fields are omitted when encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct HttpProblem {
    /// URI reference identifying the problem type
    #[serde(
        rename = "type",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub r#type: String,
    /// Short, human-readable summary of the problem type
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub title: String,
    /// HTTP status code generated by the origin server
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub status: u16,
    /// Human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub detail: String,
    /// URI reference identifying this occurrence
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub instance: String,
    /// Machine readable error code
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub code: String,
}

fn is_zero(status: &u16) -> bool {
    *status == 0
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Errors produced while reading a problem out of a response
#[derive(Debug, Error)]
pub enum ProblemError {
    /// The body was not a valid problem document, or could not be read
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error("response body is empty")]
    EmptyBody,

    #[error("response body of {size} bytes exceeds the {limit} byte limit")]
    BodyTooLarge { size: usize, limit: usize },

    #[error("failed to read response body: {0}")]
    Transport(#[from] reqwest::Error),
}

impl HttpProblem {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn with_type(mut self, r#type: impl Into<String>) -> Self {
        self.r#type = r#type.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = instance.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Build the problem to send back for `err`.
    ///
    /// The title is the canonical reason phrase for `status`, and `type`
    /// points at `<base>/<code>` when a base URL is configured and the code
    /// is known. Each call gets a fresh `urn:uuid:` instance.
    pub fn from_data_error(err: &DataError, status: u16, config: &ProblemConfig) -> Self {
        let title = StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default();

        let r#type = match &config.type_base_url {
            Some(base) if !err.is_unknown() => {
                format!("{}/{}", base.trim_end_matches('/'), err.code())
            }
            _ => String::new(),
        };

        Self {
            r#type,
            title: title.to_string(),
            status,
            detail: err.message().to_string(),
            instance: format!("urn:uuid:{}", Uuid::new_v4()),
            code: err.code().to_string(),
        }
    }

    /// Whether the problem carries the expected code and status
    pub fn matches(&self, expected_code: &str, expected_status: u16) -> bool {
        self.code == expected_code && self.status == expected_status
    }
}

impl fmt::Display for HttpProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTPProblem: [{} - {}] - {} - {}",
            self.status, self.code, self.title, self.detail
        )
    }
}

impl std::error::Error for HttpProblem {}

impl IntoResponse for HttpProblem {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [(header::CONTENT_TYPE, APPLICATION_PROBLEM_JSON)],
            Json(self),
        )
            .into_response()
    }
}

/// Decode the first JSON document in `reader` as a problem.
///
/// Anything after the first value is left unread.
pub(crate) fn decode_problem<R: Read>(reader: R) -> Result<HttpProblem, ProblemError> {
    let mut stream = serde_json::Deserializer::from_reader(reader).into_iter::<HttpProblem>();
    match stream.next() {
        Some(Ok(problem)) => Ok(problem),
        Some(Err(err)) => {
            debug!(error = %err, "Failed to decode problem body");
            Err(ProblemError::Decode(err))
        }
        None => Err(ProblemError::EmptyBody),
    }
}

/// Read the response body as an [`HttpProblem`].
pub fn response_to_problem<B: Read>(
    response: http::Response<B>,
) -> Result<HttpProblem, ProblemError> {
    decode_problem(response.into_body())
}

/// Check that a response carries the expected problem.
///
/// Returns `Ok(true)` only when the body code matches `expected_code`, the body
/// status matches `expected_status` and the response status agrees with the
/// body status. Decode failures are returned as errors.
pub fn validate_problem<B: Read>(
    response: http::Response<B>,
    expected_code: &str,
    expected_status: u16,
) -> Result<bool, ProblemError> {
    let transport_status = response.status().as_u16();
    let problem = response_to_problem(response)?;
    Ok(check_problem(&problem, transport_status, expected_code, expected_status))
}

pub(crate) fn check_problem(
    problem: &HttpProblem,
    transport_status: u16,
    expected_code: &str,
    expected_status: u16,
) -> bool {
    let valid =
        problem.matches(expected_code, expected_status) && transport_status == problem.status;
    if !valid {
        debug!(
            expected_code = %expected_code,
            expected_status = expected_status,
            body_code = %problem.code,
            body_status = problem.status,
            transport_status = transport_status,
            "Problem did not match expectation"
        );
    }
    valid
}
