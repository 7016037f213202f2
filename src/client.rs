use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::ProblemConfig;
use crate::errors::problem::{check_problem, decode_problem};
use crate::errors::{HttpProblem, ProblemError, APPLICATION_PROBLEM_JSON};

/// HTTP client that reads problem responses
#[derive(Clone)]
pub struct ProblemClient {
    http_client: reqwest::Client,
    config: ProblemConfig,
}

impl ProblemClient {
    pub fn new(config: ProblemConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("glitch/", env!("CARGO_PKG_VERSION")))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
                );
                headers
            })
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &ProblemConfig {
        &self.config
    }

    /// Read the response body as an [`HttpProblem`].
    ///
    /// Bodies over the configured size limit are rejected before decoding.
    pub async fn problem(&self, response: reqwest::Response) -> Result<HttpProblem, ProblemError> {
        let body = self.read_body(response).await?;
        decode_problem(body.as_slice())
    }

    /// Async counterpart of [`crate::errors::validate_problem`]
    pub async fn validate(
        &self,
        response: reqwest::Response,
        expected_code: &str,
        expected_status: u16,
    ) -> Result<bool, ProblemError> {
        let transport_status = response.status().as_u16();
        let problem = self.problem(response).await?;
        Ok(check_problem(
            &problem,
            transport_status,
            expected_code,
            expected_status,
        ))
    }

    /// GET `url` and validate the problem it answers with
    pub async fn check(
        &self,
        url: &str,
        expected_code: &str,
        expected_status: u16,
    ) -> Result<bool> {
        debug!("Checking problem response from: {}", url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        let valid = self
            .validate(response, expected_code, expected_status)
            .await
            .context("Failed to read problem response")?;

        info!(
            url = %url,
            expected_code = %expected_code,
            expected_status = expected_status,
            valid = valid,
            "Problem check completed"
        );
        Ok(valid)
    }

    async fn read_body(&self, mut response: reqwest::Response) -> Result<Vec<u8>, ProblemError> {
        let limit = self.config.max_body_bytes;

        if let Some(size) = response.content_length() {
            let size = usize::try_from(size).unwrap_or(usize::MAX);
            if size > limit {
                return Err(ProblemError::BodyTooLarge { size, limit });
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
            if body.len() > limit {
                return Err(ProblemError::BodyTooLarge {
                    size: body.len(),
                    limit,
                });
            }
        }
        Ok(body)
    }
}
