use anyhow::{Context, Result};
use std::env;

use crate::errors::UNKNOWN_CODE;

const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub problem: ProblemConfig,
    pub check: CheckConfig,
}

#[derive(Debug, Clone)]
pub struct ProblemConfig {
    /// Base URL for problem `type` URIs; no `type` is emitted when unset
    pub type_base_url: Option<String>,
    /// Largest problem body accepted from an HTTP client response
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub url: String,
    pub expected_code: String,
    pub expected_status: u16,
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            type_base_url: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ProblemConfig {
    pub fn from_env() -> Result<Self> {
        Ok(ProblemConfig {
            type_base_url: env::var("PROBLEM_TYPE_BASE_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            max_body_bytes: env::var("PROBLEM_MAX_BODY_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_BODY_BYTES.to_string())
                .parse()
                .context("PROBLEM_MAX_BODY_BYTES must be a valid number")?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            problem: ProblemConfig::from_env()?,
            check: CheckConfig {
                url: env::var("CHECK_URL").context("CHECK_URL must be set")?,
                expected_code: env::var("CHECK_EXPECTED_CODE")
                    .unwrap_or_else(|_| UNKNOWN_CODE.to_string()),
                expected_status: env::var("CHECK_EXPECTED_STATUS")
                    .unwrap_or_else(|_| "500".to_string())
                    .parse()
                    .context("CHECK_EXPECTED_STATUS must be a valid status code")?,
            },
        })
    }
}
