//! Uniform error representation and HTTP problem handling

pub mod codes;
pub mod data;
pub mod problem;

pub use codes::{is_unknown, UNKNOWN_CODE};
pub use data::DataError;
pub use problem::{
    response_to_problem, validate_problem, HttpProblem, ProblemError, APPLICATION_PROBLEM_JSON,
};

/// Boxed originating error held by a [`DataError`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
