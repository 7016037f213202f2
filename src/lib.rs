//! Uniform coded errors for service code.
//!
//! [`DataError`] carries a machine readable code, a message, the originating
//! error and an optional cause. Adapters build one from an RFC 7807 problem
//! response ([`errors::problem`]) or from a SQL driver error ([`db`]).

pub mod client;
pub mod config;
pub mod db;
pub mod errors;

pub use client::ProblemClient;
pub use db::from_sql_driver;
pub use errors::{
    response_to_problem, validate_problem, BoxError, DataError, HttpProblem, ProblemError,
    UNKNOWN_CODE,
};
