use std::error::Error as StdError;
use std::fmt;

use super::codes::UNKNOWN_CODE;
use super::problem::HttpProblem;
use super::BoxError;

/// Error carrying a machine friendly code alongside the originating error.
///
/// A `DataError` may point at another `DataError` as its cause, forming a
/// singly linked chain that callers can walk with [`DataError::chain`].
#[derive(Debug)]
pub struct DataError {
    inner: Option<BoxError>,
    code: String,
    message: String,
    cause: Option<Box<DataError>>,
}

impl DataError {
    /// Create a new error from the information provided.
    ///
    /// Nothing is validated: an empty `code` is stored as-is. Use
    /// [`UNKNOWN_CODE`] when no real code is available.
    pub fn new(
        inner: Option<BoxError>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            code: code.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Create an error classified by an [`HttpProblem`].
    ///
    /// When `inner` is an `HttpProblem` with a non-empty `code` that code is
    /// used. Any other inner error, or a problem without a code, gets
    /// [`UNKNOWN_CODE`] so the result always carries a code. `inner` is kept
    /// unchanged either way.
    pub fn from_http_problem(inner: impl Into<BoxError>, message: impl Into<String>) -> Self {
        let inner = inner.into();
        let code = match inner.downcast_ref::<HttpProblem>() {
            Some(problem) if !problem.code.is_empty() => problem.code.clone(),
            _ => UNKNOWN_CODE.to_string(),
        };

        Self::new(Some(inner), code, message)
    }

    /// The originating error, if any
    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.inner.as_deref()
    }

    pub fn into_inner(self) -> Option<BoxError> {
        self.inner
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_unknown(&self) -> bool {
        super::codes::is_unknown(&self.code)
    }

    /// Set `cause` as the cause of this error and return it for chaining.
    ///
    /// A previously set cause is replaced.
    pub fn wrap(mut self, cause: DataError) -> Self {
        self.set_cause(cause);
        self
    }

    pub fn set_cause(&mut self, cause: DataError) {
        self.cause = Some(Box::new(cause));
    }

    /// The error set by the last [`DataError::wrap`] or [`DataError::set_cause`]
    pub fn get_cause(&self) -> Option<&DataError> {
        self.cause.as_deref()
    }

    /// Iterate over this error followed by each linked cause
    pub fn chain(&self) -> impl Iterator<Item = &DataError> {
        std::iter::successors(Some(self), |err| DataError::get_cause(err))
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Code: [{}] Message: [{}] Inner error: [",
            self.code, self.message
        )?;
        // An absent inner error renders as an empty segment
        if let Some(inner) = &self.inner {
            write!(f, "{}", inner)?;
        }
        write!(f, "]")
    }
}

impl StdError for DataError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .as_deref()
            .map(|inner| inner as &(dyn StdError + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataError {
        DataError::new(Some("inner err".into()), "err code", "err msg")
    }

    #[test]
    fn test_error_display() {
        let err = sample();
        assert_eq!(
            err.to_string(),
            "Code: [err code] Message: [err msg] Inner error: [inner err]"
        );
    }

    #[test]
    fn test_error_display_without_inner() {
        let err = DataError::new(None, "err code", "err msg");
        assert_eq!(
            err.to_string(),
            "Code: [err code] Message: [err msg] Inner error: []"
        );
    }

    #[test]
    fn test_inner() {
        let err = sample();
        assert_eq!(err.inner().map(|e| e.to_string()).as_deref(), Some("inner err"));
        assert!(DataError::new(None, "c", "m").inner().is_none());
    }

    #[test]
    fn test_code_and_message() {
        let err = sample();
        assert_eq!(err.code(), "err code");
        assert_eq!(err.message(), "err msg");
        assert!(!err.is_unknown());
    }

    #[test]
    fn test_empty_code_is_stored_verbatim() {
        let err = DataError::new(None, "", "err msg");
        assert_eq!(err.code(), "");
        assert!(err.is_unknown());
    }

    #[test]
    fn test_wrap_and_cause() {
        let err = sample().wrap(DataError::new(None, "wrapped err code", "wrapped err msg"));

        let cause = err.get_cause().expect("cause should be set");
        assert_eq!(cause.code(), "wrapped err code");
        assert_eq!(cause.message(), "wrapped err msg");
        assert!(cause.inner().is_none());
    }

    #[test]
    fn test_wrap_last_write_wins() {
        let err = sample()
            .wrap(DataError::new(None, "first", "first msg"))
            .wrap(DataError::new(None, "second", "second msg"));

        assert_eq!(err.get_cause().map(DataError::code), Some("second"));
        assert!(err.get_cause().and_then(DataError::get_cause).is_none());
    }

    #[test]
    fn test_cause_unset_by_default() {
        assert!(sample().get_cause().is_none());
    }

    #[test]
    fn test_chain() {
        let root = DataError::new(None, "root", "root msg");
        let middle = DataError::new(None, "middle", "middle msg").wrap(root);
        let top = sample().wrap(middle);

        let codes: Vec<&str> = top.chain().map(DataError::code).collect();
        assert_eq!(codes, vec!["err code", "middle", "root"]);
    }

    #[test]
    fn test_chain_without_cause_yields_self_only() {
        let err = sample();
        let codes: Vec<&str> = err.chain().map(DataError::code).collect();
        assert_eq!(codes, vec!["err code"]);
    }

    #[test]
    fn test_set_cause_in_place() {
        let mut err = sample();
        err.set_cause(DataError::new(None, "first", "first msg"));
        err.set_cause(DataError::new(None, "second", "second msg"));

        assert_eq!(err.get_cause().map(DataError::code), Some("second"));
        assert_eq!(err.chain().count(), 2);
    }

    #[test]
    fn test_source_is_inner() {
        let err = sample();
        let source = err.source().expect("source should be set");
        assert_eq!(source.to_string(), "inner err");
    }

    #[test]
    fn test_from_http_problem_not_a_problem() {
        let inner = DataError::new(Some("not an HTTP problem".into()), "err code", "err msg");
        let err = DataError::from_http_problem(inner, "err msg param");

        assert_eq!(err.code(), UNKNOWN_CODE);
        assert_eq!(err.message(), "err msg param");
        let inner = err
            .inner()
            .and_then(|e| e.downcast_ref::<DataError>())
            .expect("inner should be kept as-is");
        assert_eq!(inner.code(), "err code");
    }

    #[test]
    fn test_from_http_problem_is_a_problem() {
        let problem = HttpProblem {
            r#type: "problem type".to_string(),
            title: "problem title".to_string(),
            status: 418,
            detail: "problem detail".to_string(),
            instance: "problem instance".to_string(),
            code: "problem code".to_string(),
        };
        let err = DataError::from_http_problem(problem.clone(), "err msg param");

        assert_eq!(err.code(), "problem code");
        assert_eq!(err.message(), "err msg param");
        assert_eq!(
            err.inner().and_then(|e| e.downcast_ref::<HttpProblem>()),
            Some(&problem)
        );
    }

    #[test]
    fn test_from_http_problem_without_code() {
        let problem = HttpProblem::new(500).with_title("Internal Server Error");
        let err = DataError::from_http_problem(problem, "upstream failed");
        assert_eq!(err.code(), UNKNOWN_CODE);
    }

    #[test]
    fn test_works_with_anyhow() {
        let result: anyhow::Result<()> = Err(sample().into());
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<DataError>().is_some());
    }
}
