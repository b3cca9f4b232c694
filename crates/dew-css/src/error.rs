use thiserror::Error;

/// Errors raised while reading or compiling a condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CondError {
    /// A compound node named a connective other than `and`/`or`.
    #[error("unknown boolean connective: '{0}'")]
    UnknownConnective(String),

    /// A leaf named an operator other than `<`, `>`, `<=`, `>=`.
    #[error("unknown comparison operator: '{0}'")]
    UnknownOperator(String),

    /// A compound condition was compiled without a result to map it to.
    #[error("compound condition `{0}` needs a result expression")]
    MissingResult(String),
}

pub type Result<T> = std::result::Result<T, CondError>;
