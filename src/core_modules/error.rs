use thiserror::Error;

/// The single error kind produced by the measurement core. Every core
/// operation is pure and total over valid inputs; the only way to fail is to
/// hand it something that violates an input invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
