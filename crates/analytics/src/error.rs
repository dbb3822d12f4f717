use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// A calculator needed a statement row or upstream metric that is absent.
    #[error("Analysis aborted: {0}")]
    Statement(#[from] CoreError),
}
