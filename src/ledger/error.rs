use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LedgerError {
    /// Input rejected before any state was touched.
    #[error("{0}")]
    Validation(String),
}

impl LedgerError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
