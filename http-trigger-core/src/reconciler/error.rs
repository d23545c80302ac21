use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ReconcilerError {
    #[error("Function is missing metadata!")]
    MissingObjectMetadata,
    #[error("Couldn't sync the trigger! Reason: {}", .0)]
    Store(StoreError),
}

impl ReconcilerError {
    /// Whether re-delivering the same event may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ReconcilerError::MissingObjectMetadata => false,
            ReconcilerError::Store(err) => err.is_retryable(),
        }
    }
}
