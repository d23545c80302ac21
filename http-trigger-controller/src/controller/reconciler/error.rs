use http_trigger_core::{reconciler::error::ReconcilerError, resources::intent::IntentError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Function routing annotations are invalid! Details: {}", .0)]
    InvalidIntent(IntentError),
    #[error("Couldn't reconcile the function! Reason: {}", .0)]
    ReconcilerError(ReconcilerError),
}
