#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// The human-readable part of the error, without the variant prefix.
    ///
    /// Form handlers show validation messages to the user as-is.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Validation(msg) => msg.clone(),
        }
    }
}
