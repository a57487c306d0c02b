use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("{0}")]
    Validation(String),

    #[error("Contact not found.")]
    ContactNotFound(String),

    #[error("Phone number {0} not found.")]
    PhoneNotFound(String),

    #[error("Note '{0}' not found.")]
    NoteNotFound(String),

    #[error("Note with title '{0}' already exists.")]
    NoteExists(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AssistantError {
    pub fn validation(message: impl Into<String>) -> Self {
        AssistantError::Validation(message.into())
    }

    /// True for failures the user caused and can fix by retyping the command.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            AssistantError::Validation(_)
                | AssistantError::ContactNotFound(_)
                | AssistantError::PhoneNotFound(_)
                | AssistantError::NoteNotFound(_)
                | AssistantError::NoteExists(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AssistantError>;
