use thiserror::Error;

#[derive(Debug, Error)]
pub enum HooklogError {
    #[error("store unavailable: {message}")]
    StoreUnavailable { message: String },
    #[error("store error: {message}")]
    Store { message: String },
}

impl HooklogError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}
