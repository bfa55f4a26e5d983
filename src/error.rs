use thiserror::Error;

/// Everything that can go wrong while checking a course.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Timeout, connection failure or a non-2xx status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The portal did not hand back its main menu after login.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// The section page did not contain a usable row for the course.
    #[error("extraction error: {0}")]
    Extraction(String),
}

impl From<reqwest::Error> for CheckError {
    fn from(err: reqwest::Error) -> Self {
        CheckError::Transport(err.to_string())
    }
}
