use thiserror::Error;

/// Unified error type for git-semtag operations
#[derive(Error, Debug)]
pub enum SemtagError {
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Failed to delete {} tag(s): {}", .failed.len(), .failed.join(", "))]
    PurgeFailure {
        /// Labels whose deletion failed, in the order they were attempted
        failed: Vec<String>,
        /// One reason per failed label
        reasons: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-semtag
pub type Result<T> = std::result::Result<T, SemtagError>;

impl From<git2::Error> for SemtagError {
    fn from(err: git2::Error) -> Self {
        SemtagError::Repository(err.message().to_string())
    }
}

impl SemtagError {
    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        SemtagError::Repository(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemtagError::Config(msg.into())
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        SemtagError::Prompt(msg.into())
    }

    /// Whether the error came from reading or mutating the tag repository
    pub fn is_repository_error(&self) -> bool {
        matches!(
            self,
            SemtagError::Repository(_) | SemtagError::PurgeFailure { .. }
        )
    }

    /// Labels that could not be deleted, if this is a purge failure
    pub fn failed_labels(&self) -> &[String] {
        match self {
            SemtagError::PurgeFailure { failed, .. } => failed,
            _ => &[],
        }
    }
}
