use thiserror::Error;

/// Failure reported by a release backend while listing or creating releases.
///
/// Carries the backend's message verbatim so it can be surfaced unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RepositoryError {
    pub message: String,
}

impl RepositoryError {
    pub fn new(message: impl Into<String>) -> Self {
        RepositoryError {
            message: message.into(),
        }
    }
}

/// Step of the release workflow at which a run failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    ResolvePrevious,
    EmitOutputs,
    CreateRelease,
    CommitReport,
}

impl WorkflowStep {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowStep::ResolvePrevious => "resolve-previous",
            WorkflowStep::EmitOutputs => "emit-outputs",
            WorkflowStep::CreateRelease => "create-release",
            WorkflowStep::CommitReport => "commit-report",
        }
    }
}

/// Terminal failure of a release run
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Failed to get previous releases: {0}")]
    ListReleases(#[source] RepositoryError),

    #[error("Failed to create release: {0}")]
    CreateRelease(#[source] RepositoryError),

    #[error("Failed to set output '{key}': {source}")]
    Output {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report: {0}")]
    Report(#[source] std::io::Error),
}

impl ReleaseError {
    /// The workflow step the failure happened in
    pub fn step(&self) -> WorkflowStep {
        match self {
            ReleaseError::ListReleases(_) => WorkflowStep::ResolvePrevious,
            ReleaseError::CreateRelease(_) => WorkflowStep::CreateRelease,
            ReleaseError::Output { .. } => WorkflowStep::EmitOutputs,
            ReleaseError::Report(_) => WorkflowStep::CommitReport,
        }
    }

    /// The backend error behind the failure, if any
    pub fn repository_error(&self) -> Option<&RepositoryError> {
        match self {
            ReleaseError::ListReleases(e) | ReleaseError::CreateRelease(e) => Some(e),
            _ => None,
        }
    }
}

/// Unified error type for calver-release setup (configuration, inputs, clients)
#[derive(Error, Debug)]
pub enum CalverError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in calver-release
pub type Result<T> = std::result::Result<T, CalverError>;

impl CalverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        CalverError::Config(msg.into())
    }

    /// Create an input error with context
    pub fn input(msg: impl Into<String>) -> Self {
        CalverError::Input(msg.into())
    }

    /// Create an HTTP client error with context
    pub fn http(msg: impl Into<String>) -> Self {
        CalverError::Http(msg.into())
    }
}

impl From<reqwest::Error> for CalverError {
    fn from(err: reqwest::Error) -> Self {
        CalverError::http(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CalverError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CalverError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_repository_error_is_verbatim() {
        let err = RepositoryError::new("Bad credentials");
        assert_eq!(err.to_string(), "Bad credentials");
    }

    #[test]
    fn test_release_error_messages_keep_cause() {
        let list = ReleaseError::ListReleases(RepositoryError::new("Not Found"));
        assert_eq!(list.to_string(), "Failed to get previous releases: Not Found");

        let create = ReleaseError::CreateRelease(RepositoryError::new("already_exists"));
        assert_eq!(create.to_string(), "Failed to create release: already_exists");
    }

    #[test]
    fn test_release_error_steps() {
        let pairs = vec![
            (
                ReleaseError::ListReleases(RepositoryError::new("x")),
                WorkflowStep::ResolvePrevious,
            ),
            (
                ReleaseError::CreateRelease(RepositoryError::new("x")),
                WorkflowStep::CreateRelease,
            ),
            (
                ReleaseError::Output {
                    key: "release-tag".to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                },
                WorkflowStep::EmitOutputs,
            ),
            (
                ReleaseError::Report(std::io::Error::new(std::io::ErrorKind::Other, "x")),
                WorkflowStep::CommitReport,
            ),
        ];

        for (err, step) in pairs {
            assert_eq!(err.step(), step, "unexpected step for '{}'", err);
        }
    }

    #[test]
    fn test_repository_error_accessor() {
        let err = ReleaseError::CreateRelease(RepositoryError::new("conflict"));
        assert_eq!(err.repository_error().map(|e| e.message.as_str()), Some("conflict"));

        let err = ReleaseError::Report(std::io::Error::new(std::io::ErrorKind::Other, "x"));
        assert!(err.repository_error().is_none());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (CalverError::config("x"), "Configuration error"),
            (CalverError::input("x"), "Input error"),
            (CalverError::http("x"), "HTTP client error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
