use std::sync::Mutex;

use crate::error::RepositoryError;
use crate::release::{CreatedRelease, LatestRelease, ReleaseRepository};

/// A `create` call observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCall {
    pub tag: String,
    pub is_draft: bool,
}

/// Mock release backend for testing without network access
pub struct MockReleaseRepository {
    latest: Result<Option<String>, RepositoryError>,
    create_result: Result<String, RepositoryError>,
    list_calls: Mutex<usize>,
    create_calls: Mutex<Vec<CreateCall>>,
}

impl MockReleaseRepository {
    /// Create a mock with no release history whose `create` succeeds
    pub fn new() -> Self {
        MockReleaseRepository {
            latest: Ok(None),
            create_result: Ok("https://example.invalid/releases/mock".to_string()),
            list_calls: Mutex::new(0),
            create_calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose latest release carries `tag`
    pub fn with_latest(tag: impl Into<String>) -> Self {
        let mut repo = Self::new();
        repo.set_latest(tag);
        repo
    }

    /// Set the latest release tag
    pub fn set_latest(&mut self, tag: impl Into<String>) {
        self.latest = Ok(Some(tag.into()));
    }

    /// Make `list_latest` fail with `message`
    pub fn fail_listing(&mut self, message: impl Into<String>) {
        self.latest = Err(RepositoryError::new(message));
    }

    /// URL returned by a successful `create`
    pub fn set_release_url(&mut self, url: impl Into<String>) {
        self.create_result = Ok(url.into());
    }

    /// Make `create` fail with `message`
    pub fn fail_creation(&mut self, message: impl Into<String>) {
        self.create_result = Err(RepositoryError::new(message));
    }

    /// Number of `list_latest` calls so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.lock().map(|n| *n).unwrap_or_default()
    }

    /// `create` calls so far, in order
    pub fn create_calls(&self) -> Vec<CreateCall> {
        self.create_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl Default for MockReleaseRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseRepository for MockReleaseRepository {
    fn list_latest(&self) -> Result<Option<LatestRelease>, RepositoryError> {
        if let Ok(mut n) = self.list_calls.lock() {
            *n += 1;
        }
        self.latest
            .clone()
            .map(|tag| tag.map(|tag| LatestRelease { tag }))
    }

    fn create(&self, tag: &str, is_draft: bool) -> Result<CreatedRelease, RepositoryError> {
        if let Ok(mut calls) = self.create_calls.lock() {
            calls.push(CreateCall {
                tag: tag.to_string(),
                is_draft,
            });
        }
        self.create_result.clone().map(|url| CreatedRelease { url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_default_has_no_history() {
        let repo = MockReleaseRepository::default();
        assert_eq!(repo.list_latest().unwrap(), None);
        assert_eq!(repo.list_calls(), 1);
    }

    #[test]
    fn test_mock_latest() {
        let repo = MockReleaseRepository::with_latest("2025.2.0");
        assert_eq!(
            repo.list_latest().unwrap(),
            Some(LatestRelease {
                tag: "2025.2.0".to_string()
            })
        );
    }

    #[test]
    fn test_mock_list_failure() {
        let mut repo = MockReleaseRepository::new();
        repo.fail_listing("Bad credentials");
        assert_eq!(
            repo.list_latest().unwrap_err(),
            RepositoryError::new("Bad credentials")
        );
    }

    #[test]
    fn test_mock_records_create_calls() {
        let mut repo = MockReleaseRepository::new();
        repo.set_release_url("https://example.invalid/r/1");

        let created = repo.create("2025.1.0", true).unwrap();
        assert_eq!(created.url, "https://example.invalid/r/1");
        assert_eq!(
            repo.create_calls(),
            vec![CreateCall {
                tag: "2025.1.0".to_string(),
                is_draft: true
            }]
        );
    }

    #[test]
    fn test_mock_create_failure_still_recorded() {
        let mut repo = MockReleaseRepository::new();
        repo.fail_creation("Validation Failed");

        assert!(repo.create("2025.1.0", false).is_err());
        assert_eq!(repo.create_calls().len(), 1);
    }
}
