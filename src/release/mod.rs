//! Release backend abstraction layer
//!
//! The release workflow only needs two operations from wherever releases are
//! hosted: look up the most recent release and create a new one. The
//! [`ReleaseRepository`] trait captures exactly those, with two
//! implementations:
//!
//! - [`github::GitHubReleases`]: the GitHub REST API
//! - [`mock::MockReleaseRepository`]: in-memory, records calls for tests
//!
//! ```rust
//! # use calver_release::release::{MockReleaseRepository, ReleaseRepository};
//! let repo = MockReleaseRepository::with_latest("2025.1.5");
//! let latest = repo.list_latest().unwrap();
//! assert_eq!(latest.map(|r| r.tag), Some("2025.1.5".to_string()));
//! ```

pub mod github;
pub mod mock;

pub use github::{GitHubReleases, RepoSlug};
pub use mock::MockReleaseRepository;

use crate::error::RepositoryError;

/// The most recent release known to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRelease {
    pub tag: String,
}

/// A release the backend has just created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRelease {
    pub url: String,
}

/// Where releases live
///
/// Implementations own their transport policy (timeouts, auth). Callers
/// invoke each method once and never retry.
pub trait ReleaseRepository {
    /// Most recent release, or `None` when the repository has none
    fn list_latest(&self) -> Result<Option<LatestRelease>, RepositoryError>;

    /// Create a release named and tagged `tag`, requesting generated notes
    fn create(&self, tag: &str, is_draft: bool) -> Result<CreatedRelease, RepositoryError>;
}

impl<R: ReleaseRepository + ?Sized> ReleaseRepository for &R {
    fn list_latest(&self) -> Result<Option<LatestRelease>, RepositoryError> {
        (**self).list_latest()
    }

    fn create(&self, tag: &str, is_draft: bool) -> Result<CreatedRelease, RepositoryError> {
        (**self).create(tag, is_draft)
    }
}

impl<R: ReleaseRepository + ?Sized> ReleaseRepository for Box<R> {
    fn list_latest(&self) -> Result<Option<LatestRelease>, RepositoryError> {
        (**self).list_latest()
    }

    fn create(&self, tag: &str, is_draft: bool) -> Result<CreatedRelease, RepositoryError> {
        (**self).create(tag, is_draft)
    }
}
