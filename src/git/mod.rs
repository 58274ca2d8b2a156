//! Git tag operations abstraction layer
//!
//! The workflow only ever needs three things from version control: list the
//! tags, create one at the current HEAD, and delete some. The [TagRepository]
//! trait captures exactly that, so the decision logic can be exercised
//! against [mock::MockTagRepository] without touching a real repository.
//!
//! - [repository::Git2TagRepository]: real implementation using the `git2` crate
//! - [mock::MockTagRepository]: in-memory implementation with failure injection
//!
//! ```rust
//! # use git_semtag::git::{MockTagRepository, TagRepository};
//! let repo = MockTagRepository::with_tags(["1.0.0"]);
//! repo.create_tag("1.0.1")?;
//! assert_eq!(repo.list_tags()?, vec!["1.0.0", "1.0.1"]);
//! # Ok::<(), git_semtag::SemtagError>(())
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockTagRepository;
pub use repository::Git2TagRepository;

use crate::error::{Result, SemtagError};

/// Tag operations the reconciliation workflow depends on
///
/// ## Error Handling
///
/// Every failure is reported as a repository error
/// ([SemtagError::Repository], or [SemtagError::PurgeFailure] for
/// [delete_tags](TagRepository::delete_tags)). Nothing is retried.
pub trait TagRepository {
    /// List every tag in repository-native order.
    ///
    /// No ordering is promised; callers that care must sort.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Create a lightweight tag named `label` at the current HEAD.
    ///
    /// Fails if a tag with that name already exists.
    fn create_tag(&self, label: &str) -> Result<()>;

    /// Delete a single tag.
    fn delete_tag(&self, label: &str) -> Result<()>;

    /// Delete every tag in `labels`, best-effort.
    ///
    /// Each deletion is attempted even if an earlier one fails. Failures are
    /// collected into one [SemtagError::PurgeFailure] naming only the labels
    /// that could not be deleted; successful deletions are not rolled back.
    fn delete_tags(&self, labels: &[String]) -> Result<()> {
        let mut failed = Vec::new();
        let mut reasons = Vec::new();

        for label in labels {
            if let Err(e) = self.delete_tag(label) {
                tracing::debug!(tag = %label, error = %e, "tag deletion failed");
                failed.push(label.clone());
                reasons.push(e.to_string());
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(SemtagError::PurgeFailure { failed, reasons })
        }
    }
}
