use std::ffi::OsStr;
use std::path::Path;

use git2::{Repository as Git2Repo, RepositoryOpenFlags};

use crate::error::{Result, SemtagError};
use crate::git::TagRepository;

/// Wrapper around git2::Repository with our tag interface
pub struct Git2TagRepository {
    repo: Git2Repo,
}

impl Git2TagRepository {
    /// Open or discover a git repository at or above `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_ceilings(path, std::iter::empty::<&OsStr>())
    }

    /// Like [Git2TagRepository::open], but never searches into any of the
    /// `ceilings` directories
    pub fn open_with_ceilings<P, I, C>(path: P, ceilings: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = C>,
        C: AsRef<OsStr>,
    {
        let path = path.as_ref();
        let repo = Git2Repo::open_ext(path, RepositoryOpenFlags::empty(), ceilings).map_err(|e| {
            SemtagError::repository(format!(
                "Not in a git repository ({}): {}",
                path.display(),
                e.message()
            ))
        })?;
        tracing::debug!(workdir = ?repo.workdir(), "opened git repository");

        Ok(Git2TagRepository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2TagRepository { repo }
    }
}

impl TagRepository for Git2TagRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self
            .repo
            .tag_names(None)
            .map_err(|e| SemtagError::repository(format!("Cannot list tags: {}", e.message())))?;

        let mut names = Vec::with_capacity(tags.len());
        for bytes in tags.iter_bytes() {
            match std::str::from_utf8(bytes) {
                Ok(name) => names.push(name.to_string()),
                Err(_) => tracing::warn!(
                    tag = %String::from_utf8_lossy(bytes),
                    "skipping tag whose name is not valid UTF-8"
                ),
            }
        }
        tracing::debug!(count = names.len(), "listed tags");
        Ok(names)
    }

    fn create_tag(&self, label: &str) -> Result<()> {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| SemtagError::repository(format!("Cannot resolve HEAD: {}", e.message())))?;

        self.repo
            .tag_lightweight(label, head.as_object(), false)
            .map_err(|e| {
                SemtagError::repository(format!("Cannot create tag '{}': {}", label, e.message()))
            })?;

        tracing::debug!(tag = %label, commit = %head.id(), "created tag");
        Ok(())
    }

    fn delete_tag(&self, label: &str) -> Result<()> {
        self.repo.tag_delete(label).map_err(|e| {
            SemtagError::repository(format!("Cannot delete tag '{}': {}", label, e.message()))
        })?;

        tracing::debug!(tag = %label, "deleted tag");
        Ok(())
    }
}
