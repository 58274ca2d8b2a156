use std::collections::HashSet;
use std::sync::Mutex;

use crate::error::{Result, SemtagError};
use crate::git::TagRepository;

#[derive(Debug, Default)]
struct MockState {
    tags: Vec<String>,
    fail_list: bool,
    fail_create: bool,
    fail_delete: HashSet<String>,
    create_calls: usize,
    delete_calls: usize,
}

/// In-memory tag repository for testing without a real git repository
///
/// Tags keep their insertion order. Failures can be injected per operation
/// to exercise error paths.
#[derive(Debug, Default)]
pub struct MockTagRepository {
    state: Mutex<MockState>,
}

impl MockTagRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock repository holding `tags`
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let repo = Self::new();
        repo.lock().tags = tags.into_iter().map(Into::into).collect();
        repo
    }

    /// Make every `list_tags` call fail
    pub fn fail_listing(&self) {
        self.lock().fail_list = true;
    }

    /// Make every `create_tag` call fail
    pub fn fail_creating(&self) {
        self.lock().fail_create = true;
    }

    /// Make deleting `label` fail
    pub fn fail_deleting(&self, label: impl Into<String>) {
        self.lock().fail_delete.insert(label.into());
    }

    /// Current tags, without going through the (possibly failing) trait
    pub fn tags(&self) -> Vec<String> {
        self.lock().tags.clone()
    }

    /// Number of `create_tag` attempts so far
    pub fn create_calls(&self) -> usize {
        self.lock().create_calls
    }

    /// Number of single-tag deletion attempts so far
    pub fn delete_calls(&self) -> usize {
        self.lock().delete_calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // a panicking test must not poison the others' view of the state
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TagRepository for MockTagRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let state = self.lock();
        if state.fail_list {
            return Err(SemtagError::repository("Cannot list tags: mock failure"));
        }
        Ok(state.tags.clone())
    }

    fn create_tag(&self, label: &str) -> Result<()> {
        let mut state = self.lock();
        state.create_calls += 1;

        if state.fail_create {
            return Err(SemtagError::repository(format!(
                "Cannot create tag '{}': mock failure",
                label
            )));
        }
        if state.tags.iter().any(|t| t == label) {
            return Err(SemtagError::repository(format!(
                "Cannot create tag '{}': tag already exists",
                label
            )));
        }

        state.tags.push(label.to_string());
        Ok(())
    }

    fn delete_tag(&self, label: &str) -> Result<()> {
        let mut state = self.lock();
        state.delete_calls += 1;

        if state.fail_delete.contains(label) {
            return Err(SemtagError::repository(format!(
                "Cannot delete tag '{}': mock failure",
                label
            )));
        }

        let before = state.tags.len();
        state.tags.retain(|t| t != label);
        if state.tags.len() == before {
            return Err(SemtagError::repository(format!(
                "Cannot delete tag '{}': tag not found",
                label
            )));
        }
        Ok(())
    }
}
