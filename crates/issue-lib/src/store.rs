//! In-memory issue store backed by `BTreeMap`.
//!
//! Owns the issue list, allocates ids, and routes commands to issues.
//! Persistence goes through the record format in [`crate::record`].

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::command::Command;
use crate::error::{IssueError, Result};
use crate::issue::Issue;
use crate::model::{IssueId, IssueKind};
use crate::query::{IssueRow, ListFilters};
use crate::record;

/// In-memory issue store.
///
/// Use `open()` to load from an issue file and `save()` to persist back.
/// Issues are kept ordered by id. Ids are never reused within a store.
pub struct IssueStore {
    issues: BTreeMap<IssueId, Issue>,
    dirty_ids: HashSet<IssueId>,
    path: Option<PathBuf>,
    next_id: IssueId,
}

impl IssueStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            issues: BTreeMap::new(),
            dirty_ids: HashSet::new(),
            path: None,
            next_id: 1,
        }
    }

    /// Open and load from an issue file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut store = Self::new();
        store.load(path)?;
        Ok(store)
    }

    /// Replace the whole store with the contents of an issue file.
    ///
    /// Later records with an already-seen id are dropped. The next id
    /// becomes one past the largest loaded id. On error the store is left
    /// as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let loaded = record::load(path)?;
        let total = loaded.len();

        let mut issues = BTreeMap::new();
        for issue in loaded {
            let id = issue.id();
            if issues.contains_key(&id) {
                debug!(id, "Dropping duplicate record");
                continue;
            }
            issues.insert(id, issue);
        }

        self.next_id = issues
            .last_key_value()
            .map_or(1, |(id, _)| id.saturating_add(1));
        self.issues = issues;
        self.dirty_ids.clear();
        self.path = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            issues = self.issues.len(),
            duplicates = total - self.issues.len(),
            "Loaded issue file"
        );
        Ok(())
    }

    /// Save to the file that was opened.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if no file path is set, or `Io` on write failure.
    pub fn save(&self) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| IssueError::Storage("No file path set; use save_to()".to_string()))?;
        self.save_to(path)
    }

    /// Save to a specific file path.
    ///
    /// # Errors
    ///
    /// Returns `Io` on write failure.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let issues: Vec<Issue> = self.issues.values().cloned().collect();
        record::save(path, &issues)?;

        info!(path = %path.display(), issues = issues.len(), "Saved issue file");
        Ok(())
    }

    /// Drop every issue and start numbering from 1 again.
    pub fn clear(&mut self) {
        self.dirty_ids.extend(self.issues.keys().copied());
        self.issues.clear();
        self.next_id = 1;
        debug!("Cleared issue store");
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Create a new issue with the next free id.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the summary or note is invalid (no id is
    /// consumed), or `Storage` if the id space is exhausted.
    pub fn add_issue(&mut self, kind: IssueKind, summary: &str, note: &str) -> Result<IssueId> {
        let id = self.next_id;
        if self.issues.contains_key(&id) {
            return Err(IssueError::Storage("issue id space exhausted".to_string()));
        }

        let issue = Issue::new(id, kind, summary, note)?;
        self.issues.insert(id, issue);
        self.next_id = id.saturating_add(1);
        self.dirty_ids.insert(id);

        debug!(id, %kind, "Created issue");
        Ok(id)
    }

    /// Get a single issue by id.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the issue doesn't exist.
    pub fn get_issue(&self, id: IssueId) -> Result<&Issue> {
        self.issues
            .get(&id)
            .ok_or(IssueError::IssueNotFound { id })
    }

    /// Apply a command to the issue with the given id.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the issue doesn't exist, or whatever
    /// [`Issue::apply`] returns. A failed command changes nothing.
    pub fn execute_command(&mut self, id: IssueId, command: Command) -> Result<&Issue> {
        let issue = self
            .issues
            .get_mut(&id)
            .ok_or(IssueError::IssueNotFound { id })?;
        issue.apply(command)?;
        self.dirty_ids.insert(id);
        Ok(&*issue)
    }

    /// Delete an issue from the store. Its id is not handed out again.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the issue doesn't exist.
    pub fn delete_issue(&mut self, id: IssueId) -> Result<Issue> {
        let issue = self
            .issues
            .remove(&id)
            .ok_or(IssueError::IssueNotFound { id })?;
        self.dirty_ids.insert(id);

        debug!(id, "Deleted issue");
        Ok(issue)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All issues in ascending id order.
    #[must_use]
    pub fn issues(&self) -> Vec<&Issue> {
        self.issues.values().collect()
    }

    /// List issues with filters, in ascending id order.
    #[must_use]
    pub fn list_issues(&self, filters: &ListFilters) -> Vec<&Issue> {
        let matching = self.issues.values().filter(|issue| filters.matches(issue));
        match filters.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }

    /// Tabular (id, state, kind, summary) view of the matching issues.
    #[must_use]
    pub fn issue_rows(&self, filters: &ListFilters) -> Vec<IssueRow> {
        self.list_issues(filters)
            .into_iter()
            .map(IssueRow::from)
            .collect()
    }

    /// The id the next created issue will get.
    #[must_use]
    pub const fn next_id(&self) -> IssueId {
        self.next_id
    }

    /// The file this store was loaded from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // ========================================================================
    // Dirty Tracking
    // ========================================================================

    /// Check if any issues have been added, changed, or removed.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty_ids.is_empty()
    }

    /// Clear dirty tracking flags.
    pub fn clear_dirty(&mut self) {
        self.dirty_ids.clear();
    }

    /// Get the total number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl Default for IssueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Resolution, State};
    use std::fs;

    const FILE: &str = "\
*3,New,Bug,Third,null,false,
-[New] three
*1,Working,Enhancement,First,alex,false,
-[New] one
-[New] taking it
*3,Closed,Bug,Duplicate three,null,false,Duplicate
-[New] dup
";

    fn store_with(issues: &[(IssueKind, &str)]) -> IssueStore {
        let mut store = IssueStore::new();
        for (kind, summary) in issues {
            store.add_issue(*kind, summary, "created").unwrap();
        }
        store
    }

    #[test]
    fn test_add_and_get() {
        let mut store = IssueStore::new();
        let id = store.add_issue(IssueKind::Bug, "Crash", "Boom").unwrap();
        assert_eq!(id, 1);
        assert_eq!(store.next_id(), 2);

        let issue = store.get_issue(id).unwrap();
        assert_eq!(issue.summary(), "Crash");
        assert_eq!(issue.state(), State::New);
    }

    #[test]
    fn test_add_invalid_consumes_no_id() {
        let mut store = IssueStore::new();
        assert!(store.add_issue(IssueKind::Bug, "", "Boom").is_err());
        assert!(store.add_issue(IssueKind::Bug, "Crash", " ").is_err());
        assert_eq!(store.next_id(), 1);
        assert!(store.is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_get_missing_issue() {
        let store = IssueStore::new();
        assert!(matches!(
            store.get_issue(9),
            Err(IssueError::IssueNotFound { id: 9 })
        ));
    }

    #[test]
    fn test_execute_command() {
        let mut store = store_with(&[(IssueKind::Bug, "Crash")]);
        store.clear_dirty();

        let issue = store
            .execute_command(1, Command::confirm("Reproduced").unwrap())
            .unwrap();
        assert_eq!(issue.state(), State::Confirmed);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_execute_command_failure_changes_nothing() {
        let mut store = store_with(&[(IssueKind::Bug, "Crash")]);
        store.clear_dirty();
        let before = store.get_issue(1).unwrap().clone();

        let err = store
            .execute_command(1, Command::verify("Done").unwrap())
            .unwrap_err();
        assert!(matches!(err, IssueError::UnsupportedTransition { .. }));
        assert_eq!(store.get_issue(1).unwrap(), &before);
        assert!(!store.is_dirty());

        assert!(matches!(
            store.execute_command(42, Command::verify("Done").unwrap()),
            Err(IssueError::IssueNotFound { id: 42 })
        ));
    }

    #[test]
    fn test_delete_does_not_reuse_ids() {
        let mut store = store_with(&[(IssueKind::Bug, "One"), (IssueKind::Bug, "Two")]);
        store.delete_issue(2).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.next_id(), 3);

        let id = store.add_issue(IssueKind::Bug, "Three", "new").unwrap();
        assert_eq!(id, 3);

        assert!(matches!(
            store.delete_issue(2),
            Err(IssueError::IssueNotFound { id: 2 })
        ));
    }

    #[test]
    fn test_clear_resets_numbering() {
        let mut store = store_with(&[(IssueKind::Bug, "One"), (IssueKind::Bug, "Two")]);
        store.clear_dirty();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_list_and_rows() {
        let mut store = store_with(&[
            (IssueKind::Bug, "Crash"),
            (IssueKind::Enhancement, "Dark mode"),
            (IssueKind::Bug, "Hang"),
        ]);
        store
            .execute_command(2, Command::assign("alex", "Mine").unwrap())
            .unwrap();

        let bugs = ListFilters {
            kinds: Some(vec![IssueKind::Bug]),
            ..Default::default()
        };
        let ids: Vec<IssueId> = store.list_issues(&bugs).iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec![1, 3]);

        let limited = ListFilters {
            limit: Some(2),
            ..Default::default()
        };
        assert_eq!(store.list_issues(&limited).len(), 2);

        let rows = store.issue_rows(&ListFilters {
            owner: Some("alex".to_string()),
            ..Default::default()
        });
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 2);
        assert_eq!(rows[0].state, State::Working);
        assert_eq!(rows[0].kind, IssueKind::Enhancement);
        assert_eq!(rows[0].summary, "Dark mode");
    }

    #[test]
    fn test_load_dedupes_sorts_and_sets_next_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues.txt");
        fs::write(&path, FILE).unwrap();

        let store = IssueStore::open(&path).unwrap();
        let ids: Vec<IssueId> = store.issues().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(store.get_issue(3).unwrap().summary(), "Third");
        assert_eq!(store.next_id(), 4);
        assert_eq!(store.path(), Some(path.as_path()));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_load_empty_file_resets_next_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues.txt");
        fs::write(&path, "").unwrap();

        let mut store = store_with(&[(IssueKind::Bug, "One")]);
        store.load(&path).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn test_failed_load_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.txt");
        fs::write(&path, "*1,New,Bug,Crash,null,false,\n").unwrap();

        let mut store = store_with(&[(IssueKind::Bug, "One")]);
        assert!(store.load(&path).is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.next_id(), 2);
        assert!(store.path().is_none());
    }

    #[test]
    fn test_roundtrip_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues.txt");

        let mut store = store_with(&[(IssueKind::Bug, "Crash"), (IssueKind::Enhancement, "Export")]);
        store
            .execute_command(2, Command::resolve(Resolution::WontFix, "No").unwrap())
            .unwrap();
        store.save_to(&path).unwrap();

        let loaded = IssueStore::open(&path).unwrap();
        assert_eq!(loaded.issues(), store.issues());
        assert_eq!(loaded.next_id(), 3);
    }

    #[test]
    fn test_save_without_path() {
        let store = IssueStore::new();
        assert!(matches!(store.save(), Err(IssueError::Storage(_))));
    }
}
