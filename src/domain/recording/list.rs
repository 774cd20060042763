//! Ordered recordings list with a single rename slot

use thiserror::Error;

use super::{RecordingEntry, RecordingId};

/// Errors from list operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("No recording at position {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No recording with id {0}")]
    NotFound(RecordingId),
}

/// An open rename: which entry, and the text typed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RenameEdit {
    id: RecordingId,
    buffer: String,
}

/// Recordings in capture order.
///
/// Invariant: ids are unique. `append` does not check this; ids are
/// allocated by the recorder and are strictly increasing.
#[derive(Debug, Clone, Default)]
pub struct RecordingsList {
    entries: Vec<RecordingEntry>,
    edit: Option<RenameEdit>,
}

impl RecordingsList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[RecordingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: RecordingId) -> Option<&RecordingEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn position(&self, id: RecordingId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Name the next appended entry gets
    pub fn next_default_name(&self) -> String {
        RecordingEntry::default_name(self.entries.len() + 1)
    }

    /// Add to the end
    pub fn append(&mut self, entry: RecordingEntry) {
        self.entries.push(entry);
    }

    /// Remove the entry with `id`. Returns it, or `None` if absent.
    pub fn delete_by_id(&mut self, id: RecordingId) -> Option<RecordingEntry> {
        let index = self.position(id)?;
        let removed = self.entries.remove(index);
        if self.edit.as_ref().is_some_and(|edit| edit.id == id) {
            self.edit = None;
        }
        Some(removed)
    }

    /// Open a rename on the entry at `index`, seeding the buffer with its name.
    /// Any previously open rename is dropped.
    pub fn begin_rename(&mut self, index: usize) -> Result<(), ListError> {
        let entry = self.entries.get(index).ok_or(ListError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })?;
        self.edit = Some(RenameEdit {
            id: entry.id,
            buffer: entry.name.clone(),
        });
        Ok(())
    }

    /// Replace the rename buffer. Returns `false` if no rename is open.
    pub fn set_edit_buffer(&mut self, text: impl Into<String>) -> bool {
        match self.edit.as_mut() {
            Some(edit) => {
                edit.buffer = text.into();
                true
            }
            None => false,
        }
    }

    /// Open rename as `(index, buffer)`
    pub fn edit_state(&self) -> Option<(usize, &str)> {
        let edit = self.edit.as_ref()?;
        let index = self.position(edit.id)?;
        Some((index, edit.buffer.as_str()))
    }

    /// Write the buffer into the edited entry's name and close the rename.
    /// Empty names are accepted. Returns `false` if no rename was open.
    pub fn commit_rename(&mut self) -> bool {
        let Some(edit) = self.edit.take() else {
            return false;
        };
        match self.entries.iter_mut().find(|e| e.id == edit.id) {
            Some(entry) => {
                entry.name = edit.buffer;
                true
            }
            None => false,
        }
    }

    /// Close the rename without touching any entry
    pub fn cancel_rename(&mut self) {
        self.edit = None;
    }

    /// Remove everything. Returns how many entries were dropped.
    pub fn clear_all(&mut self) -> usize {
        self.edit = None;
        let count = self.entries.len();
        self.entries.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recording::{Duration, FileReference};
    use chrono::Local;

    fn entry(id: u64, name: &str) -> RecordingEntry {
        RecordingEntry {
            id: RecordingId::new(id),
            name: name.to_string(),
            duration: Duration::from_millis(id * 1000),
            file: FileReference::new(format!("/tmp/{}.flac", id)),
            created_at: Local::now(),
        }
    }

    fn list_of(n: u64) -> RecordingsList {
        let mut list = RecordingsList::new();
        for id in 1..=n {
            list.append(entry(id, &RecordingEntry::default_name(id as usize)));
        }
        list
    }

    fn ids(list: &RecordingsList) -> Vec<u64> {
        list.entries().iter().map(|e| e.id.as_u64()).collect()
    }

    #[test]
    fn append_keeps_insertion_order() {
        let list = list_of(3);
        assert_eq!(ids(&list), vec![1, 2, 3]);
        assert_eq!(list.next_default_name(), "Recording #4");
    }

    #[test]
    fn delete_removes_only_target() {
        let mut list = list_of(3);
        let before: Vec<_> = list.entries().to_vec();

        let removed = list.delete_by_id(RecordingId::new(2)).unwrap();
        assert_eq!(removed.id.as_u64(), 2);
        assert_eq!(ids(&list), vec![1, 3]);
        assert_eq!(list.entries()[0], before[0]);
        assert_eq!(list.entries()[1], before[2]);
    }

    #[test]
    fn append_then_delete_leaves_no_trace() {
        let mut list = list_of(2);
        list.append(entry(9, "new"));
        list.delete_by_id(RecordingId::new(9));
        assert!(list.get(RecordingId::new(9)).is_none());
        assert_eq!(ids(&list), vec![1, 2]);
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut list = list_of(2);
        assert!(list.delete_by_id(RecordingId::new(42)).is_none());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn clear_all_empties_any_list() {
        for n in [0, 1, 5] {
            let mut list = list_of(n);
            assert_eq!(list.clear_all(), n as usize);
            assert_eq!(list.len(), 0);
            assert!(list.is_empty());
        }
    }

    #[test]
    fn rename_changes_only_target_name() {
        let mut list = list_of(3);
        let before: Vec<_> = list.entries().to_vec();

        list.begin_rename(1).unwrap();
        assert_eq!(list.edit_state(), Some((1, "Recording #2")));
        assert!(list.set_edit_buffer("Groceries"));
        assert!(list.commit_rename());

        let after = list.entries();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].name, "Groceries");
        assert_eq!(after[1].id, before[1].id);
        assert_eq!(after[1].duration, before[1].duration);
        assert_eq!(after[1].file, before[1].file);
        assert_eq!(after[1].created_at, before[1].created_at);
        assert!(list.edit_state().is_none());
    }

    #[test]
    fn rename_accepts_empty_name() {
        let mut list = list_of(1);
        list.begin_rename(0).unwrap();
        list.set_edit_buffer("");
        assert!(list.commit_rename());
        assert_eq!(list.entries()[0].name, "");
    }

    #[test]
    fn begin_rename_abandons_previous_edit() {
        let mut list = list_of(2);
        list.begin_rename(0).unwrap();
        list.set_edit_buffer("unsaved");
        list.begin_rename(1).unwrap();
        assert_eq!(list.edit_state(), Some((1, "Recording #2")));
        list.commit_rename();
        assert_eq!(list.entries()[0].name, "Recording #1");
    }

    #[test]
    fn begin_rename_out_of_range() {
        let mut list = list_of(1);
        list.begin_rename(0).unwrap();
        let err = list.begin_rename(3).unwrap_err();
        assert_eq!(err, ListError::IndexOutOfRange { index: 3, len: 1 });
        assert_eq!(list.edit_state(), Some((0, "Recording #1")));
    }

    #[test]
    fn cancel_rename_keeps_names() {
        let mut list = list_of(2);
        list.begin_rename(0).unwrap();
        list.set_edit_buffer("changed");
        list.cancel_rename();
        assert!(list.edit_state().is_none());
        assert_eq!(list.entries()[0].name, "Recording #1");
        assert!(!list.commit_rename());
    }

    #[test]
    fn edit_buffer_requires_open_edit() {
        let mut list = list_of(1);
        assert!(!list.set_edit_buffer("x"));
    }

    #[test]
    fn edit_follows_entry_when_earlier_entry_deleted() {
        let mut list = list_of(3);
        list.begin_rename(2).unwrap();
        list.delete_by_id(RecordingId::new(1));
        assert_eq!(list.edit_state(), Some((1, "Recording #3")));
        list.set_edit_buffer("Last");
        list.commit_rename();
        assert_eq!(list.entries()[1].name, "Last");
    }

    #[test]
    fn deleting_edited_entry_closes_edit() {
        let mut list = list_of(2);
        list.begin_rename(0).unwrap();
        list.delete_by_id(RecordingId::new(1));
        assert!(list.edit_state().is_none());
    }

    #[test]
    fn clear_all_closes_edit() {
        let mut list = list_of(2);
        list.begin_rename(0).unwrap();
        list.clear_all();
        assert!(list.edit_state().is_none());
    }
}
