// src/store/notes.rs
//! The note store: sole gateway to the persisted note collection.
//!
//! The collection is one JSON array read and written wholesale on every
//! operation. Every operation, reads included, holds a single mutex for its
//! full read-modify-write, so back-to-back unawaited calls cannot overwrite
//! each other's effect (last-writer-wins on the whole blob was the failure
//! mode this replaces).

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::Result;
use crate::note::{Note, NoteDraft};

use super::kv::FileKv;

pub const NOTES_KEY: &str = "notes.json";

pub struct NoteStore {
    kv: FileKv,
    lock: Mutex<()>,
}

impl NoteStore {
    pub fn new(kv: FileKv) -> Self {
        Self {
            kv,
            lock: Mutex::new(()),
        }
    }

    pub fn open_default() -> Self {
        Self::new(FileKv::open_default())
    }

    /// Return the whole collection, newest first.
    ///
    /// A collection that was never written is an empty list, not an error.
    /// An unreadable or unparseable collection is an error; callers decide
    /// whether to surface it or degrade (the list projection degrades, the
    /// CLI surfaces it).
    pub async fn list_all(&self) -> Result<Vec<Note>> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Persist a new note built from `draft` and return it.
    ///
    /// The store assigns identity and creation time; the draft's fields are
    /// otherwise stored unmutated. Write failures propagate, and the caller
    /// must assume the note was not saved.
    pub async fn create(&self, draft: NoteDraft) -> Result<Note> {
        let _guard = self.lock.lock().await;

        let mut notes = self.load().await?;
        let note = Note::new(draft);
        notes.insert(0, note.clone());
        self.persist(&notes).await?;

        tracing::debug!(id = %note.id, "created note");
        Ok(note)
    }

    /// Fetch one note by id. An unknown id is `Ok(None)`, never an error.
    pub async fn get(&self, id: &Uuid) -> Result<Option<Note>> {
        let _guard = self.lock.lock().await;
        let notes = self.load().await?;
        Ok(notes.into_iter().find(|n| n.id == *id))
    }

    /// Remove the note with `id`, if present. Deleting an id that does not
    /// exist is a no-op success.
    pub async fn delete(&self, id: &Uuid) -> Result<()> {
        let _guard = self.lock.lock().await;

        let notes = self.load().await?;
        let filtered: Vec<Note> = notes.into_iter().filter(|n| n.id != *id).collect();
        self.persist(&filtered).await?;

        tracing::debug!(id = %id, "deleted note");
        Ok(())
    }

    async fn load(&self) -> Result<Vec<Note>> {
        match self.kv.get(NOTES_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn persist(&self, notes: &[Note]) -> Result<()> {
        let raw = serde_json::to_string(notes)?;
        self.kv.set(NOTES_KEY, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::SourceType;
    use tempfile::TempDir;

    fn store_in(tmp: &TempDir) -> NoteStore {
        NoteStore::new(FileKv::new(tmp.path()))
    }

    fn draft(title: &str, content: &str, source_type: SourceType) -> NoteDraft {
        NoteDraft {
            title: Some(title.to_string()),
            content: content.to_string(),
            source_type,
        }
    }

    #[tokio::test]
    async fn test_list_all_empty_store() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_all_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store.create(draft("A", "a", SourceType::Text)).await.unwrap();
        store.create(draft("B", "b", SourceType::Ocr)).await.unwrap();

        let first: Vec<Uuid> = store.list_all().await.unwrap().iter().map(|n| n.id).collect();
        let second: Vec<Uuid> = store.list_all().await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_create_prepends_newest_first() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let a = store.create(draft("A", "a", SourceType::Text)).await.unwrap();
        let b = store.create(draft("B", "b", SourceType::Text)).await.unwrap();

        let notes = store.list_all().await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, b.id);
        assert_eq!(notes[1].id, a.id);
    }

    #[tokio::test]
    async fn test_create_ids_are_unique_across_1000_notes() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let mut ids = std::collections::HashSet::new();
        for i in 0..1000 {
            let note = store
                .create(draft(&format!("Note {}", i), "x", SourceType::Text))
                .await
                .unwrap();
            assert!(ids.insert(note.id), "duplicate id at iteration {}", i);
        }
        assert_eq!(store.list_all().await.unwrap().len(), 1000);
    }

    #[tokio::test]
    async fn test_round_trip_fidelity() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let created = store.create(draft("T", "C", SourceType::Text)).await.unwrap();
        let fetched = store.get(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched.title, "T");
        assert_eq!(fetched.content, "C");
        assert_eq!(fetched.source_type, SourceType::Text);
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store.create(draft("A", "a", SourceType::Text)).await.unwrap();
        assert!(store.get(&Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let a = store.create(draft("A", "a", SourceType::Text)).await.unwrap();
        let b = store.create(draft("B", "b", SourceType::Ocr)).await.unwrap();
        let c = store.create(draft("C", "c", SourceType::Text)).await.unwrap();

        store.delete(&b.id).await.unwrap();

        let notes = store.list_all().await.unwrap();
        assert_eq!(notes.len(), 2);
        // Remaining entries keep their relative order
        assert_eq!(notes[0].id, c.id);
        assert_eq!(notes[1].id, a.id);
        assert!(notes.iter().all(|n| n.id != b.id));
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_noop() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let a = store.create(draft("A", "a", SourceType::Text)).await.unwrap();
        store.delete(&Uuid::new_v4()).await.unwrap();

        let notes = store.list_all().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, a.id);
    }

    #[tokio::test]
    async fn test_delete_on_empty_store_is_noop() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store.delete(&Uuid::new_v4()).await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_an_error_not_empty() {
        let tmp = TempDir::new().unwrap();
        let kv = FileKv::new(tmp.path());
        kv.set(NOTES_KEY, "{ not json").await.unwrap();

        let store = NoteStore::new(kv);
        assert!(store.list_all().await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_creates_both_survive() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        // Issued without awaiting one before the other, the way a rapid
        // double-tap would. The store's mutex must keep both writes.
        let (a, b) = tokio::join!(
            store.create(draft("A", "a", SourceType::Text)),
            store.create(draft("B", "b", SourceType::Text)),
        );
        a.unwrap();
        b.unwrap();

        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_racing_delete_keeps_the_create() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let existing = store.create(draft("Old", "o", SourceType::Text)).await.unwrap();

        let (created, deleted) = tokio::join!(
            store.create(draft("New", "n", SourceType::Text)),
            store.delete(&existing.id),
        );
        let created = created.unwrap();
        deleted.unwrap();

        let notes = store.list_all().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, created.id);
    }

    #[tokio::test]
    async fn test_photosynthesis_scenario() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let note = store
            .create(draft(
                "Photosynthesis",
                "## Definition\n- Converts light to energy",
                SourceType::Ocr,
            ))
            .await
            .unwrap();

        let fetched = store.get(&note.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Photosynthesis");
        assert_eq!(fetched.content, "## Definition\n- Converts light to energy");
        assert_eq!(fetched.source_type, SourceType::Ocr);

        store.delete(&note.id).await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(store.get(&note.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_collection_survives_reopen() {
        let tmp = TempDir::new().unwrap();

        let created = {
            let store = store_in(&tmp);
            store.create(draft("Durable", "d", SourceType::Text)).await.unwrap()
        };

        let reopened = store_in(&tmp);
        let notes = reopened.list_all().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, created.id);
        assert_eq!(notes[0].title, "Durable");
    }
}
