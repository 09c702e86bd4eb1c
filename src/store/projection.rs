// src/store/projection.rs
//! Read-side view of the note collection for a list surface.
//!
//! The projection re-reads the whole collection on every refresh; there is
//! no incremental diffing. A failed load is absorbed into an explicit
//! `Failed` state instead of silently presenting an empty list, so callers
//! can tell "no notes" apart from "could not load notes".

use std::sync::Arc;

use uuid::Uuid;

use crate::note::Note;

use super::notes::NoteStore;

/// Outcome of the last refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// The collection was read successfully (possibly empty).
    Loaded,
    /// The collection could not be read; entries are empty but that is not
    /// the same as an empty collection.
    Failed(String),
}

pub struct NoteListProjection {
    store: Arc<NoteStore>,
    entries: Vec<Note>,
    state: LoadState,
}

impl NoteListProjection {
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self {
            store,
            entries: Vec::new(),
            state: LoadState::Loaded,
        }
    }

    /// Replace the in-memory view wholesale from the store.
    pub async fn refresh(&mut self) {
        match self.store.list_all().await {
            Ok(notes) => {
                self.entries = notes;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load notes");
                self.entries.clear();
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Delete `id` and re-read the collection. No optimistic removal; the
    /// view is whatever the store says after the delete.
    pub async fn request_delete(&mut self, id: &Uuid) {
        if let Err(e) = self.store.delete(id).await {
            tracing::warn!(error = %e, id = %id, "failed to delete note");
        }
        self.refresh().await;
    }

    pub fn entries(&self) -> &[Note] {
        &self.entries
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
