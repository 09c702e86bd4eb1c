pub mod kv;
pub mod notes;
pub mod projection;

pub use kv::{default_data_dir, FileKv};
pub use notes::NoteStore;
pub use projection::{LoadState, NoteListProjection};
