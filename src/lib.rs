pub mod cli;
pub mod error;
pub mod export;
pub mod generate;
pub mod markup;
pub mod note;
pub mod server;
pub mod store;
pub mod theme;

pub use error::{Result, SwotError};
pub use note::{Note, NoteDraft, SourceType};
pub use store::NoteStore;
