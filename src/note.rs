// src/note.rs
//! The persisted note entity and its creation draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title used when generation does not produce one.
pub const DEFAULT_TITLE: &str = "Study Notes";

/// Where a note's raw material came from. Recorded at creation, never
/// changed, and has no behavioral effect beyond display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Text extracted from photographed study material.
    Ocr,
    /// Text pasted or typed directly.
    #[default]
    Text,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceType::Ocr => write!(f, "ocr"),
            SourceType::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ocr" => Ok(SourceType::Ocr),
            "text" => Ok(SourceType::Text),
            _ => Err(format!("Invalid source type: {}", s)),
        }
    }
}

/// A single revision-notes document.
///
/// Field names on the wire match the persisted layout of earlier releases
/// (`createdAt`, `sourceType`), so existing collections keep loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "sourceType")]
    pub source_type: SourceType,
}

/// What a producing flow hands to the store: everything except identity
/// and timestamp, which the store assigns exactly once.
#[derive(Debug, Clone)]
pub struct NoteDraft {
    pub title: Option<String>,
    pub content: String,
    pub source_type: SourceType,
}

impl Note {
    pub fn new(draft: NoteDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            content: draft.content,
            created_at: Utc::now(),
            source_type: draft.source_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_identity_and_timestamp() {
        let note = Note::new(NoteDraft {
            title: Some("Mitosis".to_string()),
            content: "## Key Points\n- Cell division".to_string(),
            source_type: SourceType::Ocr,
        });

        assert!(!note.id.to_string().is_empty());
        assert_eq!(note.title, "Mitosis");
        assert_eq!(note.source_type, SourceType::Ocr);
    }

    #[test]
    fn test_new_missing_title_gets_placeholder() {
        let note = Note::new(NoteDraft {
            title: None,
            content: "- fact".to_string(),
            source_type: SourceType::Text,
        });

        assert_eq!(note.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_wire_layout_is_stable() {
        let note = Note::new(NoteDraft {
            title: Some("T".to_string()),
            content: "C".to_string(),
            source_type: SourceType::Text,
        });

        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["sourceType"], "text");
    }

    #[test]
    fn test_source_type_round_trip() {
        assert_eq!("ocr".parse::<SourceType>().unwrap(), SourceType::Ocr);
        assert_eq!("TEXT".parse::<SourceType>().unwrap(), SourceType::Text);
        assert!("pdf".parse::<SourceType>().is_err());
    }
}
