// src/theme.rs
//! Theme preference, persisted under its own key on the shared substrate.
//! Separate from the note collection; the two never share a blob.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::FileKv;

pub const THEME_KEY: &str = "theme.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::System => write!(f, "system"),
        }
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            _ => Err(format!("Invalid theme mode: {}", s)),
        }
    }
}

/// Load the stored preference. Absent or unparseable falls back to
/// `System`; a bad theme value is never worth failing over.
pub async fn load(kv: &FileKv) -> ThemeMode {
    match kv.get(THEME_KEY).await {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
        Ok(None) => ThemeMode::default(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read theme preference");
            ThemeMode::default()
        }
    }
}

pub async fn save(kv: &FileKv, mode: ThemeMode) -> Result<()> {
    kv.set(THEME_KEY, &serde_json::to_string(&mode)?).await
}
