// src/export.rs
//! Export a note as a standalone Markdown or HTML file.
//!
//! Markdown carries YAML frontmatter so exports stay greppable and
//! re-importable. HTML mirrors the document the mobile app handed to its
//! print service: title heading, then one paragraph per stripped line.
//! Turning the HTML into a PDF is left to whatever the user prints with.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, SwotError};
use crate::markup::strip_markup;
use crate::note::Note;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Html,
}

#[derive(Serialize)]
struct NoteFrontmatter {
    id: String,
    title: String,
    created: String,
    source: String,
}

impl NoteFrontmatter {
    fn from_note(note: &Note) -> Self {
        Self {
            id: note.id.to_string(),
            title: note.title.clone(),
            created: note.created_at.to_rfc3339(),
            source: note.source_type.to_string(),
        }
    }
}

/// Convert a title to a filesystem-safe slug
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // Start true to trim leading hyphens

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        slug = "untitled".to_string();
    }

    slug
}

fn yaml_frontmatter<T: Serialize>(data: &T) -> Result<String> {
    let yaml = serde_yaml::to_string(data)
        .map_err(|e| SwotError::Storage(format!("YAML serialization failed: {}", e)))?;
    Ok(format!("---\n{}---\n", yaml))
}

fn render_markdown(note: &Note) -> Result<String> {
    let frontmatter = yaml_frontmatter(&NoteFrontmatter::from_note(note))?;
    Ok(format!("{}\n# {}\n\n{}\n", frontmatter, note.title, note.content))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn render_html(note: &Note) -> String {
    let body: String = note
        .content
        .lines()
        .map(|line| format!("<p>{}</p>", escape_html(&strip_markup(line))))
        .collect();

    format!(
        "<html>\n<body style=\"font-family:sans-serif;padding:40px;\">\n\
         <h1 style=\"color:#2563EB;\">{}</h1>\n{}\n</body>\n</html>\n",
        escape_html(&note.title),
        body
    )
}

/// Write `note` to `out_dir` in the requested format, creating the
/// directory if needed. Returns the path of the written file.
pub fn export_note(note: &Note, out_dir: &Path, format: ExportFormat) -> Result<PathBuf> {
    let (content, extension) = match format {
        ExportFormat::Markdown => (render_markdown(note)?, "md"),
        ExportFormat::Html => (render_html(note), "html"),
    };

    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(format!("{}.{}", slugify(&note.title), extension));
    fs::write(&path, content)?;

    Ok(path)
}
