// src/generate/mod.rs
//! Turning raw study material into note title + content.
//!
//! The upstream model returns one markdown blob; `reshape` splits it into
//! the `{title, content}` pair the store expects. Title extraction prefers
//! a leading `#`/`##` heading, falls back to a plain first line (capped at
//! 60 chars), and finally the "Study Notes" placeholder.

pub mod openai;

pub use openai::{ImagePayload, OpenAiClient};

use crate::note::DEFAULT_TITLE;

/// System prompt sent with every generation request.
pub const NOTE_GENERATION_PROMPT: &str = "\
You are an exam prep expert. Create ultra-concise, high-yield revision notes.

FORMAT (use ## for sections, - for bullets):

## Definition
- One-line definition only

## Key Points
- 3-5 most important facts
- What examiners ask about

## Formulas
- Key equations (if any)
- Include units

## Must Remember
- Critical facts to memorize
- Common exam traps

STRICT RULES:
- Maximum 8 words per bullet point
- NO explanations or examples
- NO paragraphs - bullets only
- Focus on facts that appear in exams
- Skip sections if not applicable
- Generate a short, clear title (max 5 words)";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GeneratedNote {
    pub title: String,
    pub content: String,
}

/// Find the first line that is a markdown heading of exactly `level`
/// hashes followed by whitespace and non-empty text.
fn heading_line(raw: &str, level: usize) -> Option<&str> {
    raw.lines().find(|line| {
        let hashes = line.chars().take_while(|c| *c == '#').count();
        if hashes != level {
            return false;
        }
        let rest = &line[level..];
        rest.starts_with(char::is_whitespace) && !rest.trim().is_empty()
    })
}

/// Split a raw model response into title and body.
pub fn reshape(raw: &str) -> GeneratedNote {
    if let Some(line) = heading_line(raw, 1).or_else(|| heading_line(raw, 2)) {
        let title = line.trim_start_matches('#').trim().to_string();
        let content = raw.replacen(line, "", 1).trim().to_string();
        return GeneratedNote { title, content };
    }

    let first_line = raw.lines().next().unwrap_or("");
    if !first_line.is_empty() && !first_line.starts_with('-') && !first_line.starts_with('#') {
        let title: String = first_line.chars().take(60).collect();
        let content = raw[first_line.len()..].trim().to_string();
        return GeneratedNote { title, content };
    }

    GeneratedNote {
        title: DEFAULT_TITLE.to_string(),
        content: raw.to_string(),
    }
}
