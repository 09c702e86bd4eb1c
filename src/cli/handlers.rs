use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

use crate::error::{Result, SwotError};
use crate::export::{export_note, ExportFormat};
use crate::generate::{reshape, ImagePayload, OpenAiClient};
use crate::markup::{excerpt, format_date};
use crate::note::{Note, NoteDraft, SourceType};
use crate::server;
use crate::store::{FileKv, NoteStore};
use crate::theme::{self, ThemeMode};

fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Resolve a full UUID or a UUID prefix against the collection.
async fn resolve_note(store: &NoteStore, id: &str) -> Result<Option<Note>> {
    if let Ok(uuid) = Uuid::parse_str(id) {
        return store.get(&uuid).await;
    }

    let notes = store.list_all().await?;
    Ok(notes.into_iter().find(|n| n.id.to_string().starts_with(id)))
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

pub async fn handle_add(
    title: String,
    content: Option<String>,
    source: String,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let source_type: SourceType = source.parse().map_err(SwotError::InvalidInput)?;

    let content = if stdin {
        read_stdin()?
    } else {
        content.ok_or_else(|| {
            SwotError::Storage("No content provided. Pass CONTENT or --stdin.".to_string())
        })?
    };

    let store = NoteStore::open_default();
    let note = store
        .create(NoteDraft {
            title: Some(title),
            content,
            source_type,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Created note ({}) - {}", short_id(&note.id), note.title);
    }

    Ok(())
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

pub async fn handle_generate(
    text: Option<String>,
    file: Option<PathBuf>,
    stdin: bool,
    images: Vec<PathBuf>,
    json: bool,
) -> Result<()> {
    let client = OpenAiClient::from_env()?;

    let (raw, source_type) = if !images.is_empty() {
        let mut payloads = Vec::with_capacity(images.len());
        for path in &images {
            payloads.push(ImagePayload {
                mime_type: mime_for(path).to_string(),
                bytes: tokio::fs::read(path).await?,
            });
        }
        (client.generate_from_images(&payloads).await?, SourceType::Ocr)
    } else {
        let input = if stdin {
            read_stdin()?
        } else if let Some(path) = file {
            tokio::fs::read_to_string(path).await?
        } else if let Some(text) = text {
            text
        } else {
            return Err(SwotError::Storage(
                "No study material provided. Pass TEXT, --file, --stdin, or --image.".to_string(),
            ));
        };
        (client.generate_from_text(&input).await?, SourceType::Text)
    };

    let generated = reshape(&raw);

    let store = NoteStore::open_default();
    let note = store
        .create(NoteDraft {
            title: Some(generated.title),
            content: generated.content,
            source_type,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Created note ({}) - {}", short_id(&note.id), note.title);
        println!("\n{}", note.content);
    }

    Ok(())
}

pub async fn handle_list(json: bool) -> Result<()> {
    let store = NoteStore::open_default();
    let notes = store.list_all().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("No notes yet.");
    } else {
        for note in &notes {
            println!(
                "{} [{}] {} - {}",
                short_id(&note.id),
                note.source_type,
                format_date(&note.created_at),
                note.title
            );
            let preview = excerpt(&note.content).replace('\n', " ");
            if !preview.is_empty() {
                println!("    {}", preview);
            }
        }
    }

    Ok(())
}

pub async fn handle_show(id: String, json: bool) -> Result<()> {
    let store = NoteStore::open_default();

    let note = resolve_note(&store, &id)
        .await?
        .ok_or(SwotError::NoteNotFound(id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("{}", note.title);
        println!(
            "{} - {} - {}",
            short_id(&note.id),
            note.source_type,
            format_date(&note.created_at)
        );
        println!("\n{}", note.content);
    }

    Ok(())
}

pub async fn handle_delete(id: String, force: bool) -> Result<()> {
    let store = NoteStore::open_default();

    // Deleting an unknown id is a no-op at the store level; the CLI says so
    // instead of failing.
    let note = match resolve_note(&store, &id).await? {
        Some(note) => note,
        None => {
            println!("Note not found; nothing to delete.");
            return Ok(());
        }
    };

    if !force {
        eprintln!(
            "Delete note ({}) - {}? [y/N] ",
            short_id(&note.id),
            note.title
        );

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(SwotError::Storage(
                "Use --force to delete in non-interactive mode".to_string(),
            ));
        }
    }

    store.delete(&note.id).await?;
    println!("Deleted note ({}) - {}", short_id(&note.id), note.title);

    Ok(())
}

pub async fn handle_export(id: String, html: bool, out: PathBuf) -> Result<()> {
    let store = NoteStore::open_default();

    let note = resolve_note(&store, &id)
        .await?
        .ok_or(SwotError::NoteNotFound(id))?;

    let format = if html {
        ExportFormat::Html
    } else {
        ExportFormat::Markdown
    };
    let path = export_note(&note, &out, format)?;

    println!("Exported {}", path.display());
    Ok(())
}

pub async fn handle_theme(mode: Option<String>) -> Result<()> {
    let kv = FileKv::open_default();

    match mode {
        None => {
            println!("{}", theme::load(&kv).await);
        }
        Some(raw) => {
            let mode: ThemeMode = raw.parse().map_err(SwotError::InvalidInput)?;
            theme::save(&kv, mode).await?;
            println!("Theme set to {}", mode);
        }
    }

    Ok(())
}

pub async fn handle_serve(port: u16) -> Result<()> {
    let client = Arc::new(OpenAiClient::from_env()?);
    server::serve(client, port).await
}
