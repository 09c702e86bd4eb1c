// src/server/mod.rs
//! Thin HTTP proxy in front of the generation upstream.
//!
//! Two endpoints, both stateless and both ignorant of the note store:
//! image payloads or raw text in, reshaped `{title, content}` JSON out.
//! Missing input is a 400; an upstream failure is a 500.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::generate::{reshape, GeneratedNote, ImagePayload, OpenAiClient};

// Matches the upstream's 10 MB per-image cap, for up to 25 images.
const BODY_LIMIT: usize = 25 * 10 * 1024 * 1024;

type ErrorResponse = (StatusCode, Json<Value>);

pub fn router(client: Arc<OpenAiClient>) -> Router {
    Router::new()
        .route("/api/generate-notes", post(generate_from_images))
        .route("/api/generate-notes-from-text", post(generate_from_text))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(client)
}

/// Bind and serve until the process is stopped.
pub async fn serve(client: Arc<OpenAiClient>, port: u16) -> crate::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "generation proxy listening");
    axum::serve(listener, router(client)).await?;
    Ok(())
}

fn bad_request(message: &str) -> ErrorResponse {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn upstream_failure(e: impl std::fmt::Display) -> ErrorResponse {
    tracing::warn!(error = %e, "generation upstream failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Failed to generate notes" })),
    )
}

async fn generate_from_images(
    State(client): State<Arc<OpenAiClient>>,
    mut multipart: Multipart,
) -> Result<Json<GeneratedNote>, ErrorResponse> {
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| bad_request("No images provided"))?
    {
        if field.name() != Some("images") {
            continue;
        }
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|_| bad_request("No images provided"))?;
        images.push(ImagePayload {
            mime_type,
            bytes: bytes.to_vec(),
        });
    }

    if images.is_empty() {
        return Err(bad_request("No images provided"));
    }

    let raw = client
        .generate_from_images(&images)
        .await
        .map_err(upstream_failure)?;

    Ok(Json(reshape(&raw)))
}

#[derive(Deserialize)]
struct TextRequest {
    text: Option<String>,
}

async fn generate_from_text(
    State(client): State<Arc<OpenAiClient>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<GeneratedNote>, ErrorResponse> {
    let text = match request.text {
        Some(text) if !text.is_empty() => text,
        _ => return Err(bad_request("No text provided")),
    };

    let raw = client
        .generate_from_text(&text)
        .await
        .map_err(upstream_failure)?;

    Ok(Json(reshape(&raw)))
}
