use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{HealthResponse, SpeakRequest, VoicesResponse};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::tts::{prosody, SpooledAudio, SynthesisRequest};

const MAX_TEXT_CHARS: usize = 10_000;

pub async fn speak(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let synthesis = build_request(&state, request)?;

    tracing::info!(
        "Synthesizing {} chars with voice {} (rate {}, pitch {})",
        synthesis.text.chars().count(),
        synthesis.voice,
        synthesis.rate,
        synthesis.pitch
    );

    let result = state.provider.synthesize(&synthesis).await?;

    // Spool to disk off the async workers; the file goes away with the body.
    let spool_dir = state.spool_dir.clone();
    let spooled = tokio::task::spawn_blocking(move || {
        SpooledAudio::write(&spool_dir, result.format, &result.audio)
    })
    .await
    .map_err(|e| AppError::SynthesisFailed(format!("Spool task failed: {}", e)))??;

    tracing::debug!("Streaming {} bytes from {}", spooled.len(), spooled.path().display());

    let headers = [
        (header::CONTENT_TYPE, spooled.format().mime_type().to_string()),
        (header::CONTENT_LENGTH, spooled.len().to_string()),
    ];

    Ok((StatusCode::OK, headers, spooled.into_body()).into_response())
}

fn build_request(state: &AppState, request: SpeakRequest) -> Result<SynthesisRequest, AppError> {
    let text = request.text.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(AppError::InvalidRequest("Missing text".into()));
    }

    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(AppError::InvalidRequest(format!(
            "Text too long (max {} chars)",
            MAX_TEXT_CHARS
        )));
    }

    let voice = state.catalog.resolve(
        request.voice.as_deref(),
        request.language.as_deref(),
        request.speaker.as_deref(),
        &state.default_voice,
    )?;

    Ok(SynthesisRequest {
        text: text.to_string(),
        voice,
        rate: prosody::rate(request.rate.as_ref())?,
        pitch: prosody::pitch(request.pitch.as_ref())?,
    })
}

pub async fn list_voices(State(state): State<Arc<AppState>>) -> Response {
    Json(VoicesResponse {
        voices: &state.catalog,
    })
    .into_response()
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
