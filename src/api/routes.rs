use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::tts::{SpeechProvider, VoiceCatalog};

pub struct AppState {
    pub catalog: VoiceCatalog,
    pub provider: Arc<dyn SpeechProvider>,
    pub default_voice: String,
    pub spool_dir: PathBuf,
    pub service_name: String,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/speak", post(handlers::speak))
        .route("/tts", post(handlers::speak))
        .route("/voices", get(handlers::list_voices))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
