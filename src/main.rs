use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod tts;

use api::routes::{create_router, AppState};
use config::{CatalogSource, Config};
use error::AppError;
use tts::{HttpProvider, SpeechProvider, VoiceCatalog};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");
    let addr = config.addr().expect("Invalid address");

    tracing::info!("Speech Gateway v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);

    let provider = HttpProvider::new(
        &config.provider_url,
        config.audio_format,
        config.provider_timeout,
    )
    .expect("Failed to create provider client");
    tracing::info!("Provider: {}", provider.base_url());
    let provider: Arc<dyn SpeechProvider> = Arc::new(provider);

    let catalog = load_catalog(&config, provider.as_ref())
        .await
        .expect("Failed to load voice catalog");
    tracing::info!("Voice catalog: {} voices", catalog.voice_count());

    let state = Arc::new(AppState {
        catalog,
        provider,
        default_voice: config.default_voice,
        spool_dir: config.spool_dir,
        service_name: config.service_name,
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

async fn load_catalog(
    config: &Config,
    provider: &dyn SpeechProvider,
) -> Result<VoiceCatalog, AppError> {
    let catalog = match &config.catalog {
        CatalogSource::Embedded => VoiceCatalog::embedded(),
        CatalogSource::File(path) => {
            tracing::info!("Loading voice catalog from {}", path.display());
            VoiceCatalog::from_file(path)?
        }
        CatalogSource::Provider => {
            tracing::info!("Fetching voice list from provider");
            VoiceCatalog::from_provider_voices(&provider.list_voices().await?)
        }
    };

    if catalog.is_empty() {
        tracing::warn!("Voice catalog is empty; only explicit voice identifiers will work");
    }

    Ok(catalog)
}
