use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;
use crate::tts::AudioFormat;

pub const DEFAULT_VOICE: &str = "en-US-JennyNeural";

/// Where the voice catalog comes from at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    Embedded,
    File(PathBuf),
    Provider,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub provider_url: String,
    pub provider_timeout: Option<Duration>,
    pub audio_format: AudioFormat,
    pub default_voice: String,
    pub catalog: CatalogSource,
    pub spool_dir: PathBuf,
    pub service_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("PORT must be a number, got '{}'", p)))?,
            None => 5000,
        };

        let provider_url = var("PROVIDER_URL").unwrap_or_else(|| "http://127.0.0.1:5500".to_string());
        let provider_timeout = match var("PROVIDER_TIMEOUT_SECS") {
            Some(s) => {
                let secs: u64 = s.trim().parse().map_err(|_| {
                    AppError::Config(format!("PROVIDER_TIMEOUT_SECS must be a number, got '{}'", s))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let audio_format = match var("AUDIO_FORMAT") {
            Some(f) => AudioFormat::parse(&f)
                .ok_or_else(|| AppError::Config(format!("Unsupported AUDIO_FORMAT '{}'", f)))?,
            None => AudioFormat::Wav,
        };

        let from_provider = var("VOICES_FROM_PROVIDER")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let catalog = if from_provider {
            CatalogSource::Provider
        } else if let Some(path) = var("VOICE_CATALOG") {
            CatalogSource::File(PathBuf::from(path))
        } else {
            CatalogSource::Embedded
        };

        Ok(Self {
            host,
            port,
            provider_url,
            provider_timeout,
            audio_format,
            default_voice: var("DEFAULT_VOICE").unwrap_or_else(|| DEFAULT_VOICE.to_string()),
            catalog,
            spool_dir: var("SPOOL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            service_name: var("SERVICE_NAME").unwrap_or_else(|| "speech-gateway".to_string()),
        })
    }

    pub fn addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid address {}:{}", self.host, self.port)))
    }
}
