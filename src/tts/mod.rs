pub mod catalog;
pub mod prosody;
pub mod provider;
pub mod spool;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub use catalog::VoiceCatalog;
pub use provider::HttpProvider;
pub use spool::SpooledAudio;

/// Audio container returned by the provider and served to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mpeg,
}

impl AudioFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wav" | "wave" | "audio/wav" => Some(AudioFormat::Wav),
            "mp3" | "mpeg" | "audio/mpeg" => Some(AudioFormat::Mpeg),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mpeg => "audio/mpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mpeg => "mp3",
        }
    }
}

/// One synthesis call, fully resolved and defaulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: String,
    pub rate: String,
    pub pitch: String,
}

#[derive(Debug)]
pub struct SynthesisResult {
    pub audio: Vec<u8>,
    pub format: AudioFormat,
}

/// Entry of the provider's voice list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderVoice {
    pub short_name: String,
    pub locale: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub gender: Option<String>,
}

/// The external neural voice service.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResult, AppError>;

    async fn list_voices(&self) -> Result<Vec<ProviderVoice>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_format_parse() {
        assert_eq!(AudioFormat::parse("WAV"), Some(AudioFormat::Wav));
        assert_eq!(AudioFormat::parse("mp3"), Some(AudioFormat::Mpeg));
        assert_eq!(AudioFormat::parse("audio/mpeg"), Some(AudioFormat::Mpeg));
        assert_eq!(AudioFormat::parse("flac"), None);
    }

    #[test]
    fn test_provider_voice_deserialize() {
        let voices: Vec<ProviderVoice> = serde_json::from_str(
            r#"[{"ShortName": "en-US-JennyNeural", "Locale": "en-US", "Gender": "Female"},
                {"ShortName": "tr-TR-AhmetNeural", "Locale": "tr-TR"}]"#,
        )
        .unwrap();

        assert_eq!(voices.len(), 2);
        assert_eq!(voices[0].gender.as_deref(), Some("Female"));
        assert_eq!(voices[1].short_name, "tr-TR-AhmetNeural");
        assert!(voices[1].gender.is_none());
    }
}
