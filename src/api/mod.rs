pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

use crate::tts::prosody::ProsodyValue;
use crate::tts::VoiceCatalog;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SpeakRequest {
    pub text: Option<String>,
    pub voice: Option<String>,
    pub language: Option<String>,
    pub speaker: Option<String>,
    #[serde(alias = "speed")]
    pub rate: Option<ProsodyValue>,
    pub pitch: Option<ProsodyValue>,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse<'a> {
    pub voices: &'a VoiceCatalog,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
