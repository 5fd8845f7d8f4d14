use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::error::AppError;
use crate::tts::ProviderVoice;

/// Built-in voices: (language group, speaker label, voice identifier).
const EMBEDDED_VOICES: &[(&str, &str, &str)] = &[
    ("English", "Jenny", "en-US-JennyNeural"),
    ("English", "Guy", "en-US-GuyNeural"),
    ("English", "Aria", "en-US-AriaNeural"),
    ("English", "Sonia", "en-GB-SoniaNeural"),
    ("English", "Ryan", "en-GB-RyanNeural"),
    ("Turkish", "Emel", "tr-TR-EmelNeural"),
    ("Turkish", "Ahmet", "tr-TR-AhmetNeural"),
    ("Japanese", "Nanami", "ja-JP-NanamiNeural"),
    ("Japanese", "Keita", "ja-JP-KeitaNeural"),
    ("German", "Katja", "de-DE-KatjaNeural"),
    ("German", "Conrad", "de-DE-ConradNeural"),
    ("French", "Denise", "fr-FR-DeniseNeural"),
    ("French", "Henri", "fr-FR-HenriNeural"),
    ("Spanish", "Elvira", "es-ES-ElviraNeural"),
    ("Spanish", "Alvaro", "es-ES-AlvaroNeural"),
];

type Speakers = BTreeMap<String, String>;

/// Language group -> speaker label -> voice identifier.
///
/// Built once at startup and never mutated, so it is shared between
/// requests without locking.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VoiceCatalog {
    groups: BTreeMap<String, Speakers>,
}

impl VoiceCatalog {
    pub fn embedded() -> Self {
        let mut groups: BTreeMap<String, Speakers> = BTreeMap::new();
        for (language, speaker, id) in EMBEDDED_VOICES {
            groups
                .entry(language.to_string())
                .or_default()
                .insert(speaker.to_string(), id.to_string());
        }
        Self { groups }
    }

    /// Load a catalog from a JSON file shaped like the `/voices` payload.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let groups: BTreeMap<String, Speakers> = serde_json::from_reader(File::open(path)?)?;

        for (language, speakers) in &groups {
            for (speaker, id) in speakers {
                if id.trim().is_empty() {
                    return Err(AppError::Config(format!(
                        "Empty voice identifier for {}/{} in {}",
                        language,
                        speaker,
                        path.display()
                    )));
                }
            }
        }

        Ok(Self { groups })
    }

    /// Group the provider's voice list by locale.
    pub fn from_provider_voices(voices: &[ProviderVoice]) -> Self {
        let mut groups: BTreeMap<String, Speakers> = BTreeMap::new();
        for voice in voices {
            if voice.short_name.trim().is_empty() {
                continue;
            }
            let locale = if voice.locale.is_empty() {
                "unknown".to_string()
            } else {
                voice.locale.clone()
            };
            groups
                .entry(locale)
                .or_default()
                .insert(speaker_label(&voice.short_name), voice.short_name.clone());
        }
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn voice_count(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    pub fn lookup(&self, language: &str, speaker: &str) -> Option<&str> {
        self.groups
            .get(language)
            .and_then(|speakers| speakers.get(speaker))
            .map(String::as_str)
    }

    /// Pick the voice identifier for a request.
    ///
    /// An explicit `voice` wins and is passed through as-is. Otherwise the
    /// language/speaker pair is looked up, with either half allowed to be
    /// missing. With nothing given, `default` is used.
    pub fn resolve(
        &self,
        voice: Option<&str>,
        language: Option<&str>,
        speaker: Option<&str>,
        default: &str,
    ) -> Result<String, AppError> {
        let voice = non_blank(voice);
        let language = non_blank(language);
        let speaker = non_blank(speaker);

        if let Some(voice) = voice {
            return Ok(voice.to_string());
        }

        match (language, speaker) {
            (Some(language), Some(speaker)) => self
                .lookup(language, speaker)
                .map(str::to_string)
                .ok_or_else(|| AppError::VoiceNotFound(format!("{}/{}", language, speaker))),
            (Some(language), None) => self
                .groups
                .get(language)
                .and_then(|speakers| speakers.values().next())
                .cloned()
                .ok_or_else(|| AppError::VoiceNotFound(language.to_string())),
            (None, Some(speaker)) => self
                .groups
                .values()
                .find_map(|speakers| speakers.get(speaker))
                .cloned()
                .ok_or_else(|| AppError::VoiceNotFound(speaker.to_string())),
            (None, None) => Ok(default.to_string()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Speaker label from a provider short name, e.g. `en-US-JennyNeural` -> `Jenny`.
fn speaker_label(short_name: &str) -> String {
    let name = short_name.rsplit('-').next().unwrap_or(short_name);
    let name = name.strip_suffix("Neural").unwrap_or(name);
    if name.is_empty() {
        short_name.to_string()
    } else {
        name.to_string()
    }
}
