use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use axum::body::{Body, Bytes};
use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::error::AppError;
use crate::tts::AudioFormat;

const CHUNK_SIZE: usize = 64 * 1024;

/// Audio written to a uniquely named file in the spool directory.
///
/// The file is removed when this value, or the body built from it, is
/// dropped.
pub struct SpooledAudio {
    file: File,
    path: TempPath,
    len: u64,
    format: AudioFormat,
}

impl SpooledAudio {
    pub fn write(dir: &Path, format: AudioFormat, audio: &[u8]) -> Result<Self, AppError> {
        let suffix = format!(".{}", format.extension());
        let mut named = tempfile::Builder::new()
            .prefix("speech_")
            .suffix(&suffix)
            .tempfile_in(dir)?;

        named.write_all(audio)?;
        named.flush()?;

        let (mut file, path) = named.into_parts();
        file.seek(SeekFrom::Start(0))?;

        Ok(Self {
            file: File::from_std(file),
            path,
            len: audio.len() as u64,
            format,
        })
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stream the file contents in chunks.
    pub fn into_body(self) -> Body {
        Body::from_stream(futures_util::stream::try_unfold(self, read_chunk))
    }
}

async fn read_chunk(mut spooled: SpooledAudio) -> std::io::Result<Option<(Bytes, SpooledAudio)>> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let read = spooled.file.read(&mut buf).await?;
    if read == 0 {
        return Ok(None);
    }
    buf.truncate(read);
    Ok(Some((Bytes::from(buf), spooled)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_body_streams_file_and_removes_it() {
        let dir = tempfile::tempdir().unwrap();
        let audio: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();

        let spooled = SpooledAudio::write(dir.path(), AudioFormat::Wav, &audio).unwrap();
        let path = spooled.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(spooled.len(), audio.len() as u64);
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("speech_"));
        assert_eq!(path.extension().unwrap(), "wav");

        let body = spooled.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), audio.as_slice());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_dropped_body_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let spooled = SpooledAudio::write(dir.path(), AudioFormat::Mpeg, b"ID3data").unwrap();
        let path = spooled.path().to_path_buf();

        let body = spooled.into_body();
        drop(body);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_unique_names() {
        let dir = tempfile::tempdir().unwrap();
        let a = SpooledAudio::write(dir.path(), AudioFormat::Wav, b"a").unwrap();
        let b = SpooledAudio::write(dir.path(), AudioFormat::Wav, b"b").unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[tokio::test]
    async fn test_missing_spool_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = SpooledAudio::write(&missing, AudioFormat::Wav, b"a").err().unwrap();
        assert!(matches!(err, AppError::IoError(_)));
    }
}
