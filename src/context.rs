//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::argos::ArgosTranslator;
use crate::adapters::live::huggingface::HuggingFaceGenerator;
use crate::adapters::recording::Recording;
use crate::adapters::replaying::Replaying;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::{Config, TOKEN_ENV_VARS};
use crate::error::AppError;
use crate::ports::{ImageGenerator, Translator};

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Translator port.
    pub translator: Box<dyn Translator>,
    /// Image generator port.
    pub generator: Box<dyn ImageGenerator>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// Every adapter holding the recorder must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context talking to the configured endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the inference token is not configured.
    pub fn live(config: &Config) -> Result<Self, AppError> {
        let key = config.huggingface_key().ok_or_else(|| AppError::MissingApiKey {
            provider: "Hugging Face".into(),
            env_var: TOKEN_ENV_VARS[0].into(),
        })?;
        Ok(Self {
            translator: Box::new(ArgosTranslator::new(config.endpoints.translate.clone())),
            generator: Box::new(HuggingFaceGenerator::new(
                config.endpoints.inference.clone(),
                key,
            )),
        })
    }

    /// Create a recording context that wraps both live adapters with one recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be created.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), AppError> {
        let live = Self::live(config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".hindi-imagen/cassettes")
            .join(&timestamp)
            .join("session.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-session"),
            get_commit_hash(),
        )));

        let ctx = Self {
            translator: Box::new(Recording::new(live.translator, Arc::clone(&recorder))),
            generator: Box::new(Recording::new(live.generator, Arc::clone(&recorder))),
        };
        Ok((ctx, RecordingSession { recorder }))
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, AppError> {
        let replayer = load_cassette(path)
            .map_err(|e| AppError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        Ok(Self {
            translator: Box::new(Replaying::new(Arc::clone(&replayer))),
            generator: Box::new(Replaying::new(replayer)),
        })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
