// ABOUTME: Explicit process configuration - models, credentials, and directories.
// ABOUTME: Built once at startup from defaults, a TOML file, and the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

const DEFAULT_CLASSIFIER_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_ANALYZER_MODEL: &str = "gemini-2.5-pro";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Top-level configuration handed to every component that needs a model,
/// a credential, or a path.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Model used by the question classifier.
    pub classifier_model: String,

    /// Model used by the orchestrator, trend analyzer, and strategist.
    pub analyzer_model: String,

    /// Gemini API key. Usually supplied through the environment.
    pub api_key: Option<String>,

    /// Base URL of the Gemini REST API.
    pub base_url: String,

    /// Deadline for a single backend call.
    pub request_timeout_secs: u64,

    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,

    pub paths: PathConfig,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            classifier_model: DEFAULT_CLASSIFIER_MODEL.to_string(),
            analyzer_model: DEFAULT_ANALYZER_MODEL.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 120,
            log_filter: "info".to_string(),
            paths: PathConfig::default(),
        }
    }
}

impl ProfilerConfig {
    /// Parse configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "loaded config file");
        Self::from_toml_str(&text)
    }

    /// Load `.env`, start from `file` when given (defaults otherwise), then
    /// apply environment overrides.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let base = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    /// Apply `PROFILER_*` and API key environment variables on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("PROFILER_CLASSIFIER_MODEL") {
            self.classifier_model = v;
        }
        if let Ok(v) = std::env::var("PROFILER_ANALYZER_MODEL") {
            self.analyzer_model = v;
        }
        if let Ok(v) = std::env::var("PROFILER_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = std::env::var("PROFILER_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.request_timeout_secs = v;
        }
        if let Ok(v) = std::env::var("PROFILER_LOG") {
            self.log_filter = v;
        }
        if let Ok(v) = std::env::var("PROFILER_INPUT_DIR") {
            self.paths.input_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("PROFILER_OUTPUT_DIR") {
            self.paths.output_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("GEMINI_API_KEY").or_else(|_| std::env::var("GOOGLE_API_KEY")) {
            self.api_key = Some(v);
        }
        self
    }

    /// The API key, or an error if none was configured.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Input and output directory layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Where exam PDFs are looked up when given a bare file name.
    pub input_dir: PathBuf,

    /// Root of generated artifacts (charts, logs, reports).
    pub output_dir: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl PathConfig {
    /// Create a layout rooted at `root`.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        Self {
            input_dir: root.as_ref().join("input"),
            output_dir: root.as_ref().join("output"),
        }
    }

    pub fn charts_dir(&self) -> PathBuf {
        self.output_dir.join("charts")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.output_dir.join("logs")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.output_dir.join("reports")
    }

    /// Create every configured directory that does not exist yet.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        for dir in [
            self.input_dir.clone(),
            self.output_dir.clone(),
            self.charts_dir(),
            self.logs_dir(),
            self.reports_dir(),
        ] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Path of `filename` inside the input directory.
    pub fn input_path(&self, filename: &str) -> PathBuf {
        self.input_dir.join(filename)
    }

    /// Path of `filename` inside the output directory, or inside
    /// `output/<subfolder>` when a subfolder is given. The parent directory
    /// is created.
    pub fn output_path(&self, filename: &str, subfolder: Option<&str>) -> std::io::Result<PathBuf> {
        let base = match subfolder {
            Some(sub) if !sub.is_empty() => self.output_dir.join(sub),
            _ => self.output_dir.clone(),
        };
        std::fs::create_dir_all(&base)?;
        Ok(base.join(filename))
    }

    /// All files in the input directory with the given extension, sorted.
    pub fn list_input_files(&self, extension: &str) -> Result<Vec<PathBuf>, anyhow::Error> {
        let extension = extension.trim_start_matches('.');
        let pattern = self.input_dir.join(format!("*.{extension}"));
        let pattern = pattern
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("input directory is not valid UTF-8"))?;

        let mut files = Vec::new();
        for entry in glob::glob(pattern)? {
            files.push(entry?);
        }
        files.sort();
        Ok(files)
    }
}
