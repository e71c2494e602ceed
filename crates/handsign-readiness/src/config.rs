//! Readiness check configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use handsign_core::{HandsignError, HandsignResult};

/// Environment variables read by [`ReadinessConfig::from_env`]
pub const ENV_BASE_URL: &str = "HANDSIGN_BASE_URL";
pub const ENV_MODEL_PATH: &str = "HANDSIGN_MODEL_PATH";
pub const ENV_PROBE_TIMEOUT: &str = "HANDSIGN_PROBE_TIMEOUT";
pub const ENV_CAMERA_DEVICE: &str = "HANDSIGN_CAMERA_DEVICE";

/// Readiness check configuration
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Origin serving the model artifact
    pub base_url: String,
    /// Path of the model artifact under `base_url`
    pub model_path: String,
    /// Upper bound for any single probe
    #[serde(with = "duration_str")]
    pub probe_timeout: Duration,
    /// Video device opened by the camera probe
    pub camera_device: PathBuf,
    /// Registry name of the inference runtime handle
    pub runtime_capability: String,
    /// Registry name of the hand-landmark detector handle
    pub detector_capability: String,
    /// Registry name of the sandboxed bytecode runtime
    pub sandbox_capability: String,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        ReadinessConfig {
            base_url: "http://127.0.0.1:8080".to_string(),
            model_path: "/isl_model.onnx".to_string(),
            probe_timeout: Duration::from_secs(5),
            camera_device: PathBuf::from("/dev/video0"),
            runtime_capability: "ort".to_string(),
            detector_capability: "Hands".to_string(),
            sandbox_capability: "WebAssembly".to_string(),
        }
    }
}

impl ReadinessConfig {
    /// Defaults overlaid with any `HANDSIGN_*` environment variables
    pub fn from_env() -> HandsignResult<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Ok(path) = env::var(ENV_MODEL_PATH) {
            config.model_path = path;
        }
        if let Ok(timeout) = env::var(ENV_PROBE_TIMEOUT) {
            config.probe_timeout = parse_timeout(&timeout)?;
        }
        if let Ok(device) = env::var(ENV_CAMERA_DEVICE) {
            config.camera_device = PathBuf::from(device);
        }

        Ok(config)
    }

    /// Full URL of the model artifact
    pub fn artifact_url(&self) -> HandsignResult<Url> {
        let base = Url::parse(&self.base_url).map_err(|e| {
            HandsignError::Config(format!("invalid base url {:?}: {}", self.base_url, e))
        })?;

        base.join(&self.model_path).map_err(|e| {
            HandsignError::Config(format!("invalid model path {:?}: {}", self.model_path, e))
        })
    }
}

/// Parse a human-readable duration such as `3s` or `500ms`
pub fn parse_timeout(value: &str) -> HandsignResult<Duration> {
    let timeout = humantime::parse_duration(value.trim()).map_err(|e| {
        HandsignError::Config(format!("invalid probe timeout {:?}: {}", value, e))
    })?;

    if timeout.is_zero() {
        return Err(HandsignError::Config(
            "probe timeout must be greater than zero".to_string(),
        ));
    }

    Ok(timeout)
}

mod duration_str {
    use std::time::Duration;

    use serde::{de::Error, Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timeout(&raw).map_err(D::Error::custom)
    }
}
