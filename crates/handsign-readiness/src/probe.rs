//! Readiness probes
//!
//! Each probe checks one environmental precondition and returns its
//! outcome as data. Probes never log and never fail the caller; turning
//! outcomes into a report is the checker's job.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;

use handsign_core::{HandsignError, FEATURE_LEN};
use handsign_features::{extract_with_bounds, synthetic::Ramp};

use crate::artifact::ArtifactSource;
use crate::camera::{CameraAccess, VideoConstraints};
use crate::capability::CapabilityRegistry;
use crate::report::Severity;

/// Probe names, in report order
pub const INFERENCE_RUNTIME: &str = "inference-runtime";
pub const LANDMARK_DETECTOR: &str = "landmark-detector";
pub const CAMERA: &str = "camera";
pub const SANDBOX_RUNTIME: &str = "sandbox-runtime";
pub const MODEL_ARTIFACT: &str = "model-artifact";
pub const FEATURE_SELF_TEST: &str = "feature-self-test";

/// `Ok(detail)` on pass, `Err(detail)` on failure
pub type ProbeOutcome = Result<String, String>;

/// A single independent readiness check
#[async_trait]
pub trait Probe: Send + Sync {
    fn name(&self) -> &str;

    fn severity(&self) -> Severity {
        Severity::Fatal
    }

    async fn run(&self) -> ProbeOutcome;
}

/// Inference runtime handle is registered
pub struct RuntimeProbe {
    registry: Arc<dyn CapabilityRegistry>,
    capability: String,
}

impl RuntimeProbe {
    pub fn new(registry: Arc<dyn CapabilityRegistry>, capability: impl Into<String>) -> Self {
        Self {
            registry,
            capability: capability.into(),
        }
    }
}

#[async_trait]
impl Probe for RuntimeProbe {
    fn name(&self) -> &str {
        INFERENCE_RUNTIME
    }

    async fn run(&self) -> ProbeOutcome {
        let handle = self
            .registry
            .lookup(&self.capability)
            .ok_or_else(|| format!("{} runtime not found", self.capability))?;

        Ok(match handle.attribute("wasm_paths") {
            Some(paths) => format!("{} runtime loaded (wasm paths: {})", handle.name, paths),
            None => format!("{} runtime loaded", handle.name),
        })
    }
}

/// Hand-landmark detector handle is registered
///
/// Only a warning: the detector may live in a scope the registry can't see.
pub struct DetectorProbe {
    registry: Arc<dyn CapabilityRegistry>,
    capability: String,
}

impl DetectorProbe {
    pub fn new(registry: Arc<dyn CapabilityRegistry>, capability: impl Into<String>) -> Self {
        Self {
            registry,
            capability: capability.into(),
        }
    }
}

#[async_trait]
impl Probe for DetectorProbe {
    fn name(&self) -> &str {
        LANDMARK_DETECTOR
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    async fn run(&self) -> ProbeOutcome {
        match self.registry.lookup(&self.capability) {
            Some(handle) => Ok(format!("{} detector loaded", handle.name)),
            None => Err(format!(
                "{} detector not found (might be in module scope)",
                self.capability
            )),
        }
    }
}

/// Video stream can be opened
pub struct CameraProbe {
    camera: Arc<dyn CameraAccess>,
}

impl CameraProbe {
    pub fn new(camera: Arc<dyn CameraAccess>) -> Self {
        Self { camera }
    }
}

#[async_trait]
impl Probe for CameraProbe {
    fn name(&self) -> &str {
        CAMERA
    }

    async fn run(&self) -> ProbeOutcome {
        self.camera
            .request_stream(VideoConstraints::video_only())
            .await
            .map(|()| "camera access granted".to_string())
            .map_err(|e| format!("camera access denied: {}", e))
    }
}

/// Sandboxed bytecode runtime is available on the host
pub struct SandboxProbe {
    registry: Arc<dyn CapabilityRegistry>,
    capability: String,
}

impl SandboxProbe {
    pub fn new(registry: Arc<dyn CapabilityRegistry>, capability: impl Into<String>) -> Self {
        Self {
            registry,
            capability: capability.into(),
        }
    }
}

#[async_trait]
impl Probe for SandboxProbe {
    fn name(&self) -> &str {
        SANDBOX_RUNTIME
    }

    async fn run(&self) -> ProbeOutcome {
        let handle = self
            .registry
            .lookup(&self.capability)
            .ok_or_else(|| format!("{} not supported", self.capability))?;

        Ok(match handle.attribute("type") {
            Some(kind) => format!("{} supported (type: {})", handle.name, kind),
            None => format!("{} supported", handle.name),
        })
    }
}

/// Model artifact answers a metadata request with 2xx
pub struct ArtifactProbe {
    source: Arc<dyn ArtifactSource>,
    url: Url,
}

impl ArtifactProbe {
    pub fn new(source: Arc<dyn ArtifactSource>, url: Url) -> Self {
        Self { source, url }
    }
}

#[async_trait]
impl Probe for ArtifactProbe {
    fn name(&self) -> &str {
        MODEL_ARTIFACT
    }

    async fn run(&self) -> ProbeOutcome {
        let status = self.source.head(&self.url).await.map_err(|e| match e {
            HandsignError::Transport(msg) => format!("error fetching model: {}", msg),
            other => format!("error fetching model: {}", other),
        })?;

        if !status.is_success() {
            return Err(format!(
                "model file not found at {} (status: {})",
                self.url.path(),
                status.status
            ));
        }

        Ok(match status.content_length {
            Some(bytes) => format!("model file accessible ({} bytes)", bytes),
            None => "model file accessible (size unknown)".to_string(),
        })
    }
}

/// Feature extractor produces a full-length vector for a synthetic hand
pub struct SelfTestProbe {
    ramp: Ramp,
}

impl SelfTestProbe {
    pub fn new(ramp: Ramp) -> Self {
        Self { ramp }
    }
}

#[async_trait]
impl Probe for SelfTestProbe {
    fn name(&self) -> &str {
        FEATURE_SELF_TEST
    }

    async fn run(&self) -> ProbeOutcome {
        let set = self
            .ramp
            .landmarks()
            .map_err(|e| format!("synthetic hand rejected: {}", e))?;
        let out = extract_with_bounds(&set);
        let values = out.features.as_slice();

        if values.len() != FEATURE_LEN {
            return Err(format!(
                "output length mismatch: expected {}, got {}",
                FEATURE_LEN,
                values.len()
            ));
        }

        let head: Vec<String> = values.iter().take(6).map(|v| format!("{:.3}", v)).collect();
        Ok(format!(
            "preprocessing ok: {} x f32, first values [{}], min x {:.3}, min y {:.3}",
            values.len(),
            head.join(", "),
            out.min_x,
            out.min_y
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactStatus;
    use crate::camera::CameraError;
    use crate::capability::{CapabilityHandle, StaticRegistry};
    use handsign_core::HandsignResult;
    use handsign_features::synthetic::{Ramp, SELF_TEST};

    struct FixedArtifact(HandsignResult<ArtifactStatus>);

    #[async_trait]
    impl ArtifactSource for FixedArtifact {
        async fn head(&self, _url: &Url) -> HandsignResult<ArtifactStatus> {
            self.0.clone()
        }
    }

    struct DeniedCamera;

    #[async_trait]
    impl CameraAccess for DeniedCamera {
        async fn request_stream(&self, _: VideoConstraints) -> Result<(), CameraError> {
            Err(CameraError::Denied("Permission denied".to_string()))
        }
    }

    fn url() -> Url {
        Url::parse("http://localhost/isl_model.onnx").unwrap()
    }

    fn registry() -> Arc<dyn CapabilityRegistry> {
        Arc::new(
            StaticRegistry::new()
                .with(CapabilityHandle::new("ort").with_attribute("wasm_paths", "/ort/"))
                .with(CapabilityHandle::new("WebAssembly").with_attribute("type", "object")),
        )
    }

    #[tokio::test]
    async fn test_runtime_probe() {
        let found = RuntimeProbe::new(registry(), "ort").run().await.unwrap();
        assert_eq!(found, "ort runtime loaded (wasm paths: /ort/)");

        let missing = RuntimeProbe::new(registry(), "tfjs").run().await.unwrap_err();
        assert_eq!(missing, "tfjs runtime not found");
    }

    #[tokio::test]
    async fn test_detector_probe_is_warning() {
        let probe = DetectorProbe::new(registry(), "Hands");
        assert_eq!(probe.severity(), Severity::Warning);
        assert!(probe.run().await.unwrap_err().contains("not found"));
    }

    #[tokio::test]
    async fn test_sandbox_probe() {
        let detail = SandboxProbe::new(registry(), "WebAssembly").run().await.unwrap();
        assert_eq!(detail, "WebAssembly supported (type: object)");
    }

    #[tokio::test]
    async fn test_camera_probe_reports_reason() {
        let err = CameraProbe::new(Arc::new(DeniedCamera)).run().await.unwrap_err();
        assert_eq!(err, "camera access denied: Permission denied");
    }

    #[tokio::test]
    async fn test_artifact_probe_size() {
        let source = FixedArtifact(Ok(ArtifactStatus {
            status: 200,
            content_length: Some(1_048_576),
        }));
        let detail = ArtifactProbe::new(Arc::new(source), url()).run().await.unwrap();
        assert_eq!(detail, "model file accessible (1048576 bytes)");
    }

    #[tokio::test]
    async fn test_artifact_probe_not_found() {
        let source = FixedArtifact(Ok(ArtifactStatus {
            status: 404,
            content_length: None,
        }));
        let err = ArtifactProbe::new(Arc::new(source), url()).run().await.unwrap_err();
        assert!(err.contains("404"));
        assert!(err.contains("/isl_model.onnx"));
    }

    #[tokio::test]
    async fn test_artifact_probe_network_error() {
        let source = FixedArtifact(Err(HandsignError::Transport("connection refused".into())));
        let err = ArtifactProbe::new(Arc::new(source), url()).run().await.unwrap_err();
        assert_eq!(err, "error fetching model: connection refused");
    }

    #[tokio::test]
    async fn test_self_test_probe() {
        let detail = SelfTestProbe::new(SELF_TEST).run().await.unwrap();
        assert!(detail.contains("42 x f32"));
        assert!(detail.contains("first values [0.200, 0.000, 0.190, 0.010, 0.180, 0.020]"));
        assert!(detail.contains("min x 0.300, min y 0.500"));
    }

    #[tokio::test]
    async fn test_self_test_probe_non_finite_ramp() {
        let ramp = Ramp {
            start: f32::INFINITY,
            step: 0.01,
        };
        let err = SelfTestProbe::new(ramp).run().await.unwrap_err();
        assert_eq!(
            err,
            "synthetic hand rejected: Non-finite coordinate at landmark 0"
        );
    }
}
