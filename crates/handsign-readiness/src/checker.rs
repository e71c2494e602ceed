//! Readiness checker - runs every probe and collects the report

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

use handsign_core::HandsignResult;
use handsign_features::synthetic::SELF_TEST;

use crate::artifact::{ArtifactSource, HttpArtifactSource};
use crate::camera::{CameraAccess, DeviceCamera};
use crate::capability::CapabilityRegistry;
use crate::config::ReadinessConfig;
use crate::probe::{
    ArtifactProbe, CameraProbe, DetectorProbe, Probe, RuntimeProbe, SandboxProbe, SelfTestProbe,
};
use crate::report::{ProbeResult, ReadinessReport};

/// Runs a fixed, ordered set of independent probes
pub struct ReadinessChecker {
    probes: Vec<Arc<dyn Probe>>,
    probe_timeout: Duration,
}

impl ReadinessChecker {
    /// Checker with no probes; add them with [`ReadinessChecker::with_probe`]
    pub fn new(probe_timeout: Duration) -> Self {
        Self {
            probes: Vec::new(),
            probe_timeout,
        }
    }

    /// The standard six probes wired to the given environment
    pub fn standard(
        config: &ReadinessConfig,
        registry: Arc<dyn CapabilityRegistry>,
        camera: Arc<dyn CameraAccess>,
        artifacts: Arc<dyn ArtifactSource>,
    ) -> HandsignResult<Self> {
        let url = config.artifact_url()?;

        Ok(Self::new(config.probe_timeout)
            .with_probe(RuntimeProbe::new(
                registry.clone(),
                config.runtime_capability.as_str(),
            ))
            .with_probe(DetectorProbe::new(
                registry.clone(),
                config.detector_capability.as_str(),
            ))
            .with_probe(CameraProbe::new(camera))
            .with_probe(SandboxProbe::new(
                registry,
                config.sandbox_capability.as_str(),
            ))
            .with_probe(ArtifactProbe::new(artifacts, url))
            .with_probe(SelfTestProbe::new(SELF_TEST)))
    }

    /// Standard probes using the device camera and HTTP artifact source
    pub fn from_config(
        config: &ReadinessConfig,
        registry: Arc<dyn CapabilityRegistry>,
    ) -> HandsignResult<Self> {
        Self::standard(
            config,
            registry,
            Arc::new(DeviceCamera::new(config.camera_device.clone())),
            Arc::new(HttpArtifactSource::with_timeout(config.probe_timeout)?),
        )
    }

    /// Append a probe; report order follows registration order
    pub fn with_probe(mut self, probe: impl Probe + 'static) -> Self {
        self.probes.push(Arc::new(probe));
        self
    }

    pub fn probe_names(&self) -> Vec<&str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    /// Run every probe concurrently and wait for all of them
    ///
    /// Never fails: timeouts, errors and panics inside a probe all become
    /// failed results for that probe only.
    pub async fn verify(&self) -> ReadinessReport {
        let handles: Vec<JoinHandle<ProbeResult>> = self
            .probes
            .iter()
            .map(|probe| tokio::spawn(run_probe(Arc::clone(probe), self.probe_timeout)))
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (probe, handle) in self.probes.iter().zip(handles) {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    warn!(probe = probe.name(), error = %e, "probe task failed");
                    ProbeResult::fail(
                        probe.name(),
                        probe.severity(),
                        format!("probe aborted: {}", e),
                    )
                }
            };
            results.push(result);
        }

        ReadinessReport::new(results)
    }
}

async fn run_probe(probe: Arc<dyn Probe>, limit: Duration) -> ProbeResult {
    let start = Instant::now();
    debug!(probe = probe.name(), "probe started");

    let result = match timeout(limit, probe.run()).await {
        Ok(Ok(detail)) => ProbeResult::pass(probe.name(), probe.severity(), detail),
        Ok(Err(detail)) => ProbeResult::fail(probe.name(), probe.severity(), detail),
        Err(_) => {
            warn!(probe = probe.name(), ?limit, "probe timed out");
            ProbeResult::fail(
                probe.name(),
                probe.severity(),
                format!("timed out after {}", humantime::format_duration(limit)),
            )
        }
    };

    let elapsed = start.elapsed();
    debug!(probe = probe.name(), passed = result.passed, ?elapsed, "probe finished");
    result.with_elapsed(elapsed)
}
