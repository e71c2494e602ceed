//! handsign Readiness - Environment checks for the sign classification pipeline
//!
//! Before the live loop starts (detector → feature extractor → inference),
//! the checker runs six independent probes:
//! 1. Inference runtime registered
//! 2. Hand-landmark detector registered (warning only)
//! 3. Camera access
//! 4. Sandboxed bytecode runtime supported
//! 5. Model artifact reachable (metadata only)
//! 6. Feature extractor self-test on a synthetic hand
//!
//! Probes start together and are awaited together. A failing, hanging or
//! panicking probe only affects its own result.

pub mod artifact;
pub mod camera;
pub mod capability;
pub mod checker;
pub mod config;
pub mod probe;
pub mod report;

pub use artifact::{ArtifactSource, ArtifactStatus, HttpArtifactSource};
pub use camera::{CameraAccess, CameraError, DeviceCamera, VideoConstraints};
pub use capability::{
    CapabilityHandle, CapabilityRegistry, HostRegistry, LayeredRegistry, StaticRegistry,
};
pub use checker::ReadinessChecker;
pub use config::ReadinessConfig;
pub use probe::{Probe, ProbeOutcome};
pub use report::{log_report, OverallStatus, ProbeResult, ReadinessReport, Severity};
