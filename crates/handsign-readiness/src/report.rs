//! Readiness report and its human-readable rendering

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info, warn};

/// How much a failed probe matters for inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Inference cannot run without it
    Fatal,
    /// Might still work, e.g. the handle is registered under another scope
    Warning,
}

/// Outcome of a single probe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    pub name: String,
    pub passed: bool,
    pub severity: Severity,
    pub detail: String,
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
}

impl ProbeResult {
    pub fn pass(name: impl Into<String>, severity: Severity, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            severity,
            detail: detail.into(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn fail(name: impl Into<String>, severity: Severity, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            severity,
            detail: detail.into(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Failed with fatal severity
    pub fn is_blocking(&self) -> bool {
        !self.passed && self.severity == Severity::Fatal
    }

    fn marker(&self) -> &'static str {
        match (self.passed, self.severity) {
            (true, _) => "[ok]",
            (false, Severity::Warning) => "[warn]",
            (false, Severity::Fatal) => "[fail]",
        }
    }
}

/// Overall status derived from the probe results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    /// Every probe passed
    Ready,
    /// Only warning-level probes failed
    Degraded,
    /// At least one fatal probe failed
    NotReady,
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallStatus::Ready => write!(f, "ready"),
            OverallStatus::Degraded => write!(f, "degraded"),
            OverallStatus::NotReady => write!(f, "not ready"),
        }
    }
}

/// Ordered probe results from one verification run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessReport {
    pub results: Vec<ProbeResult>,
    pub overall: OverallStatus,
}

impl ReadinessReport {
    pub fn new(results: Vec<ProbeResult>) -> Self {
        let overall = if results.iter().any(ProbeResult::is_blocking) {
            OverallStatus::NotReady
        } else if results.iter().any(|r| !r.passed) {
            OverallStatus::Degraded
        } else {
            OverallStatus::Ready
        };

        Self { results, overall }
    }

    /// Result for a probe by name
    pub fn get(&self, name: &str) -> Option<&ProbeResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Inference can proceed (ready or degraded)
    pub fn is_ready(&self) -> bool {
        self.overall != OverallStatus::NotReady
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ReadinessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sign model integration check")?;
        writeln!(f, "============================")?;

        for (i, result) in self.results.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "{}. {}", i + 1, result.name)?;
            writeln!(f, "   {} {}", result.marker(), result.detail)?;
        }

        let failed = self.failures().count();
        writeln!(f)?;
        writeln!(f, "============================")?;
        writeln!(
            f,
            "Status: {} ({}/{} passed)",
            self.overall,
            self.results.len() - failed,
            self.results.len()
        )?;

        if self.is_ready() {
            writeln!(f, "Next: navigate to /translate and press Play")?;
        } else {
            writeln!(f, "Next: fix the failed checks above and run again")?;
        }

        Ok(())
    }
}

/// Emit one structured event per probe plus a summary
pub fn log_report(report: &ReadinessReport) {
    for result in &report.results {
        let elapsed_ms = result.elapsed.as_millis() as u64;
        match (result.passed, result.severity) {
            (true, _) => info!(
                probe = %result.name,
                elapsed_ms,
                "{}", result.detail
            ),
            (false, Severity::Warning) => warn!(
                probe = %result.name,
                elapsed_ms,
                "{}", result.detail
            ),
            (false, Severity::Fatal) => error!(
                probe = %result.name,
                elapsed_ms,
                "{}", result.detail
            ),
        }
    }

    let failed = report.failures().count();
    if report.is_ready() {
        info!(status = %report.overall, failed, "readiness check complete");
    } else {
        error!(status = %report.overall, failed, "readiness check complete");
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}
