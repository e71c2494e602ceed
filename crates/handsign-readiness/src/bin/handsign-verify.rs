//! handsign-verify - check that the environment can run sign classification
//!
//! Prints one section per probe and exits non-zero when a fatal probe fails.
//! Flags override the `HANDSIGN_*` environment variables.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use handsign_readiness::config::parse_timeout;
use handsign_readiness::{
    log_report, CapabilityHandle, HostRegistry, LayeredRegistry, ReadinessChecker,
    ReadinessConfig, StaticRegistry,
};

#[derive(Parser)]
#[command(name = "handsign-verify")]
#[command(author, version, about = "Verify the sign model pipeline can run here")]
struct Cli {
    /// Origin serving the model artifact
    #[arg(long)]
    base_url: Option<String>,

    /// Path of the model artifact
    #[arg(long)]
    model_path: Option<String>,

    /// Per-probe timeout (e.g. 3s, 500ms)
    #[arg(long, value_parser = parse_timeout_arg)]
    timeout: Option<std::time::Duration>,

    /// Video device used for the camera probe
    #[arg(long)]
    camera_device: Option<PathBuf>,

    /// Capability available in this environment, as name[:key=value,...]
    #[arg(long = "provide", value_name = "CAPABILITY")]
    provide: Vec<CapabilityHandle>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn parse_timeout_arg(value: &str) -> Result<std::time::Duration, String> {
    parse_timeout(value).map_err(|e| e.to_string())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = ReadinessConfig::from_env()?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }
    if let Some(path) = cli.model_path {
        config.model_path = path;
    }
    if let Some(timeout) = cli.timeout {
        config.probe_timeout = timeout;
    }
    if let Some(device) = cli.camera_device {
        config.camera_device = device;
    }

    let provided = StaticRegistry::new();
    for handle in cli.provide {
        provided.register(handle);
    }
    let registry = Arc::new(LayeredRegistry::new(
        provided,
        HostRegistry::new(config.sandbox_capability.clone()),
    ));

    let checker = ReadinessChecker::from_config(&config, registry)?;
    tracing::debug!(probes = ?checker.probe_names(), "running readiness probes");
    let report = checker.verify().await;
    log_report(&report);

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    Ok(if report.is_ready() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
