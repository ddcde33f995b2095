//! ProofMesh daemon — hosts a single engine and serves a JSON-lines command
//! stream on stdin/stdout.

mod dispatch;
mod protocol;

use anyhow::Context;
use clap::Parser;
use proofmesh_engine::{MeshConfig, MeshEvent, MeshSnapshot, ProofMesh};
use proofmesh_types::{ActorId, Clock, SystemClock};
use proofmesh_utils::LogFormat;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Parser)]
#[command(name = "proofmesh-daemon", about = "ProofMesh proof registration and attestation engine")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "PROOFMESH_CONFIG")]
    config: Option<PathBuf>,

    /// Administrative owner identity.
    #[arg(long, env = "PROOFMESH_OWNER")]
    owner: Option<String>,

    /// Distinct attestations required before a proof is verified.
    #[arg(long, env = "PROOFMESH_MIN_VERIFICATIONS")]
    min_verifications: Option<u32>,

    /// Start with mutations paused.
    #[arg(long, env = "PROOFMESH_START_PAUSED")]
    start_paused: bool,

    /// Log format: "human" or "json".
    #[arg(long, env = "PROOFMESH_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "PROOFMESH_LOG_LEVEL")]
    log_level: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Serve commands from stdin until EOF or Ctrl-C.
    Run {
        /// Snapshot file: restored on start if present, written on shutdown.
        #[arg(long, env = "PROOFMESH_SNAPSHOT")]
        snapshot: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML and exit.
    PrintConfig,
}

impl Cli {
    /// Effective configuration: file (or defaults), then CLI/env overrides.
    fn resolve_config(&self) -> anyhow::Result<MeshConfig> {
        let mut config = match &self.config {
            Some(path) => MeshConfig::from_toml_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => MeshConfig::default(),
        };
        if let Some(owner) = &self.owner {
            config.owner = ActorId::parse(owner.as_str()).context("invalid --owner")?;
        }
        if let Some(n) = self.min_verifications {
            config.min_verifications = n;
        }
        if self.start_paused {
            config.start_paused = true;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    match &cli.command {
        Command::PrintConfig => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
        Command::Run { snapshot } => {
            proofmesh_utils::init_logging(config.log_format, &config.log_level);
            run(config, snapshot.as_deref()).await
        }
    }
}

async fn run(config: MeshConfig, snapshot_path: Option<&Path>) -> anyhow::Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mesh = match snapshot_path {
        Some(path) if path.exists() => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("reading snapshot {}", path.display()))?;
            let snapshot = MeshSnapshot::from_bytes(&bytes)?;
            tracing::info!(path = %path.display(), taken_at = %snapshot.taken_at, "restoring snapshot");
            ProofMesh::restore(snapshot, clock)?
        }
        _ => ProofMesh::from_config(&config, clock)?,
    };
    mesh.subscribe(log_event);

    tracing::info!(
        owner = %mesh.owner(),
        min_verifications = mesh.params().min_verifications,
        paused = mesh.is_paused(),
        "ProofMesh daemon ready"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let mut reply = dispatch::handle_line(&mesh, line);
                reply.push('\n');
                stdout.write_all(reply.as_bytes()).await?;
                stdout.flush().await?;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    if let Some(path) = snapshot_path {
        let bytes = mesh.snapshot()?.to_bytes()?;
        tokio::fs::write(path, bytes)
            .await
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        tracing::info!(path = %path.display(), proofs = mesh.total_proofs(), "snapshot written");
    }
    tracing::info!("ProofMesh daemon exited cleanly");
    Ok(())
}

fn log_event(event: &MeshEvent) {
    match serde_json::to_string(event) {
        Ok(json) => tracing::info!(target: "proofmesh::events", event = event.name(), %json),
        Err(e) => tracing::warn!(error = %e, "failed to encode event"),
    }
}
