mod cli;

use discwatch::classifier::{classify_all, DeviceClassifier};
use discwatch::config::{self, Config};
use discwatch::hal::DeviceSnapshot;
use discwatch::playlist::{MemoryPlaylist, MemoryPlaylistHost};
use discwatch::watcher::DeviceWatcher;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "discwatch=trace,discwatch_common=debug".to_string()
        } else {
            "discwatch=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Watch { snapshot, export } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(watch(config, snapshot, export))
        }
        Commands::Scan { snapshot, json } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            scan(&config, snapshot, json)
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("discwatch {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn snapshot_path(config: &Config, cli_path: Option<PathBuf>) -> Result<PathBuf> {
    cli_path
        .or_else(|| config.hardware.snapshot.clone())
        .context("No device snapshot configured (use --snapshot or [hardware].snapshot)")
}

fn load_snapshot(path: &Path) -> Result<DeviceSnapshot> {
    DeviceSnapshot::load(path)
        .with_context(|| format!("Failed to load device snapshot: {:?}", path))
}

async fn watch(config: Config, snapshot: Option<PathBuf>, export: Option<PathBuf>) -> Result<()> {
    let path = snapshot_path(&config, snapshot)?;
    let hardware = Arc::new(load_snapshot(&path)?.into_hardware());

    let playlist = match config.playlist.capacity {
        Some(capacity) => MemoryPlaylist::with_capacity(capacity),
        None => MemoryPlaylist::new(),
    };
    let playlist = Arc::new(Mutex::new(playlist));
    let host = Arc::new(MemoryPlaylistHost::new(playlist.clone()));

    let watcher = DeviceWatcher::new(config.watch.clone(), hardware, host);

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel.clone()));

    tracing::info!("Watching for optical discs in {:?}", path);
    let report = watcher.run(cancel).await?;

    for request in &report.inserted {
        println!("{request}");
    }

    if let Some(export) = export.or(config.playlist.export) {
        let playlist = playlist.lock();
        let m3u = playlist
            .node_by_name(&config.watch.category)
            .and_then(|node| playlist.to_m3u(node.id))
            .unwrap_or_else(|| "#EXTM3U\n".to_string());
        std::fs::write(&export, m3u)
            .with_context(|| format!("Failed to write playlist export: {:?}", export))?;
        tracing::info!("Exported {} entries to {:?}", report.inserted.len(), export);
    }

    Ok(())
}

fn scan(config: &Config, snapshot: Option<PathBuf>, json: bool) -> Result<()> {
    let path = snapshot_path(config, snapshot)?;
    let hardware = load_snapshot(&path)?.into_hardware();
    let classifier = DeviceClassifier::new(config.watch.audio_cd_label.clone());

    let entries = classify_all(&hardware, &classifier)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        match (&entry.request, &entry.error) {
            (Some(request), _) => println!("{}: {}", entry.device, request),
            (None, Some(error)) => println!("{}: error: {}", entry.device, error),
            (None, None) => println!("{}: no action", entry.device),
        }
    }

    Ok(())
}

fn validate_config(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    println!("Configuration is valid");
    println!("  Poll interval: {} ms", config.watch.poll_interval_ms);
    println!("  Category: {}", config.watch.category);
    println!("  Audio CD label: {}", config.watch.audio_cd_label);
    match &config.hardware.snapshot {
        Some(path) => println!("  Device snapshot: {}", path.display()),
        None => println!("  Device snapshot: (none)"),
    }

    Ok(())
}

/// Wait for SIGINT or SIGTERM, then cancel the watcher.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
        _ = cancel.cancelled() => {}
    }

    tracing::info!("Shutdown signal received");
    cancel.cancel();
}
