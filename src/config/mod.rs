mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let mut config: Config = toml::from_str(content)?;
    expand_paths(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./discwatch.toml",
        "~/.config/discwatch/config.toml",
        "/etc/discwatch/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

fn expand_paths(config: &mut Config) {
    let expand = |path: &Path| -> PathBuf {
        shellexpand::tilde(&path.to_string_lossy())
            .into_owned()
            .into()
    };

    config.hardware.snapshot = config.hardware.snapshot.as_deref().map(expand);
    config.playlist.export = config.playlist.export.as_deref().map(expand);
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.watch.poll_interval_ms == 0 {
        anyhow::bail!("Watch poll interval cannot be 0");
    }

    if config.watch.category.trim().is_empty() {
        anyhow::bail!("Watch category name cannot be empty");
    }

    if let Some(path) = &config.hardware.snapshot {
        if !path.exists() {
            tracing::warn!("Device snapshot does not exist: {:?}", path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.watch.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.watch.category, "Devices");
        assert_eq!(config.watch.audio_cd_label, "Audio CD");
        assert!(config.hardware.snapshot.is_none());
        assert!(config.playlist.export.is_none());
        assert!(config.playlist.capacity.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = parse_config(
            r#"
            [watch]
            poll_interval_ms = 250
            category = "Discs"
            audio_cd_label = "CD Audio"

            [hardware]
            snapshot = "/var/lib/discwatch/devices.json"

            [playlist]
            export = "/tmp/devices.m3u"
            capacity = 16
            "#,
        )
        .unwrap();

        assert_eq!(config.watch.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.watch.category, "Discs");
        assert_eq!(config.watch.audio_cd_label, "CD Audio");
        assert_eq!(
            config.hardware.snapshot,
            Some(PathBuf::from("/var/lib/discwatch/devices.json"))
        );
        assert_eq!(config.playlist.export, Some(PathBuf::from("/tmp/devices.m3u")));
        assert_eq!(config.playlist.capacity, Some(16));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let err = parse_config("[watch]\npoll_interval_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("poll interval"));
    }

    #[test]
    fn test_blank_category_rejected() {
        assert!(parse_config("[watch]\ncategory = \"  \"\n").is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discwatch.toml");
        std::fs::write(&path, "[watch]\ncategory = \"Optical\"\n").unwrap();

        let config = load_config_or_default(Some(&path)).unwrap();
        assert_eq!(config.watch.category, "Optical");
    }

    #[test]
    fn test_load_missing_explicit_config_fails() {
        let err = load_config(Path::new("/nonexistent/discwatch.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
