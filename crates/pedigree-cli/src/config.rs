//! Configuration resolution for the CLI
//!
//! The effective configuration is a TOML file, found in one of several
//! locations (explicit path, local directory, system directory), with the
//! layout flags of the command line applied on top. Only the merged result is
//! validated, so a flag can repair a setting the file gets wrong.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use pedigree::{PedigreeError, config::AppConfig};

use crate::Args;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for PedigreeError {
    fn from(err: ConfigError) -> Self {
        PedigreeError::Config(err.to_string())
    }
}

/// Build the configuration for one run.
///
/// Loads the configuration file, applies the layout overrides of `args` and
/// validates the result.
///
/// # Errors
///
/// Returns the errors of [`load_config`] and of [`AppConfig::validate`] on the
/// merged settings.
pub fn resolve_config(args: &Args) -> Result<AppConfig, PedigreeError> {
    let mut config = load_config(args.config.as_ref())?;
    args.apply_overrides(config.layout_mut());
    config.validate()?;

    let layout = config.layout();
    debug!(
        max_depth = layout.max_depth(),
        style:% = layout.style(),
        direction:% = layout.direction();
        "Resolved layout configuration"
    );
    Ok(config)
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (pedigree/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, PedigreeError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("pedigree/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "pedigree", "pedigree") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file is missing, cannot be read or is not valid TOML.
/// Settings are not validated here; see [`resolve_config`].
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, PedigreeError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    toml::from_str(&content).map_err(|e| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::tempdir;

    use pedigree::chart::TreeStyle;

    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["pedigree", "family.toml"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[layout]\nmax_depth = 3\nstyle = \"expanded\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.layout().max_depth(), 3);
        assert_eq!(config.layout().style(), TreeStyle::Expanded);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, PedigreeError::Config(msg) if msg.contains("Missing")));
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[layout\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(
            err,
            PedigreeError::Config(msg) if msg.contains("parse") && msg.contains("config.toml")
        ));
    }

    #[test]
    fn test_flags_repair_file_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[layout]\nmax_depth = 7\nstyle = \"compact\"\n").unwrap();
        let config_path = path.to_string_lossy().to_string();

        // The file alone loads but cannot be laid out.
        let err = resolve_config(&args(&["--config", &config_path])).unwrap_err();
        assert!(matches!(
            err,
            PedigreeError::InvalidDepth {
                style: TreeStyle::Compact,
                depth: 7,
            }
        ));

        let config = resolve_config(&args(&["--config", &config_path, "--style", "standard"]))
            .unwrap();
        assert_eq!(config.layout().style(), TreeStyle::Standard);
        assert_eq!(config.layout().max_depth(), 7);

        let config = resolve_config(&args(&["--config", &config_path, "--depth", "4"])).unwrap();
        assert_eq!(config.layout().style(), TreeStyle::Compact);
        assert_eq!(config.layout().max_depth(), 4);
    }

    #[test]
    fn test_flags_are_validated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();
        let config_path = path.to_string_lossy().to_string();

        let err = resolve_config(&args(&["--config", &config_path, "--depth", "12"])).unwrap_err();
        assert!(matches!(err, PedigreeError::DepthOutOfRange(12)));
    }
}
