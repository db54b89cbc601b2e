//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).
//!
//! A configuration file has two top-level tables:
//!
//! ```toml
//! [diagram.render]
//! engine = "builtin"
//! format = "svg"
//!
//! [diagram.style]
//! background_color = "white"
//!
//! [probe]
//! bucket_prefix = "ci-credentials"
//! region = "eu-west-1"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use nimbus::{NimbusError, config::AppConfig};
use nimbus_probe::ProbeConfig;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for NimbusError {
    fn from(err: ConfigError) -> Self {
        NimbusError::Config(err.to_string())
    }
}

/// Everything the CLI reads from a configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    diagram: AppConfig,

    #[serde(default)]
    probe: ProbeConfig,
}

impl Settings {
    pub fn diagram(&self) -> &AppConfig {
        &self.diagram
    }

    pub fn probe(&self) -> &ProbeConfig {
        &self.probe
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (nimbus/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<Settings, NimbusError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("nimbus/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "nimbus", "nimbus") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. If no config is found, return default config
    debug!("No configuration file found, using default configuration");
    Ok(Settings::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<Settings, NimbusError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    parse_settings(&content).map_err(|message| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        }
        .into()
    })
}

fn parse_settings(content: &str) -> Result<Settings, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use nimbus::{Engine, OutputFormat};

    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let settings = parse_settings(
            r##"
            [diagram.render]
            engine = "builtin"
            format = "svg"

            [diagram.style]
            font_color = "#2d3436"

            [probe]
            bucket_prefix = "ci-credentials"
            endpoint_url = "http://localhost:9000"
            force_path_style = true
            "##,
        )
        .unwrap();

        assert_eq!(settings.diagram().render().engine(), Engine::Builtin);
        assert_eq!(settings.diagram().render().format(), OutputFormat::Svg);
        assert_eq!(settings.probe().bucket_prefix(), "ci-credentials");
        assert_eq!(settings.probe().endpoint_url(), Some("http://localhost:9000"));
        assert!(settings.probe().force_path_style());
    }

    #[test]
    fn test_graph_attributes_keep_file_order() {
        let settings = parse_settings(
            r#"
            [diagram.style.graph_attributes]
            splines = "curved"
            dpi = "150"
            concentrate = "true"
            "#,
        )
        .unwrap();

        let keys: Vec<_> = settings
            .diagram()
            .style()
            .graph_attributes()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["splines", "dpi", "concentrate"]);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings.diagram().render().format(), OutputFormat::Png);
        assert_eq!(settings.probe(), &ProbeConfig::default());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = load_config(Some("definitely/not/here.toml"));
        assert!(matches!(result, Err(NimbusError::Config(msg)) if msg.contains("Missing")));
    }

    #[test]
    fn test_explicit_file_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[probe]\nregion = \"ap-south-1\"").unwrap();

        let settings = load_config(Some(file.path())).unwrap();
        assert_eq!(settings.probe().region(), Some("ap-south-1"));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[diagram.render]\nengine = \"gnuplot\"").unwrap();

        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(NimbusError::Config(msg)) if msg.contains("parse")));
    }
}
