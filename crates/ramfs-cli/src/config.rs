//! Filesystem limits loaded from TOML.
//!
//! Looks for, in order: the `--config` path, then
//! `<config dir>/ramfs/config.toml`, then falls back to the defaults.
//! Command-line overrides are applied last and the result is validated.
//!
//! ```toml
//! max_children = 256
//! max_name_len = 64
//! max_depth = 32
//! ```

use anyhow::{Context, Result};
use ramfs_core::FsConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Gets the default configuration file path.
///
/// Returns platform-specific config path:
/// - Linux: `$XDG_CONFIG_HOME/ramfs/config.toml` or `~/.config/ramfs/config.toml`
/// - macOS: `~/Library/Application Support/ramfs/config.toml`
/// - Windows: `%APPDATA%\ramfs\config.toml`
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ramfs").join("config.toml"))
}

/// Parses and validates limits from TOML text.
///
/// Missing keys take their defaults. Unknown keys are rejected.
///
/// # Errors
///
/// Returns an error if the text is not valid TOML, has unknown keys, or
/// holds out-of-range limits.
///
/// # Examples
///
/// ```
/// use ramfs_cli::config::parse_config;
///
/// let config = parse_config("max_children = 16")?;
/// assert_eq!(config.max_children, 16);
/// assert_eq!(config.max_depth, 255);
///
/// assert!(parse_config("max_childern = 16").is_err());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parse_config(content: &str) -> Result<FsConfig> {
    let config: FsConfig = toml::from_str(content).context("failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

/// Loads limits from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<FsConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&content).with_context(|| format!("invalid config file {}", path.display()))
}

/// Resolves the limits for a session.
///
/// An explicit `path` must exist. Without one, the default location is used
/// when present. `max_children` overrides whatever the file says.
///
/// # Errors
///
/// Returns an error if a config file is unreadable or invalid, or if the
/// override produces out-of-range limits.
pub fn resolve_config(path: Option<&Path>, max_children: Option<usize>) -> Result<FsConfig> {
    let mut config = match path.map(Path::to_path_buf).or_else(existing_default) {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            load_config_file(&path)?
        }
        None => {
            debug!("Config file not found, using defaults");
            FsConfig::default()
        }
    };

    if let Some(max_children) = max_children {
        config.max_children = max_children;
    }
    config.validate()?;

    Ok(config)
}

fn existing_default() -> Option<PathBuf> {
    default_config_path().filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r"
            max_children = 8
            max_name_len = 32
            max_depth = 4
        ";
        let config = parse_config(toml_str).unwrap();

        assert_eq!(config.max_children, 8);
        assert_eq!(config.max_name_len, 32);
        assert_eq!(config.max_depth, 4);
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(parse_config("").unwrap(), FsConfig::default());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(parse_config("max_depth = 300").is_err());
        assert!(parse_config("max_children = 0").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(parse_config("colour = \"blue\"").is_err());
    }

    #[test]
    fn test_default_path_shape() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("ramfs/config.toml"));
        }
    }
}
