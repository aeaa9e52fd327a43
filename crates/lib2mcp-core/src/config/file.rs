//! File-based server configuration (YAML)
//!
//! Default location is `~/.config/lib2mcp/config.yaml`. Command line flags
//! override anything read from here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ConfigResult;
use super::spec::LibrarySpec;

/// Default host for the streamable HTTP transport
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default port for the streamable HTTP transport
pub const DEFAULT_PORT: u16 = 8000;
/// Default transport name
pub const DEFAULT_TRANSPORT: &str = "stdio";

/// Configuration file structure
///
/// ```yaml
/// name: Math tools
/// transport: streamable-http
/// port: 9000
/// libraries:
///   math: [sqrt, exp]
///   token: ~
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    /// Server name reported to clients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Transport: `stdio` or `streamable-http`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Library specification, kept untyped until validated
    #[serde(default, skip_serializing_if = "serde_yaml::Value::is_null")]
    pub libraries: serde_yaml::Value,
}

impl ConfigFile {
    /// Validate and return the library specification
    pub fn library_spec(&self) -> ConfigResult<LibrarySpec> {
        Ok(LibrarySpec::from_value(&self.libraries)?)
    }

    pub fn transport_or_default(&self) -> &str {
        self.transport.as_deref().unwrap_or(DEFAULT_TRANSPORT)
    }

    pub fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}

/// File-based configuration provider
///
/// # Example
///
/// ```no_run
/// use lib2mcp_core::config::FileConfigProvider;
///
/// let config = FileConfigProvider::user().load().unwrap();
/// let spec = config.library_spec().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    /// Create a provider for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a user-level provider (~/.config/lib2mcp/config.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("lib2mcp").join("config.yaml"))
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the config file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load config from file; a missing file is an empty config
    pub fn load(&self) -> ConfigResult<ConfigFile> {
        if !self.exists() {
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load config from a file the user named; a missing file is an error
    pub fn load_required(&self) -> ConfigResult<ConfigFile> {
        if !self.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("config file not found: {}", self.path.display()),
            )
            .into());
        }
        self.load()
    }

    /// Save config to file
    pub fn save(&self, config: &ConfigFile) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_yaml::to_string(config)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, Selector, SpecError};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::new(dir.path().join("config.yaml"));

        assert!(!provider.exists());
        let config = provider.load().unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.transport_or_default(), "stdio");
        assert_eq!(config.host_or_default(), "127.0.0.1");
        assert_eq!(config.port_or_default(), 8000);
        assert!(config.library_spec().unwrap().is_empty());
    }

    #[test]
    fn test_missing_named_file_is_an_error() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::new(dir.path().join("typo.yaml"));

        let err = provider.load_required().unwrap_err();
        assert!(matches!(err, ConfigError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
        assert!(err.to_string().contains("typo.yaml"));

        fs::write(provider.path(), "name: Named\n").unwrap();
        assert_eq!(provider.load_required().unwrap().name.as_deref(), Some("Named"));
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "name: Math tools\ntransport: streamable-http\nport: 9000\nlibraries:\n  math: [sqrt, exp]\n  token: ~\n",
        )
        .unwrap();

        let config = FileConfigProvider::new(&path).load().unwrap();
        assert_eq!(config.name.as_deref(), Some("Math tools"));
        assert_eq!(config.transport_or_default(), "streamable-http");
        assert_eq!(config.port_or_default(), 9000);

        let spec = config.library_spec().unwrap();
        let entries: Vec<_> = spec.entries().map(|(l, s)| (l.to_string(), s.clone())).collect();
        assert_eq!(entries[0].0, "math");
        assert_eq!(entries[1], ("token".to_string(), Selector::All));
    }

    #[test]
    fn test_invalid_libraries_section() {
        let config: ConfigFile = serde_yaml::from_str("libraries:\n  math: 42\n").unwrap();
        let err = config.library_spec().unwrap_err();
        assert!(matches!(err, ConfigError::Spec(SpecError::InvalidSelector { .. })));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::new(dir.path().join("nested").join("config.yaml"));

        let config = ConfigFile {
            name: Some("Token tools".to_string()),
            libraries: LibrarySpec::new().with("token", Selector::All).to_value(),
            ..Default::default()
        };
        provider.save(&config).unwrap();

        assert!(provider.exists());
        assert_eq!(provider.load().unwrap(), config);
    }
}
