use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use vouch_store::FsArtifactStore;

use crate::error::{ConfigError, VerifyError};

/// Service configuration, read once at startup.
///
/// Layers, lowest first: built-in defaults, the TOML file, the legacy
/// `FILE_BASE_PATH` variable, `VOUCH_*` variables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the artifact tree. Required to serve verification requests.
    pub file_base_path:     Option<PathBuf>,
    pub extension:          String,
    pub audit_path:         PathBuf,
    pub cache:              bool,
    pub request_timeout_ms: Option<u64>,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log:                String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_base_path:     None,
            extension:          "json".into(),
            audit_path:         PathBuf::from("vouch-audit"),
            cache:              false,
            request_timeout_ms: None,
            log:                "info".into(),
        }
    }
}

impl Config {
    pub const FILE_NAME: &'static str = "vouch.toml";
    const ENV_PREFIX: &'static str = "VOUCH_";
    const LEGACY_ROOT_VAR: &'static str = "FILE_BASE_PATH";

    /// Defaults only; merge further providers onto this.
    pub fn base() -> Figment { Figment::from(Serialized::defaults(Self::default())) }

    pub fn figment(file: Option<&Path>) -> Figment {
        let file = file.map_or_else(|| PathBuf::from(Self::FILE_NAME), Path::to_path_buf);
        Self::base()
            .merge(Toml::file(file))
            .merge(Env::raw().only(&[Self::LEGACY_ROOT_VAR]))
            .merge(Env::prefixed(Self::ENV_PREFIX))
    }

    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(file))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> { Ok(figment.extract()?) }

    /// The artifact store this configuration points at.
    pub fn artifact_store(&self) -> Result<FsArtifactStore, VerifyError> {
        match &self.file_base_path {
            Some(root) if !root.as_os_str().is_empty() => {
                Ok(FsArtifactStore::new(root).extension(self.extension.clone()))
            }
            _ => Err(VerifyError::ConfigurationMissing),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_figment(Config::base()).unwrap();
        assert_eq!(config, Config::default());
        assert!(matches!(config.artifact_store(), Err(VerifyError::ConfigurationMissing)));
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let figment = Config::base().merge(Toml::string(
            r#"
            file_base_path = "/srv/artifacts"
            extension = "bin"
            cache = true
            request_timeout_ms = 1500
            "#,
        ));
        let config = Config::from_figment(figment).unwrap();

        assert!(config.cache);
        assert_eq!(config.request_timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(config.audit_path, PathBuf::from("vouch-audit"));

        let store = config.artifact_store().unwrap();
        assert_eq!(store.root(), Path::new("/srv/artifacts"));
        let key = vouch_store::ArtifactKey::new("core", "1.0.0").unwrap();
        assert_eq!(store.path_of(&key), Path::new("/srv/artifacts/core/1.0.0.bin"));
    }

    #[test]
    fn test_empty_root_counts_as_missing() {
        let figment = Config::base().merge(Toml::string(r#"file_base_path = """#));
        let config = Config::from_figment(figment).unwrap();
        assert!(matches!(config.artifact_store(), Err(VerifyError::ConfigurationMissing)));
    }

    #[test]
    fn test_bad_value_is_an_error() {
        let figment = Config::base().merge(Toml::string(r#"cache = "sometimes""#));
        assert!(Config::from_figment(figment).is_err());
    }
}
