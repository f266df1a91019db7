//! Bridge configuration schemas.
//!
//! The configuration is read from an optional TOML file and overlaid with
//! environment variables prefixed with `CKBRIDGE`. Every field has a
//! default, so an empty configuration is valid.

pub mod logging;
pub mod runner;
pub mod tools;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

pub use self::logging::LoggingConfig;
pub use self::runner::RunnerConfig;
pub use self::tools::{ResolvedTools, ToolPaths};

use crate::error::BridgeResult;

/// Root configuration.
#[derive(Debug, Clone, Default, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Locations of the external executables.
    pub tools: ToolPaths,
    /// Process invocation settings.
    #[validate(nested)]
    pub runner: RunnerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl BridgeConfig {
    /// Load configuration from an optional TOML file and the environment.
    ///
    /// A missing file is not an error; values then come from the
    /// environment (`CKBRIDGE` prefix, `__` separator) and the defaults.
    pub fn load(path: Option<&Path>) -> BridgeResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!(path = %path.display(), "Adding configuration file");
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let config: BridgeConfig = builder
            .add_source(
                config::Environment::with_prefix("CKBRIDGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert!(config.tools.install_dir.is_none());
        assert!(config.runner.timeout_seconds.is_none());
        assert!(config.runner.echo_output);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config =
            BridgeConfig::load(Some(&temp.path().join("absent.toml"))).expect("load defaults");
        assert!(config.runner.timeout_seconds.is_none());
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("ckbridge.toml");
        std::fs::write(
            &file,
            r#"
[tools]
install_dir = "/opt/ckcmd"
hkxcmd = "/usr/local/bin/hkxcmd"

[runner]
timeout_seconds = 120
echo_output = false

[logging]
level = "debug"
"#,
        )
        .expect("write");

        let config = BridgeConfig::load(Some(&file)).expect("load");
        assert_eq!(config.runner.timeout_seconds, Some(120));
        assert!(!config.runner.echo_output);
        assert_eq!(config.logging.level, "debug");

        let tools = config.tools.resolve();
        assert_eq!(tools.ckcmd, Path::new("/opt/ckcmd/bin/ck-cmd.exe"));
        assert_eq!(tools.hkxcmd, Path::new("/usr/local/bin/hkxcmd"));
    }

    #[test]
    fn test_load_rejects_zero_timeout() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("ckbridge.toml");
        std::fs::write(&file, "[runner]\ntimeout_seconds = 0\n").expect("write");

        let result = BridgeConfig::load(Some(&file));
        assert!(matches!(result, Err(BridgeError::Validation(_))));
    }

    #[test]
    fn test_toml_partial_section() {
        let config: BridgeConfig =
            toml::from_str("[logging]\nformat = \"json\"\n").expect("parse toml");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert!(config.runner.echo_output);
    }
}
