use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "innkeep.toml";
const ENV_BIND_ADDRESS: &str = "INNKEEP_BIND_ADDRESS";
const ENV_PORT: &str = "INNKEEP_PORT";
const ENV_LOG_LEVEL: &str = "INNKEEP_LOG_LEVEL";
const ENV_LOG_FORMAT: &str = "INNKEEP_LOG_FORMAT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig { bind_address: "127.0.0.1".to_string(), port: 8080 },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    server: Option<ServerPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            config.apply_patch(read_patch(&path)?);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
        }
        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(bind_address) = env::var(ENV_BIND_ADDRESS) {
            self.server.bind_address = bind_address;
        }
        if let Ok(port) = env::var(ENV_PORT) {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                key: ENV_PORT.to_string(),
                value: port.clone(),
            })?;
        }
        if let Ok(level) = env::var(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Ok(format) = env::var(ENV_LOG_FORMAT) {
            self.logging.format =
                format.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                    key: ENV_LOG_FORMAT.to_string(),
                    value: format.clone(),
                })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::Validation("server.bind_address must not be empty".into()));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation("logging.level must not be empty".into()));
        }
        Ok(())
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) if path.exists() => Some(path.to_path_buf()),
        Some(_) | None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    }
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&contents)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Mutex, OnceLock};

    use super::{AppConfig, ConfigError, LoadOptions, LogFormat};

    // Env mutation is process-global; serialize the tests that touch it.
    fn env_guard() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn clear_env() {
        for key in
            ["INNKEEP_BIND_ADDRESS", "INNKEEP_PORT", "INNKEEP_LOG_LEVEL", "INNKEEP_LOG_FORMAT"]
        {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let _guard = env_guard();
        clear_env();

        let config = AppConfig::load(LoadOptions::default()).expect("default load");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn file_values_override_defaults() {
        let _guard = env_guard();
        clear_env();

        let mut file = tempfile::NamedTempFile::new().expect("temp config");
        writeln!(
            file,
            "[server]\nport = 9100\n\n[logging]\nlevel = \"debug\"\nformat = \"json\""
        )
        .expect("write config");

        let config = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
        })
        .expect("load from file");

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.bind_address, "127.0.0.1", "unset keys keep defaults");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn env_overrides_beat_file_values() {
        let _guard = env_guard();
        clear_env();
        std::env::set_var("INNKEEP_PORT", "9200");
        std::env::set_var("INNKEEP_LOG_FORMAT", "pretty");

        let config = AppConfig::load(LoadOptions::default()).expect("load with env");
        assert_eq!(config.server.port, 9200);
        assert_eq!(config.logging.format, LogFormat::Pretty);

        clear_env();
    }

    #[test]
    fn malformed_env_port_is_a_typed_error() {
        let _guard = env_guard();
        clear_env();
        std::env::set_var("INNKEEP_PORT", "not-a-port");

        let error = AppConfig::load(LoadOptions::default()).expect_err("bad port");
        assert!(matches!(error, ConfigError::InvalidEnvOverride { .. }));

        clear_env();
    }

    #[test]
    fn missing_required_file_is_reported() {
        let _guard = env_guard();
        clear_env();

        let error = AppConfig::load(LoadOptions {
            config_path: Some("/definitely/not/here.toml".into()),
            require_file: true,
        })
        .expect_err("missing file");
        assert!(matches!(error, ConfigError::MissingConfigFile(_)));
    }
}
