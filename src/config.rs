// ⚙️ Configuration - TOML file with environment overrides
//
// Lookup order: explicit --config path, CALC_SUITE_CONFIG, ./calculator-suite.toml,
// then built-in defaults. CALC_SUITE_DB replaces the database path afterwards.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "CALC_SUITE_CONFIG";
pub const DB_ENV: &str = "CALC_SUITE_DB";
pub const DEFAULT_CONFIG_FILE: &str = "calculator-suite.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub export_dir: PathBuf,
    /// CSV or JSON roster for the sports views
    pub sports_data: Option<PathBuf>,
    pub server: ServerConfig,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("calculator-suite.db"),
            export_dir: PathBuf::from("exports"),
            sports_data: None,
            server: ServerConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config TOML: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            bail!("database_path cannot be empty");
        }
        if self.server.port == 0 {
            bail!("server.port must be non-zero");
        }
        Ok(())
    }

    /// Resolve from the process environment
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::resolve(
            explicit,
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os(DB_ENV).map(PathBuf::from),
            Path::new(DEFAULT_CONFIG_FILE),
        )
    }

    pub fn resolve(
        explicit: Option<&Path>,
        env_config: Option<PathBuf>,
        env_db: Option<PathBuf>,
        fallback_file: &Path,
    ) -> Result<Self> {
        let mut config = if let Some(path) = explicit {
            Self::from_file(path)?
        } else if let Some(path) = env_config {
            Self::from_file(&path)?
        } else if fallback_file.exists() {
            Self::from_file(fallback_file)?
        } else {
            tracing::debug!("no config file found, using defaults");
            Self::default()
        };

        if let Some(db) = env_db.filter(|p| !p.as_os_str().is_empty()) {
            config.database_path = db;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_config(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", body).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(
            r#"
database_path = "/tmp/calc.db"

[server]
port = 8080
"#,
        );
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/calc.db"));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_defaults_when_nothing_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("calculator-suite.toml");
        let config = AppConfig::resolve(None, None, None, &missing).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_explicit_beats_env_and_db_override_wins() {
        let explicit = write_config("log_level = \"debug\"\n");
        let env = write_config("log_level = \"warn\"\n");
        let dir = TempDir::new().unwrap();

        let config = AppConfig::resolve(
            Some(explicit.path()),
            Some(env.path().to_path_buf()),
            Some(PathBuf::from("/data/override.db")),
            &dir.path().join("none.toml"),
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.database_path, PathBuf::from("/data/override.db"));
    }

    #[test]
    fn test_env_file_used_without_flag() {
        let env = write_config("export_dir = \"reports\"\n");
        let dir = TempDir::new().unwrap();
        let config =
            AppConfig::resolve(None, Some(env.path().to_path_buf()), None, &dir.path().join("x.toml")).unwrap();
        assert_eq!(config.export_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let bad = write_config("[server]\nport = 0\n");
        assert!(AppConfig::from_file(bad.path()).is_err());

        let garbage = write_config("database_path = [1, 2");
        let err = AppConfig::from_file(garbage.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));
    }
}
