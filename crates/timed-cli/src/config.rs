//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use timed_core::DEFAULT_DAILY_TARGET_HOURS;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// Hours a regular working day is expected to last.
    pub daily_target_hours: f64,

    /// Default archive read by `timed replay`.
    pub replay_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: home.join(".timed.db"),
            daily_target_hours: DEFAULT_DAILY_TARGET_HOURS,
            replay_path: home.join(".timed.csv"),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later sources win: defaults, `<config_dir>/timed/config.toml`, the given
    /// file, then `TIMED_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("TIMED_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for timed.
///
/// On Linux: `~/.config/timed`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("timed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_lives_in_home() {
        let config = Config::default();
        let home = dirs::home_dir().unwrap();
        assert_eq!(config.database_path, home.join(".timed.db"));
        assert_eq!(config.replay_path, home.join(".timed.csv"));
    }

    #[test]
    fn test_default_daily_target_is_eight_hours() {
        assert!((Config::default().daily_target_hours - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dirs_config_path_ends_with_timed() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "timed");
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
                database_path = "/tmp/elsewhere.db"
                daily_target_hours = 7.5
                "#,
            )?;
            let config = Config::load_from(Some(Path::new("custom.toml")))?;
            assert_eq!(config.database_path, PathBuf::from("/tmp/elsewhere.db"));
            assert!((config.daily_target_hours - 7.5).abs() < f64::EPSILON);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", r#"database_path = "/tmp/from-file.db""#)?;
            jail.set_env("TIMED_DATABASE_PATH", "/tmp/from-env.db");
            let config = Config::load_from(Some(Path::new("custom.toml")))?;
            assert_eq!(config.database_path, PathBuf::from("/tmp/from-env.db"));
            Ok(())
        });
    }
}
