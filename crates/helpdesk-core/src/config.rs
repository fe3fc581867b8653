//! Configuration — YAML config + env var overrides.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::resolver::Resolver;
use crate::rules::RuleTable;
use crate::scheduler::DEFAULT_TYPING_DELAY;
use crate::types::Skin;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Only run this skin; both skins get a tab when unset
    #[serde(default)]
    pub skin: Option<Skin>,

    /// Simulated typing delay before each bot reply
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    /// YAML rules file replacing the built-in tables. Relative paths from the
    /// config file resolve against its directory; `HELPDESK_RULES_PATH`
    /// resolves against the working directory.
    #[serde(default)]
    pub rules_path: Option<PathBuf>,

    /// Where the TUI writes its log
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Resolved config directory (set at load time, not serialized from YAML)
    #[serde(skip)]
    pub project_root: PathBuf,
}

fn default_typing_delay_ms() -> u64 {
    DEFAULT_TYPING_DELAY.as_millis() as u64
}
fn default_log_file() -> PathBuf {
    PathBuf::from("helpdesk-tui.log")
}

impl Config {
    /// Load config from a YAML file with env var overrides.
    ///
    /// A missing file means defaults; env overrides still apply on top.
    pub fn load(config_path: &Path) -> Result<Self> {
        let mut config: Config = match std::fs::read_to_string(config_path) {
            Ok(content) => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", config_path.display()))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", config_path.display());
                Config::default()
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config: {}", config_path.display()))
            }
        };

        config.project_root = config_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();

        config.apply_env()?;
        Ok(config)
    }

    /// Load config from the default location (project_root/config.yaml)
    pub fn load_from_dir(project_root: &Path) -> Result<Self> {
        Self::load(&project_root.join("config.yaml"))
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(s) = std::env::var("HELPDESK_SKIN") {
            let skin = s
                .parse::<Skin>()
                .map_err(anyhow::Error::msg)
                .context("Invalid HELPDESK_SKIN")?;
            self.skin = Some(skin);
        }

        if let Ok(ms) = std::env::var("HELPDESK_TYPING_DELAY_MS") {
            self.typing_delay_ms = ms
                .trim()
                .parse()
                .with_context(|| format!("Invalid HELPDESK_TYPING_DELAY_MS: {}", ms))?;
        }

        if let Ok(path) = std::env::var("HELPDESK_RULES_PATH") {
            let path = PathBuf::from(path);
            self.rules_path = Some(if path.is_absolute() {
                path
            } else {
                std::env::current_dir()
                    .context("Failed to read current directory")?
                    .join(path)
            });
        }

        Ok(())
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    /// Skins to open, in tab order.
    pub fn skins(&self) -> Vec<Skin> {
        match self.skin {
            Some(skin) => vec![skin],
            None => Skin::ALL.to_vec(),
        }
    }

    /// Rules file path, relative paths resolved against the config directory.
    pub fn resolve_rules_path(&self) -> Option<PathBuf> {
        self.rules_path.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                self.project_root.join(p)
            }
        })
    }

    /// Build the resolver for `skin`, honoring `rules_path`.
    pub fn resolver(&self, skin: Skin) -> Result<Resolver> {
        match self.resolve_rules_path() {
            Some(path) => {
                let table = RuleTable::load(&path)?;
                Ok(Resolver::with_table(skin, table))
            }
            None => Ok(Resolver::for_skin(skin)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skin: None,
            typing_delay_ms: default_typing_delay_ms(),
            rules_path: None,
            log_file: default_log_file(),
            project_root: PathBuf::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::{NamedTempFile, TempDir};

    const ENV_VARS: [&str; 3] = [
        "HELPDESK_SKIN",
        "HELPDESK_TYPING_DELAY_MS",
        "HELPDESK_RULES_PATH",
    ];

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Serialize env-sensitive tests and start each from a clean slate.
    fn clean_env() -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
        guard
    }

    #[test]
    fn test_load_config_defaults() {
        let _env = clean_env();
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "{{}}").unwrap();

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.typing_delay_ms, 1500);
        assert_eq!(config.typing_delay(), Duration::from_millis(1500));
        assert_eq!(config.log_file, PathBuf::from("helpdesk-tui.log"));
        assert!(config.rules_path.is_none());
    }

    #[test]
    fn test_load_config_custom_values() {
        let _env = clean_env();
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "skin: nibbly\ntyping_delay_ms: 200").unwrap();

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.skin, Some(Skin::Nibbly));
        assert_eq!(config.typing_delay_ms, 200);
        assert_eq!(config.skins(), vec![Skin::Nibbly]);
    }

    #[test]
    fn test_unknown_skin_fails() {
        let _env = clean_env();
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "skin: pizza").unwrap();

        assert!(Config::load(tmp.path()).is_err());
    }

    #[test]
    fn test_default_opens_both_skins() {
        assert_eq!(Config::default().skins(), vec![Skin::Support, Skin::Nibbly]);
    }

    #[test]
    fn test_relative_rules_path_uses_config_dir() {
        let _env = clean_env();
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("rules.yaml"),
            "rules:\n  - trigger: pizza\n    reply: No pizza here.\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("config.yaml"), "rules_path: rules.yaml\n").unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(
            config.resolve_rules_path(),
            Some(dir.path().join("rules.yaml"))
        );

        let resolver = config.resolver(Skin::Support).unwrap();
        assert_eq!(resolver.resolve("pizza?"), "No pizza here.");
    }

    #[test]
    fn test_bad_rules_file_is_an_error() {
        let config = Config {
            rules_path: Some(PathBuf::from("/no/such/rules.yaml")),
            ..Config::default()
        };
        assert!(config.resolver(Skin::Nibbly).is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let _env = clean_env();
        let dir = TempDir::new().unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.typing_delay_ms, 1500);
        assert_eq!(config.skins(), vec![Skin::Support, Skin::Nibbly]);
        assert_eq!(config.project_root, dir.path());
    }

    #[test]
    fn test_env_applies_without_config_file() {
        let _env = clean_env();
        let dir = TempDir::new().unwrap();
        std::env::set_var("HELPDESK_SKIN", "nibbly");
        std::env::set_var("HELPDESK_TYPING_DELAY_MS", "10");

        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.skins(), vec![Skin::Nibbly]);
        assert_eq!(config.typing_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let _env = clean_env();
        let dir = TempDir::new().unwrap();
        let rules = dir.path().join("env-rules.yaml");
        std::fs::write(
            dir.path().join("config.yaml"),
            "skin: support\ntyping_delay_ms: 200\nrules_path: file-rules.yaml\n",
        )
        .unwrap();
        std::env::set_var("HELPDESK_SKIN", "nibbly");
        std::env::set_var("HELPDESK_TYPING_DELAY_MS", " 25 ");
        std::env::set_var("HELPDESK_RULES_PATH", &rules);

        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.skin, Some(Skin::Nibbly));
        assert_eq!(config.typing_delay_ms, 25);
        assert_eq!(config.resolve_rules_path(), Some(rules));
    }

    #[test]
    fn test_env_rules_path_relative_to_cwd() {
        let _env = clean_env();
        let dir = TempDir::new().unwrap();
        std::env::set_var("HELPDESK_RULES_PATH", "my-rules.yaml");

        let config = Config::load_from_dir(dir.path()).unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(config.resolve_rules_path(), Some(cwd.join("my-rules.yaml")));
    }

    #[test]
    fn test_invalid_env_values_fail() {
        let _env = clean_env();
        let dir = TempDir::new().unwrap();

        std::env::set_var("HELPDESK_SKIN", "pizza");
        assert!(Config::load_from_dir(dir.path()).is_err());
        std::env::remove_var("HELPDESK_SKIN");

        std::env::set_var("HELPDESK_TYPING_DELAY_MS", "soon");
        assert!(Config::load_from_dir(dir.path()).is_err());
        std::env::remove_var("HELPDESK_TYPING_DELAY_MS");
    }
}
