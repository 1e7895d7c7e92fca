use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::Deserialize;
use tracing::{debug, info};

use crate::i18n;

const CONFIG_ENV_VAR: &str = "TICKRC";
const CONFIG_FILE: &str = "tick.toml";
const DATA_DIR: &str = ".tick";
const DATA_FILE: &str = "tasks.json";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Path of the persisted task list. `~/` expands to the home directory.
    pub data: Option<String>,
    /// Boot language code; unknown codes fall back to the built-in default.
    pub language: Option<String>,
    /// `on`/`off` toggle for ANSI color in the task table.
    pub color: Option<String>,
}

impl Config {
    /// Loads the config file, if there is one. Resolution order: explicit
    /// `--config` path, then the `TICKRC` env var (`/dev/null` disables),
    /// then `~/.tick/tick.toml` when present. No file at all is not an
    /// error; defaults apply.
    #[tracing::instrument(skip(override_path))]
    pub fn load(override_path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = resolve_config_path(override_path) else {
            debug!("no config file; using defaults");
            return Ok(Self::default());
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let cfg: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        info!(config = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(i18n::DEFAULT_LANGUAGE)
    }

    pub fn color(&self) -> bool {
        match self.color.as_deref() {
            Some(value) => parse_bool(value),
            None => true,
        }
    }
}

fn resolve_config_path(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        if env_path == "/dev/null" {
            return None;
        }
        return Some(PathBuf::from(env_path));
    }

    let home = dirs::home_dir()?;
    let candidate = home.join(DATA_DIR).join(CONFIG_FILE);
    candidate.exists().then_some(candidate)
}

/// Resolves where the task list lives: `--data` override, then the config
/// `data` key, then `~/.tick/tasks.json`. The parent directory is created
/// when missing so the first persist has somewhere to land.
#[tracing::instrument(skip(cfg, override_path))]
pub fn resolve_data_file(cfg: &Config, override_path: Option<&Path>) -> anyhow::Result<PathBuf> {
    let file = if let Some(path) = override_path {
        path.to_path_buf()
    } else if let Some(cfg_value) = cfg.data.as_deref() {
        expand_tilde(Path::new(cfg_value))
    } else {
        default_data_file()?
    };

    if let Some(dir) = file.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        info!(dir = %dir.display(), "creating data directory");
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }

    Ok(file)
}

fn default_data_file() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("cannot determine home directory"))?;
    Ok(home.join(DATA_DIR).join(DATA_FILE))
}

fn expand_tilde(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    if let Some(rest) = text.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "1" | "y" | "yes" | "on" | "true"
    )
}

#[cfg(test)]
mod tests {
    use super::{Config, parse_bool};

    #[test]
    fn parses_all_keys_from_toml() {
        let cfg: Config = toml::from_str(
            r#"
            data = "~/.tick/tasks.json"
            language = "ja"
            color = "off"
            "#,
        )
        .expect("parse config");

        assert_eq!(cfg.data.as_deref(), Some("~/.tick/tasks.json"));
        assert_eq!(cfg.language(), "ja");
        assert!(!cfg.color());
    }

    #[test]
    fn defaults_apply_for_missing_keys() {
        let cfg: Config = toml::from_str("").expect("parse empty config");
        assert_eq!(cfg.language(), "en");
        assert!(cfg.color());
        assert!(cfg.data.is_none());
    }

    #[test]
    fn bool_values_accept_the_usual_spellings() {
        for value in ["1", "y", "yes", "on", "true", "ON", "True"] {
            assert!(parse_bool(value), "{value} should read as true");
        }
        for value in ["0", "off", "no", "false", "bogus"] {
            assert!(!parse_bool(value), "{value} should read as false");
        }
    }
}
