//! Configuration file management for larder.
//!
//! Provides a TOML-based config file at `~/.config/larder/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use larder_core::UserPreferences;
use larder_core::proposal::command::DEFAULT_COMMAND;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
    #[serde(default)]
    pub proposer: ProposerSection,
    #[serde(default)]
    pub catalog: CatalogSection,
}

/// Which proposer drafts week plans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposerKind {
    /// Run an external command (an LLM CLI).
    #[default]
    Command,
    /// Read a captured draft from `draft_path`.
    File,
}

impl ProposerKind {
    /// Registry name of the matching proposer.
    pub fn name(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::File => "file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposerSection {
    #[serde(default)]
    pub kind: ProposerKind,
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_path: Option<PathBuf>,
}

fn default_command() -> String {
    DEFAULT_COMMAND.to_string()
}

fn default_args() -> Vec<String> {
    vec!["-p".to_string()]
}

impl Default for ProposerSection {
    fn default() -> Self {
        Self {
            kind: ProposerKind::default(),
            command: default_command(),
            args: default_args(),
            draft_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSection {
    /// Recipe catalog file (`.json` or `.toml`). Unset uses the built-in
    /// catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the larder config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/larder` or `~/.config/larder`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("larder");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("larder")
}

/// Return the path to the larder config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Return the default data directory: `$XDG_DATA_HOME/larder` or
/// `~/.local/share/larder`.
pub fn default_data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join("larder");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".local")
        .join("share")
        .join("larder")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Load the config file, or the defaults when there is none.
pub fn load_or_default() -> Result<ConfigFile> {
    if config_path().exists() {
        load_config()
    } else {
        Ok(ConfigFile::default())
    }
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct LarderConfig {
    /// `None` means the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    pub data_dir: PathBuf,
    pub proposer: ProposerSection,
    pub preferences: Option<UserPreferences>,
}

impl LarderConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Catalog: `cli_catalog` > `LARDER_CATALOG` > `catalog.path` > built-in
    /// - Data dir: `cli_data_dir` > `LARDER_DATA_DIR` > [`default_data_dir`]
    /// - Proposer command: `LARDER_PROPOSER_COMMAND` > `proposer.command` > `claude`
    pub fn resolve(cli_catalog: Option<&Path>, cli_data_dir: Option<&Path>) -> Result<Self> {
        let file_config = load_or_default()?;

        let catalog_path = if let Some(path) = cli_catalog {
            Some(path.to_path_buf())
        } else if let Ok(path) = std::env::var("LARDER_CATALOG") {
            Some(PathBuf::from(path))
        } else {
            file_config.catalog.path
        };

        let data_dir = if let Some(dir) = cli_data_dir {
            dir.to_path_buf()
        } else if let Ok(dir) = std::env::var("LARDER_DATA_DIR") {
            PathBuf::from(dir)
        } else {
            default_data_dir()
        };

        let mut proposer = file_config.proposer;
        if let Ok(command) = std::env::var("LARDER_PROPOSER_COMMAND") {
            proposer.kind = ProposerKind::Command;
            proposer.command = command;
        }

        Ok(Self {
            catalog_path,
            data_dir,
            proposer,
            preferences: file_config.preferences,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    /// Point XDG_CONFIG_HOME at a temp dir and clear larder env vars.
    fn isolated_env() -> tempfile::TempDir {
        let tmp = tempfile::TempDir::new().unwrap();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", tmp.path()) };
        unsafe { std::env::remove_var("LARDER_CATALOG") };
        unsafe { std::env::remove_var("LARDER_DATA_DIR") };
        unsafe { std::env::remove_var("LARDER_PROPOSER_COMMAND") };
        tmp
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let original = ConfigFile::default();
        let contents = toml::to_string_pretty(&original).unwrap();
        let loaded: ConfigFile = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, original);
        assert!(contents.contains("command = \"claude\""));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let loaded: ConfigFile = toml::from_str(
            "[preferences]\ndiet = \"vegan\"\ncookTime = \"30\"\n\n[proposer]\nkind = \"file\"\ndraft_path = \"draft.json\"\n",
        )
        .unwrap();
        let prefs = loaded.preferences.unwrap();
        assert_eq!(prefs.cook_time_max, Some(30));
        assert_eq!(loaded.proposer.kind, ProposerKind::File);
        assert_eq!(loaded.proposer.command, "claude");
        assert_eq!(loaded.proposer.args, vec!["-p"]);
        assert!(loaded.catalog.path.is_none());
    }

    #[test]
    fn save_and_load_config_roundtrip() {
        let _lock = lock_env();
        let _tmp = isolated_env();

        let mut config = ConfigFile::default();
        config.catalog.path = Some(PathBuf::from("/srv/recipes.json"));
        save_config(&config).unwrap();

        assert!(config_path().exists());
        assert_eq!(load_config().unwrap(), config);

        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };
    }

    #[test]
    fn resolve_with_cli_flag_overrides_all() {
        let _lock = lock_env();
        let _tmp = isolated_env();
        unsafe { std::env::set_var("LARDER_CATALOG", "/env/recipes.json") };
        unsafe { std::env::set_var("LARDER_DATA_DIR", "/env/data") };

        let config = LarderConfig::resolve(
            Some(Path::new("/cli/recipes.toml")),
            Some(Path::new("/cli/data")),
        )
        .unwrap();
        assert_eq!(config.catalog_path, Some(PathBuf::from("/cli/recipes.toml")));
        assert_eq!(config.data_dir, PathBuf::from("/cli/data"));

        unsafe { std::env::remove_var("LARDER_CATALOG") };
        unsafe { std::env::remove_var("LARDER_DATA_DIR") };
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };
    }

    #[test]
    fn resolve_with_env_var_overrides_config_file() {
        let _lock = lock_env();
        let _tmp = isolated_env();

        let mut file = ConfigFile::default();
        file.catalog.path = Some(PathBuf::from("/file/recipes.json"));
        file.proposer.kind = ProposerKind::File;
        save_config(&file).unwrap();

        unsafe { std::env::set_var("LARDER_CATALOG", "/env/recipes.json") };
        unsafe { std::env::set_var("LARDER_PROPOSER_COMMAND", "/usr/local/bin/llm") };

        let config = LarderConfig::resolve(None, None).unwrap();
        assert_eq!(config.catalog_path, Some(PathBuf::from("/env/recipes.json")));
        assert_eq!(config.proposer.kind, ProposerKind::Command);
        assert_eq!(config.proposer.command, "/usr/local/bin/llm");

        unsafe { std::env::remove_var("LARDER_CATALOG") };
        unsafe { std::env::remove_var("LARDER_PROPOSER_COMMAND") };
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };
    }

    #[test]
    fn resolve_defaults_when_nothing_set() {
        let _lock = lock_env();
        let _tmp = isolated_env();

        let config = LarderConfig::resolve(None, None).unwrap();
        assert!(config.catalog_path.is_none());
        assert!(config.preferences.is_none());
        assert_eq!(config.proposer, ProposerSection::default());
        assert!(config.data_dir.ends_with("larder"));

        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };
    }

    #[test]
    fn resolve_reports_broken_config_file() {
        let _lock = lock_env();
        let _tmp = isolated_env();
        std::fs::create_dir_all(config_dir()).unwrap();
        std::fs::write(config_path(), "[proposer\nkind = ").unwrap();

        let err = LarderConfig::resolve(None, None).unwrap_err();
        assert!(
            format!("{err:#}").contains("failed to parse config file"),
            "unexpected error: {err:#}"
        );

        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };
    }

    #[test]
    fn config_path_ends_with_expected_filename() {
        let path = config_path();
        assert!(
            path.ends_with("larder/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}
