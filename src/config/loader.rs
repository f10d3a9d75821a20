//! Configuration loading logic

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::schema::{GlobalConfig, RepositoryConfig};

impl RepositoryConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load the repository configuration, with fallback
    ///
    /// Load priority:
    /// 1. Local config (`.prx.toml` in `repo_root`)
    /// 2. The `[repository]` section of the global config
    /// 3. Default config
    ///
    /// The result is validated before being returned.
    ///
    /// # Errors
    /// Returns an error if an existing config file cannot be read or parsed,
    /// or if the effective configuration fails validation
    pub fn load_from_repo_root(repo_root: &Path) -> Result<Self> {
        let config = Self::load_impl(repo_root)?;
        config.validate()?;
        Ok(config)
    }

    fn load_impl(repo_root: &Path) -> Result<Self> {
        let local_config = Self::local_config_path_from(repo_root);
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(global_config) = GlobalConfig::path() {
            if global_config.exists() {
                if let Some(repository) = GlobalConfig::from_file(&global_config)?.repository {
                    return Ok(repository);
                }
            }
        }

        Ok(Self::default())
    }

    /// Path to `.prx.toml` in the given repository root
    #[must_use]
    pub fn local_config_path_from(repo_root: &Path) -> PathBuf {
        repo_root.join(".prx.toml")
    }
}

impl GlobalConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load the global config, falling back to defaults when absent
    ///
    /// Provider credentials left unset in the file are filled from the
    /// environment (`JIRA_*`, `LINEAR_API_KEY`).
    ///
    /// # Errors
    /// Returns an error if an existing config file cannot be read or parsed
    pub fn load() -> Result<Self> {
        let mut config = match Self::path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        config.jira.apply_env_fallback();
        config.linear.apply_env_fallback();

        Ok(config)
    }

    /// Write the global config file, creating parent directories as needed
    ///
    /// # Errors
    /// Returns an error when the path cannot be determined or written
    pub fn save(&self) -> Result<PathBuf> {
        let path =
            Self::path().context("Could not determine global config path (HOME not found)")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(path)
    }

    /// Get the global config path
    /// Respects `XDG_CONFIG_HOME` on all platforms.
    /// Fallback: `$HOME/.config/prx/config.toml`
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        let config_home = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;

        Some(config_home.join("prx").join("config.toml"))
    }
}
