//! Init command - write starter configuration files

use anyhow::{Context, Result};
use std::path::Path;

use crate::color;
use crate::config::{template_generator, GlobalConfig, RepositoryConfig};
use crate::integrations::git::{GitClient, RealGitClient};

fn write_config_if_needed(
    path: &Path,
    template: &str,
    force: bool,
    label: &str,
    color_mode: color::ColorMode,
) -> Result<()> {
    if path.exists() && !force {
        eprintln!(
            "{}",
            color::warn(
                color_mode,
                format!("{label} config already exists: {}", path.display())
            )
        );
        eprintln!("Use --force to overwrite");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    std::fs::write(path, template)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    eprintln!(
        "{}",
        color::success(
            color_mode,
            format!("Created {label} config: {}", path.display())
        )
    );
    Ok(())
}

/// Write starter configuration files
///
/// # Errors
/// Returns an error if:
/// - The global config path cannot be determined
/// - A file write fails
pub fn cmd_init(
    scope_global: bool,
    scope_local: bool,
    force: bool,
    color_mode: color::ColorMode,
) -> Result<()> {
    // Default (no flags): create both configs
    let generate_global = scope_global || !scope_local;
    let generate_local = scope_local || !scope_global;

    if generate_global {
        let Some(path) = GlobalConfig::path() else {
            anyhow::bail!(
                "Could not determine global config path (HOME directory not found). \
                 Please set the HOME environment variable or XDG_CONFIG_HOME."
            );
        };
        write_config_if_needed(
            &path,
            &template_generator::generate_global(),
            force,
            "Global",
            color_mode,
        )?;
    }

    if generate_local {
        // Outside a git repository, fall back to the current directory
        let config_path = RealGitClient.repo_root().map_or_else(
            |_| RepositoryConfig::local_config_path_from(Path::new(".")),
            |repo_root| RepositoryConfig::local_config_path_from(&repo_root),
        );
        write_config_if_needed(
            &config_path,
            &template_generator::generate_local(),
            force,
            "Repository",
            color_mode,
        )?;
    }

    Ok(())
}
