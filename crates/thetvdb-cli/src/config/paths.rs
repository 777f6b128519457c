//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// File name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Application directory under the XDG config home.
const APP_DIR: &str = "thetvdb";

/// Resolves the config file path.
///
/// `--dir` wins. Otherwise `$XDG_CONFIG_HOME/thetvdb/config.toml`, falling
/// back to `~/.config/thetvdb/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set and no
/// directory was given.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    resolve_with(dir, |key| std::env::var_os(key).map(PathBuf::from))
}

/// Resolution with an injectable environment lookup.
fn resolve_with(
    dir: Option<&PathBuf>,
    lookup: impl Fn(&str) -> Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dir.join(CONFIG_FILE));
    }

    // Relative XDG paths are invalid and ignored.
    if let Some(config_home) = lookup("XDG_CONFIG_HOME").filter(|p| p.is_absolute()) {
        return Ok(in_app_dir(&config_home));
    }

    let Some(home) = lookup("HOME").filter(|p| !p.as_os_str().is_empty()) else {
        bail!("cannot locate config: neither XDG_CONFIG_HOME nor HOME is set (use --dir)");
    };
    Ok(in_app_dir(&home.join(".config")))
}

fn in_app_dir(config_home: &Path) -> PathBuf {
    config_home.join(APP_DIR).join(CONFIG_FILE)
}
