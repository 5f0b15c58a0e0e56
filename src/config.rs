//! Application paths and gallery folder resolution.
//!
//! Two concerns live here:
//!
//! - [`PathConfig`] decides where settings and log files go (CLI → ENV →
//!   local folder → platform directory from `dirs-next`).
//! - [`FolderResolver`] maps the logical gallery location
//!   (`static/images/gallery`) onto an absolute directory. [`RootResolver`]
//!   is the stock implementation, rooted at a base directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Logical location of the gallery folder, relative to the resolver root
pub const GALLERY_RELATIVE_PATH: &str = "static/images/gallery";

/// Settings file name (stores `image_index` between runs)
pub const SETTINGS_FILE: &str = "gallery_settings.json";

/// Default log file name for `--log` without a value
pub const LOG_FILE: &str = "gallery.log";

/// Where the settings file and the default log file live
#[derive(Debug, Clone)]
pub struct PathConfig {
    /// Explicit directory, if one was given with `--config-dir` or GALLERY_CONFIG_DIR
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// `--config-dir` wins over GALLERY_CONFIG_DIR; neither means "look it up later"
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| {
            std::env::var("GALLERY_CONFIG_DIR")
                .ok()
                .map(PathBuf::from)
        });

        Self { config_dir }
    }
}

/// Full path of `name` inside the data directory.
///
/// The directory is the explicit one from [`PathConfig`], else the working
/// directory when it already holds a settings or log file (portable setups
/// next to a `static/` tree), else `<data_dir>/gallery-folder` from dirs-next,
/// e.g. `~/.local/share/gallery-folder` on Linux.
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    get_data_dir(config).join(name)
}

/// Create the data directory so `next` can save settings and `--log` can open its file
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let data_dir = get_data_dir(config);

    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    }

    Ok(())
}

/// A settings or log file already sits in `dir`
fn has_local_data_files(dir: &Path) -> bool {
    [SETTINGS_FILE, LOG_FILE].iter().any(|f| dir.join(f).exists())
}

fn get_data_dir(config: &PathConfig) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }

    if let Ok(current_dir) = std::env::current_dir() {
        if has_local_data_files(&current_dir) {
            return current_dir;
        }
    }

    if let Some(dir) = dirs_next::data_dir() {
        return dir.join("gallery-folder");
    }

    PathBuf::from(".")
}

/// Maps a logical relative path to an absolute location on disk.
///
/// Returns `None` when the location cannot be resolved at all. Callers still
/// have to check that the result exists and is a directory.
pub trait FolderResolver: Send + Sync {
    fn resolve_path(&self, relative: &Path) -> Option<PathBuf>;
}

/// Resolves relative paths against a fixed base directory.
#[derive(Debug, Clone)]
pub struct RootResolver {
    root: PathBuf,
}

impl RootResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root from CLI, then GALLERY_ROOT, then the current directory
    pub fn from_env_and_cli(cli_root: Option<PathBuf>) -> Result<Self> {
        let root = match cli_root.or_else(|| std::env::var("GALLERY_ROOT").ok().map(PathBuf::from)) {
            Some(root) => root,
            None => std::env::current_dir().context("Failed to read current directory")?,
        };
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FolderResolver for RootResolver {
    fn resolve_path(&self, relative: &Path) -> Option<PathBuf> {
        if !self.root.is_dir() {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_data_file_with_custom_dir() {
        let config = PathConfig {
            config_dir: Some(PathBuf::from("/custom")),
        };

        let path = data_file(SETTINGS_FILE, &config);
        assert_eq!(path, PathBuf::from("/custom/gallery_settings.json"));
    }

    #[test]
    fn test_ensure_dirs_creates_custom_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("data");
        let config = PathConfig {
            config_dir: Some(dir.clone()),
        };

        ensure_dirs(&config).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_root_resolver_joins_relative_path() {
        let temp = TempDir::new().unwrap();
        let resolver = RootResolver::new(temp.path());

        let resolved = resolver.resolve_path(Path::new(GALLERY_RELATIVE_PATH)).unwrap();
        assert_eq!(resolved, temp.path().join("static/images/gallery"));
    }

    #[test]
    fn test_root_resolver_missing_root() {
        let temp = TempDir::new().unwrap();
        let resolver = RootResolver::new(temp.path().join("does-not-exist"));

        assert!(resolver.resolve_path(Path::new(GALLERY_RELATIVE_PATH)).is_none());
    }
}
