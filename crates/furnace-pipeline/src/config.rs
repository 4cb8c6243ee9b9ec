//! Asset path configuration.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

/// Default directory, relative to the root, holding assets to compile.
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Default directory, relative to the root, receiving built assets.
pub const DEFAULT_OUTPUT_DIR: &str = "public/_build";

/// Name of the optional configuration file at the project root.
pub const CONFIG_FILE_NAME: &str = "furnace.toml";

/// Absolute paths used when building assets.
///
/// `assets` and `output` are always located inside `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    root: PathBuf,
    assets: PathBuf,
    output: PathBuf,
}

impl AssetConfig {
    /// Create a configuration from a root directory and two paths relative to it.
    ///
    /// Paths are normalized lexically; nothing is read from the filesystem.
    /// Parent components in `assets` or `output` can never climb above `root`.
    pub fn new(root: impl AsRef<Path>, assets: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        let root = normalize(root.as_ref());
        let assets = join_within(&root, assets.as_ref());
        let output = join_within(&root, output.as_ref());

        Self {
            root,
            assets,
            output,
        }
    }

    /// Create a configuration with the default asset and output directories.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self::new(root, DEFAULT_ASSETS_DIR, DEFAULT_OUTPUT_DIR)
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory with assets to compile.
    pub fn assets(&self) -> &Path {
        &self.assets
    }

    /// Directory where compiled assets are stored.
    pub fn output(&self) -> &Path {
        &self.output
    }
}

/// Configuration file structure (furnace.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub assets: AssetsSection,
}

/// The `[assets]` table.
#[derive(Debug, Deserialize)]
pub struct AssetsSection {
    #[serde(default = "default_assets_dir")]
    pub dir: String,
    #[serde(default = "default_output_dir")]
    pub output: String,
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
            output: default_output_dir(),
        }
    }
}

fn default_assets_dir() -> String {
    DEFAULT_ASSETS_DIR.to_string()
}
fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

/// Errors that can occur while loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the configured directories against `root`.
    pub fn asset_config(&self, root: &Path) -> AssetConfig {
        AssetConfig::new(root, &self.assets.dir, &self.assets.output)
    }
}

/// Lexically normalize a path, dropping `.` and folding `..` where possible.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }

    out
}

/// Join `relative` onto `root` without ever leaving `root`.
fn join_within(root: &Path, relative: &Path) -> PathBuf {
    let mut out = root.to_path_buf();
    let mut depth = 0usize;

    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                out.push(part);
                depth += 1;
            }
            Component::ParentDir if depth > 0 => {
                out.pop();
                depth -= 1;
            }
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn uses_default_directories() {
        let config = AssetConfig::with_root("/srv/app");

        assert_eq!(config.root(), Path::new("/srv/app"));
        assert_eq!(config.assets(), Path::new("/srv/app/assets"));
        assert_eq!(config.output(), Path::new("/srv/app/public/_build"));
    }

    #[test]
    fn normalizes_paths() {
        let config = AssetConfig::new("/srv/./app/", "./src/../resources/js", "public//dist/");

        assert_eq!(config.root(), Path::new("/srv/app"));
        assert_eq!(config.assets(), Path::new("/srv/app/resources/js"));
        assert_eq!(config.output(), Path::new("/srv/app/public/dist"));
    }

    #[test]
    fn keeps_directories_inside_root() {
        let cases = [
            ("assets", "public/_build"),
            ("../../etc", "../out"),
            ("/absolute/assets", "/tmp/output"),
            ("a/../../b", "./.."),
            ("", ""),
        ];

        for (assets, output) in cases {
            let config = AssetConfig::new("/srv/app", assets, output);
            assert!(
                config.assets().starts_with(config.root()),
                "{} escaped root",
                config.assets().display()
            );
            assert!(
                config.output().starts_with(config.root()),
                "{} escaped root",
                config.output().display()
            );
        }
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let temp = tempdir().unwrap();
        let config = ConfigFile::load(&temp.path().join(CONFIG_FILE_NAME)).unwrap();

        assert_eq!(config.assets.dir, DEFAULT_ASSETS_DIR);
        assert_eq!(config.assets.output, DEFAULT_OUTPUT_DIR);
    }

    #[test]
    fn loads_config_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[assets]\ndir = \"resources/js\"\n").unwrap();

        let config = ConfigFile::load(&path).unwrap();
        let assets = config.asset_config(temp.path());

        assert_eq!(assets.assets(), temp.path().join("resources/js"));
        assert_eq!(assets.output(), temp.path().join("public/_build"));
    }

    #[test]
    fn rejects_malformed_config_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[assets\ndir = ").unwrap();

        let err = ConfigFile::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
