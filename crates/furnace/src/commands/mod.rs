//! CLI commands.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use furnace_pipeline::{AssetConfig, ConfigFile};

pub mod build;
pub mod install;

/// Resolve asset paths from the config file and command-line overrides.
pub fn asset_config(
    root: Option<PathBuf>,
    config_path: &Path,
    assets: Option<String>,
    output: Option<String>,
) -> Result<AssetConfig> {
    let cwd = env::current_dir().context("Failed to determine current directory")?;
    resolve_asset_config(&cwd, root, config_path, assets, output)
}

/// Same as [`asset_config`], with relative paths resolved against `cwd`.
fn resolve_asset_config(
    cwd: &Path,
    root: Option<PathBuf>,
    config_path: &Path,
    assets: Option<String>,
    output: Option<String>,
) -> Result<AssetConfig> {
    let root = match root {
        Some(root) => cwd.join(root),
        None => cwd.to_path_buf(),
    };

    let mut file = ConfigFile::load(&root.join(config_path))?;
    if let Some(assets) = assets {
        file.assets.dir = assets;
    }
    if let Some(output) = output {
        file.assets.output = output;
    }

    Ok(file.asset_config(&root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn cli_flags_override_config_file() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("furnace.toml"),
            "[assets]\ndir = \"resources/js\"\noutput = \"public/js\"\n",
        )
        .unwrap();

        let config = resolve_asset_config(
            temp.path(),
            None,
            Path::new("furnace.toml"),
            Some("frontend".to_string()),
            None,
        )
        .unwrap();

        assert_eq!(config.assets(), temp.path().join("frontend"));
        assert_eq!(config.output(), temp.path().join("public/js"));
    }

    #[test]
    fn config_file_is_used_without_overrides() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("furnace.toml"), "[assets]\ndir = \"resources/js\"\n").unwrap();

        let config =
            resolve_asset_config(temp.path(), None, Path::new("furnace.toml"), None, None).unwrap();

        assert_eq!(config.assets(), temp.path().join("resources/js"));
        assert_eq!(config.output(), temp.path().join("public/_build"));
    }

    #[test]
    fn relative_root_resolves_against_cwd() {
        let temp = tempdir().unwrap();
        let site = temp.path().join("site");
        fs::create_dir_all(&site).unwrap();
        fs::write(site.join("furnace.toml"), "[assets]\noutput = \"dist\"\n").unwrap();

        let config = resolve_asset_config(
            temp.path(),
            Some(PathBuf::from("site")),
            Path::new("furnace.toml"),
            None,
            None,
        )
        .unwrap();

        assert_eq!(config.root(), site.as_path());
        assert_eq!(config.assets(), site.join("assets"));
        assert_eq!(config.output(), site.join("dist"));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let temp = tempdir().unwrap();

        let config = resolve_asset_config(
            temp.path(),
            None,
            Path::new("config/missing.toml"),
            None,
            None,
        )
        .unwrap();

        assert_eq!(config.assets(), temp.path().join("assets"));
        assert_eq!(config.output(), temp.path().join("public/_build"));
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("furnace.toml"), "[assets").unwrap();

        let result = resolve_asset_config(temp.path(), None, Path::new("furnace.toml"), None, None);
        assert!(result.is_err());
    }
}
