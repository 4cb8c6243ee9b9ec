//! JavaScript package manager detection.

use std::fmt;
use std::path::Path;

/// A supported JavaScript package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Bun,
    Deno,
}

impl PackageManager {
    /// Detect the package manager a project uses from its lockfiles.
    ///
    /// Returns `None` when no known lockfile exists in `root`.
    pub fn detect(root: &Path) -> Option<Self> {
        let has = |name: &str| root.join(name).exists();

        if has("package-lock.json") {
            Some(PackageManager::Npm)
        } else if has("yarn.lock") {
            Some(PackageManager::Yarn)
        } else if has("bun.lock") || has("bun.lockb") {
            Some(PackageManager::Bun)
        } else if has("deno.json") || has("deno.lock") {
            Some(PackageManager::Deno)
        } else {
            None
        }
    }

    /// Executable name.
    pub fn bin(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
            PackageManager::Deno => "deno",
        }
    }

    /// Full command line installing `package` as a development dependency.
    pub fn install_dev_command(&self, package: &str) -> Vec<String> {
        let args: &[&str] = match self {
            PackageManager::Npm => &["install", "--save-dev"],
            PackageManager::Yarn | PackageManager::Bun | PackageManager::Deno => &["add", "--dev"],
        };

        let package = match self {
            PackageManager::Deno => format!("npm:{}", package),
            _ => package.to_string(),
        };

        std::iter::once(self.bin().to_string())
            .chain(args.iter().map(|arg| arg.to_string()))
            .chain(std::iter::once(package))
            .collect()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bin())
    }
}
