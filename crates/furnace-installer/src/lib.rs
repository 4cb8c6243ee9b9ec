//! Interactive installer that scaffolds esbuild into a project.
//!
//! Detects the project's JavaScript package manager, installs esbuild and any
//! selected plugins, writes stub assets and a `build.mjs`, then optionally
//! runs a first build.

pub mod installer;
pub mod package_manager;
pub mod plugins;
pub mod prompt;
pub mod stubs;

pub use installer::{InstallError, InstallOptions, InstallReport, Installer};
pub use package_manager::PackageManager;
pub use plugins::{Plugin, PluginRegistration};
pub use prompt::{DefaultPrompter, PromptError, Prompter, TerminalPrompter};
pub use stubs::{BuildScriptContext, StubEngine};
