//! Installs esbuild into a project and scaffolds its assets.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use furnace_pipeline::{
    AssetConfig, BuildError, Logger, Pipeline, ProcessRunner, SystemRunner,
};

use crate::package_manager::PackageManager;
use crate::plugins::{Plugin, PluginRegistration};
use crate::prompt::{PromptError, Prompter};
use crate::stubs::{self, BuildScriptContext, StubEngine};

/// Options controlling an installation.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Use TypeScript; `None` asks the user
    pub typescript: Option<bool>,
    /// Plugins to install; `None` asks the user
    pub plugins: Option<Vec<Plugin>>,
    /// Build the assets once installation finishes
    pub build: bool,
    /// Show package manager output and commands
    pub verbose: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            typescript: None,
            plugins: None,
            build: true,
            verbose: false,
        }
    }
}

/// Summary of a finished installation.
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Package manager used for installing packages
    pub package_manager: PackageManager,
    /// Whether TypeScript assets were created
    pub typescript: bool,
    /// Plugins registered in the build script
    pub plugins: Vec<Plugin>,
    /// Files written, relative to the project root
    pub files: Vec<PathBuf>,
    /// Whether assets were built
    pub built: bool,
}

/// Errors that can occur during installation.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("{0} could not be found. Is it installed and on your PATH?")]
    PackageManagerMissing(PackageManager),

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}")]
    PackageInstall { command: String, code: i32 },

    #[error("Failed to install esbuild plugins: {0}")]
    Plugins(#[source] Box<InstallError>),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Building assets failed with exit code {0}")]
    BuildFailed(i32),
}

/// Checks whether an executable can be found.
pub type Locator = Box<dyn Fn(&str) -> bool>;

/// Installs esbuild, optional plugins and stub assets into a project.
pub struct Installer {
    config: AssetConfig,
    options: InstallOptions,
    logger: Arc<dyn Logger>,
    runner: Arc<dyn ProcessRunner>,
    prompter: Box<dyn Prompter>,
    locate: Locator,
    stubs: StubEngine,
    files: Vec<PathBuf>,
}

impl Installer {
    /// Create an installer that runs real package manager commands.
    pub fn new(
        config: AssetConfig,
        options: InstallOptions,
        logger: Arc<dyn Logger>,
        prompter: Box<dyn Prompter>,
    ) -> Result<Self, InstallError> {
        let stubs = StubEngine::new().map_err(|source| InstallError::Render {
            name: "stubs".to_string(),
            source,
        })?;

        Ok(Self {
            config,
            options,
            logger,
            runner: Arc::new(SystemRunner),
            prompter,
            locate: Box::new(|bin| which::which(bin).is_ok()),
            stubs,
            files: Vec::new(),
        })
    }

    /// Replace the process runner used for package installs and the final build.
    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Replace how executables are looked up on `PATH`.
    pub fn with_locator(mut self, locate: Locator) -> Self {
        self.locate = locate;
        self
    }

    /// Run the installation.
    pub fn install(mut self) -> Result<InstallReport, InstallError> {
        let detected = PackageManager::detect(self.config.root());
        let package_manager = detected.unwrap_or(PackageManager::Npm);

        if !(self.locate)(package_manager.bin()) {
            return Err(InstallError::PackageManagerMissing(package_manager));
        }

        let plugins = match self.options.plugins.clone() {
            Some(plugins) => plugins,
            None => {
                let labels: Vec<&str> = Plugin::ALL.iter().map(Plugin::label).collect();
                let selected = self
                    .prompter
                    .multiselect("Would you like any optional plugins?", &labels)?;
                Plugin::from_selection(&selected)
            }
        };

        let typescript = match self.options.typescript {
            Some(typescript) => typescript,
            None => self
                .prompter
                .confirm("Would you like to use TypeScript?", None, true)?,
        };

        // 1. Install esbuild
        if detected.is_none() {
            self.create_package_json()?;
        }
        self.install_package(package_manager, "esbuild")?;

        // 2. Create initial assets
        self.create_initial_assets(typescript)?;

        // 3. Install selected esbuild plugins
        let installed = self
            .install_plugins(package_manager, &plugins, typescript)
            .map_err(|e| InstallError::Plugins(Box::new(e)))?;

        // 4. Create esbuild configuration
        let registrations: Vec<PluginRegistration> =
            installed.iter().map(Plugin::registration).collect();
        self.create_build_script(&registrations, typescript)?;

        // 5. Build the created assets
        let built = if self.options.build {
            let code = Pipeline::new(self.config.clone(), self.logger.clone())
                .with_runner(self.runner.clone())
                .build()?;
            if code != 0 {
                return Err(InstallError::BuildFailed(code));
            }
            true
        } else {
            false
        };

        Ok(InstallReport {
            package_manager,
            typescript,
            plugins: installed,
            files: self.files,
            built,
        })
    }

    /// Install `package` as a development dependency.
    fn install_package(&self, manager: PackageManager, package: &str) -> Result<(), InstallError> {
        let command = manager.install_dev_command(package);
        let command_line = command.join(" ");

        if self.options.verbose {
            self.logger.info(&format!("> {}", command_line));
        } else {
            self.logger.info(&format!("Installing {}...", package));
        }

        let output = self
            .runner
            .run(&command, self.config.root())
            .map_err(|source| InstallError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        let stderr = output.stderr.trim_end();
        if !stderr.is_empty() {
            self.logger.error(stderr);
        }

        let stdout = output.stdout.trim_end();
        if self.options.verbose && !stdout.is_empty() {
            self.logger.info(stdout);
        }

        if output.code != 0 {
            return Err(InstallError::PackageInstall {
                command: command_line,
                code: output.code,
            });
        }

        Ok(())
    }

    /// Write a minimal `package.json` so npm has a manifest to record into.
    fn create_package_json(&mut self) -> Result<(), InstallError> {
        let path = self.config.root().join("package.json");
        if path.exists() {
            return Ok(());
        }

        let name = self
            .config
            .root()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app")
            .to_string();

        self.write(&path, &stubs::package_json(&name))
    }

    fn create_initial_assets(&mut self, typescript: bool) -> Result<(), InstallError> {
        let path = self.app_script_path(typescript);
        if path.exists() {
            self.logger.info(&format!(
                "Keeping existing {}",
                self.relative(&path).display()
            ));
            return Ok(());
        }

        let script = self
            .stubs
            .render_app_script(typescript)
            .map_err(|source| InstallError::Render {
                name: "app script".to_string(),
                source,
            })?;

        self.write(&path, &script)
    }

    /// Install every selected plugin; returns the ones that were set up.
    fn install_plugins(
        &mut self,
        manager: PackageManager,
        plugins: &[Plugin],
        typescript: bool,
    ) -> Result<Vec<Plugin>, InstallError> {
        let mut installed = Vec::new();

        for &plugin in Plugin::ALL.iter().filter(|p| plugins.contains(*p)) {
            let done = match plugin {
                Plugin::Tailwind => self.install_tailwind(manager, typescript)?,
                Plugin::Less => {
                    self.install_package(manager, plugin.package())?;
                    true
                }
            };

            if done {
                installed.push(plugin);
            }
        }

        Ok(installed)
    }

    /// Install and configure TailwindCSS. Returns `false` if the user cancelled.
    fn install_tailwind(
        &mut self,
        manager: PackageManager,
        typescript: bool,
    ) -> Result<bool, InstallError> {
        self.install_package(manager, Plugin::Tailwind.package())?;

        let config_path = self.config.root().join("tailwind.config.js");
        if config_path.exists() {
            let replace = self.prompter.confirm(
                "\"tailwind.config.js\" already exists. Replace it?",
                Some("A backup of the file will be made."),
                false,
            )?;

            if !replace {
                self.logger.warn("Cancelled...");
                return Ok(false);
            }

            if self.options.verbose {
                self.logger
                    .info("Creating backup of \"tailwind.config.js\"...");
            }

            let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
            let backup = self
                .config
                .root()
                .join(format!("tailwind.config.js.backup-{}", timestamp));
            fs::copy(&config_path, &backup).map_err(|source| InstallError::Write {
                path: backup.display().to_string(),
                source,
            })?;
        }

        self.write(&config_path, stubs::TAILWIND_CONFIG_STUB)?;

        let css_path = self.config.assets().join("app.css");
        self.write(&css_path, stubs::APP_CSS_STUB)?;

        let script_path = self.app_script_path(typescript);
        let script = match fs::read_to_string(&script_path) {
            Ok(script) => script,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(source) => {
                return Err(InstallError::Read {
                    path: script_path.display().to_string(),
                    source,
                })
            }
        };
        self.write(&script_path, &stubs::with_css_import(&script))?;

        Ok(true)
    }

    fn create_build_script(
        &mut self,
        registrations: &[PluginRegistration],
        typescript: bool,
    ) -> Result<(), InstallError> {
        let ctx = BuildScriptContext {
            imports: registrations.iter().map(|r| r.import.to_string()).collect(),
            plugins: registrations.iter().map(|r| r.plugin.to_string()).collect(),
            entry_point: slash_path(self.relative(&self.app_script_path(typescript))),
            outdir: slash_path(self.relative(self.config.output())),
        };

        let script = self
            .stubs
            .render_build_script(&ctx)
            .map_err(|source| InstallError::Render {
                name: "build.mjs".to_string(),
                source,
            })?;

        let path = self.config.assets().join("build.mjs");
        self.write(&path, &script)
    }

    fn app_script_path(&self, typescript: bool) -> PathBuf {
        let ext = if typescript { "ts" } else { "js" };
        self.config.assets().join(format!("app.{}", ext))
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(self.config.root()).unwrap_or(path)
    }

    /// Write a file, creating parent directories, and record it.
    fn write(&mut self, path: &Path, content: &str) -> Result<(), InstallError> {
        let err = |source| InstallError::Write {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(err)?;
        }
        fs::write(path, content).map_err(err)?;

        let relative = self.relative(path).to_path_buf();
        self.logger.info(&format!("Created {}", relative.display()));
        self.files.push(relative);

        Ok(())
    }
}

/// Render a relative path with `/` separators, as JavaScript expects.
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
