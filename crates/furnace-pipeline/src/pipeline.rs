//! esbuild invocation pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AssetConfig;
use crate::logger::Logger;
use crate::process::{ProcessRunner, SystemRunner};

/// Name of the project-provided build script inside the assets directory.
pub const CUSTOM_BUILD_SCRIPT: &str = "build.mjs";

/// Entry points passed to esbuild when no build script exists, in order.
pub const DEFAULT_ENTRY_POINTS: [&str; 2] = ["app.ts", "app.js"];

/// Runtime used to execute a custom build script.
pub const SCRIPT_RUNTIME: &str = "node";

/// Command chosen to build the assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildCommand {
    /// Run the project's own build script with node.
    CustomScript(PathBuf),

    /// Run the esbuild binary directly; the first element is the binary path.
    DefaultInvocation(Vec<String>),
}

impl BuildCommand {
    /// Program and arguments to execute.
    pub fn argv(&self) -> Vec<String> {
        match self {
            BuildCommand::CustomScript(script) => {
                vec![SCRIPT_RUNTIME.to_string(), script.display().to_string()]
            }
            BuildCommand::DefaultInvocation(args) => args.clone(),
        }
    }

    /// Space-joined command line, for display.
    pub fn command_line(&self) -> String {
        self.argv().join(" ")
    }
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to build with esbuild: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Builds assets by running esbuild as a child process.
pub struct Pipeline {
    config: AssetConfig,
    logger: Arc<dyn Logger>,
    runner: Arc<dyn ProcessRunner>,
}

impl Pipeline {
    /// Create a pipeline that spawns real processes.
    pub fn new(config: AssetConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            config,
            logger,
            runner: Arc::new(SystemRunner),
        }
    }

    /// Replace the process runner.
    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    /// Conventional location of the esbuild binary installed by a package manager.
    pub fn esbuild_install_path(&self) -> PathBuf {
        self.config
            .root()
            .join("node_modules")
            .join("esbuild")
            .join("bin")
            .join("esbuild")
    }

    /// Whether esbuild has been installed into the project.
    pub fn has_esbuild_installed(&self) -> bool {
        self.esbuild_install_path().is_file()
    }

    /// Determine which command builds the assets.
    ///
    /// A `build.mjs` inside the assets directory takes precedence over the
    /// built-in esbuild invocation.
    pub fn build_command(&self) -> BuildCommand {
        let custom_script = self.config.assets().join(CUSTOM_BUILD_SCRIPT);
        if custom_script.is_file() {
            return BuildCommand::CustomScript(custom_script);
        }

        let mut args = vec![self.esbuild_install_path().display().to_string()];
        args.extend(
            DEFAULT_ENTRY_POINTS
                .iter()
                .map(|entry| self.config.assets().join(entry).display().to_string()),
        );
        args.extend([
            "--bundle".to_string(),
            "--minify".to_string(),
            "--color=true".to_string(),
            format!("--outdir={}", self.config.output().display()),
            "--log-override:empty-glob=silent".to_string(),
        ]);

        BuildCommand::DefaultInvocation(args)
    }

    /// Build the assets and return the exit code of the build process.
    ///
    /// Returns `1` without spawning anything when esbuild is not installed.
    pub fn build(&self) -> Result<i32, BuildError> {
        if !self.has_esbuild_installed() {
            self.logger.error("Esbuild is not currently installed.");
            self.logger
                .error("Please install it via npm, yarn or some other JS package manager.");

            return Ok(1);
        }

        let command = self.build_command();
        let argv = command.argv();
        let command_line = command.command_line();

        self.logger.info("Building assets with esbuild...");
        self.logger.debug("{command}", &[("command", command_line.as_str())]);

        let output = self
            .runner
            .run(&argv, self.config.root())
            .map_err(|source| BuildError::Spawn {
                command: command_line,
                source,
            })?;

        // esbuild reports its build summary on stderr, so both streams are info.
        for stream in [&output.stdout, &output.stderr] {
            let trimmed = stream.trim_end();
            if !trimmed.is_empty() {
                self.logger.info(trimmed);
            }
        }

        Ok(output.code)
    }
}
