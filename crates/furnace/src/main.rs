//! Furnace CLI - scaffolds and runs esbuild for web applications.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use furnace_pipeline::config::CONFIG_FILE_NAME;
use tracing_subscriber::{fmt, EnvFilter};

use commands::install::{InstallArgs, PluginArg};

mod commands;

#[derive(Parser)]
#[command(name = "furnace")]
#[command(about = "Scaffolds and runs esbuild for web applications")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Path to furnace.toml config file, relative to the root
    #[arg(short, long, global = true, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Directory with assets to compile, relative to the root
    #[arg(long, global = true)]
    assets: Option<String>,

    /// Directory for built assets, relative to the root
    #[arg(long, global = true)]
    output: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Builds assets for the application
    Build,

    /// Installs Furnace into the current application
    Install {
        /// Create TypeScript assets instead of JavaScript
        #[arg(long, overrides_with = "no_typescript")]
        typescript: bool,

        /// Create JavaScript assets
        #[arg(long, overrides_with = "typescript")]
        no_typescript: bool,

        /// Build the assets after installation; this is the default and
        /// only exists to cancel an earlier --no-build
        #[arg(long, overrides_with = "no_build")]
        build: bool,

        /// Do not build the assets after installation
        #[arg(long, overrides_with = "build")]
        no_build: bool,

        /// Plugin to include in the build script; may be repeated
        #[arg(long = "plugin", value_enum)]
        plugins: Vec<PluginArg>,

        /// Skip interactive prompts, use defaults
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let config = commands::asset_config(cli.root, &cli.config, cli.assets, cli.output)?;

    // Execute command
    let code = match cli.command {
        Commands::Build => commands::build::run(config)?,
        Commands::Install {
            typescript,
            no_typescript,
            build,
            no_build,
            plugins,
            yes,
        } => {
            let typescript = match (typescript, no_typescript) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };

            let args = InstallArgs {
                typescript,
                build: build || !no_build,
                plugins,
                yes,
                verbose: cli.verbose,
            };
            commands::install::run(config, args)?
        }
    };

    Ok(exit_code(code))
}

/// Convert a child exit code into the process exit status.
fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code)
        .map(ExitCode::from)
        .unwrap_or(ExitCode::FAILURE)
}
