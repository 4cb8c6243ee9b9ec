//! Install Furnace into a project.

use std::sync::Arc;

use anyhow::Result;
use clap::ValueEnum;
use furnace_installer::{
    DefaultPrompter, InstallError, InstallOptions, Installer, Plugin, Prompter, TerminalPrompter,
};
use furnace_pipeline::{AssetConfig, TracingLogger};

/// Plugin names accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PluginArg {
    /// TailwindCSS via esbuild-plugin-tailwindcss
    Tailwind,
    /// LessCSS via esbuild-plugin-less
    Less,
}

impl From<PluginArg> for Plugin {
    fn from(arg: PluginArg) -> Self {
        match arg {
            PluginArg::Tailwind => Plugin::Tailwind,
            PluginArg::Less => Plugin::Less,
        }
    }
}

/// Parsed `install` arguments.
#[derive(Debug)]
pub struct InstallArgs {
    pub typescript: Option<bool>,
    pub build: bool,
    pub plugins: Vec<PluginArg>,
    pub yes: bool,
    pub verbose: bool,
}

impl InstallArgs {
    fn options(&self) -> InstallOptions {
        // Plugins given on the command line skip the plugin prompt.
        let plugins = if self.plugins.is_empty() && !self.yes {
            None
        } else {
            Some(self.plugins.iter().copied().map(Plugin::from).collect())
        };

        InstallOptions {
            typescript: self.typescript,
            plugins,
            build: self.build,
            verbose: self.verbose,
        }
    }
}

/// Run the install command.
pub fn run(config: AssetConfig, args: InstallArgs) -> Result<i32> {
    tracing::info!("Installing furnace...");

    let prompter: Box<dyn Prompter> = if args.yes {
        Box::new(DefaultPrompter)
    } else {
        Box::new(TerminalPrompter)
    };

    let installer = Installer::new(config, args.options(), Arc::new(TracingLogger), prompter)?;

    match installer.install() {
        Ok(report) => {
            tracing::info!(
                "Installed esbuild with {} ({} files written)",
                report.package_manager,
                report.files.len()
            );
            if !report.built {
                tracing::info!("Run 'furnace build' to build your assets.");
            }
            Ok(0)
        }
        // The bundler could not even be started; nothing to recover here.
        Err(InstallError::Build(e)) => Err(e.into()),
        Err(e) => {
            tracing::error!("{}", e);
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(plugins: Vec<PluginArg>, yes: bool) -> InstallArgs {
        InstallArgs {
            typescript: None,
            build: true,
            plugins,
            yes,
            verbose: false,
        }
    }

    #[test]
    fn prompts_for_plugins_when_none_given() {
        assert!(args(vec![], false).options().plugins.is_none());
    }

    #[test]
    fn non_interactive_install_selects_no_plugins() {
        assert_eq!(args(vec![], true).options().plugins, Some(vec![]));
    }

    #[test]
    fn plugin_flags_skip_prompt() {
        assert_eq!(
            args(vec![PluginArg::Less, PluginArg::Tailwind], false)
                .options()
                .plugins,
            Some(vec![Plugin::Less, Plugin::Tailwind])
        );
    }
}
