//! Optional esbuild plugins offered by the installer.

/// An esbuild plugin the installer knows how to set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plugin {
    Tailwind,
    Less,
}

/// Lines added to the generated build script for an installed plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginRegistration {
    /// Import statement
    pub import: &'static str,
    /// Entry inside the `plugins` array
    pub plugin: &'static str,
}

impl Plugin {
    /// Every plugin, in prompt order.
    pub const ALL: [Plugin; 2] = [Plugin::Tailwind, Plugin::Less];

    /// Label shown in the plugin prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Plugin::Tailwind => "TailwindCSS",
            Plugin::Less => "LessCSS",
        }
    }

    /// npm package providing the plugin.
    pub fn package(&self) -> &'static str {
        match self {
            Plugin::Tailwind => "esbuild-plugin-tailwindcss",
            Plugin::Less => "esbuild-plugin-less",
        }
    }

    pub fn registration(&self) -> PluginRegistration {
        match self {
            Plugin::Tailwind => PluginRegistration {
                import: r#"import tailwindPlugin from "esbuild-plugin-tailwindcss";"#,
                plugin: "tailwindPlugin(),",
            },
            Plugin::Less => PluginRegistration {
                import: r#"import { lessLoader } from "esbuild-plugin-less";"#,
                plugin: "lessLoader(),",
            },
        }
    }

    /// Map prompt selections back to plugins, ignoring unknown indices.
    pub fn from_selection(indices: &[usize]) -> Vec<Plugin> {
        indices
            .iter()
            .filter_map(|&i| Plugin::ALL.get(i).copied())
            .collect()
    }
}
