//! Stub files written into a project by the installer.

use minijinja::{context, AutoEscape, Environment};

/// Values substituted into the generated `build.mjs`.
#[derive(Debug, Clone, Default)]
pub struct BuildScriptContext {
    /// Import statements for installed plugins
    pub imports: Vec<String>,
    /// Entries for the `plugins` array
    pub plugins: Vec<String>,
    /// Entry point, relative to the project root
    pub entry_point: String,
    /// Output directory, relative to the project root
    pub outdir: String,
}

/// Renders stub files using minijinja.
pub struct StubEngine {
    env: Environment<'static>,
}

impl StubEngine {
    /// Create an engine with the built-in stubs.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();

        // Stubs are source code, never HTML.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        env.add_template("build.mjs", BUILD_STUB)?;
        env.add_template("app", APP_STUB)?;

        Ok(Self { env })
    }

    /// Render the esbuild build script.
    pub fn render_build_script(&self, ctx: &BuildScriptContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("build.mjs")?;

        tmpl.render(context! {
            imports => ctx.imports.join("\n"),
            plugins => ctx.plugins.join("\n    "),
            entry_point => &ctx.entry_point,
            outdir => &ctx.outdir,
        })
    }

    /// Render the initial application script.
    pub fn render_app_script(&self, typescript: bool) -> Result<String, minijinja::Error> {
        self.env
            .get_template("app")?
            .render(context! { typescript => typescript })
    }
}

/// Import line that pulls the generated stylesheet into the app script.
pub const CSS_IMPORT: &str = "import './app.css'";

/// Prepend the stylesheet import to an app script unless it is already there.
pub fn with_css_import(script: &str) -> String {
    if script.lines().any(|line| line.trim() == CSS_IMPORT) {
        return script.to_string();
    }
    format!("{}\n\n{}", CSS_IMPORT, script)
}

/// Minimal `package.json` for projects that do not have one yet.
pub fn package_json(name: &str) -> String {
    let manifest = serde_json::json!({
        "name": name,
        "private": true,
        "devDependencies": {},
    });

    // Serializing a `Value` built in place cannot fail.
    serde_json::to_string_pretty(&manifest).unwrap_or_default() + "\n"
}

pub const TAILWIND_CONFIG_STUB: &str = r#"import colors from 'tailwindcss/colors';

/** @type {import('tailwindcss').Config} */
export default {
  content: [
    "./resources/views/**/*.html.php",
  ],
  theme: {
    extend: {
      colors: {
        accent: colors.orange,
      }
    },
  },
  plugins: [],
}
"#;

pub const APP_CSS_STUB: &str = r#"@tailwind base;
@tailwind components;
@tailwind utilities;
"#;

const APP_STUB: &str = r#"function printGreeting(){% if typescript %}: void{% endif %} {
  console.log("Hello, world!");
}
"#;

const BUILD_STUB: &str = r#"import * as esbuild from 'esbuild'
{{ imports }}

await esbuild.build({
  /**
   * Scripts esbuild starts resolving from. Larger applications can split
   * their code into several entry points, one per logical area.
   */
  entryPoints: [
    '{{ entry_point }}'
  ],

  /**
   * Inline imported dependencies into the files that reference them,
   * producing fewer but larger assets.
   */
  bundle: true,

  /**
   * Minify output instead of pretty-printing it. Smaller files download
   * faster; readable files are easier to debug.
   */
  minify: true,

  /**
   * Where built assets are written. The directory can always be rebuilt,
   * so keep it out of version control.
   */
  outdir: '{{ outdir }}',

  /**
   * esbuild plugins. Each must be installed and imported above, e.g. for
   * TailwindCSS, PostCSS or Markdown support.
   */
  plugins: [
    {{ plugins }}
  ]
});
"#;
