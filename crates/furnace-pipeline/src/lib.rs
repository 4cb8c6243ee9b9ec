//! Asset configuration and esbuild invocation pipeline.
//!
//! Resolves where assets live and where built output goes, then runs either a
//! project's own `build.mjs` or the esbuild binary with a fixed set of flags.

pub mod config;
pub mod logger;
pub mod pipeline;
pub mod process;

pub use config::{AssetConfig, ConfigError, ConfigFile};
pub use logger::{Logger, TracingLogger};
pub use pipeline::{BuildCommand, BuildError, Pipeline};
pub use process::{ProcessOutput, ProcessRunner, SystemRunner};
