//! Asset build command.

use std::sync::Arc;

use anyhow::Result;
use furnace_pipeline::{AssetConfig, Pipeline, TracingLogger};

/// Run the build command and return the build's exit code.
pub fn run(config: AssetConfig) -> Result<i32> {
    let pipeline = Pipeline::new(config, Arc::new(TracingLogger));
    let code = pipeline.build()?;

    if code == 0 {
        tracing::debug!("Output: {}", pipeline.config().output().display());
    }

    Ok(code)
}
