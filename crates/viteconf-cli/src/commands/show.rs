//! `viteconf show`: print the loaded config record.

use super::{fail, load};
use miette::{IntoDiagnostic, Result};
use std::path::Path;
use viteconf_core::Settings;

pub fn run(settings: &Settings, config_path: Option<&Path>, json: bool) -> Result<()> {
    let (_, source, config) = load(settings, config_path).map_err(|e| fail(e, json))?;

    if json {
        let output = serde_json::json!({
            "ok": true,
            "source": source.path().map(|p| p.display().to_string()),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("Config:   {}", source.describe());
        println!("server.origin:              {}", config.origin());
        println!("build.manifest:             {}", config.manifest());
        println!("build.rollupOptions.input:  {}", config.input());
    }

    Ok(())
}
