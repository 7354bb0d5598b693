//! `viteconf check`: validate the config against the project on disk.

use super::{error_json, fail, load};
use miette::{IntoDiagnostic, Result};
use std::path::Path;
use viteconf_core::{validate_against_root, Settings};

pub fn run(settings: &Settings, config_path: Option<&Path>, json: bool) -> Result<()> {
    let (root, source, config) = load(settings, config_path).map_err(|e| fail(e, json))?;

    tracing::debug!(root = %root.display(), source = %source.describe(), "validating config");

    if let Err(err) = validate_against_root(&config, &root) {
        if json {
            let mut output = error_json(&err);
            output["source"] = serde_json::json!(source.path().map(|p| p.display().to_string()));
            println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            std::process::exit(1);
        }
        return Err(fail(err, false));
    }

    if json {
        let output = serde_json::json!({
            "ok": true,
            "source": source.path().map(|p| p.display().to_string()),
            "root": root.display().to_string(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("\x1b[32m✓\x1b[0m {} is valid", source.describe());
        println!("  origin: {}", config.origin());
        println!("  entry:  {} ({})", config.input(), root.display());
    }

    Ok(())
}
