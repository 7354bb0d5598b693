//! `viteconf entry`: print the tags that load the entry module.
//!
//! Probes the dev server first; when it is not running, reads the build
//! manifest.

use super::{fail, load};
use miette::{IntoDiagnostic, Result};
use std::path::Path;
use viteconf_core::{resolve_entry_assets, DevServerProbe, Settings};

pub fn run(settings: &Settings, config_path: Option<&Path>, probe: bool, json: bool) -> Result<()> {
    let (root, _, config) = load(settings, config_path).map_err(|e| fail(e, json))?;

    let dev_running = if probe {
        let prober = DevServerProbe::new().map_err(|e| fail(e, json))?;
        let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;
        runtime.block_on(prober.is_running(config.server().origin()))
    } else {
        false
    };
    tracing::info!(dev_running, origin = config.origin(), "resolved dev server state");

    let assets = resolve_entry_assets(&config, &root, &settings.out_dir, dev_running)
        .map_err(|e| fail(e, json))?;

    if json {
        let output = serde_json::json!({
            "ok": true,
            "assets": assets,
        });
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        print!("{}", assets.to_html());
    }

    Ok(())
}
