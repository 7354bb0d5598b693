//! `viteconf init`: write the default `vite.config.js`.
//!
//! Non-destructive unless `--force` is given.

use miette::{miette, IntoDiagnostic, Result};
use viteconf_core::loader::CONFIG_FILES;
use viteconf_core::{find_config_file, Settings, ViteConfig};

pub fn run(settings: &Settings, force: bool, json: bool) -> Result<()> {
    let root = settings.project_root();

    if let Some(existing) = find_config_file(&root) {
        if !force {
            if json {
                let output = serde_json::json!({
                    "ok": false,
                    "error": {
                        "code": "CONFIG_EXISTS",
                        "message": format!("{} already exists", existing.display()),
                        "path": existing.display().to_string(),
                    }
                });
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
                std::process::exit(1);
            }
            return Err(miette!(
                code = "CONFIG_EXISTS",
                help = "pass --force to overwrite",
                "{} already exists",
                existing.display()
            ));
        }
    }

    let path = root.join(CONFIG_FILES[0]);
    let source = ViteConfig::default().to_js_source();
    viteconf_util::fs::atomic_write(&path, source.as_bytes())
        .map_err(|e| miette!("Failed to write {}: {}", path.display(), e))?;

    tracing::debug!(path = %path.display(), "wrote config");

    if json {
        let output = serde_json::json!({
            "ok": true,
            "created": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("Created {}", path.display());
    }

    Ok(())
}
