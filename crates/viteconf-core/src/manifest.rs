//! Reader for the build manifest (`<outDir>/.vite/manifest.json`).
//!
//! With `build.manifest` enabled the builder writes a JSON object keyed by
//! source path relative to the project root (`resources/main.js`), mapping
//! each to the chunk it produced:
//!
//! ```json
//! {
//!   "resources/main.js": {
//!     "file": "assets/main-4f2a9c1e.js",
//!     "src": "resources/main.js",
//!     "isEntry": true,
//!     "imports": ["_vendor-1b2c3d4e.js"],
//!     "css": ["assets/main-9a8b7c6d.css"]
//!   }
//! }
//! ```

use crate::config::EntryInput;
use crate::error::{codes, ConfigError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// One chunk in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestChunk {
    /// Output file, relative to the output directory.
    pub file: String,
    /// Source path the chunk was built from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub is_entry: bool,
    #[serde(default)]
    pub is_dynamic_entry: bool,
    /// Keys of chunks statically imported by this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    /// Keys of chunks dynamically imported by this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dynamic_imports: Vec<String>,
    /// Stylesheets emitted for this chunk.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css: Vec<String>,
    /// Other assets referenced by this chunk.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<String>,
}

/// Parsed build manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    chunks: BTreeMap<String, ManifestChunk>,
}

impl Manifest {
    /// Load a manifest file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::new(
                codes::MANIFEST_NOT_FOUND,
                format!("Manifest file not found: {}", path.display()),
            )
            .with_path(path));
        }

        let content = viteconf_util::fs::read_to_string_lossy(path).map_err(|e| {
            ConfigError::manifest_invalid(format!(
                "Failed to read manifest {}: {e}",
                path.display()
            ))
            .with_path(path)
        })?;

        let manifest = Self::from_json(&content).map_err(|e| e.with_path(path))?;
        tracing::debug!(path = %path.display(), chunks = manifest.len(), "loaded manifest");
        Ok(manifest)
    }

    /// Parse manifest JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json)
            .map_err(|e| ConfigError::manifest_invalid(format!("Invalid manifest JSON: {e}")))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Look up a chunk by manifest key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ManifestChunk> {
        self.chunks.get(key)
    }

    /// Look up the chunk built from an entry input.
    pub fn entry(&self, input: &EntryInput) -> Result<&ManifestChunk, ConfigError> {
        let key = input.manifest_key();
        self.get(key).ok_or_else(|| {
            ConfigError::new(
                codes::MANIFEST_ENTRY_MISSING,
                format!("Manifest has no entry for '{key}' (from input '{input}')"),
            )
        })
    }

    /// Chunks statically imported by `key`, transitively, in first-visit order.
    ///
    /// The chunk itself is not included. Missing keys are skipped.
    #[must_use]
    pub fn imported_chunks(&self, key: &str) -> Vec<&ManifestChunk> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        seen.insert(key.to_string());
        self.collect_imports(key, &mut seen, &mut out);
        out
    }

    fn collect_imports<'a>(
        &'a self,
        key: &str,
        seen: &mut HashSet<String>,
        out: &mut Vec<&'a ManifestChunk>,
    ) {
        let Some(chunk) = self.get(key) else {
            return;
        };
        for import in &chunk.imports {
            if !seen.insert(import.clone()) {
                continue;
            }
            if let Some(imported) = self.get(import) {
                out.push(imported);
                self.collect_imports(import, seen, out);
            }
        }
    }

    /// Stylesheets needed by `key`: its own css, then that of its static imports.
    ///
    /// Each file appears once.
    #[must_use]
    pub fn imported_css(&self, key: &str) -> Vec<String> {
        let Some(chunk) = self.get(key) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        chunk
            .css
            .iter()
            .chain(self.imported_chunks(key).into_iter().flat_map(|c| c.css.iter()))
            .filter(|css| seen.insert((*css).clone()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "resources/main.js": {
            "file": "assets/main-4f2a9c1e.js",
            "src": "resources/main.js",
            "isEntry": true,
            "imports": ["_vendor-1b2c3d4e.js", "_shared-5e6f7a8b.js"],
            "dynamicImports": ["resources/lazy.js"],
            "css": ["assets/main-9a8b7c6d.css"]
        },
        "_vendor-1b2c3d4e.js": {
            "file": "assets/vendor-1b2c3d4e.js",
            "imports": ["_shared-5e6f7a8b.js"],
            "css": ["assets/vendor-0f1e2d3c.css"]
        },
        "_shared-5e6f7a8b.js": {
            "file": "assets/shared-5e6f7a8b.js",
            "imports": ["resources/main.js"],
            "css": ["assets/main-9a8b7c6d.css"]
        },
        "resources/lazy.js": {
            "file": "assets/lazy-11223344.js",
            "src": "resources/lazy.js",
            "isDynamicEntry": true,
            "css": ["assets/lazy-55667788.css"]
        }
    }"#;

    #[test]
    fn test_entry_lookup_strips_leading_slash() {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        let input = EntryInput::parse("/resources/main.js").unwrap();

        let chunk = manifest.entry(&input).unwrap();
        assert_eq!(chunk.file, "assets/main-4f2a9c1e.js");
        assert!(chunk.is_entry);
        assert_eq!(chunk.dynamic_imports, vec!["resources/lazy.js"]);
    }

    #[test]
    fn test_entry_missing() {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        let input = EntryInput::parse("/resources/other.js").unwrap();

        let err = manifest.entry(&input).unwrap_err();
        assert_eq!(err.code(), codes::MANIFEST_ENTRY_MISSING);
    }

    #[test]
    fn test_imported_chunks_handles_cycles() {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        let files: Vec<_> = manifest
            .imported_chunks("resources/main.js")
            .iter()
            .map(|c| c.file.as_str())
            .collect();
        assert_eq!(
            files,
            vec!["assets/vendor-1b2c3d4e.js", "assets/shared-5e6f7a8b.js"]
        );
    }

    #[test]
    fn test_imported_css_is_deduplicated_and_skips_dynamic() {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        assert_eq!(
            manifest.imported_css("resources/main.js"),
            vec!["assets/main-9a8b7c6d.css", "assets/vendor-0f1e2d3c.css"]
        );
        assert!(manifest.imported_css("missing.js").is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::load(&dir.path().join("manifest.json")).unwrap_err();
        assert_eq!(err.code(), codes::MANIFEST_NOT_FOUND);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, r#"{"resources/main.js": {"src": "no file field"}}"#).unwrap();

        let err = Manifest::load(&path).unwrap_err();
        assert_eq!(err.code(), codes::MANIFEST_INVALID);
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, MANIFEST).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.len(), 4);
        assert!(manifest.get("resources/lazy.js").unwrap().is_dynamic_entry);
    }
}
