use std::path::{Path, PathBuf};

/// Default build output directory (Vite's `build.outDir`).
pub const DEFAULT_OUT_DIR: &str = "dist";

/// Manifest location relative to the output directory.
pub const MANIFEST_RELATIVE_PATH: &str = ".vite/manifest.json";

/// Find the project root by walking up from `cwd` looking for `package.json` or `.git`.
///
/// Returns the first directory containing either marker, or `None` if neither is found.
#[must_use]
pub fn project_root(cwd: &Path) -> Option<PathBuf> {
    let mut current = cwd.to_path_buf();

    loop {
        if current.join("package.json").exists() || current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Resolve a root-absolute entry path (`/resources/main.js`) against the project root.
#[must_use]
pub fn input_path(root: &Path, input: &str) -> PathBuf {
    root.join(input.trim_start_matches('/'))
}

/// Path of the build manifest for the given output directory.
///
/// A relative `out_dir` is taken relative to `root`.
#[must_use]
pub fn manifest_path(root: &Path, out_dir: &Path) -> PathBuf {
    let out = if out_dir.is_absolute() {
        out_dir.to_path_buf()
    } else {
        root.join(out_dir)
    };
    out.join(MANIFEST_RELATIVE_PATH)
}
