#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Build configuration record for a Vite-built front end, plus the pieces a
//! backend needs to apply it: config loading, validation, manifest lookup and
//! dev-server detection.

pub mod assets;
pub mod config;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod paths;
pub mod probe;
pub mod settings;
pub mod validate;
pub mod version;

pub use assets::{resolve_entry_assets, EntryAssets};
pub use config::{BuildOptions, EntryInput, Origin, RollupOptions, ServerOptions, ViteConfig};
pub use error::{codes, ConfigError};
pub use loader::{find_config_file, load_config, load_config_file, parse_config_source};
pub use manifest::{Manifest, ManifestChunk};
pub use probe::DevServerProbe;
pub use settings::Settings;
pub use validate::validate_against_root;
pub use version::VERSION;
