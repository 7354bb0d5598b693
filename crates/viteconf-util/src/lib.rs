#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Shared utilities for viteconf.
//!
//! Pure helpers with no logging dependencies. Logging is installed by the CLI
//! crate so library crates stay light.

pub mod fs;
