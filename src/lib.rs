//! Vizdiff CLI library
//!
//! Packages a Storybook build directory, resolves the git identity of the change being tested
//! and uploads both to the Vizdiff comparison service.

pub mod app;
pub mod archive;
pub mod config;
pub mod git_metadata;
mod helpers;
pub mod logger;
pub mod manifest;
mod prelude;
mod request_client;
pub mod uploader;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
