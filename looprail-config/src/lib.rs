//! Configuration loading for looprail hosts
//!
//! Resolves a [`ScrollerConfig`] from the environment or well-known files and
//! runs the guard rails that reject configurations the controller cannot work
//! with.

pub mod loader;
pub mod validation;

pub use looprail_core::ScrollerConfig;

pub use loader::{
    ConfigLoader, ConfigNotFound, LoadedConfig, ScrollerConfigSource,
    load_explicit,
};
pub use validation::{
    ConfigGuardRailError, ConfigWarning, ConfigWarnings, apply_guard_rails,
};

/// Load from the process environment and validate.
pub fn load_from_env() -> anyhow::Result<LoadedConfig> {
    ConfigLoader::from_env().load_validated()
}
