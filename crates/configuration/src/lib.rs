use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, ServerConfig};

/// Loads the application configuration.
///
/// This function is the primary entry point for this crate. Sources are
/// layered, later ones winning:
///
/// 1. Built-in defaults (`0.0.0.0:3000`).
/// 2. An optional `config.toml` in the working directory.
/// 3. Environment variables prefixed with `SHOPEASE`, using `__` as the
///    section separator (e.g. `SHOPEASE_SERVER__PORT=8080`).
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`.
        // The file is optional; defaults cover every field.
        .add_source(config::File::with_name("config.toml").required(false))
        .add_source(config::Environment::with_prefix("SHOPEASE").separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    Ok(config)
}
