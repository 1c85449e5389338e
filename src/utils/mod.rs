/// `campus.toml` loading, validation and reloading.
pub mod toml_config;
