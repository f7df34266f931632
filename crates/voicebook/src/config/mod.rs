//! TOML configuration with cross-platform paths and atomic saves.

mod audio_config;
#[allow(clippy::module_inception)]
mod config;
mod server_config;

pub use {audio_config::AudioConfig, config::Config, server_config::ServerConfig};

pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

pub(crate) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
