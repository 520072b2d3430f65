//! Configuration management

use crate::ingest::MAX_UPLOAD_BYTES;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// LLM provider (gemini, anthropic, compatible)
    pub provider: String,
    /// API key
    #[serde(default)]
    pub api_key: String,
    /// Model name override
    pub model: Option<String>,
    /// Endpoint override (required for compatible providers)
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from file, with `ESG_`-prefixed environment
    /// variables taking precedence.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path
            .as_ref()
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("config path is not valid UTF-8"))?;
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("ESG").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Load from default locations.
    pub fn load_default() -> anyhow::Result<Self> {
        Self::load_first_existing(&["config.toml", "~/.config/esg-radar/config.toml"])
    }

    fn load_first_existing(paths: &[&str]) -> anyhow::Result<Self> {
        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::load(expanded.as_ref());
            }
        }

        anyhow::bail!("No configuration file found")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}
