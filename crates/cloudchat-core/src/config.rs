use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND: &str = "0.0.0.0";
/// Reported as `model` by GET /status. Fixed, not configurable.
pub const MODEL_NAME: &str = "Cloud Uncensored AI";
pub const DEFAULT_CONFIG_FILE: &str = "cloudchat.toml";
/// Transcript entries kept in memory before the oldest are evicted.
pub const DEFAULT_TRANSCRIPT_CAPACITY: usize = 1000;

/// Top-level config (cloudchat.toml + CLOUDCHAT_* env overrides + PORT).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudChatConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    /// Remote inference services. Listed for status reporting only; the
    /// gateway never calls them.
    #[serde(default = "default_services")]
    pub services: Vec<CloudServiceConfig>,
}

impl Default for CloudChatConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            agent: AgentConfig::default(),
            services: default_services(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum transcript entries held in memory, rounded up to a whole
    /// number of exchanges. `0` disables the bound.
    #[serde(default = "default_transcript_capacity")]
    pub transcript_capacity: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            transcript_capacity: DEFAULT_TRANSCRIPT_CAPACITY,
        }
    }
}

/// A hosted inference service descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CloudServiceConfig {
    pub name: String,
    #[serde(default)]
    pub models: Vec<String>,
    pub base_url: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_transcript_capacity() -> usize {
    DEFAULT_TRANSCRIPT_CAPACITY
}
fn default_services() -> Vec<CloudServiceConfig> {
    vec![CloudServiceConfig {
        name: "Hugging Face".to_string(),
        models: vec![
            "microsoft/DialoGPT-large".to_string(),
            "gpt2-large".to_string(),
            "gpt2".to_string(),
        ],
        base_url: "https://api-inference.huggingface.co/models/".to_string(),
    }]
}

impl CloudChatConfig {
    /// Load config from a TOML file with env var overrides.
    ///
    /// Sources, later ones winning:
    ///   1. built-in defaults
    ///   2. TOML file: explicit path, else `./cloudchat.toml` (missing file is fine)
    ///   3. `CLOUDCHAT_*` env vars, nested keys split on `__`
    ///      (e.g. `CLOUDCHAT_AGENT__TRANSCRIPT_CAPACITY=50`)
    ///   4. `PORT`, the platform convention for the listen port
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_FILE);

        let config: CloudChatConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("CLOUDCHAT_").split("__"))
            .merge(Env::raw().only(&["PORT"]).map(|_| "gateway.port".into()))
            .extract()
            .map_err(|e| crate::error::CloudChatError::Config(e.to_string()))?;

        tracing::debug!(path, services = config.services.len(), "config loaded");
        Ok(config)
    }

    /// `bind:port` string for the TCP listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.gateway.bind, self.gateway.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config = CloudChatConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.gateway.port, 5000);
            assert_eq!(config.gateway.bind, "0.0.0.0");
            assert_eq!(config.agent.transcript_capacity, DEFAULT_TRANSCRIPT_CAPACITY);
            assert_eq!(config.services.len(), 1);
            assert_eq!(config.services[0].name, "Hugging Face");
            Ok(())
        });
    }

    #[test]
    fn port_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "cloudchat.toml",
                r#"
                [gateway]
                port = 7000
                bind = "127.0.0.1"
                "#,
            )?;
            jail.set_env("PORT", "8080");

            let config = CloudChatConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.gateway.port, 8080);
            assert_eq!(config.gateway.bind, "127.0.0.1");
            assert_eq!(config.listen_addr(), "127.0.0.1:8080");
            Ok(())
        });
    }

    #[test]
    fn prefixed_env_sets_nested_keys() {
        Jail::expect_with(|jail| {
            jail.set_env("CLOUDCHAT_AGENT__TRANSCRIPT_CAPACITY", "16");
            jail.set_env("CLOUDCHAT_GATEWAY__BIND", "127.0.0.1");

            let config = CloudChatConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.agent.transcript_capacity, 16);
            assert_eq!(config.gateway.bind, "127.0.0.1");
            Ok(())
        });
    }

    #[test]
    fn unknown_agent_keys_are_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("CLOUDCHAT_AGENT__DISPLAY_NAME", "Renamed Bot");
            let config = CloudChatConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.agent.transcript_capacity, DEFAULT_TRANSCRIPT_CAPACITY);
            assert_eq!(MODEL_NAME, "Cloud Uncensored AI");
            Ok(())
        });
    }

    #[test]
    fn services_from_file_replace_default() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
                [[services]]
                name = "Local"
                base_url = "http://localhost:8000/"

                [[services]]
                name = "Backup"
                models = ["small"]
                base_url = "http://backup:8000/"
                "#,
            )?;

            let config = CloudChatConfig::load(Some("custom.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.services.len(), 2);
            assert!(config.services[0].models.is_empty());
            assert_eq!(config.services[1].models, vec!["small".to_string()]);
            Ok(())
        });
    }

    #[test]
    fn bad_port_is_config_error() {
        Jail::expect_with(|jail| {
            jail.set_env("PORT", "not-a-port");
            let err = CloudChatConfig::load(None).unwrap_err();
            assert_eq!(err.code(), "CONFIG_ERROR");
            Ok(())
        });
    }
}
