use crate::error::Result;
use crate::validation::InputValidator;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Sequential thinking server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequentialThinkingConfig {
    /// Server identification
    pub server: ServerConfig,
    /// Console display of recorded thoughts
    #[serde(default)]
    pub display: DisplayConfig,
    /// Input limits
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server name reported to clients
    pub name: String,
    /// Server version reported to clients
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Print each recorded thought to stderr
    pub enabled: bool,
    /// Use ANSI colors for the printed header
    pub colored: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum thought length in characters; unlimited when unset
    pub max_thought_length: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "sequential-thinking".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            colored: true,
        }
    }
}

impl SequentialThinkingConfig {
    /// Load configuration from defaults, an optional TOML file and the environment
    pub fn load() -> Result<Self> {
        let file = std::env::var("SEQUENTIAL_THINKING_CONFIG")
            .unwrap_or_else(|_| "sequential-thinking.toml".to_string());
        Self::load_from(&file)
    }

    /// Load configuration using `file` as the optional config file
    pub fn load_from(file: &str) -> Result<Self> {
        let config = Config::builder()
            .set_default("server.name", "sequential-thinking")?
            .set_default("server.version", env!("CARGO_PKG_VERSION"))?
            .set_default("display.enabled", false)?
            .set_default("display.colored", true)?
            .add_source(File::with_name(file).required(false))
            // SEQUENTIAL_THINKING__LIMITS__MAX_THOUGHT_LENGTH=4000
            .add_source(
                Environment::with_prefix("SEQUENTIAL_THINKING")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Validator honoring the configured limits
    pub fn validator(&self) -> InputValidator {
        match self.limits.max_thought_length {
            Some(max) => InputValidator::new().with_max_thought_length(max),
            None => InputValidator::new(),
        }
    }
}
