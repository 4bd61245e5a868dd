use std::collections::HashMap;

use config::Config;
use validator::Validate;

use crate::service::gateway::error::GatewayError;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub gateway: GatewayConfig,
    pub processor: ProcessorConfig,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct GatewayConfig {
    pub api_key: String,
    pub stored: Option<bool>,
    pub currency: Option<String>,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ProcessorConfig {
    pub url: String,
    pub timeout_secs: Option<u64>,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let cfg = Config::builder()
        .add_source(config::Environment::default().separator("__"))
        .build()?;
    cfg.try_deserialize::<Settings>()
}

impl GatewayConfig {
    pub fn meta(&self) -> Result<GatewayMeta, GatewayError> {
        GatewayMeta::new(&self.api_key, self.stored.unwrap_or(false))
    }
}

/// The validated gateway settings form: a secret api key plus the flag that
/// routes payments through the offsite-stored path.
#[derive(Clone, Debug, Validate, serde::Serialize, serde::Deserialize)]
pub struct GatewayMeta {
    #[validate(length(min = 1, message = "api key must not be empty"))]
    pub api_key: String,
    #[serde(default)]
    pub stored: bool,
}

impl GatewayMeta {
    pub fn new(api_key: &str, stored: bool) -> Result<GatewayMeta, GatewayError> {
        let meta = GatewayMeta {
            api_key: api_key.to_string(),
            stored,
        };
        meta.check()?;
        Ok(meta)
    }

    /// Validates raw meta coming from the settings store. A missing `stored`
    /// key defaults to false.
    pub fn parse(meta: &HashMap<String, String>) -> Result<GatewayMeta, GatewayError> {
        let api_key = meta.get("api_key").cloned().unwrap_or_default();
        let stored = meta.get("stored").map(|v| v == "true").unwrap_or(false);
        GatewayMeta::new(&api_key, stored)
    }

    fn check(&self) -> Result<(), GatewayError> {
        let errors = match self.validate() {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        let (field, message) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, field_errors)| {
                let message = field_errors
                    .first()
                    .and_then(|err| err.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                (field.to_string(), message)
            })
            .unwrap_or_else(|| ("api_key".to_string(), "invalid value".to_string()));
        Err(GatewayError::Validation { field, message })
    }
}
