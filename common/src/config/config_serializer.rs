use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Validate;

/// YAML codec for a config type. Decoding validates before handing the value
/// back, so a config that parses but breaks its own rules is still an error.
pub struct YamlConfigSerializer<TConfig> {
    _config: PhantomData<TConfig>,
}

impl<TConfig> Default for YamlConfigSerializer<TConfig> {
    fn default() -> Self {
        Self::new()
    }
}

impl<TConfig> YamlConfigSerializer<TConfig> {
    pub fn new() -> Self {
        Self {
            _config: PhantomData,
        }
    }
}

impl<TConfig> YamlConfigSerializer<TConfig>
where
    TConfig: Serialize + DeserializeOwned + Validate,
{
    pub fn serialize(&self, config: &TConfig) -> Result<String, String> {
        serde_yaml_ng::to_string(config).map_err(|e| format!("Failed to serialize config: {}", e))
    }

    pub fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        let config: TConfig = serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Failed to deserialize config: {}", e))?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;
        Ok(config)
    }
}
