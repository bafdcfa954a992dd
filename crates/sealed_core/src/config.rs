//! Generation-time configuration.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::naming::NamingRule;

/// Key used for the discriminator field when none is configured.
pub const DEFAULT_DISCRIMINATOR_KEY: &str = "type";

/// Options bound to one generation run.
///
/// ```
/// use sealed_core::{Config, NamingRule};
///
/// let config: Config =
///     serde_json::from_str(r#"{"discriminatorKey": "kind", "namingRule": "upperSnakeCase"}"#)
///         .unwrap();
/// assert_eq!(config, Config::new("kind", NamingRule::UpperSnakeCase));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_discriminator_key")]
    pub discriminator_key: String,
    pub naming_rule: NamingRule,
}

fn default_discriminator_key() -> String {
    DEFAULT_DISCRIMINATOR_KEY.to_string()
}

impl Config {
    pub fn new(discriminator_key: impl Into<String>, naming_rule: NamingRule) -> Self {
        Self {
            discriminator_key: discriminator_key.into(),
            naming_rule,
        }
    }

    /// Config with the default `"type"` key.
    pub fn with_rule(naming_rule: NamingRule) -> Self {
        Self::new(DEFAULT_DISCRIMINATOR_KEY, naming_rule)
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.discriminator_key.is_empty() {
            return Err(SchemaError::InvalidConfiguration(
                "discriminator key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_rule(NamingRule::SameAsCaseName)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.discriminator_key, "type");
        assert_eq!(config.naming_rule, NamingRule::SameAsCaseName);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_defaults_key() {
        let config: Config = serde_json::from_str(r#"{"namingRule": "upperCase"}"#).unwrap();
        assert_eq!(config, Config::with_rule(NamingRule::UpperCase));
    }

    #[test]
    fn test_deserialize_rejects_unknown_rule() {
        let result = serde_json::from_str::<Config>(r#"{"namingRule": "SCREAMING_SNAKE_CASE"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        let config = Config::new("", NamingRule::UpperCase);
        assert!(matches!(
            config.validate(),
            Err(SchemaError::InvalidConfiguration(_))
        ));
    }
}
