use serde::{Deserialize, Serialize};
use sepa_qr_types::{CharacterSet, Version};

/// Values every payload built from this config starts out with.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PayloadDefaults {
    #[serde(default)]
    pub version: Version,
    #[serde(default)]
    pub character_set: CharacterSet,
    #[serde(default = "super::default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information: Option<String>,
}

impl Default for PayloadDefaults {
    fn default() -> Self {
        Self {
            version: Version::default(),
            character_set: CharacterSet::default(),
            currency: super::default_currency(),
            purpose: None,
            information: None,
        }
    }
}
