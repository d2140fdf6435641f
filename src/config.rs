use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub caret_placeholder: String,
    pub anchor_offset_y: f64,
    pub list_offset_y: f64,
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            caret_placeholder: "%caret%".to_string(),
            anchor_offset_y: 20.0,
            list_offset_y: 5.0,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(raw)?;
        if config.caret_placeholder.is_empty() {
            config.caret_placeholder = Self::default().caret_placeholder;
        }
        Ok(config)
    }
}
