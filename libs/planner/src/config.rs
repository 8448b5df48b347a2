use std::time::Duration;

use serde::Deserialize;

use crate::identify::{GOOD_THRESHOLD, MIN_THRESHOLD};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub refine_max_tokens: u32,
    pub refine_temperature: f32,
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 8000,
            temperature: 0.6,
            refine_max_tokens: 3000,
            refine_temperature: 0.6,
            timeout_secs: 120,
        }
    }
}

impl GenerationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IdentificationSettings {
    pub good_threshold: f32,
    pub min_threshold: f32,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for IdentificationSettings {
    fn default() -> Self {
        Self {
            good_threshold: GOOD_THRESHOLD,
            min_threshold: MIN_THRESHOLD,
            max_tokens: 400,
            temperature: 0.3,
            timeout_secs: 30,
        }
    }
}

impl IdentificationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
