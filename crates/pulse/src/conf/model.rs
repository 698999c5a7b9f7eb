//! Model — PulseConfig and related types.

use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::mine::path::DEFAULT_DETOUR_WINDOW;
use crate::mine::similarity::DEFAULT_SIMILARITY_THRESHOLD;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Minimum similarity score for a pooled line to be aligned with a new one.
    pub similarity_threshold: f64,
    /// How much farther a vertex may be and still win on a longer run.
    pub detour_window: usize,
    /// Bound of the ingestion queue.
    pub channel_capacity: usize,
    /// 0 = unbounded
    pub max_pool_size: usize,
    /// Lines longer than this (in chars) are skipped. 0 = no limit.
    pub max_line_len: usize,
    pub output: OutputFormat,
}

/// How the binary prints discovered patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            detour_window: DEFAULT_DETOUR_WINDOW,
            channel_capacity: 1024,
            max_pool_size: 0,
            max_line_len: 4096,
            output: OutputFormat::Text,
        }
    }
}

impl PulseConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            ));
        }
        if self.channel_capacity == 0 {
            return Err("channel_capacity must be > 0".to_string());
        }
        Ok(())
    }
}
