//! Travel tool endpoints from TOML (`[tools]` section)
//!
//! Base URLs are only overridden for testing or self-hosted proxies:
//!
//! ```toml
//! [tools]
//! timeout_secs = 30
//! flights_base_url = "https://serpapi.com"
//! ```

use crate::tools::ToolEndpoints;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Timeout for every tool HTTP request
    pub timeout_secs: u64,
    pub flights_base_url: String,
    pub hotels_base_url: String,
    pub cost_of_living_base_url: String,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        let endpoints = ToolEndpoints::default();
        Self {
            timeout_secs: 30,
            flights_base_url: endpoints.flights,
            hotels_base_url: endpoints.hotels,
            cost_of_living_base_url: endpoints.cost_of_living,
        }
    }
}

impl FileToolsConfig {
    pub fn endpoints(&self) -> ToolEndpoints {
        ToolEndpoints {
            flights: self.flights_base_url.clone(),
            hotels: self.hotels_base_url.clone(),
            cost_of_living: self.cost_of_living_base_url.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
