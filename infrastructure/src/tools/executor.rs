//! HTTP tool executor — the concrete implementation of [`ToolExecutorPort`].
//!
//! ```text
//! ToolExecutorPort::execute(call)
//!   ├─ unknown name          → failed ToolResult (NOT_FOUND)
//!   ├─ find_flights          → flights::execute_find_flights
//!   ├─ find_hotels           → hotels::execute_find_hotels
//!   └─ find_cost_of_living   → cost_of_living::execute_find_cost_of_living
//! ```
//!
//! All tools share one `reqwest::Client` with the configured timeout.

use super::{
    COST_OF_LIVING_API_KEY_ENV, LITEAPI_API_KEY_ENV, SERP_API_KEY_ENV, ToolEndpoints,
    cost_of_living, flights, hotels,
};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use travel_application::ports::tool_executor::ToolExecutorPort;
use travel_domain::tool::{
    catalog::TravelTool,
    entities::ToolCall,
    value_objects::{ToolError, ToolResult},
};

/// API keys for the travel tools, one per upstream service.
///
/// A missing key disables only its tool.
#[derive(Clone, Default)]
pub struct ToolCredentials {
    pub serp_api_key: Option<String>,
    pub liteapi_key: Option<String>,
    pub cost_of_living_key: Option<String>,
}

impl ToolCredentials {
    /// Read every key from the process environment. Blank values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            serp_api_key: read(SERP_API_KEY_ENV),
            liteapi_key: read(LITEAPI_API_KEY_ENV),
            cost_of_living_key: read(COST_OF_LIVING_API_KEY_ENV),
        }
    }

    /// Names of the environment variables that are not set.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (SERP_API_KEY_ENV, &self.serp_api_key),
            (LITEAPI_API_KEY_ENV, &self.liteapi_key),
            (COST_OF_LIVING_API_KEY_ENV, &self.cost_of_living_key),
        ]
        .into_iter()
        .filter(|(_, key)| key.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

impl std::fmt::Debug for ToolCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |key: &Option<String>| key.as_ref().map(|_| "***");
        f.debug_struct("ToolCredentials")
            .field("serp_api_key", &mask(&self.serp_api_key))
            .field("liteapi_key", &mask(&self.liteapi_key))
            .field("cost_of_living_key", &mask(&self.cost_of_living_key))
            .finish()
    }
}

/// Executor that calls the travel APIs over HTTP.
#[derive(Debug, Clone)]
pub struct TravelToolExecutor {
    http_client: reqwest::Client,
    endpoints: ToolEndpoints,
    credentials: ToolCredentials,
}

impl TravelToolExecutor {
    /// Create an executor whose HTTP client times out after `timeout`.
    pub fn new(
        endpoints: ToolEndpoints,
        credentials: ToolCredentials,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("travel-agent/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(http_client, endpoints, credentials))
    }

    pub fn with_client(
        http_client: reqwest::Client,
        endpoints: ToolEndpoints,
        credentials: ToolCredentials,
    ) -> Self {
        let missing = credentials.missing();
        if !missing.is_empty() {
            info!(
                "Travel tools without credentials (will report as not configured): {}",
                missing.join(", ")
            );
        }
        Self {
            http_client,
            endpoints,
            credentials,
        }
    }
}

#[async_trait]
impl ToolExecutorPort for TravelToolExecutor {
    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let Some(tool) = TravelTool::from_name(&call.tool_name) else {
            return ToolResult::failure(&call.tool_name, ToolError::not_found(&call.tool_name));
        };

        let start = Instant::now();
        let client = &self.http_client;
        let result = match tool {
            TravelTool::FindFlights => {
                flights::execute_find_flights(
                    client,
                    &self.endpoints.flights,
                    self.credentials.serp_api_key.as_deref(),
                    call,
                )
                .await
            }
            TravelTool::FindHotels => {
                hotels::execute_find_hotels(
                    client,
                    &self.endpoints.hotels,
                    self.credentials.liteapi_key.as_deref(),
                    call,
                )
                .await
            }
            TravelTool::FindCostOfLiving => {
                cost_of_living::execute_find_cost_of_living(
                    client,
                    &self.endpoints.cost_of_living,
                    self.credentials.cost_of_living_key.as_deref(),
                    call,
                )
                .await
            }
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        debug!(
            "Tool {} finished in {}ms (success: {})",
            tool,
            duration_ms,
            result.is_success()
        );
        result.with_duration(duration_ms)
    }
}
