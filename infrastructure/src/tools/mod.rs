//! Travel tools backed by third-party HTTP APIs.
//!
//! Every tool fails closed: a missing API key, a network error or an
//! unexpected response turns into a descriptive message for the model, never
//! into an error that aborts the turn.
//!
//! | Tool | Upstream | Credential |
//! |------|----------|------------|
//! | `find_flights` | SerpApi Google Flights | `SERP_API_KEY` |
//! | `find_hotels` | LiteAPI hotel rates | `LITEAPI_API_KEY` |
//! | `find_cost_of_living` | RapidAPI cost-of-living prices | `COST_OF_LIVING_API_KEY` |

mod cost_of_living;
mod executor;
mod flights;
mod hotels;
mod schema;

pub use cost_of_living::COST_OF_LIVING_API_KEY_ENV;
pub use executor::{ToolCredentials, TravelToolExecutor};
pub use flights::SERP_API_KEY_ENV;
pub use hotels::LITEAPI_API_KEY_ENV;
pub use schema::OpenAiToolConverter;

use serde_json::Value;

pub const DEFAULT_FLIGHTS_BASE_URL: &str = "https://serpapi.com";
pub const DEFAULT_HOTELS_BASE_URL: &str = "https://api.liteapi.travel/v3.0";
pub const DEFAULT_COST_OF_LIVING_BASE_URL: &str =
    "https://cost-of-living-and-prices.p.rapidapi.com";

/// Base URLs of the upstream APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolEndpoints {
    pub flights: String,
    pub hotels: String,
    pub cost_of_living: String,
}

impl Default for ToolEndpoints {
    fn default() -> Self {
        Self {
            flights: DEFAULT_FLIGHTS_BASE_URL.to_string(),
            hotels: DEFAULT_HOTELS_BASE_URL.to_string(),
            cost_of_living: DEFAULT_COST_OF_LIVING_BASE_URL.to_string(),
        }
    }
}

/// Join a base URL and a path without doubling the slash.
fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Message returned when a tool's API key is not set.
fn not_configured(service: &str, env_var: &str) -> String {
    format!(
        "{} is not configured: missing {}. Please set it in your environment.",
        service, env_var
    )
}

/// Send a request and decode the JSON body.
///
/// Transport failures, non-success statuses and undecodable bodies all come
/// back as a short description.
async fn fetch_json(request: reqwest::RequestBuilder) -> Result<Value, String> {
    let response = request
        .send()
        .await
        .map_err(|e| format!("request failed: {}", e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!(
            "HTTP error: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        ));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| format!("invalid JSON response: {}", e))
}
