//! find_cost_of_living: RapidAPI cost-of-living prices

use super::{endpoint, fetch_json, not_configured};
use tracing::warn;
use travel_domain::tool::{
    catalog::FIND_COST_OF_LIVING,
    entities::ToolCall,
    value_objects::{ToolError, ToolResult},
};

pub const COST_OF_LIVING_API_KEY_ENV: &str = "COST_OF_LIVING_API_KEY";

const PRICES_PATH: &str = "prices";

pub async fn execute_find_cost_of_living(
    client: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    call: &ToolCall,
) -> ToolResult {
    let (city, country) = match (call.require_string("city"), call.require_string("country")) {
        (Ok(city), Ok(country)) => (city.trim(), country.trim()),
        (Err(e), _) | (_, Err(e)) => {
            return ToolResult::failure(FIND_COST_OF_LIVING, ToolError::invalid_argument(e));
        }
    };
    ToolResult::success(
        FIND_COST_OF_LIVING,
        find_cost_of_living(client, base_url, api_key, city, country).await,
    )
}

/// Fetch the price list and return the upstream JSON as-is.
pub async fn find_cost_of_living(
    client: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    city: &str,
    country: &str,
) -> String {
    let Some(api_key) = api_key else {
        warn!(
            "{} is not set, cost of living lookup disabled",
            COST_OF_LIVING_API_KEY_ENV
        );
        return not_configured("Cost of living lookup", COST_OF_LIVING_API_KEY_ENV);
    };

    let mut request = client
        .get(endpoint(base_url, PRICES_PATH))
        .query(&[("city_name", city), ("country_name", country)])
        .header("x-rapidapi-key", api_key);
    if let Some(host) = rapidapi_host(base_url) {
        request = request.header("x-rapidapi-host", host);
    }

    match fetch_json(request).await {
        Ok(value) => value.to_string(),
        Err(e) => format!(
            "Error while looking up cost of living: {}. Please try again later.",
            e
        ),
    }
}

fn rapidapi_host(base_url: &str) -> Option<String> {
    reqwest::Url::parse(base_url)
        .ok()?
        .host_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_rapidapi_host() {
        assert_eq!(
            rapidapi_host(super::super::DEFAULT_COST_OF_LIVING_BASE_URL).as_deref(),
            Some("cost-of-living-and-prices.p.rapidapi.com")
        );
        assert_eq!(rapidapi_host("not a url"), None);
    }

    #[tokio::test]
    async fn test_returns_upstream_json() {
        let server = MockServer::start().await;
        let prices = json!({
            "prices": [{ "item_name": "Meal, Inexpensive Restaurant", "avg": 12.0 }],
            "exchange_rate": { "EUR": 1.0 }
        });
        Mock::given(method("GET"))
            .and(path("/prices"))
            .and(query_param("city_name", "Lisbon"))
            .and(query_param("country_name", "Portugal"))
            .and(header("x-rapidapi-key", "key"))
            .and(header("x-rapidapi-host", "127.0.0.1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(prices.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let text =
            find_cost_of_living(&client, &server.uri(), Some("key"), "Lisbon", "Portugal").await;
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, prices);
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = reqwest::Client::new();
        let text =
            find_cost_of_living(&client, "http://127.0.0.1:9", None, "Lisbon", "Portugal").await;
        assert!(text.contains("missing COST_OF_LIVING_API_KEY"));
    }

    #[tokio::test]
    async fn test_missing_argument_fails_call() {
        let client = reqwest::Client::new();
        let call = ToolCall::new(FIND_COST_OF_LIVING).with_arg("city", "Lisbon");
        let result =
            execute_find_cost_of_living(&client, "http://127.0.0.1:9", Some("key"), &call).await;
        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
    }
}
