//! find_flights: SerpApi Google Flights search
//!
//! City names are first resolved to location ids with the
//! `google_flights_autocomplete` engine. The outbound search uses the
//! `google_flights` engine; when the first best (or other) flight carries a
//! `departure_token`, a second search with that token fetches the return leg.

use super::{endpoint, fetch_json, not_configured};
use serde_json::{Value, json};
use tracing::{debug, info, warn};
use travel_domain::tool::{
    catalog::FIND_FLIGHTS,
    entities::ToolCall,
    value_objects::{ToolError, ToolResult},
};

pub const SERP_API_KEY_ENV: &str = "SERP_API_KEY";

const SEARCH_PATH: &str = "search.json";
const AUTOCOMPLETE_ENGINE: &str = "google_flights_autocomplete";
const FLIGHTS_ENGINE: &str = "google_flights";
const ROUND_TRIP: &str = "1";
const ONE_WAY: &str = "2";

/// Arguments of one flight search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    pub departure: String,
    pub arrival: String,
    pub departure_date: String,
    pub return_date: Option<String>,
}

impl FlightQuery {
    pub fn from_call(call: &ToolCall) -> Result<Self, String> {
        Ok(Self {
            departure: call.require_string("departure")?.trim().to_string(),
            arrival: call.require_string("arrival")?.trim().to_string(),
            departure_date: call.require_string("departure_date")?.trim().to_string(),
            return_date: call.get_non_blank("return_date").map(str::to_string),
        })
    }
}

pub async fn execute_find_flights(
    client: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    call: &ToolCall,
) -> ToolResult {
    let query = match FlightQuery::from_call(call) {
        Ok(q) => q,
        Err(e) => return ToolResult::failure(FIND_FLIGHTS, ToolError::invalid_argument(e)),
    };
    ToolResult::success(
        FIND_FLIGHTS,
        find_flights(client, base_url, api_key, &query).await,
    )
}

/// Run the search and render the outcome as text for the model.
///
/// On success the text is a JSON object `{"outbound": .., "return": ..}`.
pub async fn find_flights(
    client: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    query: &FlightQuery,
) -> String {
    let Some(api_key) = api_key else {
        warn!("{} is not set, flight search disabled", SERP_API_KEY_ENV);
        return not_configured("Flight search", SERP_API_KEY_ENV);
    };

    let departure_id = match location_id(client, base_url, api_key, &query.departure).await {
        Ok(id) => id,
        Err(e) => return search_error(&e),
    };
    let arrival_id = match location_id(client, base_url, api_key, &query.arrival).await {
        Ok(id) => id,
        Err(e) => return search_error(&e),
    };
    let (Some(departure_id), Some(arrival_id)) = (departure_id, arrival_id) else {
        info!(
            "No location found for '{}' or '{}'",
            query.departure, query.arrival
        );
        return format!(
            "No location found for '{}' or '{}'. Please check the city names.",
            query.departure, query.arrival
        );
    };

    let mut params: Vec<(&str, &str)> = vec![
        ("engine", FLIGHTS_ENGINE),
        ("departure_id", departure_id.as_str()),
        ("arrival_id", arrival_id.as_str()),
        ("outbound_date", query.departure_date.as_str()),
        ("currency", "USD"),
        ("hl", "en"),
        ("api_key", api_key),
    ];
    match &query.return_date {
        Some(return_date) => {
            params.push(("return_date", return_date.as_str()));
            params.push(("type", ROUND_TRIP));
        }
        None => params.push(("type", ONE_WAY)),
    }

    let url = endpoint(base_url, SEARCH_PATH);
    let outbound = fetch_json(client.get(&url).query(&params)).await;

    let return_leg = match outbound.as_ref().ok().and_then(departure_token) {
        Some(token) => {
            debug!("Fetching return flights with departure token");
            let mut return_params = params.clone();
            return_params.push(("departure_token", token));
            Some(fetch_json(client.get(&url).query(&return_params)).await)
        }
        None => None,
    };

    let render =
        |leg: Result<Value, String>| leg.unwrap_or_else(|e| Value::String(search_error(&e)));
    json!({
        "outbound": render(outbound),
        "return": return_leg.map(render),
    })
    .to_string()
}

/// Resolve a city name to the first autocomplete suggestion id.
async fn location_id(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    city: &str,
) -> Result<Option<String>, String> {
    if city.is_empty() {
        return Ok(None);
    }

    let body = fetch_json(client.get(endpoint(base_url, SEARCH_PATH)).query(&[
        ("engine", AUTOCOMPLETE_ENGINE),
        ("q", city),
        ("api_key", api_key),
    ]))
    .await?;

    let id = body
        .get("suggestions")
        .and_then(Value::as_array)
        .and_then(|s| s.first())
        .and_then(|s| s.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string);
    debug!("location_id({}) -> {:?}", city, id);
    Ok(id)
}

/// Token of the first listed flight, preferring `best_flights`.
fn departure_token(body: &Value) -> Option<&str> {
    ["best_flights", "other_flights"]
        .into_iter()
        .filter_map(|key| body.get(key).and_then(Value::as_array))
        .find(|flights| !flights.is_empty())
        .and_then(|flights| flights[0].get("departure_token"))
        .and_then(Value::as_str)
}

fn search_error(error: &str) -> String {
    format!(
        "Error while searching for flights: {}. Please try again later.",
        error
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn query(return_date: Option<&str>) -> FlightQuery {
        FlightQuery {
            departure: "Lisbon".to_string(),
            arrival: "Paris".to_string(),
            departure_date: "2025-06-01".to_string(),
            return_date: return_date.map(str::to_string),
        }
    }

    async fn mount_location(server: &MockServer, city: &str, id: Option<&str>) {
        let suggestions = match id {
            Some(id) => json!([{ "id": id, "name": city }]),
            None => json!([]),
        };
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("engine", AUTOCOMPLETE_ENGINE))
            .and(query_param("q", city))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "suggestions": suggestions })),
            )
            .mount(server)
            .await;
    }

    #[test]
    fn test_departure_token_prefers_best_flights() {
        let body = json!({
            "best_flights": [{ "departure_token": "best" }],
            "other_flights": [{ "departure_token": "other" }],
        });
        assert_eq!(departure_token(&body), Some("best"));

        let body = json!({
            "best_flights": [],
            "other_flights": [{ "departure_token": "other" }],
        });
        assert_eq!(departure_token(&body), Some("other"));

        assert_eq!(departure_token(&json!({ "best_flights": [{}] })), None);
        assert_eq!(departure_token(&json!({})), None);
    }

    #[test]
    fn test_query_from_call() {
        let call = ToolCall::new(FIND_FLIGHTS)
            .with_arg("departure", " Lisbon ")
            .with_arg("arrival", "Paris")
            .with_arg("departure_date", "2025-06-01")
            .with_arg("return_date", "");
        let query = FlightQuery::from_call(&call).unwrap();
        assert_eq!(query.departure, "Lisbon");
        assert_eq!(query.return_date, None);

        let call = ToolCall::new(FIND_FLIGHTS).with_arg("departure", "Lisbon");
        assert!(FlightQuery::from_call(&call).is_err());
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = reqwest::Client::new();
        let text = find_flights(&client, "http://127.0.0.1:9", None, &query(None)).await;
        assert_eq!(
            text,
            "Flight search is not configured: missing SERP_API_KEY. Please set it in your environment."
        );
    }

    #[tokio::test]
    async fn test_unknown_location_skips_flight_search() {
        let server = MockServer::start().await;
        mount_location(&server, "Lisbon", Some("/m/04llb")).await;
        mount_location(&server, "Paris", None).await;
        Mock::given(query_param("engine", FLIGHTS_ENGINE))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let text = find_flights(&client, &server.uri(), Some("key"), &query(None)).await;
        assert!(text.starts_with("No location found for 'Lisbon' or 'Paris'"));
    }

    #[tokio::test]
    async fn test_one_way_search() {
        let server = MockServer::start().await;
        mount_location(&server, "Lisbon", Some("/m/04llb")).await;
        mount_location(&server, "Paris", Some("/m/05qtj")).await;
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("engine", FLIGHTS_ENGINE))
            .and(query_param("departure_id", "/m/04llb"))
            .and(query_param("arrival_id", "/m/05qtj"))
            .and(query_param("outbound_date", "2025-06-01"))
            .and(query_param("type", ONE_WAY))
            .and(query_param_is_missing("return_date"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "best_flights": [{ "price": 120 }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let text = find_flights(&client, &server.uri(), Some("key"), &query(None)).await;
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["outbound"]["best_flights"][0]["price"], 120);
        assert!(value["return"].is_null());
    }

    #[tokio::test]
    async fn test_round_trip_follows_departure_token() {
        let server = MockServer::start().await;
        mount_location(&server, "Lisbon", Some("/m/04llb")).await;
        mount_location(&server, "Paris", Some("/m/05qtj")).await;
        Mock::given(query_param("engine", FLIGHTS_ENGINE))
            .and(query_param("type", ROUND_TRIP))
            .and(query_param("return_date", "2025-06-08"))
            .and(query_param_is_missing("departure_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "best_flights": [{ "price": 240, "departure_token": "tok-1" }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(query_param("engine", FLIGHTS_ENGINE))
            .and(query_param("departure_token", "tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "other_flights": [{ "price": 90 }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let text =
            find_flights(&client, &server.uri(), Some("key"), &query(Some("2025-06-08"))).await;
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["outbound"]["best_flights"][0]["price"], 240);
        assert_eq!(value["return"]["other_flights"][0]["price"], 90);
    }

    #[tokio::test]
    async fn test_upstream_failure_becomes_text() {
        let server = MockServer::start().await;
        Mock::given(path("/search.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let text = find_flights(&client, &server.uri(), Some("key"), &query(None)).await;
        assert_eq!(
            text,
            "Error while searching for flights: HTTP error: 500 Internal Server Error. Please try again later."
        );
    }
}
