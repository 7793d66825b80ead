//! find_hotels: LiteAPI hotel rates
//!
//! The rates endpoint returns one entry per hotel with nested room types and
//! rates, plus a separate `hotels` list carrying the names. The response is
//! reduced to the priced rooms of each hotel.

use super::{endpoint, fetch_json, not_configured};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, warn};
use travel_domain::tool::{
    catalog::{DEFAULT_OCCUPANCY, FIND_HOTELS},
    entities::ToolCall,
    value_objects::{ToolError, ToolResult},
};

pub const LITEAPI_API_KEY_ENV: &str = "LITEAPI_API_KEY";

const RATES_PATH: &str = "hotels/rates";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelQuery {
    pub city: String,
    pub country_code: String,
    pub check_in: String,
    pub check_out: String,
    pub occupancy: u32,
}

impl HotelQuery {
    pub fn from_call(call: &ToolCall) -> Result<Self, String> {
        let occupancy = call
            .get_i64("occupancy")
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_OCCUPANCY);
        Ok(Self {
            city: call.require_string("city")?.trim().to_string(),
            country_code: call.require_string("country_code")?.trim().to_uppercase(),
            check_in: call.require_string("check_in")?.trim().to_string(),
            check_out: call.require_string("check_out")?.trim().to_string(),
            occupancy,
        })
    }
}

// Upstream shapes. Only the fields the reduction reads.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RatesResponse {
    data: Vec<HotelRates>,
    hotels: Vec<HotelInfo>,
}

#[derive(Debug, Deserialize)]
struct HotelInfo {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HotelRates {
    hotel_id: String,
    #[serde(default)]
    room_types: Vec<RoomType>,
}

#[derive(Debug, Deserialize)]
struct RoomType {
    #[serde(default)]
    rates: Vec<Rate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Rate {
    #[serde(default)]
    name: String,
    #[serde(default)]
    retail_rate: Option<RetailRate>,
}

#[derive(Debug, Deserialize)]
struct RetailRate {
    #[serde(default)]
    total: Vec<Amount>,
}

#[derive(Debug, Deserialize)]
struct Amount {
    amount: Option<f64>,
    #[serde(default)]
    currency: String,
}

/// Reduced result handed to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelList {
    pub hotels: Vec<HotelOffer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelOffer {
    pub id: String,
    pub name: String,
    pub rooms: Vec<RoomOffer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomOffer {
    pub name: String,
    pub price: f64,
    pub currency: String,
}

fn reduce_hotel_rates(response: RatesResponse) -> HotelList {
    let names: HashMap<String, String> = response
        .hotels
        .into_iter()
        .map(|h| (h.id, h.name))
        .collect();

    let hotels = response
        .data
        .into_iter()
        .filter_map(|entry| {
            let rooms: Vec<RoomOffer> = entry
                .room_types
                .into_iter()
                .flat_map(|rt| rt.rates)
                .filter_map(|rate| {
                    let total = rate.retail_rate?.total.into_iter().next()?;
                    Some(RoomOffer {
                        name: rate.name,
                        price: total.amount?,
                        currency: total.currency,
                    })
                })
                .collect();
            if rooms.is_empty() {
                return None;
            }
            let name = names
                .get(&entry.hotel_id)
                .cloned()
                .unwrap_or_else(|| entry.hotel_id.clone());
            Some(HotelOffer {
                id: entry.hotel_id,
                name,
                rooms,
            })
        })
        .collect();

    HotelList { hotels }
}

pub async fn execute_find_hotels(
    client: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    call: &ToolCall,
) -> ToolResult {
    let query = match HotelQuery::from_call(call) {
        Ok(q) => q,
        Err(e) => return ToolResult::failure(FIND_HOTELS, ToolError::invalid_argument(e)),
    };
    ToolResult::success(
        FIND_HOTELS,
        find_hotels(client, base_url, api_key, &query).await,
    )
}

pub async fn find_hotels(
    client: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    query: &HotelQuery,
) -> String {
    let Some(api_key) = api_key else {
        warn!("{} is not set, hotel search disabled", LITEAPI_API_KEY_ENV);
        return not_configured("Hotel search", LITEAPI_API_KEY_ENV);
    };

    let body = json!({
        "cityName": query.city,
        "countryCode": query.country_code,
        "checkin": query.check_in,
        "checkout": query.check_out,
        "occupancies": [{ "adults": query.occupancy }],
        "currency": "USD",
        "guestNationality": "US",
    });

    let value = match fetch_json(
        client
            .post(endpoint(base_url, RATES_PATH))
            .header("X-API-Key", api_key)
            .json(&body),
    )
    .await
    {
        Ok(v) => v,
        Err(e) => return search_error(&e),
    };

    let response: RatesResponse = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => return search_error(&format!("unexpected response format: {}", e)),
    };

    let list = reduce_hotel_rates(response);
    debug!(
        "find_hotels({}, {}) -> {} hotels with priced rooms",
        query.city,
        query.country_code,
        list.hotels.len()
    );
    match serde_json::to_string(&list) {
        Ok(text) => text,
        Err(e) => search_error(&e.to_string()),
    }
}

fn search_error(error: &str) -> String {
    format!(
        "Error while searching for hotels: {}. Please try again later.",
        error
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn query() -> HotelQuery {
        HotelQuery {
            city: "Lisbon".to_string(),
            country_code: "PT".to_string(),
            check_in: "2025-06-01".to_string(),
            check_out: "2025-06-05".to_string(),
            occupancy: 2,
        }
    }

    fn rates_body() -> Value {
        json!({
            "data": [
                {
                    "hotelId": "lp1",
                    "roomTypes": [
                        { "rates": [
                            { "name": "Double", "retailRate": { "total": [{ "amount": 410.5, "currency": "EUR" }] } },
                            { "name": "Suite", "retailRate": { "total": [] } }
                        ] },
                        { "rates": [
                            { "name": "Twin", "retailRate": { "total": [{ "amount": 380.0, "currency": "EUR" }] } }
                        ] }
                    ]
                },
                {
                    "hotelId": "lp2",
                    "roomTypes": [
                        { "rates": [{ "name": "Single" }] }
                    ]
                },
                {
                    "hotelId": "lp3",
                    "roomTypes": [
                        { "rates": [{ "name": "Loft", "retailRate": { "total": [{ "amount": 99.0, "currency": "EUR" }] } }] }
                    ]
                }
            ],
            "hotels": [
                { "id": "lp1", "name": "Hotel Avenida" },
                { "id": "lp2", "name": "Casa do Rio" }
            ]
        })
    }

    #[test]
    fn test_reduce_drops_unpriced_rooms_and_empty_hotels() {
        let response: RatesResponse = serde_json::from_value(rates_body()).unwrap();
        let list = reduce_hotel_rates(response);

        assert_eq!(list.hotels.len(), 2);
        assert_eq!(list.hotels[0].name, "Hotel Avenida");
        let rooms: Vec<&str> = list.hotels[0].rooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(rooms, vec!["Double", "Twin"]);
        assert_eq!(list.hotels[0].rooms[0].price, 410.5);
        assert_eq!(list.hotels[0].rooms[0].currency, "EUR");

        // No name in the hotel index falls back to the id
        assert_eq!(list.hotels[1].id, "lp3");
        assert_eq!(list.hotels[1].name, "lp3");
    }

    #[test]
    fn test_query_defaults_occupancy() {
        let call = ToolCall::new(FIND_HOTELS)
            .with_arg("city", "Lisbon")
            .with_arg("country_code", "pt")
            .with_arg("check_in", "2025-06-01")
            .with_arg("check_out", "2025-06-05")
            .with_arg("occupancy", 0);
        let query = HotelQuery::from_call(&call).unwrap();
        assert_eq!(query.occupancy, DEFAULT_OCCUPANCY);
        assert_eq!(query.country_code, "PT");
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = reqwest::Client::new();
        let text = find_hotels(&client, "http://127.0.0.1:9", None, &query()).await;
        assert!(text.starts_with("Hotel search is not configured: missing LITEAPI_API_KEY"));
    }

    #[tokio::test]
    async fn test_posts_rates_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hotels/rates"))
            .and(header("X-API-Key", "secret"))
            .and(body_partial_json(json!({
                "cityName": "Lisbon",
                "countryCode": "PT",
                "occupancies": [{ "adults": 2 }],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(rates_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let text = find_hotels(&client, &server.uri(), Some("secret"), &query()).await;
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["hotels"][0]["id"], "lp1");
        assert_eq!(value["hotels"][0]["rooms"][1]["price"], 380.0);
    }

    #[tokio::test]
    async fn test_error_status_becomes_text() {
        let server = MockServer::start().await;
        Mock::given(path("/hotels/rates"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let text = find_hotels(&client, &server.uri(), Some("bad"), &query()).await;
        assert_eq!(
            text,
            "Error while searching for hotels: HTTP error: 401 Unauthorized. Please try again later."
        );
    }

    #[tokio::test]
    async fn test_malformed_body_becomes_text() {
        let server = MockServer::start().await;
        Mock::given(path("/hotels/rates"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": "not a list" })),
            )
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let text = find_hotels(&client, &server.uri(), Some("key"), &query()).await;
        assert!(text.contains("unexpected response format"));
    }
}
