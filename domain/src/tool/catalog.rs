//! The closed catalog of travel tools
//!
//! Agent-graph configs reference tools by name. Names are resolved against
//! [`TravelTool`] when the graph is built, so an unknown name is a config
//! error rather than a runtime surprise.

use super::entities::{ToolDefinition, ToolParameter};
use serde::{Deserialize, Serialize};

pub const FIND_FLIGHTS: &str = "find_flights";
pub const FIND_HOTELS: &str = "find_hotels";
pub const FIND_COST_OF_LIVING: &str = "find_cost_of_living";

/// Default number of guests for a hotel search.
pub const DEFAULT_OCCUPANCY: u32 = 2;

/// A tool known at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelTool {
    FindFlights,
    FindHotels,
    FindCostOfLiving,
}

impl TravelTool {
    pub const ALL: [TravelTool; 3] = [
        TravelTool::FindFlights,
        TravelTool::FindHotels,
        TravelTool::FindCostOfLiving,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TravelTool::FindFlights => FIND_FLIGHTS,
            TravelTool::FindHotels => FIND_HOTELS,
            TravelTool::FindCostOfLiving => FIND_COST_OF_LIVING,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn definition(&self) -> ToolDefinition {
        match self {
            TravelTool::FindFlights => ToolDefinition::new(
                FIND_FLIGHTS,
                "Find flights between two cities. Returns the outbound options and, \
                 for round trips, the return options.",
            )
            .with_parameter(ToolParameter::new(
                "departure",
                "The city or airport the trip starts from",
                true,
            ))
            .with_parameter(ToolParameter::new(
                "arrival",
                "The destination city or airport",
                true,
            ))
            .with_parameter(ToolParameter::new(
                "departure_date",
                "Outbound date, YYYY-MM-DD",
                true,
            ))
            .with_parameter(ToolParameter::new(
                "return_date",
                "Return date, YYYY-MM-DD. Omit for a one-way trip",
                false,
            )),
            TravelTool::FindHotels => ToolDefinition::new(
                FIND_HOTELS,
                "Find hotels with available, priced rooms in a city for the given dates.",
            )
            .with_parameter(ToolParameter::new("city", "City name", true))
            .with_parameter(ToolParameter::new(
                "country_code",
                "ISO 3166-1 alpha-2 country code, e.g. PT",
                true,
            ))
            .with_parameter(ToolParameter::new("check_in", "Check-in date, YYYY-MM-DD", true))
            .with_parameter(ToolParameter::new(
                "check_out",
                "Check-out date, YYYY-MM-DD",
                true,
            ))
            .with_parameter(
                ToolParameter::new("occupancy", "Number of adult guests (default 2)", false)
                    .with_type("integer"),
            ),
            TravelTool::FindCostOfLiving => ToolDefinition::new(
                FIND_COST_OF_LIVING,
                "Look up typical prices (meals, transport, groceries) in a city.",
            )
            .with_parameter(ToolParameter::new("city", "City name", true))
            .with_parameter(ToolParameter::new("country", "Country name", true)),
        }
    }
}

impl std::fmt::Display for TravelTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
