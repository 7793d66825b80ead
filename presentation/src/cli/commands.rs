//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for travel-agent
#[derive(Parser, Debug)]
#[command(name = "travel-agent")]
#[command(author, version, about = "Travel planning assistant driven by a configurable agent graph")]
#[command(long_about = r#"
travel-agent answers travel questions with a graph of cooperating agents:
a manager agent delegates to specialists (flights, hotels, cost of living)
that call real travel APIs.

The agent graph is read from a JSON file (default: ./agent_config.json).

Settings are loaded from (in priority order):
1. TRAVEL_AGENT_<SECTION>__<KEY> environment variables
2. --config <path>     Explicit settings file
3. ./travel-agent.toml Project-level settings
4. ~/.config/travel-agent/config.toml   Global settings

Tool credentials: SERP_API_KEY, LITEAPI_API_KEY, COST_OF_LIVING_API_KEY.

Example:
  travel-agent
  travel-agent --agents travel_agent/agent_config.json --model gpt-4.1
  travel-agent --web --bind 127.0.0.1:8000
"#)]
pub struct Cli {
    /// Path to the settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the agent-graph JSON file
    #[arg(short, long, value_name = "PATH")]
    pub agents: Option<PathBuf>,

    /// Id of the root agent in the agent graph
    #[arg(long, value_name = "ID")]
    pub root: Option<String>,

    /// Chat model used by every agent
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Skip the travel-topic guardrail
    #[arg(long)]
    pub no_guardrail: bool,

    /// Serve the web chat UI instead of the terminal REPL
    #[arg(long)]
    pub web: bool,

    /// Address for the web chat UI
    #[arg(long, value_name = "ADDR", requires = "web")]
    pub bind: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators and non-error logs
    #[arg(short, long)]
    pub quiet: bool,

    /// Show settings file locations and the merged settings, then exit
    #[arg(long)]
    pub show_config: bool,
}
