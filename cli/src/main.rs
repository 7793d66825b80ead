//! CLI entrypoint for travel-agent
//!
//! This is the main binary that wires together all layers using
//! dependency injection. `main` stays synchronous: the REPL submits turns
//! through a [`SyncBridge`] onto the runtime built here, and the web
//! server runs on the same runtime.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use travel_application::{
    BlockingConversation, ConversationDriver, ConversationLogger, NoConversationLogger,
    RunAgentUseCase, SyncBridge, TravelGuardrail,
};
use travel_domain::build_agent;
use travel_infrastructure::{
    AgentGraphLoader, ConfigLoader, FileConfig, JsonlConversationLogger, OpenAiConfig,
    OpenAiGateway, OpenAiToolConverter, Severity, TelemetryOptions, ToolCredentials,
    TravelToolExecutor, init_tracing,
};
use travel_presentation::web;
use travel_presentation::{ChatRepl, Cli, ProgressReporter};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Settings come first: they decide where file logs go
    let loaded = ConfigLoader::load(cli.config.as_deref());
    let log_dir = loaded
        .as_ref()
        .ok()
        .and_then(|c| c.logging.log_dir.as_deref())
        .map(expand_home);

    let _telemetry = init_tracing(&TelemetryOptions {
        verbosity: cli.verbose,
        quiet: cli.quiet,
        log_dir,
    });

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            eprintln!("Error: failed to load settings: {}", e);
            return ExitCode::FAILURE;
        }
    };
    apply_overrides(&mut config, &cli);

    match run(&cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: FileConfig) -> Result<()> {
    if cli.show_config {
        return show_config(cli, &config);
    }

    for issue in config.validate() {
        match issue.severity {
            Severity::Warning => warn!("Config: {}", issue),
            Severity::Error => error!("Config: {}", issue),
        }
    }
    if config.has_errors() {
        bail!("invalid settings, see the messages above");
    }

    info!("Starting travel-agent");

    // === Agent graph ===
    let specs = AgentGraphLoader::load(Path::new(&config.agents.path))?;
    let agent = build_agent(&specs, &config.agents.root)
        .with_context(|| format!("failed to build agent '{}'", config.agents.root))?;
    info!(
        "Loaded agent '{}' with {} tool(s) and {} handoff(s)",
        agent.name,
        agent.tools.len(),
        agent.handoffs.len()
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    // === Dependency Injection ===
    let model = config.model.model();
    let api_key = config.model.api_key();
    if api_key.is_none() {
        warn!(
            "{} is not set; model requests will be rejected",
            config.model.api_key_env
        );
    }
    let gateway = Arc::new(OpenAiGateway::new(
        OpenAiConfig::new(config.model.base_url.clone(), api_key)
            .with_timeout(config.model.timeout()),
    )?);

    let credentials = ToolCredentials::from_env();
    for name in credentials.missing() {
        warn!("{} is not set; the matching tool will report it", name);
    }
    let tool_executor = Arc::new(
        TravelToolExecutor::new(config.tools.endpoints(), credentials, config.tools.timeout())
            .context("failed to build the HTTP client for tools")?,
    );

    let conversation_logger: Arc<dyn ConversationLogger> = match config
        .logging
        .conversation_log
        .as_deref()
        .and_then(|path| JsonlConversationLogger::new(expand_home(path)))
    {
        Some(logger) => Arc::new(logger),
        None => Arc::new(NoConversationLogger),
    };

    let progress = (!cli.web && !cli.quiet && config.repl.show_progress)
        .then(|| Arc::new(ProgressReporter::new()));

    let mut runner = RunAgentUseCase::new(
        gateway.clone(),
        tool_executor,
        Arc::new(OpenAiToolConverter),
        model.clone(),
    )
    .with_execution(config.execution.to_params())
    .with_conversation_logger(conversation_logger.clone());
    if let Some(progress) = &progress {
        runner = runner.with_progress(progress.clone());
    }

    let agent_name = agent.name.clone();
    let mut driver = ConversationDriver::new(Arc::new(agent), Arc::new(runner))
        .with_conversation_logger(conversation_logger);
    if config.guardrail.enabled {
        let guardrail_model = config.guardrail.model_or(&model);
        info!("Guardrail enabled (model: {})", guardrail_model);
        driver = driver.with_guardrail(Arc::new(TravelGuardrail::new(gateway, guardrail_model)));
    } else {
        warn!("Guardrail disabled; every message goes straight to the agents");
    }

    let conversation = BlockingConversation::new(SyncBridge::new(runtime.handle().clone()), driver);

    if cli.web {
        let addr: SocketAddr = config
            .web
            .bind
            .parse()
            .with_context(|| format!("invalid bind address '{}'", config.web.bind))?;
        runtime
            .block_on(web::serve(addr, conversation, &agent_name))
            .with_context(|| format!("web chat failed on {}", addr))?;
        return Ok(());
    }

    let history_path = match &config.repl.history_file {
        Some(path) => Some(expand_home(path)),
        None => travel_presentation::chat::default_history_path(),
    };
    let mut repl = ChatRepl::new(conversation, agent_name).with_history_path(history_path);
    if let Some(progress) = progress {
        repl = repl.with_progress(progress);
    }
    repl.run()?;

    Ok(())
}

/// Fold command-line flags over the loaded settings.
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(agents) = &cli.agents {
        config.agents.path = agents.display().to_string();
    }
    if let Some(root) = &cli.root {
        config.agents.root = root.clone();
    }
    if let Some(model) = &cli.model {
        config.model.name = model.clone();
    }
    if cli.no_guardrail {
        config.guardrail.enabled = false;
    }
    if let Some(bind) = &cli.bind {
        config.web.bind = bind.clone();
    }
}

fn show_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    println!("Settings sources (lowest to highest priority):");
    for source in ConfigLoader::describe_sources(cli.config.as_deref()) {
        println!("  {}", source);
    }
    println!();
    println!(
        "{}",
        toml::to_string_pretty(config).context("failed to render settings")?
    );
    for issue in config.validate() {
        println!("# {:?}: {}", issue.severity, issue);
    }
    Ok(())
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
