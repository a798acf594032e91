use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use routr::agent::Agent;
use routr::config::Config;
use routr::dispatch::FirecrawlDispatcher;
use routr::llm::OpenRouterClient;
use routr::router::{FallbackReason, Operation, RouteDecision, Router};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("routr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("routr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn build_agent(config: &Config) -> Result<Agent> {
    let router = Router::new().context("Failed to build router")?;
    let dispatcher =
        FirecrawlDispatcher::new(config.firecrawl.to_firecrawl()).context("Failed to build dispatcher")?;
    let llm = OpenRouterClient::new(config.llm.to_openrouter()).context("Failed to build LLM client")?;

    Ok(Agent::new(router, Box::new(dispatcher), Box::new(llm)).with_memory_window(config.memory.window))
}

fn handle_route_command(text: &str) -> Result<()> {
    let router = Router::new().context("Failed to build router")?;

    match router.decide(text) {
        RouteDecision::Dispatch { operation, args } => {
            println!("{} {}", "operation:".bold(), operation.name().green());
            println!("{} {}", "arguments:".bold(), serde_json::to_string_pretty(&args.to_json())?);
        }
        RouteDecision::Fallback(FallbackReason::NoOperation) => {
            println!("{}", "no operation matched, request would fall back to the LLM".yellow());
        }
        RouteDecision::Fallback(FallbackReason::MissingArguments { operation, missing }) => {
            println!("{} {}", "operation:".bold(), operation.name().green());
            println!(
                "{} {}",
                "missing arguments:".bold(),
                missing.join(", ").red()
            );
            println!("{}", "request would fall back to the LLM".yellow());
        }
    }

    Ok(())
}

async fn handle_ask_command(text: &str, config: &Config) -> Result<()> {
    let mut agent = build_agent(config)?;
    let reply = agent.process(text).await.context("Failed to process request")?;
    println!("{}", reply.render());
    Ok(())
}

async fn handle_repl_command(config: &Config) -> Result<()> {
    let mut agent = build_agent(config)?;

    println!("{}", "routr interactive session (quit/exit to leave)".cyan());

    let stdin = std::io::stdin();
    loop {
        print!("{} ", ">".bold());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        match agent.process(line).await {
            Ok(reply) => println!("{}", reply.render()),
            Err(e) => println!("{} {}", "error:".red(), e),
        }
    }

    println!("{}", "bye".cyan());
    Ok(())
}

fn handle_tools_command() {
    for operation in Operation::ALL {
        println!("{}", operation.name().green().bold());
        println!("  {}", operation.description());
        println!("  {} {}", "required:".bold(), operation.required_args().join(", "));
    }
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        None | Some(Commands::Repl) => handle_repl_command(config).await,
        Some(Commands::Route { text }) => handle_route_command(text),
        Some(Commands::Ask { text }) => handle_ask_command(text, config).await,
        Some(Commands::Tools) => {
            handle_tools_command();
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
