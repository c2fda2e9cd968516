use anyhow::Result;
use clap::{Parser, Subcommand};
use ragrouter::{Router, RoutingConfig};
use std::io::BufRead;

#[derive(Parser, Debug)]
#[command(name = "ragrouter")]
#[command(about = "Route free-text queries to knowledge collections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Route a single query and print the decision as JSON
    Route {
        query: String,
        /// Caller identity, logged for analytics only (routing ignores it)
        #[arg(long)]
        caller: Option<String>,
    },
    /// Route queries from stdin (one per line), then print a stats report
    Batch,
    /// Print the full fallback chain configured for a collection
    Chain { collection: String },
    /// Load and validate the configuration, then print a summary
    ConfigCheck,
}

fn main() -> Result<()> {
    // Initialize logger from environment variable or default to info level
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Route { query, caller } => run_route(&query, caller.as_deref()),
        Command::Batch => run_batch(),
        Command::Chain { collection } => run_chain(&collection),
        Command::ConfigCheck => run_config_check(),
    }
}

fn build_router() -> Result<Router> {
    let config = RoutingConfig::load()?;
    Ok(Router::new(config)?)
}

fn run_route(query: &str, caller: Option<&str>) -> Result<()> {
    let router = build_router()?;
    if let Some(caller) = caller {
        log::info!("routing query for caller '{}'", caller);
    }
    let decision = router.route(query);
    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}

fn run_batch() -> Result<()> {
    let router = build_router()?;
    let stdin = std::io::stdin();
    let mut routed = 0usize;
    for line in stdin.lock().lines() {
        let query = line?;
        if query.trim().is_empty() {
            continue;
        }
        let decision = router.route(&query);
        println!("{}", serde_json::to_string(&decision)?);
        routed += 1;
    }
    log::info!("routed {} queries", routed);
    eprintln!("{}", serde_json::to_string_pretty(&router.stats_report())?);
    Ok(())
}

fn run_chain(collection: &str) -> Result<()> {
    let router = build_router()?;
    let chain = router.fallback_chain(collection);
    if chain.is_empty() {
        println!("{}: no fallback entry", collection);
    } else {
        println!("{} -> {}", collection, chain.join(" -> "));
    }
    Ok(())
}

fn run_config_check() -> Result<()> {
    let config = RoutingConfig::load()?;
    println!("Configuration OK");
    println!("Default collection: {}", config.default_collection);
    println!(
        "Thresholds: high={}, low={}, max_fallbacks={}",
        config.thresholds.high, config.thresholds.low, config.thresholds.max_fallbacks
    );
    println!("Domains ({}):", config.domains.len());
    for domain in &config.domains {
        println!(
            "  {} -> {} ({} keywords)",
            domain.name,
            domain.collection,
            domain.keywords.len()
        );
    }
    println!("Modifier groups ({}):", config.modifiers.len());
    for modifier in &config.modifiers {
        println!("  {} ({} keywords)", modifier.name, modifier.keywords.len());
    }
    println!("Fallback table ({} entries):", config.fallbacks.len());
    for entry in &config.fallbacks {
        println!("  {} -> {}", entry.collection, entry.alternatives.join(", "));
    }
    Ok(())
}
