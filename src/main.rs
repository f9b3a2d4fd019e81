//! Gallery Catalog main entry point
//!
//! This is the command-line interface for browsing the model and map catalog.

use anyhow::{bail, Context};
use clap::Parser;
use gallery_catalog::browse::{group_by_category, DetailView};
use gallery_catalog::catalog::{
    build_http_client, CatalogCache, CatalogResolver, Collection, RemoteCatalog,
};
use gallery_catalog::config::{load_config_with_hash, Config};
use gallery_catalog::output::{
    format_detail, format_grid, format_maps, format_routes, generate_markdown_gallery,
};
use gallery_catalog::ranking::{apply_ranking, UsageRanker};
use gallery_catalog::route::RouteId;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Gallery Catalog: browse the model and map gallery from the terminal
///
/// Loads the catalog from the dashboard API, optionally ranks it by usage,
/// and prints the grouped grid, a detail view, or the list of routes.
#[derive(Parser, Debug)]
#[command(name = "gallery-catalog")]
#[command(version)]
#[command(about = "Browse the model and map gallery", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the endpoints without fetching
    #[arg(long, conflicts_with_all = ["maps", "show", "routes", "export"])]
    dry_run: bool,

    /// List maps instead of models
    #[arg(long, conflicts_with_all = ["show", "routes", "export"])]
    maps: bool,

    /// Show the detail view for a route id ({id}_{slug})
    #[arg(long, value_name = "ROUTE_ID", conflicts_with_all = ["routes", "export"])]
    show: Option<String>,

    /// Use the narrow-viewport related count with --show
    #[arg(long, requires = "show")]
    narrow: bool,

    /// Print every model route id and exit
    #[arg(long, conflicts_with = "export")]
    routes: bool,

    /// Write the grouped gallery as markdown to PATH
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Show only this many models per category in the grid
    #[arg(long, value_name = "N")]
    collapsed: Option<usize>,

    /// Skip usage ranking even when analytics is configured
    #[arg(long)]
    no_ranking: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    let client = build_http_client(
        &config.user_agent,
        Duration::from_secs(config.api.timeout_secs),
    )
    .context("Failed to build HTTP client")?;

    if cli.maps {
        return handle_maps(&config, client).await;
    }

    let source = RemoteCatalog::from_config(&config, client.clone(), Collection::Models)?;
    let resolver = CatalogResolver::new(Arc::new(CatalogCache::new(source)));

    if let Some(route_id) = &cli.show {
        handle_show(&config, &resolver, route_id, cli.narrow).await
    } else if cli.routes {
        handle_routes(&resolver).await
    } else {
        let ranking = !cli.no_ranking;
        let export = cli.export.as_deref();
        handle_grid(&config, &resolver, client, ranking, cli.collapsed, export).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gallery_catalog=info,warn"),
            1 => EnvFilter::new("gallery_catalog=debug,info"),
            2 => EnvFilter::new("gallery_catalog=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: shows what would be fetched
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Gallery Catalog Dry Run ===\n");

    println!("API:");
    println!("  Models: {}", config.api.models_url()?);
    println!("  Maps: {}", config.api.maps_url()?);
    println!("  Page delay: {}ms", config.api.page_delay_ms);
    println!("  Timeout: {}s", config.api.timeout_secs);
    for name in config.api.headers.keys() {
        println!("  Header: {}", name);
    }

    println!("\nUser Agent: {}", config.user_agent.header_value());

    match &config.analytics {
        Some(analytics) => {
            println!("\nAnalytics:");
            println!("  Insight: {}", analytics.insights_url()?);
            println!("  Key variable: {}", analytics.api_key_env);
        }
        None => println!("\nAnalytics: disabled"),
    }

    println!("\nPresentation:");
    println!(
        "  Related (wide/narrow): {}/{}",
        config.presentation.related_wide, config.presentation.related_narrow
    );
    println!("  Description words: {}", config.presentation.description_words);

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the default mode: grouped model grid, optionally exported
async fn handle_grid(
    config: &Config,
    resolver: &CatalogResolver<RemoteCatalog>,
    client: Client,
    ranking: bool,
    collapsed: Option<usize>,
    export: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let snapshot = resolver.cache().get_all().await;
    let mut entities = snapshot.entities.clone();

    if ranking {
        if let Some(analytics) = &config.analytics {
            match UsageRanker::from_config(analytics, client) {
                Ok(ranker) => apply_ranking(&mut entities, &ranker.fetch_rank_map().await),
                Err(e) => tracing::warn!("Usage ranking disabled: {}", e),
            }
        }
    }

    let groups = group_by_category(&entities);
    tracing::info!(
        "Grouped {} models into {} categories",
        groups.entity_count(),
        groups.len()
    );

    if let Some(path) = export {
        generate_markdown_gallery(&groups, &snapshot, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ Gallery exported to: {}", path.display());
        return Ok(());
    }

    print!("{}", format_grid(&groups, collapsed));
    if snapshot.possibly_incomplete {
        eprintln!("warning: the catalog may be incomplete");
    }
    Ok(())
}

/// Handles --show: detail view for one route id
async fn handle_show(
    config: &Config,
    resolver: &CatalogResolver<RemoteCatalog>,
    route_id: &str,
    narrow: bool,
) -> anyhow::Result<()> {
    let route: RouteId = route_id.parse()?;

    let Some(entity) = resolver.by_route_id(route_id.trim()).await else {
        bail!("Model not found: {}", route.id);
    };

    let snapshot = resolver.cache().get_all().await;
    let view = DetailView::build(
        &entity,
        &snapshot.entities,
        config.presentation.related_count(narrow),
        config.presentation.description_words,
    );

    print!("{}", format_detail(&view));
    Ok(())
}

/// Handles --routes: one route id per line
async fn handle_routes(resolver: &CatalogResolver<RemoteCatalog>) -> anyhow::Result<()> {
    let routes = resolver.route_ids().await;
    let snapshot = resolver.cache().get_all().await;
    print!("{}", format_routes(&routes, &snapshot));
    Ok(())
}

/// Handles --maps: the maps listing
async fn handle_maps(config: &Config, client: Client) -> anyhow::Result<()> {
    let source = RemoteCatalog::from_config(config, client, Collection::Maps)?;
    let cache = CatalogCache::new(source);
    let snapshot = cache.get_all().await;

    println!("Maps ({})", snapshot.len());
    print!("{}", format_maps(&snapshot.entities));
    if snapshot.possibly_incomplete {
        eprintln!("warning: the maps listing may be incomplete");
    }
    Ok(())
}
