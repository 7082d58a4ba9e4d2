//! GEO Optimizer main entry point
//!
//! This is the command-line interface for auditing AI search visibility,
//! generating llms.txt files and rendering score badges.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use geo_optimizer::audit::{AuditResult, Auditor};
use geo_optimizer::config::{load_project_config, Config};
use geo_optimizer::fetch::HttpFetcher;
use geo_optimizer::output::{format_audit, generate_badge_svg, OutputFormat, DEFAULT_BADGE_LABEL};
use geo_optimizer::sitemap::{generate_llms_txt, GeneratorOptions, LlmsSource};
use geo_optimizer::storage::{open_cache, ResponseCache};
use geo_optimizer::url::{ensure_public_url, normalize_base_url};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// GEO Optimizer: make websites visible to AI search engines
///
/// Audits robots.txt, llms.txt, JSON-LD schema, meta tags and content of a
/// site and scores how well AI answer engines can discover and cite it.
#[derive(Parser, Debug)]
#[command(name = "geo")]
#[command(version)]
#[command(about = "Generative Engine Optimization toolkit", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    /// Path to a TOML configuration file (default: ./.geo-optimizer.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Audit a website and print its GEO score
    Audit(AuditArgs),

    /// Generate llms.txt from the site's XML sitemap
    Llms(LlmsArgs),

    /// Audit a website and write an SVG score badge
    Badge(BadgeArgs),

    /// Manage the response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Args, Debug)]
struct AuditArgs {
    /// Site to audit (e.g. https://example.com)
    #[arg(long)]
    url: Option<String>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Serve the homepage from the response cache when fresh
    #[arg(long)]
    cache: bool,

    /// Exit with status 1 when the score is below this value
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    min_score: Option<u32>,

    /// Skip the unscored extra checks
    #[arg(long)]
    no_extra_checks: bool,
}

#[derive(Args, Debug)]
struct LlmsArgs {
    /// Base URL of the site (e.g. https://example.com)
    #[arg(long)]
    base_url: Option<String>,

    /// Sitemap URL (discovered when omitted)
    #[arg(long)]
    sitemap: Option<String>,

    /// Site name used as the document title
    #[arg(long)]
    site_name: Option<String>,

    /// Site description (blockquote)
    #[arg(long)]
    description: Option<String>,

    /// Fetch page titles for the link labels (one request per link)
    #[arg(long)]
    fetch_titles: bool,

    /// Maximum links per section
    #[arg(long)]
    max_per_section: Option<usize>,

    /// Write llms.txt to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BadgeArgs {
    /// Site to audit
    #[arg(long)]
    url: Option<String>,

    /// Left-hand badge text
    #[arg(long, default_value = DEFAULT_BADGE_LABEL)]
    label: String,

    /// Write the SVG to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum CacheAction {
    /// Delete every cached response
    Clear,

    /// Show the number and size of cached responses
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir().context("Cannot determine the current directory")?;
    let config = load_project_config(cli.config.as_deref(), &cwd)
        .context("Failed to load configuration")?;

    match cli.command {
        Command::Audit(args) => handle_audit(config, args).await,
        Command::Llms(args) => handle_llms(config, args).await,
        Command::Badge(args) => handle_badge(config, args).await,
        Command::Cache { action } => handle_cache(&config, action),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so reports on stdout stay machine-readable.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("geo_optimizer=info,warn"),
            1 => EnvFilter::new("geo_optimizer=debug,info"),
            2 => EnvFilter::new("geo_optimizer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Normalizes a user-supplied site address and refuses private targets
async fn resolve_site(input: Option<String>, what: &str) -> anyhow::Result<String> {
    let Some(input) = input else {
        bail!("No {} given: pass it on the command line or set it in the config file", what);
    };
    let base_url = normalize_base_url(&input).with_context(|| format!("Invalid URL: {}", input))?;
    ensure_public_url(&base_url)
        .await
        .with_context(|| format!("Refusing to fetch {}", base_url))?;
    Ok(base_url)
}

/// Runs an audit with the configured fetcher, roster, checks and cache
async fn run_audit(config: &Config, url: &str, use_cache: bool) -> anyhow::Result<AuditResult> {
    let mut auditor = Auditor::from_config(config)?;

    if use_cache {
        let path = config.cache.resolved_path();
        let cache = open_cache(&path, config.cache.ttl_secs)
            .with_context(|| format!("Cannot open cache at {}", path.display()))?;
        tracing::debug!("Using response cache {}", path.display());
        let cache: Arc<Mutex<dyn ResponseCache>> = Arc::new(Mutex::new(cache));
        auditor = auditor.with_cache(cache);
    }

    Ok(auditor.run(url).await?)
}

/// Handles `geo audit`
async fn handle_audit(mut config: Config, args: AuditArgs) -> anyhow::Result<ExitCode> {
    let url = resolve_site(args.url.or_else(|| config.audit.url.clone()), "URL").await?;

    let format = args.format.unwrap_or(config.audit.format);
    let output = args.output.or_else(|| config.audit.output.clone());
    let min_score = args.min_score.unwrap_or(config.audit.min_score);
    let use_cache = args.cache || config.audit.cache;
    if args.no_extra_checks {
        config.audit.extra_checks = false;
    }

    let result = run_audit(&config, &url, use_cache).await?;
    let report = format_audit(&result, format)?;
    write_output(output.as_deref(), &report)?;

    if !result.is_reachable() {
        tracing::error!("Audit of {} failed: site unreachable", result.url);
        return Ok(ExitCode::FAILURE);
    }
    if result.score < min_score {
        tracing::error!("GEO score {} is below the minimum of {}", result.score, min_score);
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// Handles `geo llms`
async fn handle_llms(config: Config, args: LlmsArgs) -> anyhow::Result<ExitCode> {
    let base_url = resolve_site(
        args.base_url.or_else(|| config.llms.base_url.clone()),
        "base URL",
    )
    .await?;

    if let Some(sitemap) = &args.sitemap {
        ensure_public_url(sitemap)
            .await
            .with_context(|| format!("Refusing to fetch sitemap {}", sitemap))?;
    }

    let options = GeneratorOptions {
        site_name: args.site_name.or_else(|| config.llms.site_name.clone()),
        description: args.description.or_else(|| config.llms.description.clone()),
        fetch_titles: args.fetch_titles || config.llms.fetch_titles,
        max_per_section: args
            .max_per_section
            .unwrap_or(config.llms.max_per_section)
            .max(1),
        allow_private_hosts: false,
    };

    let fetcher = HttpFetcher::new(&config.http)?;
    let generated =
        match generate_llms_txt(&fetcher, &base_url, args.sitemap.as_deref(), &options).await {
            Ok(generated) => generated,
            Err(e) => {
                tracing::error!("{}", e);
                return Ok(ExitCode::FAILURE);
            }
        };

    match &generated.source {
        LlmsSource::Sitemap { url, entries } => {
            tracing::info!("Generated llms.txt from {} ({} URLs)", url, entries)
        }
        LlmsSource::Minimal => {
            tracing::warn!("No sitemap found; wrote a minimal llms.txt. Pass --sitemap to use one.")
        }
    }

    write_output(args.output.as_deref(), &generated.content)?;
    if args.output.is_some() {
        tracing::info!(
            "Size: {} bytes, {} lines. Upload the file to {}/llms.txt",
            generated.content.len(),
            generated.content.lines().count(),
            base_url
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Handles `geo badge`
async fn handle_badge(config: Config, args: BadgeArgs) -> anyhow::Result<ExitCode> {
    let url = resolve_site(args.url.or_else(|| config.audit.url.clone()), "URL").await?;

    let result = run_audit(&config, &url, config.audit.cache).await?;
    let svg = generate_badge_svg(result.score, result.band, &args.label);
    write_output(args.output.as_deref(), &svg)?;

    Ok(if result.is_reachable() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Handles `geo cache clear|stats`
fn handle_cache(config: &Config, action: CacheAction) -> anyhow::Result<ExitCode> {
    let path = config.cache.resolved_path();
    let mut cache = open_cache(&path, config.cache.ttl_secs)
        .with_context(|| format!("Cannot open cache at {}", path.display()))?;

    match action {
        CacheAction::Clear => {
            let removed = cache.clear()?;
            println!("Removed {} cached responses from {}", removed, path.display());
        }
        CacheAction::Stats => {
            let stats = cache.stats()?;
            println!("Cache: {}", path.display());
            println!("  Entries: {}", stats.entries);
            println!("  Size: {} bytes", stats.size_bytes);
            println!("  TTL: {} seconds", config.cache.ttl_secs);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Writes content to a file, or to stdout when no path is given
fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            tracing::info!("Written to {}", path.display());
        }
        None if content.ends_with('\n') => print!("{}", content),
        None => println!("{}", content),
    }
    Ok(())
}
