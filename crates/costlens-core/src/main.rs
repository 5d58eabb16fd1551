//! CostLens CLI
//!
//! Command-line interface for campaign cost analytics.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use costlens::api::HttpServer;
use costlens::collector::Collector;
use costlens::engine::{self, filter, CostModel, DashboardView};
use costlens::models::{CampaignType, DateRange, EventRecord, FilterState, Selection};
use costlens::{report, Config};

/// CostLens - cost analytics for broadcast campaigns
#[derive(Parser)]
#[command(name = "costlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "COSTLENS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: aligned tables or JSON
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
enum GroupBy {
    /// Headline KPIs only
    Summary,
    /// Cost per calendar day
    Day,
    /// Cost per team
    Group,
    /// Cost per team and campaign
    Campaign,
    /// Everything above
    #[default]
    All,
}

#[derive(Subcommand)]
enum Commands {
    /// View cost breakdown
    Costs {
        /// Events file (JSON array)
        #[arg(long, env = "COSTLENS_EVENTS")]
        events: Option<PathBuf>,

        /// Campaign id filter
        #[arg(long)]
        campaign: Option<String>,

        /// Campaign type filter (automation, campaign)
        #[arg(long)]
        campaign_type: Option<String>,

        /// Team filter ("Unknown" selects events without a team)
        #[arg(long)]
        group: Option<String>,

        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Trailing time range ending today, e.g. "7d" or "30days"
        #[arg(long, conflicts_with_all = ["from", "to"])]
        last: Option<String>,

        /// Which view to print
        #[arg(long, value_enum, default_value = "all")]
        group_by: GroupBy,
    },

    /// List campaigns and teams present in the data
    Campaigns {
        /// Events file (JSON array)
        #[arg(long, env = "COSTLENS_EVENTS")]
        events: Option<PathBuf>,
    },

    /// Start the HTTP API server
    Serve {
        /// Events file (JSON array)
        #[arg(long, env = "COSTLENS_EVENTS")]
        events: Option<PathBuf>,

        /// Host to bind to
        #[arg(long, env = "COSTLENS_HOST")]
        host: Option<String>,

        /// HTTP API port
        #[arg(long, env = "COSTLENS_PORT")]
        port: Option<u16>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    let _ = dotenvy::dotenv();

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config, cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::Costs {
            events,
            campaign,
            campaign_type,
            group,
            from,
            to,
            last,
            group_by,
        } => build_filter(campaign, campaign_type, group, from, to, last.as_deref())
            .and_then(|state| run_costs(&config, events, &state, group_by, cli.format)),
        Commands::Campaigns { events } => run_campaigns(&config, events, cli.format),
        Commands::Serve { events, host, port } => run_serve(config, events, host, port).await,
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let level = if verbose { "debug" } else { config.logging.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_filter(
    campaign: Option<String>,
    campaign_type: Option<String>,
    group: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    last: Option<&str>,
) -> anyhow::Result<FilterState> {
    let date_range = match last {
        Some(span) => DateRange::trailing(span, chrono::Local::now().date_naive())?,
        None => DateRange::new(from, to)?,
    };

    Ok(FilterState {
        campaign: Selection::<String>::from_param(campaign.as_deref()),
        campaign_type: Selection::<CampaignType>::from_param(campaign_type.as_deref())?,
        group: Selection::<String>::from_param(group.as_deref()),
        date_range,
    })
}

fn resolve_events_path(config: &Config, events: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    events
        .or_else(|| config.data.events_path.clone())
        .context("no events file given; pass --events or set data.events_path")
}

fn load_events(config: &Config, path: &Path) -> anyhow::Result<Vec<EventRecord>> {
    let (events, _report) = Collector::from_config(config)
        .load_file(path)
        .with_context(|| format!("failed to load events from {}", path.display()))?;
    Ok(events)
}

fn run_costs(
    config: &Config,
    events: Option<PathBuf>,
    state: &FilterState,
    group_by: GroupBy,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let path = resolve_events_path(config, events)?;
    let events = load_events(config, &path)?;
    let cost = CostModel::from_config(&config.pricing)?;
    let currency = cost.currency();

    let filtered = filter::apply(&events, state);
    info!(matched = filtered.len(), total = events.len(), "Filtered events");
    let snapshot = filtered.iter().copied();

    let output = match (group_by, format) {
        (GroupBy::All, OutputFormat::Json) => {
            serde_json::to_string_pretty(&DashboardView::compute(&events, state, &cost))?
        }
        (GroupBy::Summary, OutputFormat::Json) => {
            serde_json::to_string_pretty(&engine::summarize(snapshot, &cost))?
        }
        (GroupBy::Day, OutputFormat::Json) => {
            serde_json::to_string_pretty(&engine::by_day(snapshot, &cost))?
        }
        (GroupBy::Group, OutputFormat::Json) => {
            serde_json::to_string_pretty(&engine::by_group(snapshot, &cost))?
        }
        (GroupBy::Campaign, OutputFormat::Json) => {
            serde_json::to_string_pretty(&engine::by_group_and_campaign(snapshot, &cost))?
        }
        (GroupBy::Summary, _) => report::render_summary(&engine::summarize(snapshot, &cost), currency),
        (GroupBy::Day, _) => report::render_daily(&engine::by_day(snapshot, &cost), currency),
        (GroupBy::Group, _) => report::render_groups(&engine::by_group(snapshot, &cost), currency),
        (GroupBy::Campaign, _) => {
            report::render_rollup(&engine::by_group_and_campaign(snapshot, &cost), currency)
        }
        (GroupBy::All, _) => {
            let view = DashboardView::compute(&events, state, &cost);
            [
                ("Summary", report::render_summary(&view.summary, currency)),
                ("Cost Over Time", report::render_daily(&view.daily, currency)),
                ("Cost by Team", report::render_groups(&view.groups, currency)),
                ("Cost Breakdown by Campaign", report::render_rollup(&view.rollup, currency)),
            ]
            .iter()
            .map(|(title, body)| format!("{title}\n{}\n{body}", "=".repeat(title.len())))
            .collect::<Vec<_>>()
            .join("\n")
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}

fn run_campaigns(
    config: &Config,
    events: Option<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let path = resolve_events_path(config, events)?;
    let events = load_events(config, &path)?;

    let campaigns = engine::campaign_ids(&events);
    let groups = engine::group_labels(&events);

    if format == OutputFormat::Json {
        let body = serde_json::json!({ "campaigns": campaigns, "groups": groups });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Campaigns ({}):", campaigns.len());
    for c in &campaigns {
        println!("  {c}");
    }
    println!("Teams ({}):", groups.len());
    for g in &groups {
        println!("  {g}");
    }
    Ok(())
}

async fn run_serve(
    config: Config,
    events: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let path = resolve_events_path(&config, events)?;
    let events = load_events(&config, &path)?;
    let cost = CostModel::from_config(&config.pricing)?;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    info!(
        "Starting CostLens API on {} ({} events, {} {} per token)",
        addr,
        events.len(),
        cost.cost_per_unit(),
        cost.currency()
    );

    HttpServer::new(events, cost).serve(&addr).await?;
    Ok(())
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "costlens", &mut io::stdout());
}
