//! fiirank CLI — rank Brazilian real-estate funds with the 2-in-1 method.
//!
//! Commands:
//! - `rank` — fetch the ranking page (or read a saved copy), rank and filter
//! - `sectors` — list the canonical sector vocabulary
//! - `config init` — print a default configuration file

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fiirank_core::FilterCriteria;
use fiirank_runner::service::Ranking;
use fiirank_runner::{logging, sector_summary, to_csv, to_frame, to_json, write_csv, AppConfig, RankingService};

#[derive(Parser)]
#[command(
    name = "fiirank",
    about = "fiirank — 2-in-1 ranking of Brazilian real-estate funds (FIIs)"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG overrides.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, rank and filter the fund table.
    Rank {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Rank a saved copy of the ranking page instead of fetching it.
        #[arg(long, conflicts_with = "url")]
        from_file: Option<PathBuf>,

        /// Ranking page URL (overrides the config).
        #[arg(long)]
        url: Option<String>,

        /// Minimum annualized dividend yield, in percent (e.g. 7 for 7%).
        #[arg(long)]
        min_yield: Option<f64>,

        /// Minimum average daily liquidity (R$).
        #[arg(long)]
        min_liquidity: Option<f64>,

        /// Minimum P/VP.
        #[arg(long)]
        min_pvp: Option<f64>,

        /// Maximum P/VP.
        #[arg(long)]
        max_pvp: Option<f64>,

        /// Keep only these sectors. Repeatable; spelling is canonicalized.
        #[arg(long = "sector")]
        sectors: Vec<String>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write csv/json output to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Show at most this many funds.
        #[arg(long)]
        limit: Option<usize>,

        /// Skip all filters and show the full ranking.
        #[arg(long, default_value_t = false)]
        all: bool,

        /// Append a per-sector summary (table format only).
        #[arg(long, default_value_t = false)]
        summary: bool,
    },
    /// List the canonical sector vocabulary.
    Sectors {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Configuration helpers.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default configuration as TOML.
    Init {
        /// Write to this file instead of stdout. Refuses to overwrite.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Filter overrides taken from the command line.
struct FilterArgs {
    min_yield: Option<f64>,
    min_liquidity: Option<f64>,
    min_pvp: Option<f64>,
    max_pvp: Option<f64>,
    sectors: Vec<String>,
    all: bool,
}

/// How to render the result.
struct OutputArgs {
    format: OutputFormat,
    output: Option<PathBuf>,
    limit: Option<usize>,
    summary: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_json);

    match cli.command {
        Commands::Rank {
            config,
            from_file,
            url,
            min_yield,
            min_liquidity,
            min_pvp,
            max_pvp,
            sectors,
            format,
            output,
            limit,
            all,
            summary,
        } => run_rank(
            config.as_deref(),
            from_file,
            url,
            FilterArgs {
                min_yield,
                min_liquidity,
                min_pvp,
                max_pvp,
                sectors,
                all,
            },
            OutputArgs {
                format,
                output,
                limit,
                summary,
            },
        ),
        Commands::Sectors { config } => run_sectors(config.as_deref()),
        Commands::Config { action } => match action {
            ConfigAction::Init { output } => run_config_init(output.as_deref()),
        },
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

fn criteria_from(base: &FilterCriteria, args: FilterArgs) -> FilterCriteria {
    if args.all {
        return FilterCriteria::pass_all();
    }
    let mut criteria = base.clone();
    if let Some(v) = args.min_yield {
        criteria.min_yield_pct = v;
    }
    if let Some(v) = args.min_liquidity {
        criteria.min_liquidity = v;
    }
    if let Some(v) = args.min_pvp {
        criteria.min_valuation = v;
    }
    if let Some(v) = args.max_pvp {
        criteria.max_valuation = v;
    }
    if !args.sectors.is_empty() {
        criteria.sectors = args.sectors.into_iter().collect();
    }
    criteria
}

fn run_rank(
    config_path: Option<&Path>,
    from_file: Option<PathBuf>,
    url: Option<String>,
    filter: FilterArgs,
    out: OutputArgs,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(url) = url {
        config.source.url = url;
    }
    config.filter = criteria_from(&config.filter, filter);
    config.validate().context("invalid options")?;

    if out.output.is_some() && out.format == OutputFormat::Table {
        bail!("--output needs --format csv or --format json");
    }

    let service = RankingService::from_config(&config, from_file)?;
    let mut ranking = service
        .ranked(&config.filter)
        .with_context(|| format!("failed to rank funds from {}", service.fetcher_name()))?;
    if let Some(limit) = out.limit {
        ranking.funds.truncate(limit);
    }

    match (out.format, out.output) {
        (OutputFormat::Table, _) => {
            print_table(&ranking);
            if out.summary && !ranking.funds.is_empty() {
                let summary = sector_summary(&to_frame(&ranking.funds)?)?;
                println!();
                println!("{summary}");
            }
        }
        (OutputFormat::Csv, Some(path)) => {
            write_csv(&path, &ranking.funds)?;
            println!("Wrote {} funds to {}", ranking.funds.len(), path.display());
        }
        (OutputFormat::Csv, None) => print!("{}", to_csv(&ranking.funds)?),
        (OutputFormat::Json, Some(path)) => {
            std::fs::write(&path, to_json(&ranking)?)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {} funds to {}", ranking.funds.len(), path.display());
        }
        (OutputFormat::Json, None) => println!("{}", to_json(&ranking)?),
    }

    Ok(())
}

fn print_table(ranking: &Ranking) {
    println!(
        "Fetched {} ({:?}): {} of {} funds pass the filters",
        ranking.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"),
        ranking.source,
        ranking.funds.len(),
        ranking.total,
    );
    println!();

    if ranking.funds.is_empty() {
        println!("No funds match.");
        return;
    }

    println!(
        "{:>4} {:<8} {:<30} {:>10} {:>6} {:>8} {:>14} {:>6} {:>6} {:>6}",
        "#", "Ticker", "Sector", "Price", "P/VP", "DY a.a.", "Liquidity", "R P/VP", "R DY", "Score"
    );
    println!("{}", "-".repeat(106));
    for (i, f) in ranking.funds.iter().enumerate() {
        let r = &f.record;
        println!(
            "{:>4} {:<8} {:<30} {:>10.2} {:>6.2} {:>7.2}% {:>14.0} {:>6} {:>6} {:>6}",
            i + 1,
            r.ticker,
            truncate(&r.sector, 30),
            r.price,
            r.valuation_ratio,
            r.yield_pct(),
            r.liquidity,
            f.rank_valuation,
            f.rank_yield,
            f.composite_score,
        );
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width - 1).collect();
        out.push('…');
        out
    }
}

fn run_sectors(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let table = config.sector_table()?;
    for sector in table.vocabulary() {
        println!("{sector}");
    }
    Ok(())
}

fn run_config_init(output: Option<&Path>) -> Result<()> {
    let text = AppConfig::default().to_toml()?;
    match output {
        Some(path) => {
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
