//! salesboard - Sales analytics dashboard

mod cli;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use salesboard_core::period::{parse_bound, Bound};
use salesboard_core::{
    export_daily_revenue_to_csv, export_sales_to_csv, export_summary_to_json,
    export_top_products_to_csv, paginate, AnalyticsService, DateRange, RestSalesRepository,
    SalesboardConfig,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::cli::DateSpan;

#[derive(Parser)]
#[command(
    name = "salesboard",
    version,
    about = "Sales analytics dashboard",
    long_about = "Revenue, order and customer analytics over a hosted sales database.\n\
                  \n\
                  Computes headline totals with period-over-period growth, top products and\n\
                  customers, and breakdowns by region, category, day and month. Without a\n\
                  configured backend every command runs on a built-in sample dataset.\n\
                  \n\
                  Examples:\n\
                    salesboard summary                   # Dashboard range (last ~2 months)\n\
                    salesboard summary --since 7d        # Last 7 days vs the 7 before\n\
                    salesboard summary --start 2024-01-01 --end 2024-03-31 --json\n\
                    salesboard sales --page 1            # Second page of recent sales\n\
                    salesboard export --output ./report  # JSON + CSV files\n\
                    salesboard web --port 8080           # JSON API\n\
                  \n\
                  Environment Variables:\n\
                    SALESBOARD_URL                       # Backend project URL (https://...)\n\
                    SALESBOARD_ANON_KEY                  # Backend public API key\n\
                    SALESBOARD_NO_COLOR                  # Disable ANSI colors (log-friendly)\n\
                    RUST_LOG                             # Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Config file (default: <config dir>/salesboard/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend project URL
    #[arg(long, env = "SALESBOARD_URL")]
    url: Option<String>,

    /// Backend public (anon) API key
    #[arg(long, env = "SALESBOARD_ANON_KEY", hide_env_values = true)]
    anon_key: Option<String>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "SALESBOARD_NO_COLOR")]
    no_color: bool,
}

/// Reporting window options shared by summary and export
#[derive(Args, Debug, Default)]
struct RangeArgs {
    /// Relative window: 7d, 30d, 3m, 1y, or a YYYY-MM-DD start date
    #[arg(long, short = 'd', conflicts_with_all = ["start", "end"])]
    since: Option<String>,
    /// Window start (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    start: Option<String>,
    /// Window end, inclusive (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    end: Option<String>,
}

#[derive(Subcommand)]
enum Mode {
    /// Print the analytics summary (default)
    Summary {
        #[command(flatten)]
        range: RangeArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List recent sales, newest first
    Sales {
        /// Rows to fetch (default from config: 100)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
        /// Zero-based page
        #[arg(long, default_value = "0")]
        page: usize,
        /// Rows per page (default from config: 10)
        #[arg(long)]
        per_page: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List customers
    Customers {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List active products
    Products {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the summary and recent sales as JSON + CSV files
    Export {
        /// Output directory
        #[arg(long, short = 'o')]
        output: PathBuf,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Serve the JSON API
    Web {
        /// Port for web server
        #[arg(long, default_value = "3333")]
        port: u16,
    },
}

type Service = AnalyticsService<RestSalesRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.no_color);

    let config_path = cli.config.or_else(SalesboardConfig::default_path);
    let config = match config_path {
        Some(path) => SalesboardConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SalesboardConfig::default(),
    }
    .with_overrides(cli.url, cli.anon_key);

    let service = build_service(&config)?;
    let no_color = cli.no_color;

    match cli.mode.unwrap_or(Mode::Summary {
        range: RangeArgs::default(),
        json: false,
    }) {
        Mode::Summary { range, json } => {
            run_summary(&service, &range, json, no_color).await?;
        }
        Mode::Sales {
            limit,
            page,
            per_page,
            json,
        } => {
            let limit = limit.unwrap_or(config.recent_sales_limit);
            let per_page = per_page.unwrap_or(config.page_size);
            run_sales(&service, limit, page, per_page, json, no_color).await?;
        }
        Mode::Customers { json } => {
            run_customers(&service, json, no_color).await?;
        }
        Mode::Products { json } => {
            run_products(&service, json, no_color).await?;
        }
        Mode::Export { output, range } => {
            run_export(&service, &range, config.recent_sales_limit, output).await?;
        }
        Mode::Web { port } => {
            salesboard_web::run(Arc::new(service), port).await?;
        }
    }

    Ok(())
}

/// Logs go to stderr so JSON output on stdout stays clean
fn init_tracing(no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .init();
}

fn build_service(config: &SalesboardConfig) -> Result<Service> {
    let repository = config
        .usable_backend()
        .cloned()
        .map(RestSalesRepository::new)
        .transpose()
        .context("Failed to create sales backend client")?;

    if repository.is_none() {
        tracing::info!("No usable backend configuration, running on sample data");
    }

    Ok(AnalyticsService::from_repository(repository))
}

fn resolve_range(args: &RangeArgs) -> Result<DateRange> {
    let now = Utc::now();
    if let Some(since) = &args.since {
        return DateSpan::parse(since)?.to_range(now);
    }

    let fallback = DateRange::dashboard_default(now);
    let start = match &args.start {
        Some(s) => parse_bound(s, Bound::Start)?,
        None => fallback.start,
    };
    let end = match &args.end {
        Some(s) => parse_bound(s, Bound::End)?,
        None => fallback.end,
    };
    Ok(DateRange::new(start, end)?)
}

fn spinner(message: &str, no_color: bool) -> Result<ProgressBar> {
    let template = if no_color {
        "{spinner} {msg}"
    } else {
        "{spinner:.cyan} {msg}"
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template(template)
            .context("Invalid spinner template")?
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message(message.to_string());
    Ok(spinner)
}

fn print_banner(service: &Service) {
    if let Some(banner) = cli::source_banner(&service.source()) {
        eprintln!("{}", banner);
    }
}

async fn run_summary(
    service: &Service,
    range: &RangeArgs,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let range = resolve_range(range)?;
    print_banner(service);

    let spinner = spinner("Fetching sales...", no_color)?;
    let report = service.get_analytics(range).await;
    spinner.finish_and_clear();

    let report = report.context("Failed to load analytics")?;
    println!("{}", cli::format_report(&report, json, no_color));
    Ok(())
}

async fn run_sales(
    service: &Service,
    limit: usize,
    page: usize,
    per_page: usize,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let range = DateRange::dashboard_default(Utc::now());
    print_banner(service);

    let spinner = spinner("Fetching recent sales...", no_color)?;
    let sales = service.get_sales(range, Some(limit)).await;
    spinner.finish_and_clear();

    let sales = sales.context("Failed to load sales")?;
    let page = paginate(&sales, page, per_page);
    println!("{}", cli::format_sales_page(&page, json, no_color));
    Ok(())
}

async fn run_customers(service: &Service, json: bool, no_color: bool) -> Result<()> {
    print_banner(service);
    let customers = service
        .get_customers()
        .await
        .context("Failed to load customers")?;
    println!("{}", cli::format_customers(&customers, json, no_color));
    Ok(())
}

async fn run_products(service: &Service, json: bool, no_color: bool) -> Result<()> {
    print_banner(service);
    let products = service
        .get_products()
        .await
        .context("Failed to load products")?;
    println!("{}", cli::format_products(&products, json, no_color));
    Ok(())
}

async fn run_export(
    service: &Service,
    range: &RangeArgs,
    limit: usize,
    output: PathBuf,
) -> Result<()> {
    let range = resolve_range(range)?;
    print_banner(service);

    let (report, sales) = tokio::try_join!(
        service.get_analytics(range),
        service.get_sales(range, Some(limit)),
    )
    .context("Failed to load data for export")?;

    let summary_path = output.join("summary.json");
    let daily_path = output.join("daily_revenue.csv");
    let products_path = output.join("top_products.csv");
    let sales_path = output.join("sales.csv");

    export_summary_to_json(&report.summary, &summary_path)?;
    export_daily_revenue_to_csv(&report.summary, &daily_path)?;
    export_top_products_to_csv(&report.summary, &products_path)?;
    export_sales_to_csv(&sales, &sales_path)?;

    println!(
        "Exported {} ({} sales) to:",
        report.range, report.summary.total_orders
    );
    for path in [summary_path, daily_path, products_path, sales_path] {
        println!("  {}", path.display());
    }
    Ok(())
}
