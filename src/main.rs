use chrono::Local;
use clap::{Parser, ValueEnum};
use jobscrap::{info_time, Result, Scraper, ScraperConfig, SearchContext, SearchMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "searches job listings and prints them")]
struct Cmd {
    /// Search keywords
    keywords: String,
    /// Result page to fetch (or start from, with --all)
    #[arg(short, long)]
    page: Option<usize>,
    /// Keep fetching pages until an empty one
    #[arg(short, long)]
    all: bool,
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Cmd::parse();
    let start_time = Local::now();

    let config = ScraperConfig::from_env()?;
    let scraper = Scraper::launch(&config)?;

    let ctx = SearchContext::new(args.keywords, args.page);
    let mode = if args.all {
        SearchMode::AllPages
    } else {
        SearchMode::SinglePage
    };
    let jobs = scraper.run(&ctx, mode).await;
    scraper.close().await;
    let jobs = jobs?;

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&jobs)?),
        Format::Text => {
            for job in &jobs {
                println!("{job}\n");
            }
        }
    }
    info_time!(start_time, "Full program time:");

    Ok(())
}
