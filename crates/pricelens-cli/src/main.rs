use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pricelens_client::{ReqwestFetcher, SelectorExtractor};
use pricelens_core::config::{DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT};
use pricelens_core::{FetchConfig, PriceService, RetryingFetcher, Site};

#[derive(Parser)]
#[command(name = "pricelens", version, about = "Product price scraper for Amazon, Flipkart and Snapdeal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape title, price and image from a product page
    Scrape {
        /// Product page URL
        #[arg(short, long)]
        url: String,

        /// Retries after the first failed attempt
        #[arg(long, env = "PRICELENS_MAX_RETRIES", default_value_t = DEFAULT_MAX_RETRIES)]
        max_retries: u32,

        /// Per-attempt timeout in milliseconds
        #[arg(long, env = "PRICELENS_FETCH_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT.as_millis() as u64)]
        timeout_ms: u64,

        /// First backoff delay in milliseconds (doubles per retry)
        #[arg(long, env = "PRICELENS_RETRY_BASE_DELAY_MS", default_value_t = DEFAULT_BASE_DELAY.as_millis() as u64)]
        base_delay_ms: u64,
    },

    /// List supported sites and the URL token each is routed by
    Sites,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pricelens=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            url,
            max_retries,
            timeout_ms,
            base_delay_ms,
        } => {
            let config = FetchConfig {
                timeout: Duration::from_millis(timeout_ms.max(1)),
                max_retries,
                base_delay: Duration::from_millis(base_delay_ms),
            };
            cmd_scrape(&url, &config).await?;
        }
        Commands::Sites => cmd_sites(),
    }

    Ok(())
}

async fn cmd_scrape(url: &str, config: &FetchConfig) -> Result<()> {
    // The user controls the machine, so local addresses are allowed.
    let fetcher = ReqwestFetcher::with_timeout(config.timeout)
        .and_then(ReqwestFetcher::allow_private_urls)
        .context("Failed to create HTTP client")?;
    let fetcher = RetryingFetcher::new(fetcher, config.retry_policy());
    let service = PriceService::new(fetcher, SelectorExtractor::new());

    let result = service
        .lookup(url)
        .await
        .with_context(|| format!("Failed to scrape {url}"))?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

fn cmd_sites() {
    println!("Supported sites (matched in this order):\n");
    for site in Site::ALL {
        let profile = site.profile();
        println!(
            "  {:<10} token: {:<10} rules: {} price / {} title / {} image",
            site.as_str(),
            site.url_token(),
            profile.price_rules.len(),
            profile.title_rules.len(),
            profile.image_rules.len(),
        );
    }
}
