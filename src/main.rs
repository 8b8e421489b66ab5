use anyhow::Result;
use chrono::Local;
use futures::future::join_all;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use product_scout::archive;
use product_scout::config::Config;
use product_scout::extract::Extractor;
use product_scout::fetch;
use product_scout::pricing::{self, ExchangeRateClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("product_scout=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let save = args.iter().any(|arg| arg == "--save");
    let urls: Vec<String> = args.into_iter().filter(|arg| arg != "--save").collect();

    if urls.is_empty() {
        eprintln!("Usage: product-scout [--save] <url> [<url>...]");
        std::process::exit(2);
    }

    info!(
        "Starting product lookup at {} for {} URL(s)",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        urls.len()
    );

    let config = Arc::new(Config::load()?);
    let client = Arc::new(fetch::create_client(&config)?);
    let extractor = Arc::new(Extractor::new());
    let rates = Arc::new(ExchangeRateClient::new(config.exchange_rate_api_url.clone()));

    let tasks = urls.iter().map(|url| {
        let config = config.clone();
        let client = client.clone();
        let extractor = extractor.clone();
        let rates = rates.clone();

        async move {
            if let Err(e) = process_url(url, &config, &client, &extractor, &rates, save).await {
                error!("Lookup failed for {}: {:#}", url, e);
            }
        }
    });

    join_all(tasks).await;

    Ok(())
}

async fn process_url(
    url: &str,
    config: &Config,
    client: &Client,
    extractor: &Extractor,
    rates: &ExchangeRateClient,
    save: bool,
) -> Result<()> {
    info!("Fetching {}", url);
    let page = fetch::fetch_page(client, config, url).await?;

    let info = extractor.extract(&page.html);

    println!("URL: {}", url);
    println!("Product Name: {}", info.name_display());
    println!("Product Price: {}", info.price_display());

    match &info.price {
        Some(price) => {
            // USD prices also get an EUR display value
            if price.raw.contains('$') {
                match rates.get_usd_to_eur_rate(client).await {
                    Ok(rate) => {
                        println!("EUR equivalent: {:.2} €", pricing::convert(price.amount, rate))
                    }
                    Err(e) => warn!("Could not convert to EUR: {:#}", e),
                }
            }
            println!(
                "Quoted price: {:.2}",
                pricing::final_price(price.amount, &config.pricing)
            );
        }
        None => {
            println!("Could not find the price. Enter it manually to get a quote.");
        }
    }

    if save {
        let paths = archive::save_page(Path::new("data"), &page)?;
        info!("Saved page dump to {}", paths.html.display());
    }

    Ok(())
}
