use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::config::PricingConfig;

// Used when the rate API is unreachable and no cached value exists
const FALLBACK_USD_EUR_RATE: f64 = 0.92;

/// Resale quote: extracted or manually entered price plus commission and a
/// flat handling fee.
pub fn final_price(base: f64, pricing: &PricingConfig) -> f64 {
    base * (1.0 + pricing.commission_rate) + pricing.additional_fee
}

pub fn convert(amount: f64, rate: f64) -> f64 {
    amount * rate
}

#[derive(Debug, Clone, Default)]
struct RateCache {
    rate: Option<f64>,
    last_updated: Option<DateTime<Utc>>,
}

/// USD to EUR rate client with a 24-hour in-memory cache. A fetch failure
/// falls back to the stale cached value, then to a hardcoded default, so a
/// rate is always produced.
pub struct ExchangeRateClient {
    api_url: String,
    cache: Arc<Mutex<RateCache>>,
}

impl ExchangeRateClient {
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            cache: Arc::new(Mutex::new(RateCache::default())),
        }
    }

    pub async fn get_usd_to_eur_rate(&self, client: &Client) -> Result<f64> {
        let mut cache = self.cache.lock().await;

        if let (Some(rate), Some(last_updated)) = (cache.rate, cache.last_updated) {
            if Utc::now() - last_updated < Duration::hours(24) {
                info!("Using cached USD to EUR rate: {}", rate);
                return Ok(rate);
            }
        }

        info!("Fetching fresh USD to EUR exchange rate");

        match client.get(&self.api_url).send().await {
            Ok(response) => {
                if response.status().is_success() {
                    let data: serde_json::Value = response.json().await?;

                    if let Some(rate) = data
                        .get("rates")
                        .and_then(|rates| rates.get("EUR"))
                        .and_then(|eur| eur.as_f64())
                    {
                        info!("Successfully fetched USD to EUR rate: {}", rate);
                        cache.rate = Some(rate);
                        cache.last_updated = Some(Utc::now());
                        return Ok(rate);
                    }
                }
            }
            Err(e) => {
                error!("Failed to fetch exchange rate: {}", e);
            }
        }

        if let Some(rate) = cache.rate {
            info!("Using stale cached rate due to fetch failure: {}", rate);
            Ok(rate)
        } else {
            info!("Using fallback USD to EUR rate: {}", FALLBACK_USD_EUR_RATE);
            cache.rate = Some(FALLBACK_USD_EUR_RATE);
            cache.last_updated = Some(Utc::now());
            Ok(FALLBACK_USD_EUR_RATE)
        }
    }
}
