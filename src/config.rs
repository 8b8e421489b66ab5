use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub request_timeout_seconds: u64,
    pub user_agents: Vec<String>,
    pub exchange_rate_api_url: String,
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Resale commission applied on top of the extracted price.
    pub commission_rate: f64,
    /// Flat handling fee added after commission.
    pub additional_fee: f64,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Config {
            request_timeout_seconds: 15,
            user_agents: vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15".to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0".to_string(),
            ],
            exchange_rate_api_url: "https://api.exchangerate-api.com/v4/latest/USD".to_string(),
            pricing: PricingConfig {
                commission_rate: 0.10,
                additional_fee: 10.0,
            },
        })
    }
}
