use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub cart_service_url: String,
    pub review_service_url: String,
    pub http_timeout_secs: u64,
    pub event_channel_capacity: usize,
}

impl Config {
    pub fn init() -> Result<Self> {
        dotenv::dotenv().ok();

        let cart_service_url = std::env::var("CART_SERVICE_URL")
            .context("Missing environment variable: CART_SERVICE_URL")?;

        let review_service_url = std::env::var("REVIEW_SERVICE_URL")
            .context("Missing environment variable: REVIEW_SERVICE_URL")?;

        let http_timeout_secs: u64 = std::env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .context("Unable to parse HTTP_TIMEOUT_SECS as u64")?;

        let event_channel_capacity: usize = std::env::var("EVENT_CHANNEL_CAPACITY")
            .unwrap_or_else(|_| "32".to_string())
            .parse::<usize>()
            .context("Unable to parse EVENT_CHANNEL_CAPACITY as usize")?;

        Ok(Self {
            cart_service_url,
            review_service_url,
            http_timeout_secs,
            event_channel_capacity,
        })
    }
}
