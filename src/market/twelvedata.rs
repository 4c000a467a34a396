use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ProviderError;
use crate::market::MarketData;
use crate::models::{Candle, CandleSeries, Symbol, Timeframe};

const PROVIDER: &str = "twelvedata";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    values: Vec<RawCandle>,
}

#[derive(Debug, Deserialize)]
struct RawCandle {
    datetime: String,
    open: String,
    high: String,
    low: String,
    close: String,
    #[serde(default)]
    volume: Option<String>,
}

impl RawCandle {
    fn into_candle(self) -> Option<Candle> {
        let timestamp = NaiveDateTime::parse_from_str(&self.datetime, DATETIME_FORMAT)
            .ok()?
            .and_utc();
        Some(Candle {
            timestamp,
            open: self.open.parse().ok()?,
            high: self.high.parse().ok()?,
            low: self.low.parse().ok()?,
            close: self.close.parse().ok()?,
            volume: self
                .volume
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
        })
    }
}

pub struct TwelveDataClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TwelveDataClient {
    pub fn new(cfg: &Config) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key: cfg.twelvedata_api_key.clone(),
            base_url: cfg.twelvedata_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn time_series(
        &self,
        symbol: Symbol,
        tf: Timeframe,
        count: usize,
    ) -> Result<CandleSeries, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingConfig("TWELVEDATA_API_KEY"));
        }

        debug!("Fetching {} {} x{} from {}", symbol, tf, count, PROVIDER);

        let resp = self
            .client
            .get(format!("{}/time_series", self.base_url))
            .query(&[
                ("symbol", symbol.provider_symbol().to_string()),
                ("interval", tf.provider_interval().to_string()),
                ("outputsize", count.to_string()),
                ("timezone", "UTC".to_string()),
                ("apikey", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("{} HTTP {}: {}", PROVIDER, status, body);
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let data: TimeSeriesResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        // Errors are reported in-band with HTTP 200
        if data.status == "error" {
            let message = data
                .message
                .unwrap_or_else(|| "unknown error".to_string());
            warn!("{} rejected request: {}", PROVIDER, message);
            return Err(ProviderError::Provider {
                provider: PROVIDER,
                message,
            });
        }

        let raw_len = data.values.len();
        let candles: Vec<Candle> = data
            .values
            .into_iter()
            .filter_map(RawCandle::into_candle)
            .collect();
        if candles.len() < raw_len {
            debug!("Skipped {} unparseable rows", raw_len - candles.len());
        }

        // Provider returns newest first
        Ok(CandleSeries::from_unordered(candles))
    }
}

#[async_trait]
impl MarketData for TwelveDataClient {
    async fn fetch_candles(
        &self,
        symbol: Symbol,
        tf: Timeframe,
        count: usize,
    ) -> Result<CandleSeries, ProviderError> {
        self.time_series(symbol, tf, count).await
    }
}
