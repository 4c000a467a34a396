#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Duration, Utc};

use scalp_signals::config::{Config, SourceKind};
use scalp_signals::core::sessions::default_sessions;
use scalp_signals::error::ProviderError;
use scalp_signals::market::MarketData;
use scalp_signals::models::{Candle, CandleSeries, Symbol, Timeframe};

/// Create candles from (open, high, low, close) tuples with auto-incrementing 5m timestamps.
pub fn make_candles(data: &[(f64, f64, f64, f64)]) -> CandleSeries {
    let base = DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc);

    let candles: Vec<Candle> = data
        .iter()
        .enumerate()
        .map(|(i, &(o, h, l, c))| Candle {
            timestamp: base + Duration::minutes(5 * i as i64),
            open: o,
            high: h,
            low: l,
            close: c,
            volume: 0.0,
        })
        .collect();

    CandleSeries::new(candles)
}

/// Config with no provider keys and providers pointed at a closed port.
pub fn test_config() -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        api_key: "secret".to_string(),
        default_source: SourceKind::Synthetic,
        twelvedata_api_key: String::new(),
        twelvedata_base_url: "http://127.0.0.1:9".to_string(),
        openai_api_key: String::new(),
        openai_base_url: "http://127.0.0.1:9".to_string(),
        openai_model: "gpt-4o-mini".to_string(),
        llm_temperature: 0.0,
        http_timeout_secs: 5,
        synthetic_seed: Some(11),
        sessions: default_sessions(),
        log_level: "error".to_string(),
    }
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Market data that returns a fixed gently-rising EURUSD series.
pub struct MockMarket {
    pub series: CandleSeries,
}

impl MockMarket {
    pub fn rising_eurusd(n: usize) -> Self {
        let data: Vec<(f64, f64, f64, f64)> = (0..n)
            .map(|i| {
                let o = 1.0850 + i as f64 * 0.0002;
                (o, o + 0.0004, o - 0.0001, o + 0.0003)
            })
            .collect();
        Self {
            series: make_candles(&data),
        }
    }
}

#[async_trait]
impl MarketData for MockMarket {
    async fn fetch_candles(
        &self,
        _symbol: Symbol,
        _tf: Timeframe,
        count: usize,
    ) -> Result<CandleSeries, ProviderError> {
        // Newest `count` candles, as a provider would return them
        let newest: Vec<Candle> = self.series.iter().rev().take(count).cloned().collect();
        Ok(CandleSeries::from_unordered(newest))
    }
}
