use chrono::{DateTime, Duration, Utc};

use crate::config::{Config, SourceKind};
use crate::core::sessions::default_sessions;
use crate::models::{Candle, CandidateSignal, CandleSeries, Direction, Symbol, Timeframe};

/// Create candles from (open, high, low, close) tuples with auto-incrementing 1m timestamps.
pub fn make_candles(data: &[(f64, f64, f64, f64)]) -> CandleSeries {
    let base = DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc);

    let candles: Vec<Candle> = data
        .iter()
        .enumerate()
        .map(|(i, &(o, h, l, c))| Candle {
            timestamp: base + Duration::minutes(i as i64),
            open: o,
            high: h,
            low: l,
            close: c,
            volume: 0.0,
        })
        .collect();

    CandleSeries::new(candles)
}

/// XAUUSD M5 long: risk 10, targets at 1R/2R/3R.
pub fn long_candidate(confidence: u8) -> CandidateSignal {
    CandidateSignal {
        symbol: Symbol::XAUUSD,
        timeframe: Timeframe::M5,
        direction: Direction::Long,
        entry: 2410.0,
        stop: 2400.0,
        tp1: 2420.0,
        tp2: 2430.0,
        tp3: 2440.0,
        confidence,
        rationale: None,
    }
}

/// EURUSD M15 short: risk 10 pips, targets at 1R/2R/3R.
pub fn short_candidate(confidence: u8) -> CandidateSignal {
    CandidateSignal {
        symbol: Symbol::EURUSD,
        timeframe: Timeframe::M15,
        direction: Direction::Short,
        entry: 1.0850,
        stop: 1.0860,
        tp1: 1.0840,
        tp2: 1.0830,
        tp3: 1.0820,
        confidence,
        rationale: None,
    }
}

/// A Config suitable for testing: no provider keys, fixed seed.
pub fn default_test_config() -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        api_key: "test-key".to_string(),
        default_source: SourceKind::Synthetic,
        twelvedata_api_key: String::new(),
        twelvedata_base_url: "http://127.0.0.1:9".to_string(),
        openai_api_key: String::new(),
        openai_base_url: "http://127.0.0.1:9".to_string(),
        openai_model: "gpt-4o-mini".to_string(),
        llm_temperature: 0.2,
        http_timeout_secs: 5,
        synthetic_seed: Some(7),
        sessions: default_sessions(),
        log_level: "ERROR".to_string(),
    }
}
