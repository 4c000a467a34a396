use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::SourceKind;
use crate::error::{CandidateError, ProviderError, SourceError};
use crate::llm::{ChatMessage, LlmClient};
use crate::market::MarketData;
use crate::models::{CandidateSignal, CandleSeries, Direction, Symbol, Timeframe};
use crate::sources::{CandidateRequest, CandidateSource};

const SYSTEM_PROMPT: &str = "You are a forex scalping analyst. You receive recent intraday \
candles for one instrument and propose at most one short-horizon trade. Reply with a single \
JSON object and nothing else, using exactly these keys: \
\"direction\" (\"long\" or \"short\"), \"entry\", \"sl\", \"tp1\", \"tp2\", \"tp3\" (prices as \
numbers), \"confidence\" (integer 0-100) and \"rationale\" (one or two sentences). For a long, \
sl < entry < tp1 < tp2 < tp3; for a short the reverse. Be conservative with confidence.";

/// Candidates proposed by an LLM from live candles.
pub struct LlmSource {
    market: Arc<dyn MarketData>,
    llm: LlmClient,
}

impl LlmSource {
    pub fn new(market: Arc<dyn MarketData>, llm: LlmClient) -> Self {
        Self { market, llm }
    }
}

#[async_trait]
impl CandidateSource for LlmSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Llm
    }

    async fn candidate(&self, req: &CandidateRequest) -> Result<CandidateSignal, SourceError> {
        let candles = self
            .market
            .fetch_candles(req.symbol, req.timeframe, req.lookback)
            .await?;
        if candles.is_empty() {
            return Err(ProviderError::Provider {
                provider: "twelvedata",
                message: format!("no candles for {} {}", req.symbol, req.timeframe),
            }
            .into());
        }

        let messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(render_prompt(req, &candles)),
        ];
        let content = self.llm.chat_json(&messages).await?;
        debug!("LLM replied with {} bytes", content.len());

        let candidate = parse_candidate(&content, req.symbol, req.timeframe)?;
        info!(
            "LLM candidate {} {} {} conf={}",
            candidate.symbol, candidate.timeframe, candidate.direction, candidate.confidence
        );
        Ok(candidate)
    }
}

/// Candle history as compact CSV with a one-line summary header.
pub fn render_prompt(req: &CandidateRequest, candles: &CandleSeries) -> String {
    let dp = req.symbol.decimals();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Instrument: {} Timeframe: {} Candles: {}",
        req.symbol,
        req.timeframe,
        candles.len()
    );
    if let Some(last) = candles.last() {
        let _ = writeln!(
            out,
            "Last close: {:.*} Range high: {:.*} Range low: {:.*} Avg candle range: {:.*}",
            dp,
            last.close,
            dp,
            candles.highs_max(),
            dp,
            candles.lows_min(),
            dp,
            candles.average_range()
        );
    }
    let _ = writeln!(
        out,
        "Only propose setups with tp2 reward/risk >= {:.2} and confidence >= {}.",
        req.policy.min_rr, req.policy.min_confidence
    );
    let _ = writeln!(out, "time_utc,open,high,low,close");
    for c in candles {
        let _ = writeln!(
            out,
            "{},{:.*},{:.*},{:.*},{:.*}",
            c.timestamp.format("%Y-%m-%d %H:%M"),
            dp,
            c.open,
            dp,
            c.high,
            dp,
            c.low,
            dp,
            c.close
        );
    }
    out
}

/// Turn the model's JSON reply into a candidate. Missing `confidence`
/// defaults to 0 and missing `rationale` to none; every price and the
/// direction are required.
pub fn parse_candidate(
    content: &str,
    symbol: Symbol,
    timeframe: Timeframe,
) -> Result<CandidateSignal, SourceError> {
    let value: Value = serde_json::from_str(strip_fences(content))
        .map_err(|e| ProviderError::MalformedResponse(format!("LLM reply is not JSON: {}", e)))?;
    let obj = value.as_object().ok_or_else(|| {
        ProviderError::MalformedResponse("LLM reply is not a JSON object".to_string())
    })?;

    let direction = match obj.get("direction").and_then(Value::as_str) {
        Some(d) => Direction::from_str_loose(d)
            .ok_or_else(|| CandidateError::UnknownDirection(d.to_string()))?,
        None => return Err(CandidateError::MissingField("direction").into()),
    };

    let confidence = match number(obj, &["confidence"]) {
        Some(c) if (0.0..=100.0).contains(&c) => c.round() as u8,
        Some(c) if c.is_finite() => {
            return Err(CandidateError::ConfidenceOutOfRange(c.round() as i64).into())
        }
        Some(_) => return Err(CandidateError::NonFinite { field: "confidence" }.into()),
        None => 0,
    };

    let rationale = obj
        .get("rationale")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(CandidateSignal {
        symbol,
        timeframe,
        direction,
        entry: required(obj, "entry", &["entry"])?,
        stop: required(obj, "sl", &["sl", "stop", "stop_loss"])?,
        tp1: required(obj, "tp1", &["tp1"])?,
        tp2: required(obj, "tp2", &["tp2"])?,
        tp3: required(obj, "tp3", &["tp3"])?,
        confidence,
        rationale,
    })
}

fn required(
    obj: &Map<String, Value>,
    field: &'static str,
    keys: &[&str],
) -> Result<f64, CandidateError> {
    number(obj, keys).ok_or(CandidateError::MissingField(field))
}

/// First of `keys` present as a number or numeric string.
fn number(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Models sometimes wrap JSON in a ```json fence despite instructions.
fn strip_fences(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}
