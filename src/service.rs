use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{SharedConfig, SourceKind};
use crate::core::sessions::active_session;
use crate::core::validator::{validate_at, Validation};
use crate::error::{CandidateError, ProviderError, SourceError};
use crate::llm::LlmClient;
use crate::market::{MarketData, TwelveDataClient};
use crate::models::{Rejection, SignalRecord, Symbol, Timeframe, ValidationPolicy};
use crate::sources::{CandidateRequest, CandidateSource, LlmSource, SyntheticSource};

pub const MAX_LOOKBACK: usize = 5000;

fn default_lookback() -> usize {
    400
}

fn default_true() -> bool {
    true
}

fn default_min_rr() -> f64 {
    1.5
}

fn default_min_confidence() -> i64 {
    85
}

fn default_news_block() -> u32 {
    30
}

/// Body of `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub symbol: Symbol,
    pub timeframe: Timeframe,
    #[serde(default = "default_lookback")]
    pub lookback: usize,
    #[serde(default = "default_true")]
    pub session_filter: bool,
    #[serde(default = "default_min_rr")]
    pub min_rr: f64,
    /// Wider than the policy field so out-of-range input is a 400, not a parse failure.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: i64,
    /// Accepted for compatibility; no news calendar is consulted.
    #[serde(default = "default_news_block")]
    pub news_block_minutes: u32,
    #[serde(default)]
    pub source: Option<SourceKind>,
}

impl GenerateRequest {
    pub fn new(symbol: Symbol, timeframe: Timeframe) -> Self {
        Self {
            symbol,
            timeframe,
            lookback: default_lookback(),
            session_filter: true,
            min_rr: default_min_rr(),
            min_confidence: default_min_confidence(),
            news_block_minutes: default_news_block(),
            source: None,
        }
    }

    fn check(&self) -> Result<ValidationPolicy, ServiceError> {
        if self.lookback == 0 || self.lookback > MAX_LOOKBACK {
            return Err(ServiceError::InvalidRequest(format!(
                "lookback must be within 1..={}",
                MAX_LOOKBACK
            )));
        }
        if !self.min_rr.is_finite() || self.min_rr < 0.0 {
            return Err(ServiceError::InvalidRequest(
                "min_rr must be a non-negative number".to_string(),
            ));
        }
        let min_confidence = u8::try_from(self.min_confidence)
            .ok()
            .filter(|c| *c <= 100)
            .ok_or_else(|| {
                ServiceError::InvalidRequest("min_confidence must be within 0..=100".to_string())
            })?;
        Ok(ValidationPolicy {
            min_rr: self.min_rr,
            min_confidence,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Signal(SignalRecord),
    NoSignal(Rejection),
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("malformed candidate: {0}")]
    Malformed(#[from] CandidateError),
}

impl From<SourceError> for ServiceError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::Provider(p) => ServiceError::Provider(p),
            SourceError::Malformed(m) => ServiceError::Malformed(m),
        }
    }
}

/// Runs one signal request: session gate, candidate source, validation.
pub struct SignalService {
    config: SharedConfig,
    synthetic: Arc<dyn CandidateSource>,
    llm: Option<Arc<dyn CandidateSource>>,
}

impl SignalService {
    pub fn new(
        config: SharedConfig,
        synthetic: Arc<dyn CandidateSource>,
        llm: Option<Arc<dyn CandidateSource>>,
    ) -> Self {
        Self {
            config,
            synthetic,
            llm,
        }
    }

    /// Wire the real providers. The LLM path is only available when both
    /// the market-data and LLM keys are configured.
    pub fn from_config(config: SharedConfig) -> Result<Self, ProviderError> {
        let synthetic: Arc<dyn CandidateSource> =
            Arc::new(SyntheticSource::new(config.synthetic_seed));

        let llm: Option<Arc<dyn CandidateSource>> = if config.llm_enabled() {
            let market: Arc<dyn MarketData> = Arc::new(TwelveDataClient::new(&config)?);
            let client = LlmClient::new(&config)?;
            let source: Arc<dyn CandidateSource> = Arc::new(LlmSource::new(market, client));
            Some(source)
        } else {
            None
        };

        Ok(Self::new(config, synthetic, llm))
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn generate(&self, req: &GenerateRequest) -> Result<Outcome, ServiceError> {
        self.generate_at(req, Utc::now()).await
    }

    pub async fn generate_at(
        &self,
        req: &GenerateRequest,
        now: DateTime<Utc>,
    ) -> Result<Outcome, ServiceError> {
        let policy = req.check()?;

        if req.session_filter && active_session(&self.config.sessions, now).is_none() {
            debug!("{} {}: outside configured sessions", req.symbol, req.timeframe);
            return Ok(Outcome::NoSignal(Rejection::OutsideSession {
                session: "off_session".to_string(),
            }));
        }

        let kind = req.source.unwrap_or(self.config.default_source);
        let source = match kind {
            SourceKind::Synthetic => &self.synthetic,
            SourceKind::Llm => self
                .llm
                .as_ref()
                .ok_or(ProviderError::MissingConfig("OPENAI_API_KEY and TWELVEDATA_API_KEY"))?,
        };

        let creq = CandidateRequest {
            symbol: req.symbol,
            timeframe: req.timeframe,
            lookback: req.lookback,
            policy,
        };
        let candidate = source.candidate(&creq).await.map_err(|e| {
            warn!("{:?} source failed for {} {}: {}", source.kind(), req.symbol, req.timeframe, e);
            ServiceError::from(e)
        })?;

        match validate_at(&candidate, &policy, now)? {
            Validation::Accepted(record) => {
                info!(
                    "Signal {} {} {} entry={} rr_tp2={:.2} conf={}",
                    record.symbol,
                    record.timeframe,
                    record.direction,
                    record.entry,
                    record.rr_tp2,
                    record.confidence
                );
                Ok(Outcome::Signal(record))
            }
            Validation::Rejected(reason) => {
                debug!("No signal for {} {}: {}", req.symbol, req.timeframe, reason);
                Ok(Outcome::NoSignal(reason))
            }
        }
    }
}
