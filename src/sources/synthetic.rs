use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::config::SourceKind;
use crate::error::SourceError;
use crate::models::{CandidateSignal, Direction};
use crate::sources::{CandidateRequest, CandidateSource};

const ENTRY_JITTER_TICKS: i32 = 50;
const BASE_CONFIDENCE: u8 = 70;
const CONFIDENCE_SPREAD: u8 = 20;

/// Pseudo-random placeholder setups around a fixed reference price.
/// Demo and test fixture only; no market data is consulted.
pub struct SyntheticSource {
    rng: Mutex<StdRng>,
}

impl SyntheticSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn generate(&self, req: &CandidateRequest) -> CandidateSignal {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        let tick = req.symbol.tick_size();
        let risk_ticks = req.timeframe.risk_ticks();
        let direction = if rng.gen_bool(0.5) {
            Direction::Long
        } else {
            Direction::Short
        };
        let jitter = rng.gen_range(-ENTRY_JITTER_TICKS..=ENTRY_JITTER_TICKS);
        let confidence = BASE_CONFIDENCE + rng.gen_range(0..=CONFIDENCE_SPREAD);
        drop(rng);

        let entry = req.symbol.reference_price() + jitter as f64 * tick;
        let sign = direction.sign();
        let level = |ticks: u32| entry + sign * ticks as f64 * tick;

        CandidateSignal {
            symbol: req.symbol,
            timeframe: req.timeframe,
            direction,
            entry,
            stop: entry - sign * risk_ticks as f64 * tick,
            tp1: level(risk_ticks),
            // floor(risk * 1.5) and floor(risk * 2.5)
            tp2: level(risk_ticks * 3 / 2),
            tp3: level(risk_ticks * 5 / 2),
            confidence,
            rationale: None,
        }
    }
}

#[async_trait]
impl CandidateSource for SyntheticSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Synthetic
    }

    async fn candidate(&self, req: &CandidateRequest) -> Result<CandidateSignal, SourceError> {
        Ok(self.generate(req))
    }
}
