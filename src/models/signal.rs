use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Direction, Symbol, Timeframe};

/// A proposed trade before any policy is applied. Produced by a
/// candidate source (synthetic or LLM) and consumed by the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSignal {
    pub symbol: Symbol,
    pub timeframe: Timeframe,
    pub direction: Direction,
    pub entry: f64,
    #[serde(rename = "sl")]
    pub stop: f64,
    pub tp1: f64,
    pub tp2: f64,
    pub tp3: f64,
    pub confidence: u8,
    #[serde(default)]
    pub rationale: Option<String>,
}

impl CandidateSignal {
    /// All five price levels in entry, stop, tp1, tp2, tp3 order.
    pub fn levels(&self) -> [(&'static str, f64); 5] {
        [
            ("entry", self.entry),
            ("sl", self.stop),
            ("tp1", self.tp1),
            ("tp2", self.tp2),
            ("tp3", self.tp3),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    pub min_rr: f64,
    pub min_confidence: u8,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_rr: 1.5,
            min_confidence: 85,
        }
    }
}

/// Normalized, accepted signal as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub symbol: Symbol,
    pub timeframe: Timeframe,
    pub direction: Direction,
    pub entry: f64,
    #[serde(rename = "sl")]
    pub stop: f64,
    pub tp1: f64,
    pub tp2: f64,
    pub tp3: f64,
    pub rr_tp1: f64,
    pub rr_tp2: f64,
    pub rr_tp3: f64,
    pub confidence: u8,
    pub valid_minutes: u32,
    pub be_on_tp1: bool,
    pub news_ok: bool,
    pub news_note: String,
    pub rationale: String,
    pub generated_at: DateTime<Utc>,
}

/// Why no signal was emitted. A defined negative outcome, not a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    RiskReward { rr_tp2: f64, min_rr: f64 },
    Confidence { confidence: u8, min_confidence: u8 },
    OutsideSession { session: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::RiskReward { rr_tp2, min_rr } => {
                write!(f, "rr_tp2 {:.2} below minimum {:.2}", rr_tp2, min_rr)
            }
            Rejection::Confidence {
                confidence,
                min_confidence,
            } => write!(
                f,
                "confidence {} below minimum {}",
                confidence, min_confidence
            ),
            Rejection::OutsideSession { session } => {
                write!(f, "outside trading sessions ({})", session)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::long_candidate;

    #[test]
    fn candidate_uses_sl_on_the_wire() {
        let c = long_candidate(90);
        let v = serde_json::to_value(&c).unwrap();
        assert!((v["sl"].as_f64().unwrap() - c.stop).abs() < 1e-12);
        assert!(v.get("stop").is_none());
        assert_eq!(v["symbol"], "XAUUSD");
        assert_eq!(v["timeframe"], "M5");
    }

    #[test]
    fn rejection_messages() {
        let r = Rejection::RiskReward {
            rr_tp2: 1.4,
            min_rr: 1.5,
        };
        assert_eq!(r.to_string(), "rr_tp2 1.40 below minimum 1.50");

        let r = Rejection::Confidence {
            confidence: 80,
            min_confidence: 85,
        };
        assert_eq!(r.to_string(), "confidence 80 below minimum 85");
    }
}
