use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::risk_reward::{rr, round5};
use crate::error::CandidateError;
use crate::models::{CandidateSignal, Direction, Rejection, SignalRecord, ValidationPolicy};

pub const DEFAULT_RATIONALE: &str =
    "Placeholder scalp setup. Manage 50/30/20; move SL to BE at TP1.";

#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Accepted(SignalRecord),
    Rejected(Rejection),
}

impl Validation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Validation::Accepted(_))
    }
}

/// Apply `policy` to `candidate`, stamping an accepted record with the
/// current UTC time.
pub fn validate(
    candidate: &CandidateSignal,
    policy: &ValidationPolicy,
) -> Result<Validation, CandidateError> {
    validate_at(candidate, policy, Utc::now())
}

pub fn validate_at(
    candidate: &CandidateSignal,
    policy: &ValidationPolicy,
    now: DateTime<Utc>,
) -> Result<Validation, CandidateError> {
    check_well_formed(candidate)?;

    let c = candidate;
    let rr_tp1 = rr(c.entry, c.stop, c.tp1);
    let rr_tp2 = rr(c.entry, c.stop, c.tp2);
    let rr_tp3 = rr(c.entry, c.stop, c.tp3);

    // tp2 is the reference target for the RR gate
    if rr_tp2 < policy.min_rr {
        debug!(
            "{} {} rejected: rr_tp2 {:.2} < {:.2}",
            c.symbol, c.timeframe, rr_tp2, policy.min_rr
        );
        return Ok(Validation::Rejected(Rejection::RiskReward {
            rr_tp2,
            min_rr: policy.min_rr,
        }));
    }
    if c.confidence < policy.min_confidence {
        debug!(
            "{} {} rejected: confidence {} < {}",
            c.symbol, c.timeframe, c.confidence, policy.min_confidence
        );
        return Ok(Validation::Rejected(Rejection::Confidence {
            confidence: c.confidence,
            min_confidence: policy.min_confidence,
        }));
    }

    let rationale = c
        .rationale
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_RATIONALE)
        .to_string();

    Ok(Validation::Accepted(SignalRecord {
        symbol: c.symbol,
        timeframe: c.timeframe,
        direction: c.direction,
        entry: round5(c.entry),
        stop: round5(c.stop),
        tp1: round5(c.tp1),
        tp2: round5(c.tp2),
        tp3: round5(c.tp3),
        rr_tp1,
        rr_tp2,
        rr_tp3,
        confidence: c.confidence,
        valid_minutes: c.timeframe.valid_minutes(),
        be_on_tp1: true,
        news_ok: true,
        news_note: String::new(),
        rationale,
        generated_at: now,
    }))
}

fn check_well_formed(c: &CandidateSignal) -> Result<(), CandidateError> {
    for (field, value) in c.levels() {
        if !value.is_finite() {
            return Err(CandidateError::NonFinite { field });
        }
        if value <= 0.0 {
            return Err(CandidateError::NonPositive { field, value });
        }
    }
    if c.confidence > 100 {
        return Err(CandidateError::ConfidenceOutOfRange(c.confidence as i64));
    }

    let ordered = match c.direction {
        Direction::Long => c.stop < c.entry && c.entry < c.tp1 && c.tp1 < c.tp2 && c.tp2 < c.tp3,
        Direction::Short => c.stop > c.entry && c.entry > c.tp1 && c.tp1 > c.tp2 && c.tp2 > c.tp3,
    };
    if !ordered {
        let expected = match c.direction {
            Direction::Long => "sl < entry < tp1 < tp2 < tp3",
            Direction::Short => "sl > entry > tp1 > tp2 > tp3",
        };
        return Err(CandidateError::Ordering {
            direction: c.direction.as_str(),
            expected,
        });
    }
    Ok(())
}
