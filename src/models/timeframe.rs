use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M1,
    M5,
    M15,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M1 => "M1",
            Timeframe::M5 => "M5",
            Timeframe::M15 => "M15",
        }
    }

    /// How long an emitted signal stays actionable.
    pub fn valid_minutes(&self) -> u32 {
        match self {
            Timeframe::M1 => 15,
            Timeframe::M5 => 30,
            Timeframe::M15 => 60,
        }
    }

    /// Stop distance, in ticks, used by the synthetic generator.
    pub fn risk_ticks(&self) -> u32 {
        match self {
            Timeframe::M1 => 20,
            Timeframe::M5 => 30,
            Timeframe::M15 => 40,
        }
    }

    /// Twelve Data `interval` parameter
    pub fn provider_interval(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1min",
            Timeframe::M5 => "5min",
            Timeframe::M15 => "15min",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_window_per_timeframe() {
        assert_eq!(Timeframe::M1.valid_minutes(), 15);
        assert_eq!(Timeframe::M5.valid_minutes(), 30);
        assert_eq!(Timeframe::M15.valid_minutes(), 60);
    }

    #[test]
    fn wire_names() {
        let tf: Timeframe = serde_json::from_str("\"M15\"").unwrap();
        assert_eq!(tf, Timeframe::M15);
        assert_eq!(tf.provider_interval(), "15min");
        assert!(serde_json::from_str::<Timeframe>("\"H1\"").is_err());
    }
}
