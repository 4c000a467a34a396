use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    XAUUSD,
    EURUSD,
}

impl Symbol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::XAUUSD => "XAUUSD",
            Symbol::EURUSD => "EURUSD",
        }
    }

    pub fn tick_size(&self) -> f64 {
        match self {
            Symbol::XAUUSD => 0.01,
            Symbol::EURUSD => 0.0001,
        }
    }

    /// Quote precision used when rendering prices as text
    pub fn decimals(&self) -> usize {
        match self {
            Symbol::XAUUSD => 2,
            Symbol::EURUSD => 5,
        }
    }

    /// Anchor price for synthetic candidates
    pub fn reference_price(&self) -> f64 {
        match self {
            Symbol::XAUUSD => 2410.0,
            Symbol::EURUSD => 1.0850,
        }
    }

    /// Twelve Data pair notation
    pub fn provider_symbol(&self) -> &'static str {
        match self {
            Symbol::XAUUSD => "XAU/USD",
            Symbol::EURUSD => "EUR/USD",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
