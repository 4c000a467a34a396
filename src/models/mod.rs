pub mod candle;
pub mod direction;
pub mod signal;
pub mod symbol;
pub mod timeframe;

pub use candle::{Candle, CandleSeries};
pub use direction::Direction;
pub use signal::{CandidateSignal, Rejection, SignalRecord, ValidationPolicy};
pub use symbol::Symbol;
pub use timeframe::Timeframe;
