pub mod llm;
pub mod synthetic;

pub use llm::LlmSource;
pub use synthetic::SyntheticSource;

use async_trait::async_trait;

use crate::config::SourceKind;
use crate::error::SourceError;
use crate::models::{CandidateSignal, Symbol, Timeframe, ValidationPolicy};

/// What a caller asks a source for.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRequest {
    pub symbol: Symbol,
    pub timeframe: Timeframe,
    /// Candles of history the source may consult
    pub lookback: usize,
    /// Thresholds the candidate will be judged against; sources may use
    /// them as hints but never apply them.
    pub policy: ValidationPolicy,
}

/// Anything that can propose a trade. The validator does not care which.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    async fn candidate(&self, req: &CandidateRequest) -> Result<CandidateSignal, SourceError>;
}
