mod analysis_service;
mod chat_service;
mod fallback;

pub use analysis_service::{AnalysisFailure, AnalysisService};
pub use chat_service::{ChatOutcome, ChatService};
pub use fallback::{DegradedCause, FallbackResponder};
