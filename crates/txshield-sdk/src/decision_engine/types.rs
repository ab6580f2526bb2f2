//! Response types for DecisionEngine

use serde::Serialize;
use txshield_core::FinalDecision;

/// Decision response
#[derive(Debug, Clone, Serialize)]
pub struct DecisionResponse {
    /// Request ID (for tracking and correlation)
    pub request_id: String,

    /// Merged decision with provenance
    pub decision: FinalDecision,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
