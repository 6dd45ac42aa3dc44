//! Pluggable capture and analysis backends.
//!
//! The service stamps timestamps and validates results; backends only
//! produce payloads. The placeholder implementations return fixed data and
//! never fail.

use async_trait::async_trait;
use serde_json::Value;

use super::model::AnalysisInput;
use crate::error::{AnalysisError, CaptureError};

/// Source of screen captures.
#[async_trait]
pub trait ScreenCapturer: Send + Sync {
    /// Backend name, used in logs.
    fn name(&self) -> &str;

    /// Capture the screen and return its opaque payload.
    ///
    /// Real implementations return [`CaptureError::Unavailable`] when the
    /// host has not granted screen-recording permission.
    async fn capture(&self) -> Result<Value, CaptureError>;
}

/// Output of an analyzer before the service stamps it.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub solution: String,
    pub confidence: f64,
    pub alternatives: Vec<String>,
}

/// Produces a solution for a captured screen or caller-supplied payload.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Backend name, used in logs.
    fn name(&self) -> &str;

    /// Analyze the input. Model or provider errors map to
    /// [`AnalysisError::Failed`].
    async fn analyze(&self, input: &AnalysisInput) -> Result<Analysis, AnalysisError>;
}

// ── Placeholders ────────────────────────────────────────────────────────

/// Capturer that returns a fixed placeholder payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderCapturer;

#[async_trait]
impl ScreenCapturer for PlaceholderCapturer {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn capture(&self) -> Result<Value, CaptureError> {
        Ok(Value::String("Screen capture data would be here".to_string()))
    }
}

/// Analyzer that returns a fixed placeholder solution.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderAnalyzer;

#[async_trait]
impl Analyzer for PlaceholderAnalyzer {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn analyze(&self, _input: &AnalysisInput) -> Result<Analysis, AnalysisError> {
        Ok(Analysis {
            solution: "Solution data would be provided by AI analysis".to_string(),
            confidence: 0.95,
            alternatives: vec![
                "Alternative approach 1".to_string(),
                "Alternative approach 2".to_string(),
            ],
        })
    }
}
