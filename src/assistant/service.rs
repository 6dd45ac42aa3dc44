//! The assistant service: status, capture, analyze.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::backend::{Analysis, Analyzer, PlaceholderAnalyzer, PlaceholderCapturer, ScreenCapturer};
use super::clock::MonotonicClock;
use super::model::{AnalysisInput, AnalysisResult, CaptureKind, CaptureResult, StatusSnapshot};
use crate::config::AssistantConfig;
use crate::error::{AnalysisError, CaptureError};

/// Uniform capability surface over a capture backend and an analysis
/// backend.
///
/// The status snapshot is fixed at construction. No results are retained
/// between calls; when `analyze` gets no input it takes a fresh capture and
/// analyzes that.
pub struct AssistantService {
    status: StatusSnapshot,
    capturer: Arc<dyn ScreenCapturer>,
    analyzer: Arc<dyn Analyzer>,
    clock: MonotonicClock,
}

impl AssistantService {
    /// Create a service with explicit backends.
    pub fn new(
        config: AssistantConfig,
        capturer: Arc<dyn ScreenCapturer>,
        analyzer: Arc<dyn Analyzer>,
    ) -> Self {
        info!(
            version = %config.interface_version,
            capturer = capturer.name(),
            analyzer = analyzer.name(),
            "Assistant service initialized"
        );
        Self {
            status: StatusSnapshot {
                active: config.active,
                interface_version: config.interface_version,
                status: config.status,
            },
            capturer,
            analyzer,
            clock: MonotonicClock::new(),
        }
    }

    /// Create a service backed by the placeholder capturer and analyzer.
    pub fn placeholder(config: AssistantConfig) -> Self {
        Self::new(
            config,
            Arc::new(PlaceholderCapturer),
            Arc::new(PlaceholderAnalyzer),
        )
    }

    /// Current status snapshot.
    pub fn status(&self) -> StatusSnapshot {
        self.status.clone()
    }

    /// Capture the screen.
    pub async fn capture(&self) -> Result<CaptureResult, CaptureError> {
        debug!(capturer = self.capturer.name(), "Capturing screen content");
        let data = self.capturer.capture().await?;
        Ok(CaptureResult {
            timestamp: self.clock.now(),
            data,
            kind: CaptureKind::Screenshot,
        })
    }

    /// Analyze `input`, or a fresh capture when `input` is `None`.
    pub async fn analyze(&self, input: Option<Value>) -> Result<AnalysisResult, AnalysisError> {
        let input = match input {
            Some(value) => AnalysisInput::Provided(value),
            None => {
                debug!("No analysis input supplied, capturing screen");
                AnalysisInput::Capture(self.capture().await?)
            }
        };

        debug!(analyzer = self.analyzer.name(), "Analyzing input");
        let analysis = self.analyzer.analyze(&input).await?;
        self.finish(analysis)
    }

    fn finish(&self, analysis: Analysis) -> Result<AnalysisResult, AnalysisError> {
        if analysis.alternatives.is_empty() {
            return Err(AnalysisError::Failed(format!(
                "analyzer {} returned no alternatives",
                self.analyzer.name()
            )));
        }

        let confidence = clamp_confidence(analysis.confidence);
        if confidence != analysis.confidence {
            warn!(
                reported = analysis.confidence,
                clamped = confidence,
                "Analyzer confidence out of range"
            );
        }

        Ok(AnalysisResult {
            solution: analysis.solution,
            confidence,
            alternatives: analysis.alternatives,
            timestamp: self.clock.now(),
        })
    }
}

/// Clamp into `[0, 1]`; NaN becomes 0.
fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
