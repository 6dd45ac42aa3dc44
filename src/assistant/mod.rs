//! Assistant service — status, screen capture and analysis behind
//! pluggable backends.
//!
//! The shipped backends are placeholders that return fixed data. A real
//! screen capturer or model-backed analyzer plugs in through
//! [`ScreenCapturer`] and [`Analyzer`] without changing callers.

pub mod backend;
pub mod clock;
pub mod model;
pub mod service;

pub use backend::{Analysis, Analyzer, PlaceholderAnalyzer, PlaceholderCapturer, ScreenCapturer};
pub use clock::MonotonicClock;
pub use model::{
    AnalysisInput, AnalysisResult, AnalyzeRequest, CaptureKind, CaptureResult, StatusSnapshot,
    SystemStatus,
};
pub use service::AssistantService;
