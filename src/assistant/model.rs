//! Assistant data model: status snapshot, capture and analysis results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reported liveness of the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SystemStatus {
    Online,
    Offline,
}

impl SystemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::Offline => "OFFLINE",
        }
    }
}

/// Point-in-time record of service liveness and version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(rename = "SYSTEM_ACTIVE")]
    pub active: bool,
    #[serde(rename = "INTERFACE_VERSION")]
    pub interface_version: String,
    #[serde(rename = "STATUS")]
    pub status: SystemStatus,
}

/// What a capture contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureKind {
    Screenshot,
}

/// A captured screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureResult {
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    /// Opaque capture payload.
    pub data: serde_json::Value,
    #[serde(rename = "type")]
    pub kind: CaptureKind,
}

/// A generated solution plus alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub solution: String,
    /// Always within `[0, 1]`.
    pub confidence: f64,
    /// Never empty.
    pub alternatives: Vec<String>,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalyzeRequest {
    /// `null` and a missing field both mean "no input".
    #[serde(default)]
    pub input: Option<serde_json::Value>,
}

/// What an analyzer is asked to look at.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisInput {
    /// Input supplied by the caller.
    Provided(serde_json::Value),
    /// A capture taken because the caller supplied nothing.
    Capture(CaptureResult),
}

impl AnalysisInput {
    /// The payload to analyze.
    pub fn payload(&self) -> &serde_json::Value {
        match self {
            Self::Provided(value) => value,
            Self::Capture(capture) => &capture.data,
        }
    }
}

/// ISO 8601 with millisecond precision and a `Z` suffix.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
