//! The safety-signal data model.
//!
//! A [`SignalReport`] is the detector's verdict on one utterance; a
//! [`SignalRecord`] is that verdict stamped with the time it was logged.
//! Records are immutable once written to the event log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Three-way sentiment polarity of an utterance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

/// Detector output for a single utterance. Pure value, no timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    pub sentiment: Sentiment,
    pub confusion: bool,
    pub emergency: bool,
    /// Lexicon phrases that triggered the confusion flag.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub confusion_phrases: Vec<String>,
    /// Lexicon phrases that triggered the emergency flag.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emergency_phrases: Vec<String>,
    /// Raw polarity in [-1.0, 1.0], derived from the keyword counts.
    #[serde(default)]
    pub score: f32,
}

/// One entry of the event log: a report plus the moment it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub report: SignalReport,
}

impl SignalRecord {
    pub fn now(report: SignalReport) -> Self {
        Self {
            timestamp: Utc::now(),
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            r#""positive""#
        );
        assert_eq!(
            serde_json::to_string(&Sentiment::Neutral).unwrap(),
            r#""neutral""#
        );
    }

    #[test]
    fn test_record_flattens_report_fields() {
        let record = SignalRecord::now(SignalReport {
            sentiment: Sentiment::Negative,
            confusion: true,
            emergency: false,
            confusion_phrases: vec!["forgot".to_string()],
            emergency_phrases: vec![],
            score: -0.25,
        });
        let json = serde_json::to_value(&record).unwrap();
        // Report fields sit at the top level next to the timestamp
        assert_eq!(json["sentiment"], "negative");
        assert_eq!(json["confusion"], true);
        assert_eq!(json["emergency"], false);
        assert!(json["timestamp"].is_string());
        // Empty phrase lists are omitted entirely
        assert!(json.get("emergency_phrases").is_none());
    }

    #[test]
    fn test_record_roundtrip_preserves_phrases() {
        let record = SignalRecord::now(SignalReport {
            emergency: true,
            emergency_phrases: vec!["help".to_string()],
            ..Default::default()
        });
        let json = serde_json::to_string(&record).unwrap();
        let back: SignalRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_minimal_document_deserializes() {
        // The original log format carried only these four fields
        let json = r#"{
            "timestamp": "2024-03-01T09:30:00Z",
            "sentiment": "neutral",
            "confusion": false,
            "emergency": false
        }"#;
        let record: SignalRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.report.sentiment, Sentiment::Neutral);
        assert!(record.report.confusion_phrases.is_empty());
        assert_eq!(record.report.score, 0.0);
    }
}
