//! Narration configuration

use serde::{Deserialize, Serialize};

use crate::error::KvasaError;

pub const DEFAULT_LANG: &str = "ko-KR";

/// Ranges accepted by `SpeechSynthesisUtterance`
pub const RATE_RANGE: std::ops::RangeInclusive<f32> = 0.1..=10.0;
pub const PITCH_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;
pub const VOLUME_RANGE: std::ops::RangeInclusive<f32> = 0.0..=1.0;

/// Language, voice and prosody for each utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// BCP 47 language tag
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    /// Preferred voice name; the service default is used when absent or not installed
    pub voice: Option<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG.to_string(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
            voice: None,
        }
    }
}

impl SpeechConfig {
    /// Parse from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, KvasaError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| KvasaError::Deserialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), KvasaError> {
        check("rate", self.rate, &RATE_RANGE)?;
        check("pitch", self.pitch, &PITCH_RANGE)?;
        check("volume", self.volume, &VOLUME_RANGE)?;
        Ok(())
    }
}

fn check(
    field: &'static str,
    value: f32,
    range: &std::ops::RangeInclusive<f32>,
) -> Result<(), KvasaError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(KvasaError::InvalidConfig { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SpeechConfig::default();
        assert_eq!(config.lang, "ko-KR");
        assert_eq!(config.rate, 1.0);
        assert!(config.voice.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SpeechConfig::from_json(r#"{"rate": 0.8, "voice": "Yuna"}"#).unwrap();
        assert_eq!(config.rate, 0.8);
        assert_eq!(config.voice.as_deref(), Some("Yuna"));
        assert_eq!(config.lang, "ko-KR");
        assert_eq!(config.volume, 1.0);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = SpeechConfig::from_json(r#"{"volume": 1.5}"#).unwrap_err();
        assert!(matches!(err, KvasaError::InvalidConfig { field: "volume", .. }));

        let err = SpeechConfig::from_json(r#"{"rate": 0.0}"#).unwrap_err();
        assert!(matches!(err, KvasaError::InvalidConfig { field: "rate", .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = SpeechConfig::from_json("{rate:").unwrap_err();
        assert!(matches!(err, KvasaError::Deserialization(_)));
    }
}
