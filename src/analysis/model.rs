use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::analyzer::AnalyzerError;
use crate::error::{AppError, AppResult};

/// Nutrition estimate returned by an analyzer. Consumed once to log a food entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzedFood {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub portion: String,
    pub confidence: f64,
}

impl AnalyzedFood {
    pub fn grilled_salmon() -> Self {
        Self {
            name: "Grilled salmon with vegetables".into(),
            calories: 385.0,
            protein: 28.0,
            carbs: 12.0,
            fat: 24.0,
            portion: "1 serving (250g)".into(),
            confidence: 0.89,
        }
    }

    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }

    /// Checks the payload against the wire contract.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.name.trim().is_empty() {
            return Err(AnalyzerError::InvalidPayload("name is empty".into()));
        }
        for (field, value) in [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(AnalyzerError::InvalidPayload(format!(
                    "{field} must be a non-negative number, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(AnalyzerError::InvalidPayload(format!(
                "confidence must be within [0, 1], got {}",
                self.confidence
            )));
        }
        Ok(())
    }
}

/// A photo picked for analysis.
#[derive(Clone)]
pub struct ImageUpload {
    pub body: Bytes,
    pub content_type: String,
    pub file_name: Option<String>,
}

impl ImageUpload {
    pub fn new(body: Bytes, content_type: &str, file_name: Option<String>) -> AppResult<Self> {
        if body.is_empty() {
            return Err(AppError::Validation("no image provided".into()));
        }
        if !content_type.starts_with("image/") {
            return Err(AppError::Validation(format!(
                "expected an image, got '{content_type}'"
            )));
        }
        Ok(Self {
            body,
            content_type: content_type.to_string(),
            file_name,
        })
    }

    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            size_bytes: self.body.len(),
            extension: ext_from_mime(&self.content_type),
        }
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("content_type", &self.content_type)
            .field("file_name", &self.file_name)
            .field("size_bytes", &self.body.len())
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageInfo {
    pub file_name: Option<String>,
    pub content_type: String,
    pub size_bytes: usize,
    pub extension: Option<&'static str>,
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

/// Per-session credential for the analysis service. Never stored, never printed.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}
