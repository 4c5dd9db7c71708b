//! Wire types for the CreativeFuse backend.
//!
//! `POST /generate` takes a [`GenerateRequest`] and answers [`IdeaResponse`];
//! `POST /boost` takes a [`BoostRequest`] and answers [`BoostResponse`].
//! Failures carry an [`ErrorBody`] with a `detail` message.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tone requested for a generated idea
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Creative,
    Professional,
    Playful,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Creative => "creative",
            Style::Professional => "professional",
            Style::Playful => "playful",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "creative" => Ok(Style::Creative),
            "professional" => Ok(Style::Professional),
            "playful" => Ok(Style::Playful),
            other => Err(Error::Validation(format!(
                "unknown style '{}' (expected creative, professional or playful)",
                other
            ))),
        }
    }
}

/// Body of `POST /generate`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub domain: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub style: Style,
}

impl GenerateRequest {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }

    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Presence check only; the backend does the rest.
    pub fn validate(&self) -> Result<()> {
        require("domain", &self.domain)
    }
}

/// Body of `POST /boost`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostRequest {
    pub idea: String,
}

impl BoostRequest {
    pub fn new(idea: impl Into<String>) -> Self {
        Self { idea: idea.into() }
    }

    pub fn validate(&self) -> Result<()> {
        require("idea", &self.idea)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaResponse {
    pub idea: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostResponse {
    pub boosted_idea: String,
}

/// Welcome payload served at `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Error payload of any non-2xx response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::Validation(format!("{} must not be empty", field)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_serializes_lowercase_style() {
        let req = GenerateRequest::new("healthcare").keywords("AI").style(Style::Playful);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "domain": "healthcare", "keywords": "AI", "style": "playful" })
        );
    }

    #[test]
    fn generate_request_defaults_match_backend() {
        let req: GenerateRequest = serde_json::from_str(r#"{"domain":"x"}"#).unwrap();
        assert_eq!(req.keywords, "");
        assert_eq!(req.style, Style::Creative);
    }

    #[test]
    fn blank_fields_fail_validation() {
        assert!(BoostRequest::new("   ").validate().unwrap_err().is_validation());
        assert!(GenerateRequest::new("").validate().is_err());
        assert!(BoostRequest::new("an app").validate().is_ok());
    }

    #[test]
    fn style_parses_case_insensitively() {
        assert_eq!("Professional".parse::<Style>().unwrap(), Style::Professional);
        assert!("loud".parse::<Style>().is_err());
    }

    #[test]
    fn error_body_tolerates_missing_detail() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.detail, None);
    }
}
