use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use greenloop_core::AnalysisId;

/// Maximum length of [`Recommendation::title`], in characters.
pub const TITLE_MAX_CHARS: usize = 80;
/// Maximum length of [`Recommendation::description`], in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 250;
/// Maximum length of [`Recommendation::icon`], in characters.
pub const ICON_MAX_CHARS: usize = 8;

/// Number of recommendations requested from the provider and produced by the
/// heuristic.
pub const RECOMMENDATION_COUNT: usize = 3;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Case-insensitive parse; anything unknown is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// A single prioritized, human-readable suggested action.
///
/// Instances leaving this crate are always normalized: the priority is one of
/// the three literals and the text fields respect the length caps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub icon: String,
}

impl Recommendation {
    /// Build a recommendation, truncating every text field to its cap.
    pub fn new(
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            priority,
            title: truncate_chars(title.into(), TITLE_MAX_CHARS),
            description: truncate_chars(description.into(), DESCRIPTION_MAX_CHARS),
            icon: truncate_chars(icon.into(), ICON_MAX_CHARS),
        }
    }
}

pub(crate) fn truncate_chars(mut s: String, max: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
    s
}

/// Persisted snapshot of one analysis.
///
/// This is an insight, not an asset mutation: it is appended to the history
/// and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: AnalysisId,
    pub created_at: DateTime<Utc>,
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisRecord {
    /// Mint a record with a fresh id and the current time.
    pub fn new(recommendations: Vec<Recommendation>) -> Self {
        Self {
            id: AnalysisId::next(),
            created_at: Utc::now(),
            recommendations,
        }
    }
}

/// Failure of the completion collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("provider unreachable: {0}")]
    Unavailable(String),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider did not answer within {0:?}")]
    Timeout(std::time::Duration),

    #[error("provider response could not be read: {0}")]
    InvalidResponse(String),
}

/// The provider answered, but nothing usable could be parsed out of it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no JSON array found in response")]
    NoJsonArray,

    #[error("malformed JSON after repair: {0}")]
    Malformed(String),

    #[error("unexpected JSON shape: {0}")]
    UnexpectedShape(String),
}

/// Why the AI path was abandoned in favour of the heuristic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationFailure {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
