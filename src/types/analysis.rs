//! RPS analysis input and result records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{
    BURNOUT_CAP_ACCOMPLISHMENT, BURNOUT_CAP_DEPERSONALIZATION, BURNOUT_CAP_EXHAUSTION,
};
use crate::types::{
    DimensionScore, InterventionProtocol, Pattern, RedFlag, RiskLevel, RpsDimension,
};

/// Optional numeric self-report, each value conventionally 0-10
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SelfReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isolation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatigue: Option<f64>,
}

impl SelfReport {
    /// Copy with every present value clamped to 0-10 (NaN dropped)
    pub fn clamped(&self) -> Self {
        let clamp = |v: Option<f64>| {
            v.filter(|x| !x.is_nan())
                .map(|x| x.clamp(0.0, crate::SIGNAL_MAX))
        };
        Self {
            energy: clamp(self.energy),
            stress: clamp(self.stress),
            isolation: clamp(self.isolation),
            fatigue: clamp(self.fatigue),
        }
    }
}

/// One analysis call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub text: String,
    #[serde(default)]
    pub scores: Option<SelfReport>,
    /// Opaque, passed through to storage
    #[serde(default)]
    pub user_id: Option<String>,
    /// Opaque, passed through to storage
    #[serde(default)]
    pub session_id: Option<String>,
}

impl AnalysisInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_scores(mut self, scores: SelfReport) -> Self {
        self.scores = Some(scores);
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// The three Maslach-style sub-scores, each already capped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnoutBreakdown {
    /// 0-40
    pub emotional_exhaustion: u8,
    /// 0-30
    pub depersonalization: u8,
    /// 0-30
    pub reduced_accomplishment: u8,
}

impl BurnoutBreakdown {
    /// Final burnout score, 0-100. Each part is re-capped before summing.
    pub fn total(&self) -> u8 {
        self.emotional_exhaustion.min(BURNOUT_CAP_EXHAUSTION)
            + self.depersonalization.min(BURNOUT_CAP_DEPERSONALIZATION)
            + self.reduced_accomplishment.min(BURNOUT_CAP_ACCOMPLISHMENT)
    }
}

/// Full RPS analysis of one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpsAnalysisResult {
    pub global_risk_level: RiskLevel,
    /// All six dimensions, always present
    pub dimensions: BTreeMap<RpsDimension, DimensionScore>,
    pub burnout_risk_score: u8,
    pub burnout_breakdown: BurnoutBreakdown,
    pub motivation_index: u8,
    /// Rule-evaluation order, no duplicates
    pub detected_patterns: Vec<Pattern>,
    /// Priority-ordered, most urgent first
    pub recommended_actions: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

impl RpsAnalysisResult {
    /// Score of one dimension (50 if somehow absent)
    pub fn dimension_score(&self, dimension: RpsDimension) -> u8 {
        self.dimensions
            .get(&dimension)
            .map(|d| d.score)
            .unwrap_or(crate::DIMENSION_BASELINE as u8)
    }

    /// Mean of the six dimension scores
    pub fn mean_dimension_score(&self) -> f64 {
        mean_score(&self.dimensions)
    }

    pub fn has_pattern(&self, pattern: Pattern) -> bool {
        self.detected_patterns.contains(&pattern)
    }
}

/// Mean of the dimension scores, over all six
pub fn mean_score(dimensions: &BTreeMap<RpsDimension, DimensionScore>) -> f64 {
    let total: u32 = RpsDimension::ALL
        .iter()
        .map(|d| {
            dimensions
                .get(d)
                .map(|s| s.score as u32)
                .unwrap_or(crate::DIMENSION_BASELINE as u32)
        })
        .sum();
    total as f64 / RpsDimension::ALL.len() as f64
}

/// What the engine hands to storage, alerting and reply collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpsReport {
    pub analysis: RpsAnalysisResult,
    /// The single most urgent matching protocol
    pub protocol: Option<InterventionProtocol>,
    /// Non-empty means the safety message is mandatory downstream
    pub red_flags: Vec<RedFlag>,
}

impl RpsReport {
    pub fn requires_safety_message(&self) -> bool {
        !self.red_flags.is_empty()
    }
}
