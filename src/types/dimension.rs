//! The six RPS dimensions and their per-dimension score

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EngineError;

/// Fixed psychosocial risk axes (Gollac framework)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpsDimension {
    /// Workload, pace, deadlines
    IntensityWork,
    /// Hiding emotions, facing distress or aggression
    EmotionalDemands,
    /// Room for decision and skill use
    Autonomy,
    /// Support, recognition, conflicts with colleagues and management
    SocialRelations,
    /// Ethical conflicts, work one cannot be proud of
    ValueConflicts,
    /// Fear of losing the job, restructuring
    JobInsecurity,
}

impl RpsDimension {
    /// All six, in catalog order
    pub const ALL: [RpsDimension; 6] = [
        RpsDimension::IntensityWork,
        RpsDimension::EmotionalDemands,
        RpsDimension::Autonomy,
        RpsDimension::SocialRelations,
        RpsDimension::ValueConflicts,
        RpsDimension::JobInsecurity,
    ];

    /// Stable key used in catalogs, JSON and trigger expressions
    pub fn key(&self) -> &'static str {
        match self {
            RpsDimension::IntensityWork => "intensity_work",
            RpsDimension::EmotionalDemands => "emotional_demands",
            RpsDimension::Autonomy => "autonomy",
            RpsDimension::SocialRelations => "social_relations",
            RpsDimension::ValueConflicts => "value_conflicts",
            RpsDimension::JobInsecurity => "job_insecurity",
        }
    }

    /// Human-readable label, as shown to end users
    pub fn label(&self) -> &'static str {
        match self {
            RpsDimension::IntensityWork => "intensité du travail",
            RpsDimension::EmotionalDemands => "exigences émotionnelles",
            RpsDimension::Autonomy => "autonomie",
            RpsDimension::SocialRelations => "rapports sociaux",
            RpsDimension::ValueConflicts => "conflits de valeurs",
            RpsDimension::JobInsecurity => "insécurité de l'emploi",
        }
    }
}

impl FromStr for RpsDimension {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RpsDimension::ALL
            .into_iter()
            .find(|d| d.key() == s.trim())
            .ok_or_else(|| EngineError::InvalidDimension(s.to_string()))
    }
}

impl std::fmt::Display for RpsDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Score for one dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    /// 0-100, higher = more risk
    pub score: u8,
    /// Keywords that moved the score, in detection order
    pub matched_keywords: Vec<String>,
    /// Threshold alerts
    pub alerts: Vec<String>,
}

impl DimensionScore {
    /// Score with no keyword hit
    pub fn neutral() -> Self {
        Self {
            score: crate::DIMENSION_BASELINE as u8,
            matched_keywords: Vec::new(),
            alerts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for dim in RpsDimension::ALL {
            assert_eq!(dim.key().parse::<RpsDimension>().unwrap(), dim);
        }
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = "sleep_quality".parse::<RpsDimension>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidDimension(ref k) if k == "sleep_quality"));
    }

    #[test]
    fn test_serializes_as_snake_case_key() {
        let json = serde_json::to_string(&RpsDimension::JobInsecurity).unwrap();
        assert_eq!(json, "\"job_insecurity\"");
    }
}
