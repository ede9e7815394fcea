//! Pattern Detector: named behavioral patterns from computed scores

use std::collections::BTreeMap;

use crate::types::{DimensionScore, Pattern, RpsAnalysisResult, RpsDimension};
use crate::{
    DIMENSION_BASELINE, PATTERN_AUTONOMY_DEFICIT, PATTERN_BURNOUT_SCORE,
    PATTERN_DEMOTIVATION_INDEX, PATTERN_ISOLATION_SOCIAL, PATTERN_MEANING_VALUES,
    PATTERN_OVERLOAD_INTENSITY,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct PatternDetector;

impl PatternDetector {
    pub fn new() -> Self {
        Self
    }

    /// Patterns for a populated analysis
    pub fn detect(&self, analysis: &RpsAnalysisResult) -> Vec<Pattern> {
        self.detect_from_scores(
            &analysis.dimensions,
            analysis.burnout_risk_score,
            analysis.motivation_index,
        )
    }

    /// Same rules over raw scores. Each rule is independent; the output
    /// follows rule order and holds no duplicates.
    pub fn detect_from_scores(
        &self,
        dimensions: &BTreeMap<RpsDimension, DimensionScore>,
        burnout_risk_score: u8,
        motivation_index: u8,
    ) -> Vec<Pattern> {
        let score = |d: RpsDimension| {
            dimensions
                .get(&d)
                .map(|s| s.score)
                .unwrap_or(DIMENSION_BASELINE as u8)
        };

        Pattern::ALL
            .into_iter()
            .filter(|pattern| match pattern {
                Pattern::ChronicOverload => {
                    score(RpsDimension::IntensityWork) >= PATTERN_OVERLOAD_INTENSITY
                }
                Pattern::SocialIsolation => {
                    score(RpsDimension::SocialRelations) >= PATTERN_ISOLATION_SOCIAL
                }
                Pattern::LossOfMeaning => {
                    score(RpsDimension::ValueConflicts) >= PATTERN_MEANING_VALUES
                }
                Pattern::ElevatedBurnoutRisk => burnout_risk_score >= PATTERN_BURNOUT_SCORE,
                Pattern::DeepDemotivation => motivation_index < PATTERN_DEMOTIVATION_INDEX,
                Pattern::AutonomyDeficit => {
                    score(RpsDimension::Autonomy) >= PATTERN_AUTONOMY_DEFICIT
                }
            })
            .collect()
    }
}
