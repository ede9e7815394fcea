//! Dimension Scorer: 0-100 risk score per RPS dimension
//!
//! score = 50 + 8·high + 4·medium − 5·low, clamped to [0, 100]

use std::collections::BTreeMap;

use crate::core::lexicon::{dimension_lexicon, find_keywords, normalize};
use crate::error::Result;
use crate::types::{DimensionScore, RpsDimension};
use crate::{
    DIMENSION_ALERT_HIGH, DIMENSION_ALERT_MONITOR, DIMENSION_BASELINE,
    DIMENSION_WEIGHT_HIGH, DIMENSION_WEIGHT_LOW, DIMENSION_WEIGHT_MEDIUM,
};

/// Keyword scorer for the six RPS dimensions
#[derive(Debug, Default, Clone, Copy)]
pub struct DimensionScorer;

impl DimensionScorer {
    /// Create new scorer
    pub fn new() -> Self {
        Self
    }

    /// Score one dimension
    pub fn score(&self, text: &str, dimension: RpsDimension) -> DimensionScore {
        self.score_normalized(&normalize(text), dimension)
    }

    /// Score one dimension by its key; unknown keys are an error
    pub fn score_by_key(&self, text: &str, key: &str) -> Result<DimensionScore> {
        let dimension = key.parse::<RpsDimension>()?;
        Ok(self.score(text, dimension))
    }

    /// Score all six dimensions
    pub fn score_all(&self, text: &str) -> BTreeMap<RpsDimension, DimensionScore> {
        let normalized = normalize(text);
        RpsDimension::ALL
            .into_iter()
            .map(|d| (d, self.score_normalized(&normalized, d)))
            .collect()
    }

    fn score_normalized(&self, normalized: &str, dimension: RpsDimension) -> DimensionScore {
        let lexicon = dimension_lexicon(dimension);

        let high = find_keywords(normalized, lexicon.high);
        let medium = find_keywords(normalized, lexicon.medium);
        let low = find_keywords(normalized, lexicon.low);

        let raw = DIMENSION_BASELINE
            + high.len() as i32 * DIMENSION_WEIGHT_HIGH
            + medium.len() as i32 * DIMENSION_WEIGHT_MEDIUM
            - low.len() as i32 * DIMENSION_WEIGHT_LOW;
        let score = raw.clamp(0, 100) as u8;

        let matched_keywords = high
            .into_iter()
            .chain(medium)
            .chain(low)
            .map(str::to_string)
            .collect();

        DimensionScore {
            score,
            matched_keywords,
            alerts: alerts_for(dimension, score),
        }
    }
}

fn alerts_for(dimension: RpsDimension, score: u8) -> Vec<String> {
    if score >= DIMENSION_ALERT_HIGH {
        vec![format!("Risque élevé sur la dimension {}", dimension.label())]
    } else if score >= DIMENSION_ALERT_MONITOR {
        vec![format!("Dimension {} à surveiller", dimension.label())]
    } else {
        Vec::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
