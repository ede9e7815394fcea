//! Burnout / Motivation Calculator
//!
//! Burnout: three Maslach-style sub-scores, each capped before summing.
//! Motivation: 50 + 8·positive − 10·negative, clamped.
//! Both depend on the text only.

use crate::core::lexicon::{
    count_keywords, normalize, DEPERSONALIZATION, EMOTIONAL_EXHAUSTION, MOTIVATION_NEGATIVE,
    MOTIVATION_POSITIVE, REDUCED_ACCOMPLISHMENT,
};
use crate::types::BurnoutBreakdown;
use crate::{
    BURNOUT_CAP_ACCOMPLISHMENT, BURNOUT_CAP_DEPERSONALIZATION, BURNOUT_CAP_EXHAUSTION,
    BURNOUT_WEIGHT_ACCOMPLISHMENT, BURNOUT_WEIGHT_DEPERSONALIZATION, BURNOUT_WEIGHT_EXHAUSTION,
    MOTIVATION_BASELINE, MOTIVATION_WEIGHT_NEGATIVE, MOTIVATION_WEIGHT_POSITIVE,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct BurnoutCalculator;

impl BurnoutCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Capped sub-scores for the text
    pub fn breakdown(&self, text: &str) -> BurnoutBreakdown {
        let normalized = normalize(text);
        BurnoutBreakdown {
            emotional_exhaustion: capped(
                count_keywords(&normalized, EMOTIONAL_EXHAUSTION),
                BURNOUT_WEIGHT_EXHAUSTION,
                BURNOUT_CAP_EXHAUSTION,
            ),
            depersonalization: capped(
                count_keywords(&normalized, DEPERSONALIZATION),
                BURNOUT_WEIGHT_DEPERSONALIZATION,
                BURNOUT_CAP_DEPERSONALIZATION,
            ),
            reduced_accomplishment: capped(
                count_keywords(&normalized, REDUCED_ACCOMPLISHMENT),
                BURNOUT_WEIGHT_ACCOMPLISHMENT,
                BURNOUT_CAP_ACCOMPLISHMENT,
            ),
        }
    }

    /// Burnout risk score, 0-100
    pub fn burnout_score(&self, text: &str) -> u8 {
        self.breakdown(text).total()
    }

    /// Motivation index, 0-100
    pub fn motivation_index(&self, text: &str) -> u8 {
        let normalized = normalize(text);
        let positive = count_keywords(&normalized, MOTIVATION_POSITIVE) as i32;
        let negative = count_keywords(&normalized, MOTIVATION_NEGATIVE) as i32;
        let raw = MOTIVATION_BASELINE + positive * MOTIVATION_WEIGHT_POSITIVE
            - negative * MOTIVATION_WEIGHT_NEGATIVE;
        raw.clamp(0, 100) as u8
    }
}

fn capped(hits: usize, weight: u8, cap: u8) -> u8 {
    (hits.saturating_mul(weight as usize)).min(cap as usize) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let calc = BurnoutCalculator::new();
        assert_eq!(calc.burnout_score(""), 0);
        assert_eq!(calc.motivation_index(""), 50);
    }

    #[test]
    fn test_exhaustion_under_cap() {
        let calc = BurnoutCalculator::new();
        let text = "épuisé, je suis vidé, à bout, plus d'énergie, exténué, lessivé";
        let b = calc.breakdown(text);
        assert_eq!(b.emotional_exhaustion, 24);
        assert_eq!(b.depersonalization, 0);
        assert_eq!(b.reduced_accomplishment, 0);
    }

    #[test]
    fn test_depersonalization_is_capped_before_summing() {
        let calc = BurnoutCalculator::new();
        let text = "je m'en fiche, indifférent, cynique, détaché, blasé, robot, je m'en moque";
        let b = calc.breakdown(text);
        assert_eq!(b.depersonalization, 30);
        assert_eq!(b.total(), 30);
    }

    #[test]
    fn test_all_caps_sum_to_hundred() {
        let calc = BurnoutCalculator::new();
        let text = "épuisé je suis vidé à bout plus d'énergie fatigué exténué crevé lessivé je n'en peux plus à plat \
                    je m'en fiche indifférent cynique détaché robot blasé \
                    inefficace je suis nul échec rien ne marche incompétent je n'avance pas";
        assert_eq!(calc.burnout_score(text), 100);
    }

    #[test]
    fn test_motivation_two_positive_one_negative() {
        let calc = BurnoutCalculator::new();
        let text = "Je suis motivé et passionné, même si le reporting est une corvée";
        assert_eq!(calc.motivation_index(text), 56);
    }

    #[test]
    fn test_motivation_clamps_at_zero() {
        let calc = BurnoutCalculator::new();
        let text = "démotivé, aucune motivation, ennui, lassé, désintérêt, corvée";
        assert_eq!(calc.motivation_index(text), 0);
    }
}
