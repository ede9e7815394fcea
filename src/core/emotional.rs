//! Emotional Analysis Aggregator
//!
//! Lightweight conversational path, separate from the six-dimension RPS
//! scorer: keyword signals on a 0-10 scale, role inference, risk level,
//! tone. Red flags override risk and dominant emotion.

use crate::core::lexicon::{
    count_keywords, normalize, ANGER, EMPLOYEE_CONTEXT, ENERGY_POSITIVE, FATIGUE, ISOLATION,
    LOSS_OF_MEANING, PARENT_CONTEXT, STRESS, TEEN_CONTEXT,
};
use crate::core::safety::SafetyClassifier;
use crate::types::{
    Emotion, EmotionScores, EmotionalAnalysis, RiskBand, RiskLevel, Role, SelfReport, Signal,
    Tone,
};
use crate::{
    COMBINED_CRITICAL, COMBINED_HIGH, COMBINED_MODERATE, COMBINED_SOFT_MAX, ENERGY_DEFAULT,
    ENERGY_STEP, SIGNAL_MAX, SIGNAL_THRESHOLD, SIGNAL_WEIGHT,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct EmotionalAnalyzer {
    safety: SafetyClassifier,
}

/// Keyword hit counts for one text
struct Hits {
    stress: usize,
    fatigue: usize,
    isolation: usize,
    anger: usize,
    loss_of_meaning: usize,
    positive: usize,
}

impl EmotionalAnalyzer {
    pub fn new() -> Self {
        Self {
            safety: SafetyClassifier::new(),
        }
    }

    /// Analyze one utterance, optionally combined with a self-report
    pub fn analyze_input(&self, text: &str, scores: Option<&SelfReport>) -> EmotionalAnalysis {
        let normalized = normalize(text);
        let report = scores.map(SelfReport::clamped).unwrap_or_default();

        let hits = Hits {
            stress: count_keywords(&normalized, STRESS),
            fatigue: count_keywords(&normalized, FATIGUE),
            isolation: count_keywords(&normalized, ISOLATION),
            anger: count_keywords(&normalized, ANGER),
            loss_of_meaning: count_keywords(&normalized, LOSS_OF_MEANING),
            positive: count_keywords(&normalized, ENERGY_POSITIVE),
        };

        let scores = EmotionScores {
            stress: signal_score(hits.stress, report.stress),
            fatigue: signal_score(hits.fatigue, report.fatigue),
            isolation: signal_score(hits.isolation, report.isolation),
            energy: (report.energy.unwrap_or(ENERGY_DEFAULT)
                + hits.positive as f64 * ENERGY_STEP
                - hits.fatigue as f64 * ENERGY_STEP)
                .clamp(0.0, SIGNAL_MAX),
        };

        let red_flags: Vec<String> = self
            .safety
            .scan(text)
            .into_iter()
            .map(|flag| flag.phrase)
            .collect();

        let detected_signals = detect_signals(&scores, &hits);
        let combined = scores.combined_stress();

        let risk_level = if !red_flags.is_empty() {
            RiskLevel::Critical
        } else {
            risk_from_combined(combined)
        };

        let dominant_emotion = if !red_flags.is_empty() {
            Emotion::Distress
        } else if let Some(first) = detected_signals.first() {
            Emotion::from(*first)
        } else if scores.stress > 0.0 {
            Emotion::Stress
        } else {
            Emotion::Calm
        };

        let tone = if risk_level.is_severe() {
            Tone::Reassuring
        } else if combined <= COMBINED_SOFT_MAX {
            Tone::Soft
        } else {
            Tone::Energizing
        };

        EmotionalAnalysis {
            role: infer_role(&normalized),
            dominant_emotion,
            detected_signals,
            red_flags,
            risk_level,
            burnout_risk: burnout_band(&scores),
            dropout_risk: dropout_band(&scores, hits.loss_of_meaning > 0),
            tone,
            scores,
        }
    }
}

/// Keyword score and self-report combine by taking the larger
fn signal_score(hits: usize, reported: Option<f64>) -> f64 {
    let from_text = (hits as f64 * SIGNAL_WEIGHT).min(SIGNAL_MAX);
    from_text.max(reported.unwrap_or(0.0))
}

/// teen > parent > employee > unknown
fn infer_role(normalized: &str) -> Role {
    if count_keywords(normalized, TEEN_CONTEXT) > 0 {
        Role::Teen
    } else if count_keywords(normalized, PARENT_CONTEXT) > 0 {
        Role::Parent
    } else if count_keywords(normalized, EMPLOYEE_CONTEXT) > 0 {
        Role::Employee
    } else {
        Role::Unknown
    }
}

fn detect_signals(scores: &EmotionScores, hits: &Hits) -> Vec<Signal> {
    let mut signals = Vec::new();
    if scores.stress >= SIGNAL_THRESHOLD {
        signals.push(Signal::Stress);
    }
    if scores.fatigue >= SIGNAL_THRESHOLD {
        signals.push(Signal::Fatigue);
    }
    if scores.isolation >= SIGNAL_THRESHOLD {
        signals.push(Signal::Isolation);
    }
    if hits.anger > 0 {
        signals.push(Signal::Anger);
    }
    if hits.loss_of_meaning > 0 {
        signals.push(Signal::LossOfMeaning);
    }
    signals
}

fn risk_from_combined(combined: f64) -> RiskLevel {
    if combined >= COMBINED_CRITICAL {
        RiskLevel::Critical
    } else if combined >= COMBINED_HIGH {
        RiskLevel::High
    } else if combined >= COMBINED_MODERATE {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

fn burnout_band(scores: &EmotionScores) -> RiskBand {
    let load = (scores.stress + scores.fatigue) / 2.0;
    if load >= 7.0 {
        RiskBand::High
    } else if load >= 4.0 {
        RiskBand::Moderate
    } else {
        RiskBand::Low
    }
}

fn dropout_band(scores: &EmotionScores, loss_of_meaning: bool) -> RiskBand {
    let drained = scores.energy <= 3.0;
    if scores.isolation >= 7.0 || (loss_of_meaning && drained) {
        RiskBand::High
    } else if scores.isolation >= 4.0 || loss_of_meaning || drained {
        RiskBand::Moderate
    } else {
        RiskBand::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_calm_input() {
        let analyzer = EmotionalAnalyzer::new();
        let a = analyzer.analyze_input("Bonjour, tout roule aujourd'hui", None);
        assert_eq!(a.dominant_emotion, Emotion::Calm);
        assert_eq!(a.risk_level, RiskLevel::Low);
        assert_eq!(a.tone, Tone::Soft);
        assert_eq!(a.role, Role::Unknown);
        assert!(a.detected_signals.is_empty());
        assert_eq!(a.scores.energy, 5.0);
    }

    #[test]
    fn test_red_flag_forces_critical_distress() {
        let analyzer = EmotionalAnalyzer::new();
        let a = analyzer.analyze_input("Je suis en forme mais je vais en finir", None);
        assert_eq!(a.red_flags, vec!["je vais en finir".to_string()]);
        assert_eq!(a.risk_level, RiskLevel::Critical);
        assert_eq!(a.dominant_emotion, Emotion::Distress);
        assert_eq!(a.tone, Tone::Reassuring);
    }

    #[test]
    fn test_role_priority() {
        let analyzer = EmotionalAnalyzer::new();
        let teen = analyzer.analyze_input("Au lycée mes parents me mettent la pression pour le travail", None);
        assert_eq!(teen.role, Role::Teen);
        let parent = analyzer.analyze_input("Mon fils ne dort plus, et moi le boulot m'épuise", None);
        assert_eq!(parent.role, Role::Parent);
        let employee = analyzer.analyze_input("Encore une réunion avec mon manager", None);
        assert_eq!(employee.role, Role::Employee);
    }

    #[test]
    fn test_signals_in_order_and_first_wins() {
        let analyzer = EmotionalAnalyzer::new();
        // fatigue 6, isolation 3, anger; no stress
        let a = analyzer.analyze_input("Crevé, je suis vidé, et tout seul face à ça. J'en ai marre.", None);
        assert_eq!(a.detected_signals, vec![Signal::Fatigue, Signal::Isolation, Signal::Anger]);
        assert_eq!(a.dominant_emotion, Emotion::Fatigue);
        assert_eq!(a.scores.fatigue, 6.0);
        assert_eq!(a.scores.isolation, 3.0);
        // combined (0 + 6 + 3) / 3 = 3 → moderate, energizing
        assert_eq!(a.risk_level, RiskLevel::Moderate);
        assert_eq!(a.tone, Tone::Energizing);
    }

    #[test]
    fn test_self_report_takes_the_max() {
        let analyzer = EmotionalAnalyzer::new();
        let report = SelfReport {
            stress: Some(9.0),
            fatigue: Some(8.0),
            isolation: Some(7.0),
            energy: Some(2.0),
        };
        let a = analyzer.analyze_input("stress", Some(&report));
        assert_eq!(a.scores.stress, 9.0);
        // combined = 8 → critical without any red flag
        assert_eq!(a.risk_level, RiskLevel::Critical);
        assert_eq!(a.tone, Tone::Reassuring);
        assert_eq!(a.burnout_risk, RiskBand::High);
        assert_eq!(a.dropout_risk, RiskBand::High);
    }

    #[test]
    fn test_high_risk_level() {
        let analyzer = EmotionalAnalyzer::new();
        let report = SelfReport {
            stress: Some(6.0),
            fatigue: Some(6.0),
            isolation: Some(6.0),
            energy: None,
        };
        let a = analyzer.analyze_input("", Some(&report));
        assert_eq!(a.risk_level, RiskLevel::High);
        assert_eq!(a.dominant_emotion, Emotion::Stress);
    }

    #[test]
    fn test_out_of_range_self_report_is_clamped() {
        let analyzer = EmotionalAnalyzer::new();
        let report = SelfReport {
            stress: Some(42.0),
            energy: Some(-3.0),
            ..Default::default()
        };
        let a = analyzer.analyze_input("", Some(&report));
        assert_eq!(a.scores.stress, 10.0);
        assert_eq!(a.scores.energy, 0.0);
    }

    #[test]
    fn test_low_stress_fallback_emotion() {
        let analyzer = EmotionalAnalyzer::new();
        let report = SelfReport {
            stress: Some(1.0),
            ..Default::default()
        };
        let a = analyzer.analyze_input("ça passe", Some(&report));
        assert!(a.detected_signals.is_empty());
        assert_eq!(a.dominant_emotion, Emotion::Stress);
    }

    #[test]
    fn test_loss_of_meaning_raises_dropout() {
        let analyzer = EmotionalAnalyzer::new();
        let a = analyzer.analyze_input("À quoi bon continuer comme ça", None);
        assert_eq!(a.detected_signals, vec![Signal::LossOfMeaning]);
        assert_eq!(a.dropout_risk, RiskBand::Moderate);
    }
}
