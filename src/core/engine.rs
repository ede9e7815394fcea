//! RPS Engine: runs the full text → report pipeline
//!
//! Dimension scores and burnout/motivation are computed independently,
//! the safety scan runs on the raw text, then patterns and protocol
//! selection run over the assembled result.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::burnout::BurnoutCalculator;
use crate::core::dimension_scorer::DimensionScorer;
use crate::core::patterns::PatternDetector;
use crate::core::protocols::{ProtocolCatalog, ProtocolSelector};
use crate::core::safety::SafetyClassifier;
use crate::types::{
    mean_score, AnalysisInput, DimensionScore, Pattern, RedFlag, RiskLevel, RpsAnalysisResult,
    RpsDimension, RpsReport,
};
use crate::{
    DIMENSION_ALERT_HIGH, GLOBAL_CRITICAL_BURNOUT, GLOBAL_CRITICAL_MEAN, GLOBAL_HIGH_BURNOUT,
    GLOBAL_HIGH_MEAN, GLOBAL_MODERATE_BURNOUT, GLOBAL_MODERATE_MEAN,
};

/// Urgency of a recommendation; sorting is stable within a priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

/// Stateless; cheap to clone and safe to share across requests
#[derive(Debug, Clone)]
pub struct RpsEngine {
    scorer: DimensionScorer,
    burnout: BurnoutCalculator,
    patterns: PatternDetector,
    safety: SafetyClassifier,
    catalog: Arc<ProtocolCatalog>,
}

impl Default for RpsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RpsEngine {
    /// Engine over the built-in protocol catalog
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(ProtocolCatalog::builtin().clone()))
    }

    pub fn with_catalog(catalog: Arc<ProtocolCatalog>) -> Self {
        Self {
            scorer: DimensionScorer::new(),
            burnout: BurnoutCalculator::new(),
            patterns: PatternDetector::new(),
            safety: SafetyClassifier::new(),
            catalog,
        }
    }

    pub fn catalog(&self) -> &ProtocolCatalog {
        &self.catalog
    }

    /// Full analysis of one input
    pub fn analyze(&self, input: &AnalysisInput) -> RpsReport {
        let text = input.text.as_str();

        let dimensions = self.scorer.score_all(text);
        let burnout_breakdown = self.burnout.breakdown(text);
        let burnout_risk_score = burnout_breakdown.total();
        let motivation_index = self.burnout.motivation_index(text);
        let red_flags = self.safety.scan(text);

        let detected_patterns =
            self.patterns
                .detect_from_scores(&dimensions, burnout_risk_score, motivation_index);
        let global_risk_level = global_risk(
            burnout_risk_score,
            mean_score(&dimensions),
            !red_flags.is_empty(),
        );
        let recommended_actions =
            recommendations(&dimensions, &detected_patterns, global_risk_level, &red_flags);

        let analysis = RpsAnalysisResult {
            global_risk_level,
            dimensions,
            burnout_risk_score,
            burnout_breakdown,
            motivation_index,
            detected_patterns,
            recommended_actions,
            analyzed_at: Utc::now(),
        };

        let protocol = ProtocolSelector::new(&self.catalog)
            .select(&analysis)
            .cloned();

        debug!(
            global = %analysis.global_risk_level,
            burnout = analysis.burnout_risk_score,
            motivation = analysis.motivation_index,
            patterns = analysis.detected_patterns.len(),
            red_flags = red_flags.len(),
            "rps analysis complete"
        );
        if let Some(p) = &protocol {
            info!(protocol = %p.name, level = %p.level, "intervention protocol selected");
        }

        RpsReport {
            analysis,
            protocol,
            red_flags,
        }
    }

    /// Shorthand for text-only analysis
    pub fn analyze_text(&self, text: &str) -> RpsReport {
        self.analyze(&AnalysisInput::new(text))
    }
}

/// Global level from burnout and the dimension mean; red flags force critical
pub fn global_risk(burnout: u8, mean: f64, red_flagged: bool) -> RiskLevel {
    if red_flagged || burnout >= GLOBAL_CRITICAL_BURNOUT || mean >= GLOBAL_CRITICAL_MEAN {
        RiskLevel::Critical
    } else if burnout >= GLOBAL_HIGH_BURNOUT || mean >= GLOBAL_HIGH_MEAN {
        RiskLevel::High
    } else if burnout >= GLOBAL_MODERATE_BURNOUT || mean >= GLOBAL_MODERATE_MEAN {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

fn pattern_recommendation(pattern: Pattern) -> (Priority, &'static str) {
    match pattern {
        Pattern::ChronicOverload => (
            Priority::High,
            "Réévaluer la charge de travail et prioriser les tâches avec le manager.",
        ),
        Pattern::ElevatedBurnoutRisk => (
            Priority::High,
            "Planifier un suivi rapproché du risque d'épuisement professionnel.",
        ),
        Pattern::DeepDemotivation => (
            Priority::High,
            "Explorer les sources de démotivation lors d'un entretien individuel.",
        ),
        Pattern::SocialIsolation => (
            Priority::Medium,
            "Favoriser les temps d'échange et d'entraide avec l'équipe.",
        ),
        Pattern::LossOfMeaning => (
            Priority::Medium,
            "Ouvrir un dialogue sur le sens du travail et les valeurs.",
        ),
        Pattern::AutonomyDeficit => (
            Priority::Medium,
            "Redonner des marges de manœuvre sur l'organisation du travail.",
        ),
    }
}

/// Dimensions with no pattern rule of their own
fn dimension_recommendation(dimension: RpsDimension) -> Option<&'static str> {
    match dimension {
        RpsDimension::EmotionalDemands => {
            Some("Mettre en place un espace de parole pour décharger la charge émotionnelle.")
        }
        RpsDimension::JobInsecurity => {
            Some("Informer clairement sur l'avenir du poste et les changements en cours.")
        }
        _ => None,
    }
}

fn recommendations(
    dimensions: &std::collections::BTreeMap<RpsDimension, DimensionScore>,
    patterns: &[Pattern],
    global: RiskLevel,
    red_flags: &[RedFlag],
) -> Vec<String> {
    let mut items: Vec<(Priority, &'static str)> = Vec::new();

    if !red_flags.is_empty() {
        items.push((
            Priority::Critical,
            "Orienter immédiatement vers un professionnel de santé ou le 3114.",
        ));
    }
    if global == RiskLevel::Critical {
        items.push((
            Priority::Critical,
            "Organiser un entretien prioritaire avec la médecine du travail.",
        ));
    }

    items.extend(patterns.iter().map(|p| pattern_recommendation(*p)));

    for (dimension, score) in dimensions {
        if score.score >= DIMENSION_ALERT_HIGH {
            if let Some(text) = dimension_recommendation(*dimension) {
                items.push((Priority::Medium, text));
            }
        }
    }

    if items.is_empty() {
        items.push((
            Priority::Low,
            "Maintenir les bonnes pratiques actuelles et refaire un point dans un mois.",
        ));
    }

    items.sort_by_key(|(priority, _)| *priority);
    items.into_iter().map(|(_, text)| text.to_string()).collect()
}
