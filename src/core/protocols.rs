//! Protocol Selector
//!
//! A protocol matches when every trigger holds. Among matches the most
//! severe level wins; equal levels resolve to the first-declared protocol.
//! Invalid triggers never hold, so a bad catalog entry can only fail to
//! match, never break an analysis.

use lazy_static::lazy_static;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::types::{
    AnalysisField, InterventionProtocol, ProtocolAction, ProtocolLevel, RpsAnalysisResult,
    Trigger,
};

lazy_static! {
    static ref BUILTIN: ProtocolCatalog = ProtocolCatalog::builtin_uncached();
}

/// Immutable, ordered set of protocols
#[derive(Debug, Clone)]
pub struct ProtocolCatalog {
    protocols: Vec<InterventionProtocol>,
}

impl ProtocolCatalog {
    /// The catalog shipped with the engine, compiled once
    pub fn builtin() -> &'static ProtocolCatalog {
        &BUILTIN
    }

    /// Malformed triggers were already reported when they were parsed
    pub fn new(protocols: Vec<InterventionProtocol>) -> Self {
        Self { protocols }
    }

    /// Load a catalog from JSON: `[{"name", "level", "triggers": ["..."], "actions": [...]}]`
    pub fn from_json(json: &str) -> Result<Self> {
        let protocols: Vec<InterventionProtocol> = serde_json::from_str(json)
            .map_err(|e| EngineError::Catalog(format!("cannot parse protocol catalog: {}", e)))?;
        if protocols.is_empty() {
            return Err(EngineError::Catalog("protocol catalog is empty".to_string()));
        }
        Ok(Self::new(protocols))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn protocols(&self) -> &[InterventionProtocol] {
        &self.protocols
    }

    pub fn get(&self, name: &str) -> Option<&InterventionProtocol> {
        self.protocols.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }

    fn builtin_uncached() -> Self {
        let t = Trigger::parse;
        let script = |s: &str| ProtocolAction::ConversationScript { script: s.to_string() };
        let link = |title: &str, url: &str| ProtocolAction::ResourceLink {
            title: title.to_string(),
            url: url.to_string(),
        };

        Self::new(vec![
            InterventionProtocol {
                name: "prevention_surcharge".to_string(),
                level: ProtocolLevel::Moderate,
                triggers: vec![t("intensity_work >= 70")],
                actions: vec![
                    script("surcharge_priorisation"),
                    link("Prioriser sa charge de travail", "/ressources/charge-de-travail"),
                ],
            },
            InterventionProtocol {
                name: "lien_social".to_string(),
                level: ProtocolLevel::Moderate,
                triggers: vec![t("pattern: social isolation")],
                actions: vec![
                    script("isolement_reconnexion"),
                    link("Recréer du lien au travail", "/ressources/lien-social"),
                ],
            },
            InterventionProtocol {
                name: "remobilisation".to_string(),
                level: ProtocolLevel::Elevated,
                triggers: vec![t("motivation_index < 30"), t("pattern: deep demotivation")],
                actions: vec![
                    script("remobilisation_entretien"),
                    ProtocolAction::MandatoryCheckIn { interval_days: 7 },
                ],
            },
            InterventionProtocol {
                name: "prevention_burnout".to_string(),
                level: ProtocolLevel::Elevated,
                triggers: vec![t("burnout_risk_score >= 51")],
                actions: vec![
                    script("burnout_prevention"),
                    link("Reconnaître les signes d'épuisement", "/ressources/burnout"),
                    ProtocolAction::MandatoryCheckIn { interval_days: 7 },
                ],
            },
            InterventionProtocol {
                name: "crise_de_sens".to_string(),
                level: ProtocolLevel::Elevated,
                triggers: vec![t("pattern: loss of meaning"), t("value_conflicts >= 75")],
                actions: vec![
                    script("sens_et_valeurs"),
                    link("Conflits de valeurs au travail", "/ressources/valeurs"),
                ],
            },
            InterventionProtocol {
                name: "burnout_critique".to_string(),
                level: ProtocolLevel::Critical,
                triggers: vec![t("burnout_risk_score >= 76"), t("pattern: chronic overload")],
                actions: vec![
                    ProtocolAction::AlertHr,
                    ProtocolAction::MandatoryCheckIn { interval_days: 2 },
                    link("Contacter la médecine du travail", "/ressources/medecine-du-travail"),
                ],
            },
            InterventionProtocol {
                name: "risque_global_critique".to_string(),
                level: ProtocolLevel::Critical,
                triggers: vec![t("global_score >= 75")],
                actions: vec![
                    ProtocolAction::AlertManager,
                    ProtocolAction::AlertHr,
                    ProtocolAction::MandatoryCheckIn { interval_days: 2 },
                ],
            },
        ])
    }
}

/// Current value of a numeric field
pub fn field_value(analysis: &RpsAnalysisResult, field: AnalysisField) -> f64 {
    match field {
        AnalysisField::BurnoutRiskScore => analysis.burnout_risk_score as f64,
        AnalysisField::MotivationIndex => analysis.motivation_index as f64,
        AnalysisField::GlobalScore => analysis.mean_dimension_score(),
        AnalysisField::Dimension(d) => analysis.dimension_score(d) as f64,
    }
}

/// Evaluate one trigger against an analysis
pub fn evaluate(trigger: &Trigger, analysis: &RpsAnalysisResult) -> bool {
    match trigger {
        Trigger::Compare { field, op, threshold } => {
            op.apply(field_value(analysis, *field), *threshold)
        }
        Trigger::Pattern(pattern) => analysis.has_pattern(*pattern),
        Trigger::Invalid(raw) => {
            debug!(trigger = %raw, "skipping invalid trigger");
            false
        }
    }
}

/// Picks the single most urgent matching protocol
#[derive(Debug, Clone, Copy)]
pub struct ProtocolSelector<'a> {
    catalog: &'a ProtocolCatalog,
}

impl Default for ProtocolSelector<'static> {
    fn default() -> Self {
        Self::new(ProtocolCatalog::builtin())
    }
}

impl<'a> ProtocolSelector<'a> {
    pub fn new(catalog: &'a ProtocolCatalog) -> Self {
        Self { catalog }
    }

    /// Does every trigger of `protocol` hold? Empty trigger lists never match.
    pub fn matches(&self, protocol: &InterventionProtocol, analysis: &RpsAnalysisResult) -> bool {
        !protocol.triggers.is_empty() && protocol.triggers.iter().all(|t| evaluate(t, analysis))
    }

    /// All matching protocols, in catalog order
    pub fn matching(&self, analysis: &RpsAnalysisResult) -> Vec<&'a InterventionProtocol> {
        let catalog: &'a ProtocolCatalog = self.catalog;
        catalog
            .protocols()
            .iter()
            .filter(|p| self.matches(p, analysis))
            .collect()
    }

    /// Most urgent match, or `None`
    pub fn select(&self, analysis: &RpsAnalysisResult) -> Option<&'a InterventionProtocol> {
        // min_by_key keeps the first of equal keys: declaration order breaks ties
        self.matching(analysis)
            .into_iter()
            .min_by_key(|p| p.level.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BurnoutBreakdown, DimensionScore, Pattern, RiskLevel, RpsDimension};
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    fn analysis(
        overrides: &[(RpsDimension, u8)],
        burnout: u8,
        motivation: u8,
        patterns: Vec<Pattern>,
    ) -> RpsAnalysisResult {
        let dimensions = RpsDimension::ALL
            .into_iter()
            .map(|d| {
                let mut s = DimensionScore::neutral();
                if let Some((_, v)) = overrides.iter().find(|(od, _)| *od == d) {
                    s.score = *v;
                }
                (d, s)
            })
            .collect();
        RpsAnalysisResult {
            global_risk_level: RiskLevel::Low,
            dimensions,
            burnout_risk_score: burnout,
            burnout_breakdown: BurnoutBreakdown::default(),
            motivation_index: motivation,
            detected_patterns: patterns,
            recommended_actions: Vec::new(),
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn test_builtin_catalog_is_fully_valid() {
        let catalog = ProtocolCatalog::builtin();
        assert!(!catalog.is_empty());
        for p in catalog.protocols() {
            assert!(p.triggers.iter().all(Trigger::is_valid), "{} has invalid triggers", p.name);
        }
    }

    #[test]
    fn test_neutral_analysis_selects_nothing() {
        let selector = ProtocolSelector::default();
        assert!(selector.select(&analysis(&[], 0, 50, vec![])).is_none());
    }

    #[test]
    fn test_conjunctive_triggers() {
        let selector = ProtocolSelector::default();
        // burnout high enough but no chronic overload pattern → not critical
        let a = analysis(&[], 80, 50, vec![Pattern::ElevatedBurnoutRisk]);
        assert_eq!(selector.select(&a).unwrap().name, "prevention_burnout");

        let a = analysis(
            &[(RpsDimension::IntensityWork, 82)],
            80,
            50,
            vec![Pattern::ChronicOverload, Pattern::ElevatedBurnoutRisk],
        );
        assert_eq!(selector.select(&a).unwrap().name, "burnout_critique");
    }

    #[test]
    fn test_severity_beats_declaration_order() {
        let selector = ProtocolSelector::default();
        // prevention_surcharge (moderate, declared first) and prevention_burnout (elevated)
        let a = analysis(&[(RpsDimension::IntensityWork, 74)], 55, 50, vec![]);
        assert_eq!(selector.matching(&a).len(), 2);
        assert_eq!(selector.select(&a).unwrap().name, "prevention_burnout");
    }

    #[test]
    fn test_equal_severity_resolves_to_first_declared() {
        let selector = ProtocolSelector::default();
        let a = analysis(
            &[(RpsDimension::IntensityWork, 74), (RpsDimension::SocialRelations, 66)],
            0,
            50,
            vec![Pattern::SocialIsolation],
        );
        let names: Vec<_> = selector.matching(&a).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["prevention_surcharge", "lien_social"]);
        assert_eq!(selector.select(&a).unwrap().name, "prevention_surcharge");
    }

    #[test]
    fn test_invalid_trigger_never_matches() {
        let catalog = ProtocolCatalog::new(vec![InterventionProtocol {
            name: "broken".to_string(),
            level: ProtocolLevel::Critical,
            triggers: vec![Trigger::parse("burnout_risk_score => 10")],
            actions: vec![],
        }]);
        let selector = ProtocolSelector::new(&catalog);
        assert!(selector.select(&analysis(&[], 100, 0, vec![])).is_none());
    }

    #[test]
    fn test_empty_trigger_list_never_matches() {
        let catalog = ProtocolCatalog::new(vec![InterventionProtocol {
            name: "always".to_string(),
            level: ProtocolLevel::Moderate,
            triggers: vec![],
            actions: vec![],
        }]);
        let selector = ProtocolSelector::new(&catalog);
        assert!(selector.select(&analysis(&[], 0, 50, vec![])).is_none());
    }

    #[test]
    fn test_global_score_field_is_dimension_mean() {
        let a = analysis(
            &[
                (RpsDimension::IntensityWork, 90),
                (RpsDimension::EmotionalDemands, 90),
                (RpsDimension::Autonomy, 90),
            ],
            0,
            50,
            vec![],
        );
        assert_eq!(field_value(&a, AnalysisField::GlobalScore), 70.0);
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"[
            {"name": "check_in", "level": "moderate",
             "triggers": ["motivation_index <= 40"],
             "actions": [{"type": "mandatory_check_in", "interval_days": 3}]},
            {"name": "typo", "level": "critical",
             "triggers": ["motivation_idx <= 40"],
             "actions": [{"type": "alert_hr"}]}
        ]"#;
        let catalog = ProtocolCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.get("typo").unwrap().triggers[0].is_valid());

        let selector = ProtocolSelector::new(&catalog);
        let picked = selector.select(&analysis(&[], 0, 35, vec![])).unwrap();
        assert_eq!(picked.name, "check_in");
    }

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_malformed_trigger_warns_once() {
        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(warnings.clone()));
        let json = r#"[
            {"name": "typo", "level": "moderate",
             "triggers": ["motivation_idx <= 40"], "actions": []}
        ]"#;
        tracing::subscriber::with_default(subscriber, || {
            ProtocolCatalog::from_json(json).unwrap();
        });
        assert_eq!(warnings.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_catalog_from_bad_json() {
        assert!(matches!(
            ProtocolCatalog::from_json("{not json"),
            Err(EngineError::Catalog(_))
        ));
        assert!(matches!(ProtocolCatalog::from_json("[]"), Err(EngineError::Catalog(_))));
    }

    #[test]
    fn test_selection_is_deterministic() {
        let selector = ProtocolSelector::default();
        let a = analysis(&[(RpsDimension::ValueConflicts, 80)], 60, 20, vec![
            Pattern::LossOfMeaning,
            Pattern::ElevatedBurnoutRisk,
            Pattern::DeepDemotivation,
        ]);
        let first = selector.select(&a).map(|p| p.name.clone());
        for _ in 0..10 {
            assert_eq!(selector.select(&a).map(|p| p.name.clone()), first);
        }
        assert_eq!(first.as_deref(), Some("remobilisation"));
    }
}
