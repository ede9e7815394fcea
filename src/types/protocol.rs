//! Intervention protocols: typed triggers and declarative actions
//!
//! Triggers are written as short expressions in catalogs
//! (`"burnout_risk_score >= 51"`, `"pattern: chronic overload"`) and
//! compiled once into [`Trigger`] values when the catalog loads.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::types::{Pattern, RpsDimension};

lazy_static! {
    static ref RE_COMPARISON: Regex = Regex::new(
        r"^\s*([a-z_]+)\s*(>=|<=|==|>|<)\s*(-?\d+(?:\.\d+)?)\s*$"
    ).unwrap();

    static ref RE_PATTERN: Regex = Regex::new(
        r"(?i)^\s*pattern\s*:\s*(.+?)\s*$"
    ).unwrap();
}

/// Severity of a protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolLevel {
    Moderate,
    Elevated,
    Critical,
}

impl ProtocolLevel {
    /// Urgency rank, lower is more urgent
    pub fn rank(&self) -> u8 {
        match self {
            ProtocolLevel::Critical => 0,
            ProtocolLevel::Elevated => 1,
            ProtocolLevel::Moderate => 2,
        }
    }
}

impl std::fmt::Display for ProtocolLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProtocolLevel::Moderate => "moderate",
            ProtocolLevel::Elevated => "elevated",
            ProtocolLevel::Critical => "critical",
        };
        write!(f, "{}", name)
    }
}

/// Numeric fields a trigger can compare against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisField {
    BurnoutRiskScore,
    MotivationIndex,
    /// Mean of the six dimension scores
    GlobalScore,
    Dimension(RpsDimension),
}

impl AnalysisField {
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisField::BurnoutRiskScore => "burnout_risk_score",
            AnalysisField::MotivationIndex => "motivation_index",
            AnalysisField::GlobalScore => "global_score",
            AnalysisField::Dimension(d) => d.key(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "burnout_risk_score" => Some(AnalysisField::BurnoutRiskScore),
            "motivation_index" => Some(AnalysisField::MotivationIndex),
            "global_score" => Some(AnalysisField::GlobalScore),
            other => other.parse::<RpsDimension>().ok().map(AnalysisField::Dimension),
        }
    }
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Ge,
    Le,
    Gt,
    Lt,
    Eq,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Eq => "==",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">=" => Some(CompareOp::Ge),
            "<=" => Some(CompareOp::Le),
            ">" => Some(CompareOp::Gt),
            "<" => Some(CompareOp::Lt),
            "==" => Some(CompareOp::Eq),
            _ => None,
        }
    }

    pub fn apply(&self, value: f64, threshold: f64) -> bool {
        match self {
            CompareOp::Ge => value >= threshold,
            CompareOp::Le => value <= threshold,
            CompareOp::Gt => value > threshold,
            CompareOp::Lt => value < threshold,
            CompareOp::Eq => (value - threshold).abs() < f64::EPSILON,
        }
    }
}

/// One compiled trigger condition
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// `field op threshold`
    Compare {
        field: AnalysisField,
        op: CompareOp,
        threshold: f64,
    },
    /// `pattern: <label>`
    Pattern(Pattern),
    /// Expression that failed to compile; never matches
    Invalid(String),
}

impl Trigger {
    /// Compile an expression. Never fails: bad input becomes `Invalid`.
    pub fn parse(expression: &str) -> Self {
        if let Some(caps) = RE_PATTERN.captures(expression) {
            return match caps[1].parse::<Pattern>() {
                Ok(pattern) => Trigger::Pattern(pattern),
                Err(e) => invalid(expression, &e.to_string()),
            };
        }

        let Some(caps) = RE_COMPARISON.captures(expression) else {
            return invalid(expression, "not a comparison or pattern check");
        };

        let Some(field) = AnalysisField::from_name(&caps[1]) else {
            return invalid(expression, "unknown field");
        };
        let Some(op) = CompareOp::from_symbol(&caps[2]) else {
            return invalid(expression, "unknown operator");
        };
        match caps[3].parse::<f64>() {
            Ok(threshold) => Trigger::Compare { field, op, threshold },
            Err(_) => invalid(expression, "threshold is not a number"),
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Trigger::Invalid(_))
    }
}

fn invalid(expression: &str, why: &str) -> Trigger {
    warn!(trigger = expression, reason = why, "malformed protocol trigger, it will never match");
    Trigger::Invalid(expression.to_string())
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::Compare { field, op, threshold } => {
                write!(f, "{} {} {}", field.name(), op.symbol(), threshold)
            }
            Trigger::Pattern(p) => write!(f, "pattern: {}", p.label()),
            Trigger::Invalid(raw) => write!(f, "{}", raw),
        }
    }
}

impl Serialize for Trigger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Trigger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let expression = String::deserialize(deserializer)?;
        Ok(Trigger::parse(&expression))
    }
}

/// Declarative instruction for the notification / UI side.
/// The engine emits these, it never executes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProtocolAction {
    /// Run a scripted conversation flow
    ConversationScript { script: String },
    /// Show a resource to the user
    ResourceLink { title: String, url: String },
    /// Notify HR. The subject is always pseudonymized.
    AlertHr,
    /// Notify the line manager. The subject is always pseudonymized.
    AlertManager,
    /// Schedule check-ins the user cannot skip
    MandatoryCheckIn { interval_days: u32 },
}

impl ProtocolAction {
    pub fn is_alert(&self) -> bool {
        matches!(self, ProtocolAction::AlertHr | ProtocolAction::AlertManager)
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionProtocol {
    pub name: String,
    pub level: ProtocolLevel,
    /// All must hold
    pub triggers: Vec<Trigger>,
    pub actions: Vec<ProtocolAction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comparison() {
        let t = Trigger::parse("burnout_risk_score >= 51");
        assert_eq!(
            t,
            Trigger::Compare {
                field: AnalysisField::BurnoutRiskScore,
                op: CompareOp::Ge,
                threshold: 51.0,
            }
        );
    }

    #[test]
    fn test_parse_dimension_field_and_all_operators() {
        for (symbol, op) in [
            (">=", CompareOp::Ge),
            ("<=", CompareOp::Le),
            (">", CompareOp::Gt),
            ("<", CompareOp::Lt),
            ("==", CompareOp::Eq),
        ] {
            let t = Trigger::parse(&format!("autonomy {} 65", symbol));
            assert_eq!(
                t,
                Trigger::Compare {
                    field: AnalysisField::Dimension(RpsDimension::Autonomy),
                    op,
                    threshold: 65.0,
                }
            );
        }
    }

    #[test]
    fn test_parse_pattern_check() {
        assert_eq!(
            Trigger::parse("pattern: chronic overload"),
            Trigger::Pattern(Pattern::ChronicOverload)
        );
    }

    #[test]
    fn test_malformed_expressions_become_invalid() {
        for raw in [
            "burnout_risk_score >>= 51",
            "sleep_hours >= 4",
            "pattern: existential dread",
            "motivation_index <",
            "",
        ] {
            let t = Trigger::parse(raw);
            assert!(!t.is_valid(), "{:?} should be invalid", raw);
        }
    }

    #[test]
    fn test_trigger_display_round_trips() {
        for raw in ["motivation_index < 30", "pattern: loss of meaning", "global_score >= 75"] {
            let t = Trigger::parse(raw);
            assert_eq!(Trigger::parse(&t.to_string()), t);
        }
    }

    #[test]
    fn test_level_rank_orders_critical_first() {
        assert!(ProtocolLevel::Critical.rank() < ProtocolLevel::Elevated.rank());
        assert!(ProtocolLevel::Elevated.rank() < ProtocolLevel::Moderate.rank());
    }

    #[test]
    fn test_action_json_is_tagged() {
        let json = serde_json::to_value(ProtocolAction::AlertHr).unwrap();
        assert_eq!(json, serde_json::json!({"type": "alert_hr"}));
        let action: ProtocolAction =
            serde_json::from_str(r#"{"type": "mandatory_check_in", "interval_days": 2}"#).unwrap();
        assert_eq!(action, ProtocolAction::MandatoryCheckIn { interval_days: 2 });
        assert!(!action.is_alert());
        assert!(ProtocolAction::AlertManager.is_alert());
    }
}
