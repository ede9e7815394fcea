//! Behavioral patterns derived from scores

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::EngineError;

/// A named behavioral pattern.
///
/// Serialized as its label ("chronic overload", ...), which is also the
/// name used by `pattern: <label>` protocol triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    ChronicOverload,
    SocialIsolation,
    LossOfMeaning,
    ElevatedBurnoutRisk,
    DeepDemotivation,
    AutonomyDeficit,
}

impl Pattern {
    /// Rule-evaluation order
    pub const ALL: [Pattern; 6] = [
        Pattern::ChronicOverload,
        Pattern::SocialIsolation,
        Pattern::LossOfMeaning,
        Pattern::ElevatedBurnoutRisk,
        Pattern::DeepDemotivation,
        Pattern::AutonomyDeficit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Pattern::ChronicOverload => "chronic overload",
            Pattern::SocialIsolation => "social isolation",
            Pattern::LossOfMeaning => "loss of meaning",
            Pattern::ElevatedBurnoutRisk => "elevated burnout risk",
            Pattern::DeepDemotivation => "deep demotivation",
            Pattern::AutonomyDeficit => "autonomy deficit",
        }
    }
}

impl FromStr for Pattern {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Pattern::ALL
            .into_iter()
            .find(|p| p.label() == wanted)
            .ok_or_else(|| EngineError::InvalidPattern(s.to_string()))
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
