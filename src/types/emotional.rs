//! Conversational emotional analysis, used to pick reply phrasing

use serde::{Deserialize, Serialize};

use crate::types::{RiskBand, RiskLevel};

/// Who is talking, inferred from context words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Parent,
    Teen,
    Unknown,
}

/// Signals the aggregator can detect, in detection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Stress,
    Fatigue,
    Isolation,
    Anger,
    LossOfMeaning,
}

impl Signal {
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Stress => "stress",
            Signal::Fatigue => "fatigue",
            Signal::Isolation => "isolation",
            Signal::Anger => "anger",
            Signal::LossOfMeaning => "loss_of_meaning",
        }
    }
}

/// Dominant emotion label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    /// Only ever set by red flags
    Distress,
    Stress,
    Fatigue,
    Isolation,
    Anger,
    LossOfMeaning,
    Calm,
}

impl From<Signal> for Emotion {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Stress => Emotion::Stress,
            Signal::Fatigue => Emotion::Fatigue,
            Signal::Isolation => Emotion::Isolation,
            Signal::Anger => Emotion::Anger,
            Signal::LossOfMeaning => Emotion::LossOfMeaning,
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Emotion::Distress => "distress",
            Emotion::Stress => "stress",
            Emotion::Fatigue => "fatigue",
            Emotion::Isolation => "isolation",
            Emotion::Anger => "anger",
            Emotion::LossOfMeaning => "loss_of_meaning",
            Emotion::Calm => "calm",
        };
        write!(f, "{}", name)
    }
}

/// Reply phrasing style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Soft,
    Reassuring,
    Energizing,
}

/// Raw sub-scores on a 0-10 scale, kept for audit
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub energy: f64,
    pub stress: f64,
    pub isolation: f64,
    pub fatigue: f64,
}

impl EmotionScores {
    /// Mean of stress, fatigue and isolation
    pub fn combined_stress(&self) -> f64 {
        (self.stress + self.fatigue + self.isolation) / 3.0
    }
}

/// Result of `analyze_input`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalAnalysis {
    pub role: Role,
    pub dominant_emotion: Emotion,
    pub detected_signals: Vec<Signal>,
    /// Matched crisis phrases; non-empty makes the safety message mandatory
    pub red_flags: Vec<String>,
    pub risk_level: RiskLevel,
    pub burnout_risk: RiskBand,
    pub dropout_risk: RiskBand,
    pub tone: Tone,
    pub scores: EmotionScores,
}

impl EmotionalAnalysis {
    pub fn requires_safety_message(&self) -> bool {
        !self.red_flags.is_empty()
    }
}
