//! Core types for the ZÉNA engine

mod analysis;
mod dimension;
mod emotional;
mod pattern;
mod protocol;
mod record;
mod reply;
mod risk;
mod safety;

pub use analysis::{mean_score, AnalysisInput, BurnoutBreakdown, RpsAnalysisResult, RpsReport, SelfReport};
pub use dimension::{DimensionScore, RpsDimension};
pub use emotional::{Emotion, EmotionScores, EmotionalAnalysis, Role, Signal, Tone};
pub use pattern::Pattern;
pub use protocol::{AnalysisField, CompareOp, InterventionProtocol, ProtocolAction, ProtocolLevel, Trigger};
pub use record::{AlertRecipient, AnalysisRecord, AnonymizedAlert};
pub use reply::{Reply, ReplyRequest, UserProfile};
pub use risk::{RiskBand, RiskLevel};
pub use safety::{CrisisCategory, RedFlag};
