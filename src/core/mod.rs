//! Core modules for the ZÉNA engine

pub mod lexicon;
pub mod dimension_scorer;
pub mod burnout;
pub mod patterns;
pub mod protocols;
pub mod safety;
pub mod emotional;
pub mod engine;
pub mod reply;
pub mod storage;
pub mod alerts;
pub mod api;

pub use dimension_scorer::DimensionScorer;
pub use burnout::BurnoutCalculator;
pub use patterns::PatternDetector;
pub use protocols::{evaluate, field_value, ProtocolCatalog, ProtocolSelector};
pub use safety::{with_safety_message, SafetyClassifier, SAFETY_MESSAGE};
pub use emotional::EmotionalAnalyzer;
pub use engine::{global_risk, RpsEngine};
pub use reply::{PhraseGenerator, ReplyComposer, TemplatePhrases};
pub use storage::{AnalysisStore, JsonlStore, MemoryStore};
pub use alerts::AlertDispatcher;
pub use api::{create_router, run_server, AppState};
