//! Red flags: crisis phrases that override normal flow

use serde::{Deserialize, Serialize};

/// What kind of crisis a phrase points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisCategory {
    SuicidalIdeation,
    SelfHarm,
    Violence,
    Panic,
}

/// A crisis phrase found in the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlag {
    /// The configured phrase that matched
    pub phrase: String,
    pub category: CrisisCategory,
}
