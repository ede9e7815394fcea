//! Storage rows and alert notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AnalysisInput, ProtocolLevel, RpsAnalysisResult, RpsReport, SelfReport};

/// One immutable time-series row, keyed by (user, session, timestamp)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub recorded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_report: Option<SelfReport>,
    pub analysis: RpsAnalysisResult,
    /// Name of the selected protocol, if any
    pub protocol: Option<String>,
}

impl AnalysisRecord {
    /// Row for one finished analysis, stamped with the analysis time
    pub fn from_report(input: &AnalysisInput, report: &RpsReport) -> Self {
        Self {
            user_id: input.user_id.clone(),
            session_id: input.session_id.clone(),
            recorded_at: report.analysis.analyzed_at,
            self_report: input.scores.map(|s| s.clamped()),
            analysis: report.analysis.clone(),
            protocol: report.protocol.as_ref().map(|p| p.name.clone()),
        }
    }
}

/// Who an alert goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertRecipient {
    Hr,
    Manager,
}

/// Notification with the user reduced to a salted hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizedAlert {
    pub recipient: AlertRecipient,
    pub protocol: String,
    pub level: ProtocolLevel,
    /// Truncated salted SHA-256 of the user id, or "anonymous"
    pub subject: String,
    pub issued_at: DateTime<Utc>,
}
