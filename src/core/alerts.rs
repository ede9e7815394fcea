//! Anonymized HR / manager alerts
//!
//! The raw user id never leaves this module: the subject is a truncated
//! salted SHA-256 digest, stable for a given salt.

use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::types::{
    AlertRecipient, AnonymizedAlert, InterventionProtocol, ProtocolAction, RpsReport,
};

/// Hex characters kept from the digest
const SUBJECT_HEX_LEN: usize = 16;

#[derive(Debug, Clone, Default)]
pub struct AlertDispatcher {
    salt: String,
}

impl AlertDispatcher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// One alert per `alert_hr` / `alert_manager` action, in action order
    pub fn dispatch(
        &self,
        user_id: Option<&str>,
        protocol: &InterventionProtocol,
    ) -> Vec<AnonymizedAlert> {
        let issued_at = Utc::now();
        let subject = self.subject(user_id);

        protocol
            .actions
            .iter()
            .filter_map(|action| match action {
                ProtocolAction::AlertHr => Some(AlertRecipient::Hr),
                ProtocolAction::AlertManager => Some(AlertRecipient::Manager),
                _ => None,
            })
            .map(|recipient| AnonymizedAlert {
                recipient,
                protocol: protocol.name.clone(),
                level: protocol.level,
                subject: subject.clone(),
                issued_at,
            })
            .collect()
    }

    /// Alerts for the protocol selected in a report, if any
    pub fn dispatch_report(
        &self,
        user_id: Option<&str>,
        report: &RpsReport,
    ) -> Vec<AnonymizedAlert> {
        report
            .protocol
            .as_ref()
            .map(|protocol| self.dispatch(user_id, protocol))
            .unwrap_or_default()
    }

    /// Salted pseudonym for a user, or "anonymous"
    pub fn subject(&self, user_id: Option<&str>) -> String {
        let Some(user_id) = user_id.filter(|id| !id.is_empty()) else {
            return "anonymous".to_string();
        };
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(b":");
        hasher.update(user_id.as_bytes());
        let digest: [u8; 32] = hasher.finalize().into();
        digest
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>()[..SUBJECT_HEX_LEN]
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::protocols::ProtocolCatalog;
    use crate::core::RpsEngine;

    #[test]
    fn test_alerts_follow_alert_actions() {
        let dispatcher = AlertDispatcher::new("salt");
        let protocol = ProtocolCatalog::builtin()
            .get("risque_global_critique")
            .unwrap();
        let alerts = dispatcher.dispatch(Some("alice"), protocol);
        let recipients: Vec<_> = alerts.iter().map(|a| a.recipient).collect();
        assert_eq!(recipients, vec![AlertRecipient::Manager, AlertRecipient::Hr]);
        assert!(alerts.iter().all(|a| a.protocol == "risque_global_critique"));
    }

    #[test]
    fn test_non_alert_protocol_sends_nothing() {
        let dispatcher = AlertDispatcher::new("salt");
        let protocol = ProtocolCatalog::builtin().get("lien_social").unwrap();
        assert!(dispatcher.dispatch(Some("alice"), protocol).is_empty());
    }

    #[test]
    fn test_report_without_protocol_sends_nothing() {
        let dispatcher = AlertDispatcher::new("salt");
        let report = RpsEngine::new().analyze_text("Bonjour");
        assert!(dispatcher.dispatch_report(Some("alice"), &report).is_empty());
    }

    #[test]
    fn test_subject_hides_user_id() {
        let dispatcher = AlertDispatcher::new("salt");
        let subject = dispatcher.subject(Some("alice"));
        assert_eq!(subject.len(), SUBJECT_HEX_LEN);
        assert!(!subject.contains("alice"));
        assert_eq!(subject, dispatcher.subject(Some("alice")));
        assert_ne!(subject, AlertDispatcher::new("other").subject(Some("alice")));
        assert_eq!(dispatcher.subject(None), "anonymous");
        assert_eq!(dispatcher.subject(Some("")), "anonymous");
    }
}
