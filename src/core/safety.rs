//! Safety / Red-Flag Classifier
//!
//! A match here overrides every other classification: risk goes to
//! critical and the reply must carry [`SAFETY_MESSAGE`] verbatim, first.
//! The phrase list is inherently incomplete; a missed crisis statement is
//! a product limitation, not something to patch by guessing intent.

use crate::core::lexicon::{normalize, CRISIS_PHRASES};
use crate::types::RedFlag;

/// Fixed message, never paraphrased, never suppressed
pub const SAFETY_MESSAGE: &str = "Je t'entends, et ce que tu traverses compte vraiment. \
Je ne suis pas un professionnel de santé : parle dès maintenant à un adulte de confiance \
ou à un professionnel. En cas d'urgence, appelle le 3114 (prévention du suicide, 24h/24) \
ou le 15.";

#[derive(Debug, Default, Clone, Copy)]
pub struct SafetyClassifier;

impl SafetyClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Every configured crisis phrase present in the text, in list order
    pub fn scan(&self, text: &str) -> Vec<RedFlag> {
        let normalized = normalize(text);
        CRISIS_PHRASES
            .iter()
            .filter(|(phrase, _)| normalized.contains(phrase))
            .map(|(phrase, category)| RedFlag {
                phrase: phrase.to_string(),
                category: *category,
            })
            .collect()
    }

    pub fn has_red_flag(&self, text: &str) -> bool {
        let normalized = normalize(text);
        CRISIS_PHRASES
            .iter()
            .any(|(phrase, _)| normalized.contains(phrase))
    }
}

/// Put the safety message in front of `body` when there are red flags
pub fn with_safety_message(body: &str, red_flagged: bool) -> String {
    if !red_flagged {
        return body.to_string();
    }
    if body.trim().is_empty() {
        SAFETY_MESSAGE.to_string()
    } else {
        format!("{}\n\n{}", SAFETY_MESSAGE, body)
    }
}
