//! Reply composition
//!
//! Phrase generators are tried in order; the built-in templates are the
//! last resort and cannot fail. Whatever produced the body, a red-flagged
//! analysis always gets the safety message in front.

use tracing::{debug, warn};

use crate::core::safety::with_safety_message;
use crate::error::Result;
use crate::types::{Emotion, Reply, ReplyRequest, Tone};

/// One way of producing a reply body
pub trait PhraseGenerator: Send + Sync {
    fn name(&self) -> &str;
    fn generate(&self, request: &ReplyRequest<'_>) -> Result<String>;
}

/// Fixed French phrasing keyed on tone and dominant emotion
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplatePhrases;

impl TemplatePhrases {
    pub fn new() -> Self {
        Self
    }

    fn opening(tone: Tone) -> &'static str {
        match tone {
            Tone::Soft => "Merci de partager ça avec moi.",
            Tone::Reassuring => "Je suis là, prenons le temps ensemble.",
            Tone::Energizing => "Tu as déjà fait un pas en en parlant.",
        }
    }

    fn body(emotion: Emotion) -> &'static str {
        match emotion {
            Emotion::Distress => "Ce que tu ressens est important et tu n'as pas à le porter seul.",
            Emotion::Stress => "On dirait que la pression est forte en ce moment. Qu'est-ce qui pèse le plus ?",
            Emotion::Fatigue => "Tu sembles épuisé. Est-ce que tu arrives à te reposer un peu ?",
            Emotion::Isolation => "Tu as l'air de te sentir seul. Y a-t-il quelqu'un à qui tu pourrais en parler ?",
            Emotion::Anger => "Ta colère a sûrement de bonnes raisons. Tu veux m'en dire plus ?",
            Emotion::LossOfMeaning => "Tu sembles te questionner sur le sens de tout ça. Qu'est-ce qui comptait pour toi avant ?",
            Emotion::Calm => "Comment puis-je t'aider aujourd'hui ?",
        }
    }
}

impl PhraseGenerator for TemplatePhrases {
    fn name(&self) -> &str {
        "template"
    }

    fn generate(&self, request: &ReplyRequest<'_>) -> Result<String> {
        let analysis = request.analysis;
        let greeting = request
            .profile
            .and_then(|p| p.display_name.as_deref())
            .filter(|name| !name.trim().is_empty())
            .map(|name| format!("{}, ", name.trim()))
            .unwrap_or_default();

        Ok(format!(
            "{}{} {}",
            greeting,
            Self::opening(analysis.tone),
            Self::body(analysis.dominant_emotion)
        ))
    }
}

/// Ordered provider chain with a template fallback
pub struct ReplyComposer {
    providers: Vec<Box<dyn PhraseGenerator>>,
    fallback: TemplatePhrases,
}

impl Default for ReplyComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReplyComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("ReplyComposer").field("providers", &names).finish()
    }
}

impl ReplyComposer {
    /// Templates only
    pub fn new() -> Self {
        Self::with_providers(Vec::new())
    }

    pub fn with_providers(providers: Vec<Box<dyn PhraseGenerator>>) -> Self {
        Self {
            providers,
            fallback: TemplatePhrases::new(),
        }
    }

    pub fn push_provider(&mut self, provider: Box<dyn PhraseGenerator>) {
        self.providers.push(provider);
    }

    pub fn compose(&self, request: &ReplyRequest<'_>) -> Reply {
        let red_flagged = request.analysis.requires_safety_message();

        for provider in &self.providers {
            match provider.generate(request) {
                Ok(body) if !body.trim().is_empty() => {
                    debug!(provider = provider.name(), "reply generated");
                    return Reply {
                        text: with_safety_message(&body, red_flagged),
                        provider: provider.name().to_string(),
                        safety_message_included: red_flagged,
                    };
                }
                Ok(_) => warn!(provider = provider.name(), "provider returned an empty reply"),
                Err(e) => warn!(provider = provider.name(), error = %e, "provider failed"),
            }
        }

        let body = self.fallback.generate(request).unwrap_or_default();
        Reply {
            text: with_safety_message(&body, red_flagged),
            provider: self.fallback.name().to_string(),
            safety_message_included: red_flagged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emotional::EmotionalAnalyzer;
    use crate::core::safety::SAFETY_MESSAGE;
    use crate::error::EngineError;
    use crate::types::UserProfile;

    struct Failing;

    impl PhraseGenerator for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn generate(&self, _request: &ReplyRequest<'_>) -> Result<String> {
            Err(EngineError::Provider {
                provider: "failing".to_string(),
                message: "timeout".to_string(),
            })
        }
    }

    struct Canned(&'static str);

    impl PhraseGenerator for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        fn generate(&self, _request: &ReplyRequest<'_>) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_template_uses_profile_name() {
        let analysis = EmotionalAnalyzer::new().analyze_input("je suis crevé et je suis vidé", None);
        let profile = UserProfile {
            display_name: Some("Léa".to_string()),
            role: None,
        };
        let request = ReplyRequest {
            text: "je suis crevé et je suis vidé",
            analysis: &analysis,
            profile: Some(&profile),
        };
        let reply = ReplyComposer::new().compose(&request);
        assert!(reply.text.starts_with("Léa, "));
        assert!(reply.text.contains("épuisé"));
        assert_eq!(reply.provider, "template");
        assert!(!reply.safety_message_included);
    }

    #[test]
    fn test_first_working_provider_wins() {
        let analysis = EmotionalAnalyzer::new().analyze_input("bonjour", None);
        let request = ReplyRequest {
            text: "bonjour",
            analysis: &analysis,
            profile: None,
        };
        let composer = ReplyComposer::with_providers(vec![
            Box::new(Failing),
            Box::new(Canned("")),
            Box::new(Canned("Salut !")),
        ]);
        let reply = composer.compose(&request);
        assert_eq!(reply.text, "Salut !");
        assert_eq!(reply.provider, "canned");
    }

    #[test]
    fn test_safety_message_survives_provider_failure() {
        let text = "je veux mourir";
        let analysis = EmotionalAnalyzer::new().analyze_input(text, None);
        let request = ReplyRequest {
            text,
            analysis: &analysis,
            profile: None,
        };
        let reply = ReplyComposer::with_providers(vec![Box::new(Failing)]).compose(&request);
        assert!(reply.text.starts_with(SAFETY_MESSAGE));
        assert!(reply.safety_message_included);
        assert_eq!(reply.provider, "template");
    }

    #[test]
    fn test_safety_message_wraps_provider_output() {
        let text = "je veux mourir";
        let analysis = EmotionalAnalyzer::new().analyze_input(text, None);
        let request = ReplyRequest {
            text,
            analysis: &analysis,
            profile: None,
        };
        let reply = ReplyComposer::with_providers(vec![Box::new(Canned("On en parle ?"))])
            .compose(&request);
        assert_eq!(reply.text, format!("{}\n\n{}", SAFETY_MESSAGE, "On en parle ?"));
    }
}
