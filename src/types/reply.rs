//! Reply-generation request / response

use serde::{Deserialize, Serialize};

use crate::types::{EmotionalAnalysis, Role};

/// Prior profile the caller may know about the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Everything a phrase generator gets to work with
#[derive(Debug, Clone)]
pub struct ReplyRequest<'a> {
    pub text: &'a str,
    pub analysis: &'a EmotionalAnalysis,
    pub profile: Option<&'a UserProfile>,
}

/// Final reply text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    /// Name of the generator that produced the body
    pub provider: String,
    pub safety_message_included: bool,
}
