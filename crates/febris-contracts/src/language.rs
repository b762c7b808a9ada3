//! Language tag selecting message templates.
//!
//! The tag only changes how labels, justifications and actions are worded.
//! It never influences scoring or inference.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Spanish, the intake's native language.
    #[default]
    Es,
    En,
}

impl Language {
    /// Parse a language tag such as `"en"` or `"en-US"`.
    ///
    /// Unsupported tags fall back to Spanish, matching the intake default.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or("").to_ascii_lowercase();
        match primary.as_str() {
            "en" => Language::En,
            _ => Language::Es,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
