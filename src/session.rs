// Client-side session state. The server owns the real wizard state; this is
// only what the client needs to echo back and to fill the logo request.

use std::collections::BTreeMap;

/// Wizard stage as labeled by the server. Only two labels get special
/// handling on the client; everything else is carried opaquely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Initial,
    BrandNameInput,
    PromptInput,
    Other(String),
}

impl Stage {
    pub fn from_label(label: &str) -> Self {
        match label {
            "initial" => Stage::Initial,
            "brand_name_input" => Stage::BrandNameInput,
            "prompt_input" => Stage::PromptInput,
            other => Stage::Other(other.to_string()),
        }
    }

    pub fn as_label(&self) -> &str {
        match self {
            Stage::Initial => "initial",
            Stage::BrandNameInput => "brand_name_input",
            Stage::PromptInput => "prompt_input",
            Stage::Other(label) => label,
        }
    }

    /// The brand-detail key this stage's answer is stored under, if any.
    pub fn detail_key(&self) -> Option<&'static str> {
        match self {
            Stage::BrandNameInput => Some("brand_name"),
            Stage::PromptInput => Some("custom_prompt"),
            Stage::Initial | Stage::Other(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    pub conversation_id: Option<String>,
    pub stage: Stage,
    /// Accumulated answers, forwarded verbatim to logo generation. Keys are
    /// only ever added, never removed.
    pub brand_details: BTreeMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            conversation_id: None,
            stage: Stage::Initial,
            brand_details: BTreeMap::new(),
        }
    }

    /// Record the answer for a stage that captures one. Returns whether
    /// anything was stored.
    pub fn record_answer(&mut self, stage: &Stage, answer: &str) -> bool {
        match stage.detail_key() {
            Some(key) => {
                self.brand_details
                    .insert(key.to_string(), answer.to_string());
                true
            }
            None => false,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
