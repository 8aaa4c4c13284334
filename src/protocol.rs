// Wire types for the three wizard endpoints. Replies are decoded into the
// raw serde shapes below and discriminated exactly once, at this boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct StartReply {
    pub conversation_id: String,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProcessRequest<'a> {
    pub conversation_id: Option<&'a str>,
    pub user_response: &'a str,
}

/// Raw `/process_response` body. Every field is optional on the wire; which
/// ones are present determines the reply shape.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessReply {
    pub stage: Option<String>,
    pub suggestions: Option<Vec<String>>,
    pub question: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    pub next_step: Option<String>,
    pub message: Option<String>,
}

/// One variant per reply shape, decided by `Turn::from` in precedence order.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Suggestions(Vec<String>),
    Question {
        question: String,
        options: Vec<String>,
    },
    GenerateLogo,
    Message(String),
    Unrecognized,
}

/// A discriminated `/process_response` reply: the stage label the server
/// attached, plus the shape to render.
#[derive(Debug)]
pub struct Turn {
    pub stage: Option<String>,
    pub reply: Reply,
}

impl From<ProcessReply> for Turn {
    fn from(raw: ProcessReply) -> Self {
        // Precedence: suggestions, question, generate-logo signal, plain
        // message. First match wins; anything else renders nothing.
        let reply = if let Some(suggestions) = raw.suggestions {
            Reply::Suggestions(suggestions)
        } else if let Some(question) = raw.question {
            Reply::Question {
                question,
                options: raw.options,
            }
        } else if raw.next_step.as_deref() == Some("generate_logo") {
            Reply::GenerateLogo
        } else if let Some(message) = raw.message {
            Reply::Message(message)
        } else {
            Reply::Unrecognized
        };

        Turn {
            stage: raw.stage,
            reply,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogoRequest<'a> {
    pub brand_details: &'a BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct LogoReply {
    pub logo_path: Option<String>,
    pub prompt_used: Option<String>,
    pub error: Option<String>,
}
