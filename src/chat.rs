// The conversation client: session state, transcript, and the turn
// semantics. Transport lives in `service`.

use std::path::Path;

use tracing::{debug, error, info};

use crate::constants;
use crate::protocol::{Reply, Turn};
use crate::service::BrandService;
use crate::session::{Session, Stage};
use crate::{ChatLog, Sender};

pub const SUGGESTIONS_HEADER: &str = "Here are brand name suggestions:";
pub const PREPARING_MESSAGE: &str = "Preparing to generate your logo...";
pub const LOGO_SUCCESS_MESSAGE: &str = "Logo generated successfully!";

pub const START_FAILED_MESSAGE: &str = "Failed to start conversation. Please try again.";
pub const TURN_FAILED_MESSAGE: &str = "Sorry, something went wrong. Please try again.";
pub const LOGO_FAILED_MESSAGE: &str = "Sorry, logo generation failed.";
pub const LOGO_REQUEST_FAILED_MESSAGE: &str = "Sorry, there was an error generating the logo.";
pub const SAVE_FAILED_MESSAGE: &str = "Sorry, the logo could not be saved.";
pub const NOTHING_TO_SAVE_MESSAGE: &str = "No logo has been generated yet.";

/// The generated-image pane. Hidden until a generation succeeds.
#[derive(Debug, Default)]
pub struct LogoPreview {
    path: Option<String>,
}

impl LogoPreview {
    pub fn is_visible(&self) -> bool {
        self.path.is_some()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

pub struct ConversationClient {
    service: BrandService,
    session: Session,
    log: ChatLog,
    preview: LogoPreview,
}

impl ConversationClient {
    pub fn new(service: BrandService) -> Self {
        ConversationClient {
            service,
            session: Session::new(),
            log: ChatLog::new(),
            preview: LogoPreview::default(),
        }
    }

    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn preview(&self) -> &LogoPreview {
        &self.preview
    }

    /// Open the conversation and render the greeting. On failure the session
    /// keeps no conversation id; there is no retry.
    pub async fn start(&mut self) {
        match self.service.start_conversation().await {
            Ok(reply) => {
                info!(conversation_id = %reply.conversation_id, "conversation started");
                self.session.conversation_id = Some(reply.conversation_id);
                if let Some(message) = reply.message {
                    self.log.push(Sender::Assistant, message);
                }
            }
            Err(err) => {
                error!(%err, "failed to start conversation");
                self.log.push(Sender::Assistant, START_FAILED_MESSAGE);
            }
        }
    }

    /// Send one user turn. Empty or whitespace-only input is a silent no-op.
    /// The user's text is rendered only after the round trip succeeds; on
    /// failure the transcript gains exactly one fixed message and the session
    /// is left untouched.
    pub async fn submit(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let raw = match self
            .service
            .process_response(self.session.conversation_id.as_deref(), text)
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                error!(%err, "failed to process user response");
                self.log.push(Sender::Assistant, TURN_FAILED_MESSAGE);
                return;
            }
        };

        self.log.push(Sender::User, text);

        let turn = Turn::from(raw);

        // Stage update and detail capture are keyed off the reply's stage
        // label, and happen before rendering so a generate-logo turn sees
        // this turn's answer.
        if let Some(label) = turn.stage.as_deref() {
            let stage = Stage::from_label(label);
            if self.session.record_answer(&stage, text) {
                debug!(stage = label, "captured brand detail");
            }
            self.session.stage = stage;
        }

        match turn.reply {
            Reply::Suggestions(suggestions) => {
                self.log
                    .push(Sender::Assistant, format_suggestions(&suggestions));
            }
            Reply::Question { question, options } => {
                self.log
                    .push(Sender::Assistant, format_question(&question, &options));
            }
            Reply::GenerateLogo => {
                self.log.push(Sender::Assistant, PREPARING_MESSAGE);
                self.generate_logo().await;
            }
            Reply::Message(message) => {
                self.log.push(Sender::Assistant, message);
            }
            Reply::Unrecognized => {
                debug!("reply carried no renderable shape");
            }
        }
    }

    /// Request logo generation from the accumulated brand details. A reply
    /// without `logo_path` is a failure no matter what else it carries; its
    /// `error` detail goes to the diagnostic log only.
    pub async fn generate_logo(&mut self) {
        debug!(details = ?self.session.brand_details, "requesting logo generation");
        match self.service.generate_logo(&self.session.brand_details).await {
            Ok(reply) => match reply.logo_path {
                Some(path) => {
                    info!(%path, "logo generated");
                    self.preview.path = Some(path);
                    self.log.push(Sender::Assistant, LOGO_SUCCESS_MESSAGE);
                    if let Some(prompt) = reply.prompt_used {
                        self.log
                            .push(Sender::Assistant, format!("Logo Generation Prompt: {prompt}"));
                    }
                }
                None => {
                    if let Some(detail) = reply.error {
                        error!(%detail, "logo generation reported an error");
                    }
                    self.log.push(Sender::Assistant, LOGO_FAILED_MESSAGE);
                }
            },
            Err(err) => {
                error!(%err, "logo generation request failed");
                self.log.push(Sender::Assistant, LOGO_REQUEST_FAILED_MESSAGE);
            }
        }
    }

    /// Save the previewed logo as `brand_logo.png` under `dest_dir`. Issues
    /// no request while the preview is hidden.
    pub async fn save_logo(&mut self, dest_dir: &Path) {
        let Some(path) = self.preview.path.clone() else {
            self.log.push(Sender::Assistant, NOTHING_TO_SAVE_MESSAGE);
            return;
        };

        let dest = dest_dir.join(constants::LOGO_FILENAME);
        match self.service.download_logo(&path, &dest).await {
            Ok(()) => {
                self.log
                    .push(Sender::Assistant, format!("Logo saved to {}.", dest.display()));
            }
            Err(err) => {
                error!(%err, "failed to save logo");
                self.log.push(Sender::Assistant, SAVE_FAILED_MESSAGE);
            }
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    let mut text = String::from(SUGGESTIONS_HEADER);
    for suggestion in suggestions {
        text.push('\n');
        text.push_str(suggestion);
    }
    text
}

fn format_question(question: &str, options: &[String]) -> String {
    let mut text = String::from(question);
    for (index, option) in options.iter().enumerate() {
        text.push_str(&format!("\n{}. {}", index + 1, option));
    }
    text
}
