//! Advisor — the free-text Q&A collaborator.
//!
//! Students can interrupt the menu flow with a real question ("what is
//! STEM?"); the engine pauses the session and forwards the text here. The
//! advisor is optional: without credentials, or on failure or timeout, the
//! engine answers with a fixed fallback string instead. Backed by rig-core's
//! Anthropic provider.

use std::sync::Arc;

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use secrecy::ExposeSecret;

use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::session::model::{Grade, Language, Level, Pathway, Session};

/// Session facts passed alongside a question so answers stay on-topic.
#[derive(Debug, Clone, Default)]
pub struct AdvisorContext {
    pub language: Language,
    pub level: Option<Level>,
    pub grade: Option<Grade>,
    pub pathway: Option<Pathway>,
}

impl AdvisorContext {
    pub fn from_session(session: &Session) -> Self {
        Self {
            language: session.language,
            level: session.level,
            grade: session.grade,
            pathway: session.pathway,
        }
    }

    /// Render the context as prompt lines prepended to the question.
    fn prompt_header(&self) -> String {
        let mut lines = vec![format!("Student language: {}", self.language.code())];
        if let Some(level) = self.level {
            lines.push(format!("Student level: {}", level.as_str()));
        }
        if let Some(grade) = self.grade {
            lines.push(format!("Student grade: {}", grade.number()));
        }
        if let Some(pathway) = self.pathway {
            lines.push(format!("Recommended pathway: {}", pathway.display_name()));
        }
        lines.join("\n")
    }
}

/// A collaborator that answers a student's free-text question.
///
/// Implementations must return promptly or fail — the engine additionally
/// wraps every call in a timeout and never retries.
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn ask(&self, context: &AdvisorContext, question: &str) -> Result<String, AdvisorError>;
}

const PREAMBLE: &str = "\
You are a career guidance assistant for Kenyan CBE students, reached over SMS.
Answer the student's question in at most three short sentences, in the
student's language. Stay on the topic of school subjects, pathways and
careers. Do not use markdown.";

/// rig-core backed advisor.
pub struct RigAdvisor<M: rig::completion::CompletionModel> {
    agent: rig::agent::Agent<M>,
}

#[async_trait]
impl<M: rig::completion::CompletionModel> Advisor for RigAdvisor<M> {
    async fn ask(&self, context: &AdvisorContext, question: &str) -> Result<String, AdvisorError> {
        let prompt = format!("{}\n\nQuestion: {}", context.prompt_header(), question);
        self.agent
            .prompt(prompt)
            .await
            .map_err(|e| AdvisorError::RequestFailed {
                reason: e.to_string(),
            })
    }
}

/// Create the Anthropic-backed advisor from configuration.
pub fn create_advisor(config: &AdvisorConfig) -> Result<Arc<dyn Advisor>, AdvisorError> {
    use rig::providers::anthropic;

    let client: rig::client::Client<anthropic::client::AnthropicExt> =
        anthropic::Client::new(config.api_key.expose_secret()).map_err(|e| {
            AdvisorError::RequestFailed {
                reason: format!("Failed to create Anthropic client: {}", e),
            }
        })?;

    let model = client.completion_model(&config.model);
    let agent = rig::agent::AgentBuilder::new(model)
        .preamble(PREAMBLE)
        .build();
    tracing::info!("Advisor enabled (model: {})", config.model);
    Ok(Arc::new(RigAdvisor { agent }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::model::ChannelKind;

    #[test]
    fn context_header_includes_known_facts() {
        let mut session = Session::new("+254700000001", ChannelKind::Sms);
        session.grade = Some(Grade::Grade9);
        session.pathway = Some(Pathway::Stem);
        let header = AdvisorContext::from_session(&session).prompt_header();
        assert!(header.contains("grade: 9"));
        assert!(header.contains("STEM"));
    }

    #[test]
    fn context_header_omits_unset_facts() {
        let session = Session::new("+254700000001", ChannelKind::Sms);
        let header = AdvisorContext::from_session(&session).prompt_header();
        assert!(!header.contains("grade"));
        assert!(!header.contains("pathway"));
    }

    #[tokio::test]
    async fn create_advisor_with_any_key_constructs() {
        // rig-core clients accept any string as API key at construction time.
        // The actual auth failure happens when making a request.
        let config = AdvisorConfig {
            api_key: secrecy::SecretString::from("test-key"),
            model: "claude-sonnet-4-20250514".to_string(),
        };
        assert!(create_advisor(&config).is_ok());
    }
}
