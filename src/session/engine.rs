//! SessionEngine — coordinates the store, state machine, prompt resolver,
//! career catalog, and advisor for one inbound message at a time.
//!
//! Within a session all work happens under a per-(phone, channel) async
//! lock held for the whole read → transition → persist span: the SMS/USSD
//! gateway does not serialize retries, so two near-simultaneous messages
//! from one phone would otherwise race on the read-modify-write and lose an
//! update.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::advisor::{Advisor, AdvisorContext};
use crate::careers::CareerCatalog;
use crate::error::Result;
use crate::prompts::{PromptKey, PromptResolver};
use crate::store::SessionStore;

use super::machine::{Reply, StateMachine, Transition};
use super::model::{ChannelKind, Session, Subject};
use super::state::SessionState;

/// Rendered outcome of one inbound message.
#[derive(Debug, Clone)]
pub struct EngineReply {
    /// Text to deliver back to the student.
    pub text: String,
    /// The session state after this message — USSD uses this to decide
    /// whether to keep its transport session open.
    pub state: SessionState,
}

/// Coordinates one conversation turn end to end.
pub struct SessionEngine {
    store: Arc<dyn SessionStore>,
    resolver: Arc<dyn PromptResolver>,
    catalog: Arc<CareerCatalog>,
    machine: StateMachine,
    advisor: Option<Arc<dyn Advisor>>,
    advisor_timeout: Duration,
    locks: Mutex<HashMap<(String, ChannelKind), Arc<Mutex<()>>>>,
}

impl SessionEngine {
    pub fn new(
        store: Arc<dyn SessionStore>,
        resolver: Arc<dyn PromptResolver>,
        catalog: Arc<CareerCatalog>,
        advisor: Option<Arc<dyn Advisor>>,
        advisor_timeout: Duration,
    ) -> Self {
        Self {
            store,
            resolver,
            catalog: Arc::clone(&catalog),
            machine: StateMachine::new(catalog),
            advisor,
            advisor_timeout,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Handle one inbound message and produce the reply text.
    ///
    /// Store failures propagate — the caller answers with the generic
    /// apology and the gateway may retry the message.
    pub async fn handle_message(
        &self,
        phone: &str,
        channel: ChannelKind,
        text: &str,
    ) -> Result<EngineReply> {
        let lock = self.session_lock(phone, channel).await;
        let _guard = lock.lock().await;

        let session = match self.store.get(phone, channel).await? {
            Some(session) => session,
            None => {
                // First contact: create the session lazily and greet.
                let session = Session::new(phone, channel);
                self.store.create(&session).await?;
                debug!(phone = %phone, channel = %channel, "New session");
                return Ok(EngineReply {
                    text: self.render(&Reply::Prompt(PromptKey::LanguageMenu), &session),
                    state: session.state,
                });
            }
        };

        let transition = self.machine.transition(&session, text);
        debug!(
            phone = %phone,
            channel = %channel,
            state = %session.state,
            "Transition computed"
        );

        match transition {
            Transition::Advance {
                updates,
                next,
                reply,
            } => {
                for update in &updates {
                    self.store.apply(phone, channel, update).await?;
                }
                if next != session.state {
                    self.store.set_state(phone, channel, &next).await?;
                }
                // Render against the post-update view so e.g. a language
                // choice answers in the newly chosen language.
                let mut updated = session;
                for update in &updates {
                    updated.apply(update);
                }
                updated.state = next.clone();
                Ok(EngineReply {
                    text: self.render(&reply, &updated),
                    state: next,
                })
            }

            Transition::Stay { reply } => Ok(EngineReply {
                text: self.render(&reply, &session),
                state: session.state,
            }),

            Transition::Reset { reply } => {
                self.store.reset(phone, channel).await?;
                let fresh = Session::new(phone, channel);
                Ok(EngineReply {
                    text: self.render(&reply, &fresh),
                    state: fresh.state,
                })
            }

            Transition::Delegate { question, next } => {
                if next != session.state {
                    self.store.set_state(phone, channel, &next).await?;
                }
                let answer = self.ask_advisor(&session, &question).await;
                let hint = self
                    .resolver
                    .resolve(PromptKey::ResumeHint, session.language);
                Ok(EngineReply {
                    text: format!("{answer}\n\n{hint}"),
                    state: next,
                })
            }
        }
    }

    /// The apology shown when a turn fails internally. English — if the
    /// store is down the session language is unknowable.
    pub fn apology(&self) -> String {
        self.resolver
            .resolve(PromptKey::Apology, Default::default())
    }

    async fn session_lock(&self, phone: &str, channel: ChannelKind) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry((phone.to_string(), channel))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Ask the advisor with a timeout; degrade to the fixed fallback on
    /// absence, failure, or timeout.
    async fn ask_advisor(&self, session: &Session, question: &str) -> String {
        let fallback = || {
            self.resolver
                .resolve(PromptKey::AdvisorUnavailable, session.language)
        };

        let Some(advisor) = &self.advisor else {
            return fallback();
        };

        let context = AdvisorContext::from_session(session);
        match tokio::time::timeout(self.advisor_timeout, advisor.ask(&context, question)).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                warn!(phone = %session.phone, error = %e, "Advisor call failed");
                fallback()
            }
            Err(_) => {
                warn!(
                    phone = %session.phone,
                    timeout = ?self.advisor_timeout,
                    "Advisor call timed out"
                );
                fallback()
            }
        }
    }

    /// Turn a render plan into the final reply text. All literal copy comes
    /// from the resolver; only computed values are interpolated here.
    fn render(&self, reply: &Reply, session: &Session) -> String {
        let lang = session.language;
        match reply {
            Reply::Prompt(key) => self.resolver.resolve(*key, lang),

            Reply::InvalidThen(key) => format!(
                "{}\n{}",
                self.resolver.resolve(PromptKey::InvalidInput, lang),
                self.resolver.resolve(*key, lang)
            ),

            Reply::PathwayResult(pathway) => self
                .resolver
                .resolve(PromptKey::PathwayResult, lang)
                .replace("{pathway}", pathway.display_name()),

            Reply::Improvement { focus } => {
                if focus.is_empty() {
                    self.resolver.resolve(PromptKey::ImprovementAllStrong, lang)
                } else {
                    let subjects = self.subject_list(focus, lang);
                    self.resolver
                        .resolve(PromptKey::ImprovementFocus, lang)
                        .replace("{subjects}", &subjects)
                }
            }

            Reply::CareerPage {
                pathway,
                extended,
                invalid,
            } => {
                let header = self
                    .resolver
                    .resolve(PromptKey::CareerListHeader, lang)
                    .replace("{pathway}", pathway.display_name());

                let mut lines = Vec::new();
                if *invalid {
                    lines.push(self.resolver.resolve(PromptKey::InvalidInput, lang));
                }
                lines.push(header);
                for (i, career) in self.catalog.page(*pathway, *extended).iter().enumerate() {
                    lines.push(format!("{}. {} ({})", i + 1, career.name, career.demand));
                }
                lines.push(self.resolver.resolve(PromptKey::CareerSelectHint, lang));
                if !*extended {
                    lines.push(self.resolver.resolve(PromptKey::CareerMoreHint, lang));
                }
                lines.join("\n")
            }

            Reply::CareerChosen { career } => self
                .resolver
                .resolve(PromptKey::CareerChosen, lang)
                .replace("{career}", career.name)
                .replace("{demand}", career.demand)
                .replace("{trend}", career.trend)
                .replace("{subjects}", &career.focus_subjects.join(", "))
                .replace("{institutions}", &career.institutions.join(", "))
                .replace("{requirements}", career.entry_requirements),
        }
    }

    fn subject_list(&self, subjects: &[Subject], lang: crate::session::model::Language) -> String {
        subjects
            .iter()
            .map(|s| self.resolver.subject_name(*s, lang))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
