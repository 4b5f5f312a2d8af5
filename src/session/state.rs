//! Session state machine states.
//!
//! The flow is directed and mostly linear, with no cycles except the
//! explicit restart command:
//!
//! `LangSelect → LevelSelect → { JssGrade → Term → Math → Science → Social →
//! Creative → Tech → Done } | { SeniorGrade → PathwaySelect → CareerSelect →
//! Done }`
//!
//! A paused session wraps the interrupted state as structured data rather
//! than a string prefix, so resuming cannot lose or garble it.

use serde::{Deserialize, Serialize};

use super::model::Subject;

/// The current step of an assessment session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    LangSelect,
    LevelSelect,
    JssGrade,
    SeniorGrade,
    Term,
    Math,
    Science,
    Social,
    Creative,
    Tech,
    PathwaySelect,
    CareerSelect {
        /// Whether the full catalog page is visible (after MORE).
        extended: bool,
    },
    Done,
    /// Interrupted by a free-text question; `resume_to` is restored verbatim
    /// by the RESUME command.
    Paused { resume_to: Box<SessionState> },
}

impl SessionState {
    /// Strict states accept only their menu digits: no global commands, no
    /// advisor delegation. Everything else falls through to an invalid-input
    /// re-prompt.
    pub fn is_strict(&self) -> bool {
        matches!(
            self,
            Self::LangSelect
                | Self::LevelSelect
                | Self::JssGrade
                | Self::SeniorGrade
                | Self::Term
                | Self::Math
                | Self::Science
                | Self::Social
                | Self::Creative
                | Self::Tech
                | Self::PathwaySelect
        )
    }

    /// The subject being rated in this state, if it is a rating state.
    pub fn rating_subject(&self) -> Option<Subject> {
        match self {
            Self::Math => Some(Subject::Math),
            Self::Science => Some(Subject::Science),
            Self::Social => Some(Subject::Social),
            Self::Creative => Some(Subject::Creative),
            Self::Tech => Some(Subject::Technical),
            _ => None,
        }
    }

    /// The rating state that follows this one, if any. `Tech` has no
    /// successor here — the machine branches on grade instead.
    pub fn next_rating_state(&self) -> Option<SessionState> {
        match self {
            Self::Math => Some(Self::Science),
            Self::Science => Some(Self::Social),
            Self::Social => Some(Self::Creative),
            Self::Creative => Some(Self::Tech),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused { .. })
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::LangSelect
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LangSelect => write!(f, "lang_select"),
            Self::LevelSelect => write!(f, "level_select"),
            Self::JssGrade => write!(f, "jss_grade"),
            Self::SeniorGrade => write!(f, "senior_grade"),
            Self::Term => write!(f, "term"),
            Self::Math => write!(f, "math"),
            Self::Science => write!(f, "science"),
            Self::Social => write!(f, "social"),
            Self::Creative => write!(f, "creative"),
            Self::Tech => write!(f, "tech"),
            Self::PathwaySelect => write!(f, "pathway_select"),
            Self::CareerSelect { extended: false } => write!(f, "career_select"),
            Self::CareerSelect { extended: true } => write!(f, "career_select_all"),
            Self::Done => write!(f, "done"),
            Self::Paused { resume_to } => write!(f, "paused({resume_to})"),
        }
    }
}
