//! The session core: data model, state machine, and the engine that drives
//! one conversation turn end to end.

pub mod engine;
pub mod machine;
pub mod model;
pub mod state;

pub use engine::{EngineReply, SessionEngine};
pub use machine::{Command, Reply, StateMachine, Transition};
pub use model::{
    ChannelKind, FieldUpdate, Grade, Language, Level, Pathway, Rating, Session, Subject,
    SubjectScores, Term,
};
pub use state::SessionState;
