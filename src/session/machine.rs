//! The session state machine — maps (session, inbound text) to a transition.
//!
//! `transition()` is a pure function of the session record and the input:
//! it performs no I/O and mutates nothing. The engine applies the returned
//! field updates and state through the store, so a failure anywhere leaves
//! the persisted session exactly as it was before the attempt.

use std::sync::Arc;

use crate::careers::{CareerCatalog, CareerRecord};
use crate::prompts::PromptKey;

use super::model::{FieldUpdate, Grade, Language, Level, Pathway, Rating, Session, Subject, Term};
use super::state::SessionState;

/// Global commands, recognized only in non-strict states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Restart,
    Careers,
    More,
    Resume,
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        match input.to_ascii_uppercase().as_str() {
            "START" | "RESTART" => Some(Self::Restart),
            "CAREERS" => Some(Self::Careers),
            "MORE" => Some(Self::More),
            "RESUME" | "CONTINUE" => Some(Self::Resume),
            _ => None,
        }
    }
}

/// What to say back — a render plan, not rendered text. The engine turns
/// this into a string through the prompt resolver and career catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The plain prompt for a key.
    Prompt(PromptKey),
    /// Error prefix followed by the prompt for a key.
    InvalidThen(PromptKey),
    /// Grade 9 prediction announcement.
    PathwayResult(Pathway),
    /// Grade 7/8 feedback; `focus` is empty when every subject is strong.
    Improvement { focus: Vec<Subject> },
    /// Numbered career list page.
    CareerPage {
        pathway: Pathway,
        extended: bool,
        /// Prefix with the invalid-input notice (failed selection).
        invalid: bool,
    },
    /// Detail view after a valid career selection.
    CareerChosen { career: &'static CareerRecord },
}

/// Outcome of one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Persist `updates`, move to `next`, reply.
    Advance {
        updates: Vec<FieldUpdate>,
        next: SessionState,
        reply: Reply,
    },
    /// No mutation at all — re-prompt or remind.
    Stay { reply: Reply },
    /// Restart command: clear the session and return to language selection.
    Reset { reply: Reply },
    /// Free-text question: move to `next` (a paused state, or the current
    /// paused state) and forward `question` to the advisor.
    Delegate {
        question: String,
        next: SessionState,
    },
}

/// The transition engine. Holds the career catalog so selection validity and
/// the persisted career name come from the same table the pages are built
/// from.
pub struct StateMachine {
    catalog: Arc<CareerCatalog>,
}

impl StateMachine {
    pub fn new(catalog: Arc<CareerCatalog>) -> Self {
        Self { catalog }
    }

    /// The reply a fresh entry into `state` would produce. Resume goes
    /// through this same function, which is what makes the resumed prompt
    /// byte-identical to the original one.
    pub fn prompt_for_state(&self, state: &SessionState, session: &Session) -> Reply {
        match state {
            SessionState::LangSelect => Reply::Prompt(PromptKey::LanguageMenu),
            SessionState::LevelSelect => Reply::Prompt(PromptKey::LevelMenu),
            SessionState::JssGrade => Reply::Prompt(PromptKey::JssGradeMenu),
            SessionState::SeniorGrade => Reply::Prompt(PromptKey::SeniorGradeMenu),
            SessionState::Term => Reply::Prompt(PromptKey::TermMenu),
            SessionState::Math
            | SessionState::Science
            | SessionState::Social
            | SessionState::Creative
            | SessionState::Tech => {
                // rating_subject is Some for exactly these five states
                let subject = state.rating_subject().unwrap_or(Subject::Math);
                Reply::Prompt(PromptKey::rate(subject))
            }
            SessionState::PathwaySelect => Reply::Prompt(PromptKey::PathwayMenu),
            SessionState::CareerSelect { extended } => Reply::CareerPage {
                pathway: self.effective_pathway(session),
                extended: *extended,
                invalid: false,
            },
            SessionState::Done => Reply::Prompt(PromptKey::DoneReminder),
            SessionState::Paused { .. } => Reply::Prompt(PromptKey::ResumeHint),
        }
    }

    /// Compute the transition for one inbound message. Pure: no I/O, no
    /// session mutation.
    pub fn transition(&self, session: &Session, input: &str) -> Transition {
        let input = input.trim();

        // Empty input (USSD session open, blank SMS): re-emit the current
        // prompt without touching anything.
        if input.is_empty() {
            return Transition::Stay {
                reply: self.prompt_for_state(&session.state, session),
            };
        }

        // Paused sessions only honor RESUME and RESTART; everything else is
        // forwarded to the advisor.
        if let SessionState::Paused { resume_to } = &session.state {
            return match Command::parse(input) {
                Some(Command::Resume) => Transition::Advance {
                    updates: vec![],
                    next: (**resume_to).clone(),
                    reply: self.prompt_for_state(resume_to, session),
                },
                Some(Command::Restart) => Transition::Reset {
                    reply: Reply::Prompt(PromptKey::LanguageMenu),
                },
                _ => Transition::Delegate {
                    question: input.to_string(),
                    next: session.state.clone(),
                },
            };
        }

        // Global commands apply outside the strict numeric-menu states.
        if !session.state.is_strict() {
            if let Some(command) = Command::parse(input) {
                return self.handle_command(session, command);
            }
        }

        self.handle_state_input(session, input)
    }

    fn handle_command(&self, session: &Session, command: Command) -> Transition {
        match command {
            Command::Restart => Transition::Reset {
                reply: Reply::Prompt(PromptKey::LanguageMenu),
            },
            Command::Careers | Command::More => {
                let extended = matches!(command, Command::More)
                    || matches!(session.state, SessionState::CareerSelect { extended: true });
                match session.pathway {
                    Some(pathway) => Transition::Advance {
                        updates: vec![],
                        next: SessionState::CareerSelect { extended },
                        reply: Reply::CareerPage {
                            pathway,
                            extended,
                            invalid: false,
                        },
                    },
                    None => Transition::Stay {
                        reply: Reply::Prompt(PromptKey::CompleteAssessmentFirst),
                    },
                }
            }
            // RESUME outside a paused state: harmless, re-emit the prompt.
            Command::Resume => Transition::Stay {
                reply: self.prompt_for_state(&session.state, session),
            },
        }
    }

    fn handle_state_input(&self, session: &Session, input: &str) -> Transition {
        let digit = parse_menu_digit(input);

        match &session.state {
            SessionState::LangSelect => match Language::from_input(input) {
                Some(language) => Transition::Advance {
                    updates: vec![FieldUpdate::Language(language)],
                    next: SessionState::LevelSelect,
                    reply: Reply::Prompt(PromptKey::LevelMenu),
                },
                None => Transition::Stay {
                    reply: Reply::InvalidThen(PromptKey::LanguageMenu),
                },
            },

            SessionState::LevelSelect => match digit {
                Some(1) => Transition::Advance {
                    updates: vec![FieldUpdate::Level(Level::Jss)],
                    next: SessionState::JssGrade,
                    reply: Reply::Prompt(PromptKey::JssGradeMenu),
                },
                Some(2) => Transition::Advance {
                    updates: vec![FieldUpdate::Level(Level::Senior)],
                    next: SessionState::SeniorGrade,
                    reply: Reply::Prompt(PromptKey::SeniorGradeMenu),
                },
                _ => Transition::Stay {
                    reply: Reply::InvalidThen(PromptKey::LevelMenu),
                },
            },

            SessionState::JssGrade => {
                match digit.and_then(|d| Grade::from_menu_digit(Level::Jss, d)) {
                    Some(grade) => Transition::Advance {
                        updates: vec![FieldUpdate::Grade(grade)],
                        next: SessionState::Term,
                        reply: Reply::Prompt(PromptKey::TermMenu),
                    },
                    None => Transition::Stay {
                        reply: Reply::InvalidThen(PromptKey::JssGradeMenu),
                    },
                }
            }

            SessionState::SeniorGrade => {
                match digit.and_then(|d| Grade::from_menu_digit(Level::Senior, d)) {
                    Some(grade) => Transition::Advance {
                        updates: vec![FieldUpdate::Grade(grade)],
                        next: SessionState::PathwaySelect,
                        reply: Reply::Prompt(PromptKey::PathwayMenu),
                    },
                    None => Transition::Stay {
                        reply: Reply::InvalidThen(PromptKey::SeniorGradeMenu),
                    },
                }
            }

            SessionState::Term => match digit.and_then(Term::from_number) {
                Some(term) => Transition::Advance {
                    updates: vec![FieldUpdate::Term(term)],
                    next: SessionState::Math,
                    reply: Reply::Prompt(PromptKey::RateMath),
                },
                None => Transition::Stay {
                    reply: Reply::InvalidThen(PromptKey::TermMenu),
                },
            },

            state @ (SessionState::Math
            | SessionState::Science
            | SessionState::Social
            | SessionState::Creative
            | SessionState::Tech) => {
                let subject = state.rating_subject().unwrap_or(Subject::Math);
                match digit.and_then(Rating::from_menu_digit) {
                    Some(rating) => self.advance_rating(session, subject, rating),
                    None => Transition::Stay {
                        reply: Reply::InvalidThen(PromptKey::rate(subject)),
                    },
                }
            }

            SessionState::PathwaySelect => match digit.and_then(Pathway::from_menu_digit) {
                Some(pathway) => Transition::Advance {
                    updates: vec![FieldUpdate::Pathway(pathway)],
                    next: SessionState::CareerSelect { extended: false },
                    reply: Reply::CareerPage {
                        pathway,
                        extended: false,
                        invalid: false,
                    },
                },
                None => Transition::Stay {
                    reply: Reply::InvalidThen(PromptKey::PathwayMenu),
                },
            },

            SessionState::CareerSelect { extended } => {
                let pathway = self.effective_pathway(session);
                if let Ok(index) = input.parse::<usize>() {
                    match self.catalog.select(pathway, index, *extended) {
                        Some(career) => Transition::Advance {
                            updates: vec![FieldUpdate::CareerInterest(career.name.to_string())],
                            next: SessionState::Done,
                            reply: Reply::CareerChosen { career },
                        },
                        None => Transition::Stay {
                            reply: Reply::CareerPage {
                                pathway,
                                extended: *extended,
                                invalid: true,
                            },
                        },
                    }
                } else {
                    self.delegate(session, input)
                }
            }

            SessionState::Done => {
                if is_bare_digits(input) {
                    Transition::Stay {
                        reply: Reply::Prompt(PromptKey::DoneReminder),
                    }
                } else {
                    self.delegate(session, input)
                }
            }

            // Handled before the match.
            SessionState::Paused { .. } => Transition::Stay {
                reply: Reply::Prompt(PromptKey::ResumeHint),
            },
        }
    }

    /// Store a rating and advance; on the final subject, branch on grade.
    fn advance_rating(&self, session: &Session, subject: Subject, rating: Rating) -> Transition {
        if let Some(next) = session.state.next_rating_state() {
            let next_subject = next.rating_subject().unwrap_or(Subject::Technical);
            return Transition::Advance {
                updates: vec![FieldUpdate::Score(subject, rating)],
                next,
                reply: Reply::Prompt(PromptKey::rate(next_subject)),
            };
        }

        // Final subject: the Grade 9 flow gets a computed pathway, earlier
        // grades get improvement feedback.
        let mut scores = session.scores.clone();
        scores.set(subject, rating);

        if session.grade == Some(Grade::Grade9) {
            let pathway = crate::pathway::calculate(&scores);
            Transition::Advance {
                updates: vec![
                    FieldUpdate::Score(subject, rating),
                    FieldUpdate::Pathway(pathway),
                ],
                next: SessionState::Done,
                reply: Reply::PathwayResult(pathway),
            }
        } else {
            let focus = crate::pathway::improvement_focus(&scores);
            Transition::Advance {
                updates: vec![FieldUpdate::Score(subject, rating)],
                next: SessionState::Done,
                reply: Reply::Improvement { focus },
            }
        }
    }

    fn delegate(&self, session: &Session, question: &str) -> Transition {
        Transition::Delegate {
            question: question.to_string(),
            next: SessionState::Paused {
                resume_to: Box::new(session.state.clone()),
            },
        }
    }

    /// The pathway career pages are built from. A session in career
    /// selection without a recorded pathway is corrupted or legacy data;
    /// falling back to the STEM list keeps the flow alive but can mask the
    /// corruption, so it is logged when it fires.
    fn effective_pathway(&self, session: &Session) -> Pathway {
        session.pathway.unwrap_or_else(|| {
            tracing::warn!(
                phone = %session.phone,
                state = %session.state,
                "Session in career selection without a pathway; defaulting to STEM"
            );
            Pathway::default()
        })
    }
}

fn parse_menu_digit(input: &str) -> Option<u8> {
    if input.len() == 1 {
        input.chars().next()?.to_digit(10).map(|d| d as u8)
    } else {
        None
    }
}

fn is_bare_digits(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::model::ChannelKind;

    fn machine() -> StateMachine {
        StateMachine::new(Arc::new(CareerCatalog::new()))
    }

    fn session_at(state: SessionState) -> Session {
        let mut session = Session::new("+254700000001", ChannelKind::Sms);
        session.state = state;
        session
    }

    fn advance(transition: Transition) -> (Vec<FieldUpdate>, SessionState, Reply) {
        match transition {
            Transition::Advance {
                updates,
                next,
                reply,
            } => (updates, next, reply),
            other => panic!("expected Advance, got {other:?}"),
        }
    }

    #[test]
    fn command_parsing_is_case_insensitive() {
        assert_eq!(Command::parse("start"), Some(Command::Restart));
        assert_eq!(Command::parse("Restart"), Some(Command::Restart));
        assert_eq!(Command::parse("CAREERS"), Some(Command::Careers));
        assert_eq!(Command::parse("more"), Some(Command::More));
        assert_eq!(Command::parse("resume"), Some(Command::Resume));
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse("1"), None);
    }

    #[test]
    fn language_selection_advances_and_persists() {
        let machine = machine();
        let session = session_at(SessionState::LangSelect);
        let (updates, next, reply) = advance(machine.transition(&session, "2"));
        assert_eq!(updates, vec![FieldUpdate::Language(Language::Sw)]);
        assert_eq!(next, SessionState::LevelSelect);
        assert_eq!(reply, Reply::Prompt(PromptKey::LevelMenu));
    }

    #[test]
    fn invalid_language_input_is_idempotent() {
        let machine = machine();
        let session = session_at(SessionState::LangSelect);
        for bad in ["9", "abc", "0"] {
            match machine.transition(&session, bad) {
                Transition::Stay { reply } => {
                    assert_eq!(reply, Reply::InvalidThen(PromptKey::LanguageMenu));
                }
                other => panic!("expected Stay, got {other:?}"),
            }
        }
    }

    #[test]
    fn senior_track_skips_term() {
        let machine = machine();
        let session = session_at(SessionState::LevelSelect);
        let (updates, next, _) = advance(machine.transition(&session, "2"));
        assert_eq!(updates, vec![FieldUpdate::Level(Level::Senior)]);
        assert_eq!(next, SessionState::SeniorGrade);

        let mut session = session_at(SessionState::SeniorGrade);
        session.level = Some(Level::Senior);
        let (updates, next, reply) = advance(machine.transition(&session, "1"));
        assert_eq!(updates, vec![FieldUpdate::Grade(Grade::Grade10)]);
        // Straight to pathway choice — no term on the Senior track.
        assert_eq!(next, SessionState::PathwaySelect);
        assert_eq!(reply, Reply::Prompt(PromptKey::PathwayMenu));
    }

    #[test]
    fn jss_track_collects_term_then_ratings() {
        let machine = machine();
        let mut session = session_at(SessionState::JssGrade);
        session.level = Some(Level::Jss);
        let (_, next, _) = advance(machine.transition(&session, "3"));
        assert_eq!(next, SessionState::Term);

        session.state = SessionState::Term;
        let (updates, next, reply) = advance(machine.transition(&session, "2"));
        assert_eq!(updates, vec![FieldUpdate::Term(Term::Term2)]);
        assert_eq!(next, SessionState::Math);
        assert_eq!(reply, Reply::Prompt(PromptKey::RateMath));
    }

    #[test]
    fn rating_digit_one_stores_exceeding() {
        let machine = machine();
        let session = session_at(SessionState::Math);
        let (updates, next, _) = advance(machine.transition(&session, "1"));
        assert_eq!(
            updates,
            vec![FieldUpdate::Score(Subject::Math, Rating::Exceeding)]
        );
        assert_eq!(next, SessionState::Science);
    }

    #[test]
    fn invalid_rating_never_advances_or_mutates() {
        let machine = machine();
        let session = session_at(SessionState::Science);
        for bad in ["5", "0", "hello", "12"] {
            match machine.transition(&session, bad) {
                Transition::Stay { reply } => {
                    assert_eq!(reply, Reply::InvalidThen(PromptKey::RateScience));
                }
                other => panic!("expected Stay for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn commands_are_not_recognized_in_strict_states() {
        let machine = machine();
        let mut session = session_at(SessionState::Math);
        session.pathway = Some(Pathway::Stem);
        // A stray START during rating entry is just invalid input.
        match machine.transition(&session, "START") {
            Transition::Stay { reply } => {
                assert_eq!(reply, Reply::InvalidThen(PromptKey::RateMath));
            }
            other => panic!("expected Stay, got {other:?}"),
        }
    }

    #[test]
    fn grade9_final_rating_computes_pathway() {
        let machine = machine();
        let mut session = session_at(SessionState::Tech);
        session.grade = Some(Grade::Grade9);
        session.scores.math = Some(Rating::Exceeding);
        session.scores.science = Some(Rating::Exceeding);
        session.scores.social = Some(Rating::Below);
        session.scores.creative = Some(Rating::Below);

        let (updates, next, reply) = advance(machine.transition(&session, "1"));
        assert_eq!(next, SessionState::Done);
        assert_eq!(
            updates,
            vec![
                FieldUpdate::Score(Subject::Technical, Rating::Exceeding),
                FieldUpdate::Pathway(Pathway::Stem),
            ]
        );
        assert_eq!(reply, Reply::PathwayResult(Pathway::Stem));
    }

    #[test]
    fn grade7_final_rating_gives_improvement_feedback() {
        let machine = machine();
        let mut session = session_at(SessionState::Tech);
        session.grade = Some(Grade::Grade7);
        session.scores.math = Some(Rating::Below);
        session.scores.science = Some(Rating::Meeting);
        session.scores.social = Some(Rating::Meeting);
        session.scores.creative = Some(Rating::Exceeding);

        let (updates, next, reply) = advance(machine.transition(&session, "2"));
        assert_eq!(next, SessionState::Done);
        assert_eq!(
            updates,
            vec![FieldUpdate::Score(Subject::Technical, Rating::Meeting)]
        );
        assert_eq!(
            reply,
            Reply::Improvement {
                focus: vec![Subject::Math]
            }
        );
    }

    #[test]
    fn grade7_all_strong_feedback_has_no_focus() {
        let machine = machine();
        let mut session = session_at(SessionState::Tech);
        session.grade = Some(Grade::Grade8);
        for subject in [Subject::Math, Subject::Science, Subject::Social, Subject::Creative] {
            session.scores.set(subject, Rating::Exceeding);
        }
        let (_, _, reply) = advance(machine.transition(&session, "2"));
        assert_eq!(reply, Reply::Improvement { focus: vec![] });
    }

    #[test]
    fn pathway_selection_is_a_direct_choice() {
        let machine = machine();
        let mut session = session_at(SessionState::PathwaySelect);
        session.level = Some(Level::Senior);
        session.grade = Some(Grade::Grade11);

        let (updates, next, reply) = advance(machine.transition(&session, "3"));
        assert_eq!(updates, vec![FieldUpdate::Pathway(Pathway::ArtsAndSports)]);
        assert_eq!(next, SessionState::CareerSelect { extended: false });
        assert_eq!(
            reply,
            Reply::CareerPage {
                pathway: Pathway::ArtsAndSports,
                extended: false,
                invalid: false,
            }
        );
    }

    #[test]
    fn career_index_six_rejected_on_short_page_accepted_after_more() {
        let machine = machine();
        let mut session = session_at(SessionState::CareerSelect { extended: false });
        session.pathway = Some(Pathway::Stem);

        match machine.transition(&session, "6") {
            Transition::Stay { reply } => assert_eq!(
                reply,
                Reply::CareerPage {
                    pathway: Pathway::Stem,
                    extended: false,
                    invalid: true,
                }
            ),
            other => panic!("expected Stay, got {other:?}"),
        }

        let (_, next, _) = advance(machine.transition(&session, "MORE"));
        assert_eq!(next, SessionState::CareerSelect { extended: true });

        session.state = SessionState::CareerSelect { extended: true };
        let (updates, next, reply) = advance(machine.transition(&session, "6"));
        assert_eq!(next, SessionState::Done);
        match reply {
            Reply::CareerChosen { career } => {
                assert_eq!(updates, vec![FieldUpdate::CareerInterest(career.name.to_string())]);
            }
            other => panic!("expected CareerChosen, got {other:?}"),
        }
    }

    #[test]
    fn career_index_zero_is_rejected() {
        let machine = machine();
        let mut session = session_at(SessionState::CareerSelect { extended: false });
        session.pathway = Some(Pathway::SocialSciences);
        assert!(matches!(
            machine.transition(&session, "0"),
            Transition::Stay { .. }
        ));
    }

    #[test]
    fn careers_command_requires_a_pathway() {
        let machine = machine();
        let session = session_at(SessionState::Done);
        match machine.transition(&session, "CAREERS") {
            Transition::Stay { reply } => {
                assert_eq!(reply, Reply::Prompt(PromptKey::CompleteAssessmentFirst));
            }
            other => panic!("expected Stay, got {other:?}"),
        }
    }

    #[test]
    fn careers_command_jumps_to_selection_when_pathway_known() {
        let machine = machine();
        let mut session = session_at(SessionState::Done);
        session.pathway = Some(Pathway::SocialSciences);
        let (updates, next, reply) = advance(machine.transition(&session, "careers"));
        assert!(updates.is_empty());
        assert_eq!(next, SessionState::CareerSelect { extended: false });
        assert_eq!(
            reply,
            Reply::CareerPage {
                pathway: Pathway::SocialSciences,
                extended: false,
                invalid: false,
            }
        );
    }

    #[test]
    fn restart_resets_from_done_and_career_select() {
        let machine = machine();
        for state in [
            SessionState::Done,
            SessionState::CareerSelect { extended: true },
        ] {
            let mut session = session_at(state);
            session.pathway = Some(Pathway::Stem);
            match machine.transition(&session, "START") {
                Transition::Reset { reply } => {
                    assert_eq!(reply, Reply::Prompt(PromptKey::LanguageMenu));
                }
                other => panic!("expected Reset, got {other:?}"),
            }
        }
    }

    #[test]
    fn free_text_in_career_select_pauses_without_mutation() {
        let machine = machine();
        let mut session = session_at(SessionState::CareerSelect { extended: false });
        session.pathway = Some(Pathway::Stem);

        match machine.transition(&session, "what does an engineer do?") {
            Transition::Delegate { question, next } => {
                assert_eq!(question, "what does an engineer do?");
                assert_eq!(
                    next,
                    SessionState::Paused {
                        resume_to: Box::new(SessionState::CareerSelect { extended: false })
                    }
                );
            }
            other => panic!("expected Delegate, got {other:?}"),
        }
    }

    #[test]
    fn paused_forwards_more_free_text() {
        let machine = machine();
        let mut session = session_at(SessionState::Paused {
            resume_to: Box::new(SessionState::Done),
        });
        session.pathway = Some(Pathway::Stem);

        match machine.transition(&session, "and what about doctors?") {
            Transition::Delegate { next, .. } => assert_eq!(next, session.state),
            other => panic!("expected Delegate, got {other:?}"),
        }
    }

    #[test]
    fn resume_restores_the_exact_interrupted_prompt() {
        let machine = machine();
        let interrupted = SessionState::CareerSelect { extended: true };
        let mut session = session_at(SessionState::Paused {
            resume_to: Box::new(interrupted.clone()),
        });
        session.pathway = Some(Pathway::ArtsAndSports);

        let (updates, next, reply) = advance(machine.transition(&session, "RESUME"));
        assert!(updates.is_empty());
        assert_eq!(next, interrupted);
        // Same render plan a fresh entry would produce.
        let mut resumed = session.clone();
        resumed.state = interrupted.clone();
        assert_eq!(reply, machine.prompt_for_state(&interrupted, &resumed));
    }

    #[test]
    fn done_answers_digits_with_reminder() {
        let machine = machine();
        let session = session_at(SessionState::Done);
        match machine.transition(&session, "3") {
            Transition::Stay { reply } => {
                assert_eq!(reply, Reply::Prompt(PromptKey::DoneReminder));
            }
            other => panic!("expected Stay, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_reemits_current_prompt() {
        let machine = machine();
        let session = session_at(SessionState::Term);
        match machine.transition(&session, "") {
            Transition::Stay { reply } => {
                assert_eq!(reply, Reply::Prompt(PromptKey::TermMenu));
            }
            other => panic!("expected Stay, got {other:?}"),
        }
    }

    #[test]
    fn full_rating_sequence_visits_subjects_in_order() {
        let machine = machine();
        let mut session = session_at(SessionState::Math);
        session.grade = Some(Grade::Grade9);

        let mut visited = vec![];
        for digit in ["1", "1", "1", "1"] {
            visited.push(session.state.rating_subject().unwrap());
            let (updates, next, _) = advance(machine.transition(&session, digit));
            for update in &updates {
                session.apply(update);
            }
            session.state = next;
        }
        visited.push(session.state.rating_subject().unwrap());

        assert_eq!(visited, Subject::ALL);
        assert_eq!(session.state, SessionState::Tech);
    }
}
