//! Session data model — the per-(phone, channel) assessment record and the
//! closed set of field mutations the store accepts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::SessionState;

/// Channel a session belongs to. One student can have independent sessions
/// on SMS and USSD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Sms,
    Ussd,
    Cli,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Ussd => "ussd",
            Self::Cli => "cli",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sms" => Some(Self::Sms),
            "ussd" => Some(Self::Ussd),
            "cli" => Some(Self::Cli),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Sw,
    Lh,
    Ki,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Sw => "sw",
            Self::Lh => "lh",
            Self::Ki => "ki",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "en" => Some(Self::En),
            "sw" => Some(Self::Sw),
            "lh" => Some(Self::Lh),
            "ki" => Some(Self::Ki),
            _ => None,
        }
    }

    /// Map a language-menu reply to a language. Accepts the menu digit or
    /// the language code itself.
    pub fn from_input(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Self::En),
            "2" => Some(Self::Sw),
            "3" => Some(Self::Lh),
            "4" => Some(Self::Ki),
            other => Self::from_code(&other.to_ascii_lowercase()),
        }
    }
}

/// School level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Jss,
    Senior,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jss => "jss",
            Self::Senior => "senior",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "jss" => Some(Self::Jss),
            "senior" => Some(Self::Senior),
            _ => None,
        }
    }
}

/// School grade. JSS covers 7–9, Senior School covers 10–12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    Grade7,
    Grade8,
    Grade9,
    Grade10,
    Grade11,
    Grade12,
}

impl Grade {
    pub fn number(&self) -> u8 {
        match self {
            Self::Grade7 => 7,
            Self::Grade8 => 8,
            Self::Grade9 => 9,
            Self::Grade10 => 10,
            Self::Grade11 => 11,
            Self::Grade12 => 12,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            7 => Some(Self::Grade7),
            8 => Some(Self::Grade8),
            9 => Some(Self::Grade9),
            10 => Some(Self::Grade10),
            11 => Some(Self::Grade11),
            12 => Some(Self::Grade12),
            _ => None,
        }
    }

    /// Map a grade-menu digit (1–3) to a grade within the given level.
    pub fn from_menu_digit(level: Level, digit: u8) -> Option<Self> {
        if !(1..=3).contains(&digit) {
            return None;
        }
        let base = match level {
            Level::Jss => 7,
            Level::Senior => 10,
        };
        Self::from_number(base + digit - 1)
    }

    pub fn level(&self) -> Level {
        if self.number() <= 9 { Level::Jss } else { Level::Senior }
    }
}

/// School term — collected on the JSS track only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    Term1,
    Term2,
    Term3,
}

impl Term {
    pub fn number(&self) -> u8 {
        match self {
            Self::Term1 => 1,
            Self::Term2 => 2,
            Self::Term3 => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Term1),
            2 => Some(Self::Term2),
            3 => Some(Self::Term3),
            _ => None,
        }
    }
}

/// CBE curriculum pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pathway {
    /// Default is the documented defensive fallback for sessions that reach
    /// career selection without a recorded pathway. See `CareerCatalog`.
    #[default]
    Stem,
    SocialSciences,
    ArtsAndSports,
}

impl Pathway {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stem => "stem",
            Self::SocialSciences => "social_sciences",
            Self::ArtsAndSports => "arts_and_sports",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "stem" => Some(Self::Stem),
            "social_sciences" => Some(Self::SocialSciences),
            "arts_and_sports" => Some(Self::ArtsAndSports),
            _ => None,
        }
    }

    /// User-facing display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Stem => "STEM",
            Self::SocialSciences => "Social Sciences",
            Self::ArtsAndSports => "Arts & Sports Science",
        }
    }

    /// Map a pathway-menu digit (1–3) to a pathway.
    pub fn from_menu_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Self::Stem),
            2 => Some(Self::SocialSciences),
            3 => Some(Self::ArtsAndSports),
            _ => None,
        }
    }
}

/// The five assessed subjects, in the fixed rating order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Math,
    Science,
    Social,
    Creative,
    Technical,
}

impl Subject {
    /// All subjects in assessment order.
    pub const ALL: [Subject; 5] = [
        Subject::Math,
        Subject::Science,
        Subject::Social,
        Subject::Creative,
        Subject::Technical,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Science => "science",
            Self::Social => "social",
            Self::Creative => "creative",
            Self::Technical => "technical",
        }
    }
}

/// A self-assessed competency rating. Menu position 1 is the *best* rating:
/// digit d maps to the value 5 − d.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Below,
    Approaching,
    Meeting,
    Exceeding,
}

impl Rating {
    pub fn value(&self) -> u8 {
        match self {
            Self::Below => 1,
            Self::Approaching => 2,
            Self::Meeting => 3,
            Self::Exceeding => 4,
        }
    }

    pub fn from_value(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::Below),
            2 => Some(Self::Approaching),
            3 => Some(Self::Meeting),
            4 => Some(Self::Exceeding),
            _ => None,
        }
    }

    /// Map a rating-menu digit to a rating (1 → Exceeding … 4 → Below).
    pub fn from_menu_digit(digit: u8) -> Option<Self> {
        if (1..=4).contains(&digit) {
            Self::from_value(5 - digit)
        } else {
            None
        }
    }
}

/// The five subject ratings collected during assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectScores {
    pub math: Option<Rating>,
    pub science: Option<Rating>,
    pub social: Option<Rating>,
    pub creative: Option<Rating>,
    pub technical: Option<Rating>,
}

impl SubjectScores {
    pub fn get(&self, subject: Subject) -> Option<Rating> {
        match subject {
            Subject::Math => self.math,
            Subject::Science => self.science,
            Subject::Social => self.social,
            Subject::Creative => self.creative,
            Subject::Technical => self.technical,
        }
    }

    pub fn set(&mut self, subject: Subject, rating: Rating) {
        match subject {
            Subject::Math => self.math = Some(rating),
            Subject::Science => self.science = Some(rating),
            Subject::Social => self.social = Some(rating),
            Subject::Creative => self.creative = Some(rating),
            Subject::Technical => self.technical = Some(rating),
        }
    }

    pub fn all_set(&self) -> bool {
        Subject::ALL.iter().all(|s| self.get(*s).is_some())
    }
}

/// A single persistable session mutation.
///
/// This is the closed set of fields the store accepts — an unknown field is
/// unrepresentable, so the string-keyed update bugs of the legacy flow
/// cannot happen here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Language(Language),
    Level(Level),
    Grade(Grade),
    Term(Term),
    Score(Subject, Rating),
    Pathway(Pathway),
    CareerInterest(String),
}

/// One student's assessment session on one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub phone: String,
    pub channel: ChannelKind,
    pub language: Language,
    pub level: Option<Level>,
    pub grade: Option<Grade>,
    pub term: Option<Term>,
    pub scores: SubjectScores,
    pub pathway: Option<Pathway>,
    pub career_interest: Option<String>,
    pub state: SessionState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// A fresh session at the language-selection step.
    pub fn new(phone: &str, channel: ChannelKind) -> Self {
        let now = Utc::now();
        Self {
            phone: phone.to_string(),
            channel,
            language: Language::default(),
            level: None,
            grade: None,
            term: None,
            scores: SubjectScores::default(),
            pathway: None,
            career_interest: None,
            state: SessionState::LangSelect,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a field update to the in-memory record. The store applies the
    /// same update to the persisted row; the two must stay in lockstep.
    pub fn apply(&mut self, update: &FieldUpdate) {
        match update {
            FieldUpdate::Language(l) => self.language = *l,
            FieldUpdate::Level(l) => self.level = Some(*l),
            FieldUpdate::Grade(g) => self.grade = Some(*g),
            FieldUpdate::Term(t) => self.term = Some(*t),
            FieldUpdate::Score(subject, rating) => self.scores.set(*subject, *rating),
            FieldUpdate::Pathway(p) => self.pathway = Some(*p),
            FieldUpdate::CareerInterest(name) => self.career_interest = Some(name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_menu_digit_is_inverted() {
        assert_eq!(Rating::from_menu_digit(1), Some(Rating::Exceeding));
        assert_eq!(Rating::from_menu_digit(2), Some(Rating::Meeting));
        assert_eq!(Rating::from_menu_digit(3), Some(Rating::Approaching));
        assert_eq!(Rating::from_menu_digit(4), Some(Rating::Below));
        assert_eq!(Rating::from_menu_digit(0), None);
        assert_eq!(Rating::from_menu_digit(5), None);
    }

    #[test]
    fn grade_menu_digit_respects_level() {
        assert_eq!(Grade::from_menu_digit(Level::Jss, 1), Some(Grade::Grade7));
        assert_eq!(Grade::from_menu_digit(Level::Jss, 3), Some(Grade::Grade9));
        assert_eq!(Grade::from_menu_digit(Level::Senior, 1), Some(Grade::Grade10));
        assert_eq!(Grade::from_menu_digit(Level::Senior, 3), Some(Grade::Grade12));
        assert_eq!(Grade::from_menu_digit(Level::Jss, 4), None);
        assert_eq!(Grade::from_menu_digit(Level::Senior, 0), None);
    }

    #[test]
    fn grade_level_split() {
        assert_eq!(Grade::Grade9.level(), Level::Jss);
        assert_eq!(Grade::Grade10.level(), Level::Senior);
    }

    #[test]
    fn language_from_input_accepts_digit_and_code() {
        assert_eq!(Language::from_input("1"), Some(Language::En));
        assert_eq!(Language::from_input("2"), Some(Language::Sw));
        assert_eq!(Language::from_input("sw"), Some(Language::Sw));
        assert_eq!(Language::from_input("KI"), Some(Language::Ki));
        assert_eq!(Language::from_input("5"), None);
        assert_eq!(Language::from_input("french"), None);
    }

    #[test]
    fn scores_set_and_completion() {
        let mut scores = SubjectScores::default();
        assert!(!scores.all_set());
        for subject in Subject::ALL {
            scores.set(subject, Rating::Meeting);
        }
        assert!(scores.all_set());
        assert_eq!(scores.get(Subject::Creative), Some(Rating::Meeting));
    }

    #[test]
    fn session_apply_matches_fields() {
        let mut session = Session::new("+254700000001", ChannelKind::Sms);
        session.apply(&FieldUpdate::Language(Language::Sw));
        session.apply(&FieldUpdate::Level(Level::Jss));
        session.apply(&FieldUpdate::Grade(Grade::Grade9));
        session.apply(&FieldUpdate::Score(Subject::Math, Rating::Exceeding));
        session.apply(&FieldUpdate::CareerInterest("Engineering".into()));

        assert_eq!(session.language, Language::Sw);
        assert_eq!(session.level, Some(Level::Jss));
        assert_eq!(session.grade, Some(Grade::Grade9));
        assert_eq!(session.scores.math, Some(Rating::Exceeding));
        assert_eq!(session.career_interest.as_deref(), Some("Engineering"));
    }
}
