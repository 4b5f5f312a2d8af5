//! Prompt resolution — all user-facing copy lives here, keyed by a stable
//! `PromptKey` per state/branch and a language.
//!
//! The engine never builds user-facing sentences itself; it only
//! interpolates computed values (pathway name, career fields, subject list)
//! into `{placeholder}` slots in the templates returned here.

use crate::session::model::{Language, Subject};

/// Stable identifier for a piece of user-facing copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKey {
    /// Welcome + language menu. Shown before a language is chosen, so it is
    /// the same in every language.
    LanguageMenu,
    LevelMenu,
    JssGradeMenu,
    SeniorGradeMenu,
    TermMenu,
    RateMath,
    RateScience,
    RateSocial,
    RateCreative,
    RateTech,
    PathwayMenu,
    /// Template with `{pathway}`.
    PathwayResult,
    /// Template with `{subjects}` — grades 7/8 feedback.
    ImprovementFocus,
    ImprovementAllStrong,
    /// Template with `{pathway}` — header above the numbered career list.
    CareerListHeader,
    CareerSelectHint,
    CareerMoreHint,
    /// Template with `{career}`, `{demand}`, `{trend}`, `{subjects}`,
    /// `{institutions}`, `{requirements}`.
    CareerChosen,
    DoneReminder,
    CompleteAssessmentFirst,
    InvalidInput,
    Apology,
    ResumeHint,
    AdvisorUnavailable,
}

impl PromptKey {
    /// The rating prompt for a subject.
    pub fn rate(subject: Subject) -> Self {
        match subject {
            Subject::Math => Self::RateMath,
            Subject::Science => Self::RateScience,
            Subject::Social => Self::RateSocial,
            Subject::Creative => Self::RateCreative,
            Subject::Technical => Self::RateTech,
        }
    }
}

/// Resolves a prompt key to literal text in a language.
pub trait PromptResolver: Send + Sync {
    fn resolve(&self, key: PromptKey, language: Language) -> String;

    /// Display name for a subject, used when filling `{subjects}` slots.
    fn subject_name(&self, subject: Subject, language: Language) -> &'static str;
}

/// Static-table resolver. English and Kiswahili are fully translated;
/// Luhya and Gikuyu fall back to English per key until their copy lands.
// TODO: Luhya and Gikuyu tables pending translated copy from the content team.
#[derive(Debug, Clone, Copy, Default)]
pub struct TablePromptResolver;

impl TablePromptResolver {
    pub fn new() -> Self {
        Self
    }
}

impl PromptResolver for TablePromptResolver {
    fn resolve(&self, key: PromptKey, language: Language) -> String {
        let text = match language {
            Language::En => en(key),
            Language::Sw => sw(key).unwrap_or_else(|| en(key)),
            Language::Lh => lh(key).unwrap_or_else(|| en(key)),
            Language::Ki => ki(key).unwrap_or_else(|| en(key)),
        };
        text.to_string()
    }

    fn subject_name(&self, subject: Subject, language: Language) -> &'static str {
        match language {
            Language::Sw => match subject {
                Subject::Math => "Hisabati",
                Subject::Science => "Sayansi",
                Subject::Social => "Maarifa ya Jamii",
                Subject::Creative => "Sanaa za Ubunifu",
                Subject::Technical => "Stadi za Ufundi",
            },
            _ => match subject {
                Subject::Math => "Mathematics",
                Subject::Science => "Science",
                Subject::Social => "Social Studies",
                Subject::Creative => "Creative Arts",
                Subject::Technical => "Technical Skills",
            },
        }
    }
}

fn en(key: PromptKey) -> &'static str {
    match key {
        PromptKey::LanguageMenu => {
            "Welcome to Edutena CBE.\nChoose your language / Chagua lugha:\n1. English\n2. Kiswahili\n3. Luhya\n4. Gikuyu"
        }
        PromptKey::LevelMenu => "Select your level:\n1. JSS\n2. Senior School",
        PromptKey::JssGradeMenu => "Select your grade:\n1. Grade 7\n2. Grade 8\n3. Grade 9",
        PromptKey::SeniorGradeMenu => "Select your grade:\n1. Grade 10\n2. Grade 11\n3. Grade 12",
        PromptKey::TermMenu => "Select the current term:\n1. Term 1\n2. Term 2\n3. Term 3",
        PromptKey::RateMath => {
            "Rate Mathematics:\n1. Exceeding\n2. Meeting\n3. Approaching\n4. Below"
        }
        PromptKey::RateScience => {
            "Rate Science:\n1. Exceeding\n2. Meeting\n3. Approaching\n4. Below"
        }
        PromptKey::RateSocial => {
            "Rate Social Studies:\n1. Exceeding\n2. Meeting\n3. Approaching\n4. Below"
        }
        PromptKey::RateCreative => {
            "Rate Creative Arts:\n1. Exceeding\n2. Meeting\n3. Approaching\n4. Below"
        }
        PromptKey::RateTech => {
            "Rate Technical Skills:\n1. Exceeding\n2. Meeting\n3. Approaching\n4. Below"
        }
        PromptKey::PathwayMenu => {
            "Choose your pathway:\n1. STEM\n2. Social Sciences\n3. Arts & Sports Science"
        }
        PromptKey::PathwayResult => {
            "Recommended Pathway:\n{pathway}\nReply CAREERS to see matching careers."
        }
        PromptKey::ImprovementFocus => {
            "Assessment complete. Focus on improving: {subjects}.\nKeep practising and retake the assessment next term."
        }
        PromptKey::ImprovementAllStrong => {
            "Assessment complete. Strong performance across all subjects - keep it up!"
        }
        PromptKey::CareerListHeader => "Careers in {pathway}:",
        PromptKey::CareerSelectHint => "Reply with a number to learn more.",
        PromptKey::CareerMoreHint => "Reply MORE to see the full list.",
        PromptKey::CareerChosen => {
            "{career}\nDemand: {demand}\nTrend: {trend}\nKey subjects: {subjects}\nWhere to study: {institutions}\nEntry: {requirements}"
        }
        PromptKey::DoneReminder => {
            "Assessment complete. Reply CAREERS to browse careers or START to begin again."
        }
        PromptKey::CompleteAssessmentFirst => {
            "Please complete the assessment first. Reply START to begin."
        }
        PromptKey::InvalidInput => "Invalid input.",
        PromptKey::Apology => "Sorry, something went wrong. Please reply START to restart.",
        PromptKey::ResumeHint => "Reply RESUME to continue your assessment.",
        PromptKey::AdvisorUnavailable => {
            "I can't answer questions right now. Reply RESUME to continue your assessment."
        }
    }
}

fn sw(key: PromptKey) -> Option<&'static str> {
    let text = match key {
        PromptKey::LanguageMenu => return None, // shown pre-selection, English table is canonical
        PromptKey::LevelMenu => "Chagua kiwango chako:\n1. JSS\n2. Shule ya Upili",
        PromptKey::JssGradeMenu => "Chagua gredi yako:\n1. Gredi 7\n2. Gredi 8\n3. Gredi 9",
        PromptKey::SeniorGradeMenu => "Chagua gredi yako:\n1. Gredi 10\n2. Gredi 11\n3. Gredi 12",
        PromptKey::TermMenu => "Chagua muhula wa sasa:\n1. Muhula 1\n2. Muhula 2\n3. Muhula 3",
        PromptKey::RateMath => {
            "Kadiria Hisabati:\n1. Zaidi ya matarajio\n2. Inafikia\n3. Inakaribia\n4. Chini ya matarajio"
        }
        PromptKey::RateScience => {
            "Kadiria Sayansi:\n1. Zaidi ya matarajio\n2. Inafikia\n3. Inakaribia\n4. Chini ya matarajio"
        }
        PromptKey::RateSocial => {
            "Kadiria Maarifa ya Jamii:\n1. Zaidi ya matarajio\n2. Inafikia\n3. Inakaribia\n4. Chini ya matarajio"
        }
        PromptKey::RateCreative => {
            "Kadiria Sanaa za Ubunifu:\n1. Zaidi ya matarajio\n2. Inafikia\n3. Inakaribia\n4. Chini ya matarajio"
        }
        PromptKey::RateTech => {
            "Kadiria Stadi za Ufundi:\n1. Zaidi ya matarajio\n2. Inafikia\n3. Inakaribia\n4. Chini ya matarajio"
        }
        PromptKey::PathwayMenu => {
            "Chagua njia yako:\n1. STEM\n2. Sayansi za Jamii\n3. Sanaa na Michezo"
        }
        PromptKey::PathwayResult => {
            "Njia inayopendekezwa:\n{pathway}\nJibu CAREERS kuona kazi zinazolingana."
        }
        PromptKey::ImprovementFocus => {
            "Tathmini imekamilika. Zingatia kuboresha: {subjects}.\nEndelea kujifunza na urudie tathmini muhula ujao."
        }
        PromptKey::ImprovementAllStrong => {
            "Tathmini imekamilika. Matokeo mazuri katika masomo yote - endelea hivyo!"
        }
        PromptKey::CareerListHeader => "Kazi katika {pathway}:",
        PromptKey::CareerSelectHint => "Jibu kwa nambari kupata maelezo zaidi.",
        PromptKey::CareerMoreHint => "Jibu MORE kuona orodha kamili.",
        PromptKey::CareerChosen => {
            "{career}\nMahitaji sokoni: {demand}\nMwelekeo: {trend}\nMasomo muhimu: {subjects}\nMahali pa kusoma: {institutions}\nVigezo: {requirements}"
        }
        PromptKey::DoneReminder => {
            "Tathmini imekamilika. Jibu CAREERS kuona kazi au START kuanza upya."
        }
        PromptKey::CompleteAssessmentFirst => {
            "Tafadhali kamilisha tathmini kwanza. Jibu START kuanza."
        }
        PromptKey::InvalidInput => "Jibu si sahihi.",
        PromptKey::Apology => "Samahani, hitilafu imetokea. Tafadhali jibu START kuanza upya.",
        PromptKey::ResumeHint => "Jibu RESUME kuendelea na tathmini yako.",
        PromptKey::AdvisorUnavailable => {
            "Siwezi kujibu maswali kwa sasa. Jibu RESUME kuendelea na tathmini yako."
        }
    };
    Some(text)
}

fn lh(_key: PromptKey) -> Option<&'static str> {
    None
}

fn ki(_key: PromptKey) -> Option<&'static str> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_covers_every_key() {
        let keys = [
            PromptKey::LanguageMenu,
            PromptKey::LevelMenu,
            PromptKey::JssGradeMenu,
            PromptKey::SeniorGradeMenu,
            PromptKey::TermMenu,
            PromptKey::RateMath,
            PromptKey::RateScience,
            PromptKey::RateSocial,
            PromptKey::RateCreative,
            PromptKey::RateTech,
            PromptKey::PathwayMenu,
            PromptKey::PathwayResult,
            PromptKey::ImprovementFocus,
            PromptKey::ImprovementAllStrong,
            PromptKey::CareerListHeader,
            PromptKey::CareerSelectHint,
            PromptKey::CareerMoreHint,
            PromptKey::CareerChosen,
            PromptKey::DoneReminder,
            PromptKey::CompleteAssessmentFirst,
            PromptKey::InvalidInput,
            PromptKey::Apology,
            PromptKey::ResumeHint,
            PromptKey::AdvisorUnavailable,
        ];
        let resolver = TablePromptResolver::new();
        for key in keys {
            assert!(!resolver.resolve(key, Language::En).is_empty());
        }
    }

    #[test]
    fn swahili_rating_prompt_is_translated() {
        let resolver = TablePromptResolver::new();
        let text = resolver.resolve(PromptKey::RateMath, Language::Sw);
        assert!(text.contains("Hisabati"));
        assert!(text.starts_with("Kadiria"));
    }

    #[test]
    fn untranslated_languages_fall_back_to_english() {
        let resolver = TablePromptResolver::new();
        assert_eq!(
            resolver.resolve(PromptKey::LevelMenu, Language::Lh),
            resolver.resolve(PromptKey::LevelMenu, Language::En)
        );
        assert_eq!(
            resolver.resolve(PromptKey::DoneReminder, Language::Ki),
            resolver.resolve(PromptKey::DoneReminder, Language::En)
        );
    }

    #[test]
    fn rate_key_maps_each_subject() {
        assert_eq!(PromptKey::rate(Subject::Math), PromptKey::RateMath);
        assert_eq!(PromptKey::rate(Subject::Technical), PromptKey::RateTech);
    }

    #[test]
    fn templates_carry_their_placeholders() {
        let resolver = TablePromptResolver::new();
        for lang in [Language::En, Language::Sw] {
            assert!(resolver.resolve(PromptKey::PathwayResult, lang).contains("{pathway}"));
            assert!(resolver.resolve(PromptKey::ImprovementFocus, lang).contains("{subjects}"));
            assert!(resolver.resolve(PromptKey::CareerChosen, lang).contains("{career}"));
        }
    }
}
