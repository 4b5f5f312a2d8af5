//! Career catalog — static, pre-ranked reference data.
//!
//! Catalog order is the authoritative ranking (sorted by market demand at
//! authoring time) and is never re-sorted at runtime. The short page shows
//! the top five; MORE extends to the full ten.

use crate::session::model::Pathway;

/// Careers visible before the MORE command.
pub const SHORT_PAGE: usize = 5;
/// Careers visible after the MORE command.
pub const FULL_PAGE: usize = 10;

/// One career in the catalog. Read-only reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CareerRecord {
    pub name: &'static str,
    /// Market demand indicator shown on list pages.
    pub demand: &'static str,
    /// Short trend note shown on the detail view.
    pub trend: &'static str,
    pub focus_subjects: &'static [&'static str],
    pub institutions: &'static [&'static str],
    pub entry_requirements: &'static str,
}

static STEM_CAREERS: [CareerRecord; FULL_PAGE] = [
    CareerRecord {
        name: "Engineering",
        demand: "Very high demand",
        trend: "Infrastructure and energy projects are driving steady hiring",
        focus_subjects: &["Mathematics", "Physics", "Technical Studies"],
        institutions: &["University of Nairobi", "JKUAT", "Moi University"],
        entry_requirements: "KCSE mean grade B+ with strong Mathematics and Physics",
    },
    CareerRecord {
        name: "Data Science",
        demand: "Very high demand",
        trend: "Fast-growing across banking, telecoms and agriculture",
        focus_subjects: &["Mathematics", "Computer Studies"],
        institutions: &["Strathmore University", "JKUAT", "University of Nairobi"],
        entry_requirements: "KCSE mean grade B+ with strong Mathematics",
    },
    CareerRecord {
        name: "Medicine",
        demand: "High demand",
        trend: "Consistent public and private sector shortage of doctors",
        focus_subjects: &["Biology", "Chemistry", "Mathematics"],
        institutions: &["University of Nairobi", "Moi University", "Kenyatta University"],
        entry_requirements: "KCSE mean grade A- with A in Biology and Chemistry",
    },
    CareerRecord {
        name: "Nursing",
        demand: "High demand",
        trend: "Strong local and international placement opportunities",
        focus_subjects: &["Biology", "Chemistry"],
        institutions: &["KMTC", "Kenyatta University", "Aga Khan University"],
        entry_requirements: "KCSE mean grade C+ with C+ in Biology",
    },
    CareerRecord {
        name: "Software Development",
        demand: "High demand",
        trend: "Nairobi's tech sector keeps absorbing junior developers",
        focus_subjects: &["Computer Studies", "Mathematics"],
        institutions: &["Strathmore University", "JKUAT", "Technical University of Kenya"],
        entry_requirements: "KCSE mean grade B with strong Mathematics",
    },
    CareerRecord {
        name: "Pharmacy",
        demand: "Moderate demand",
        trend: "Stable demand in hospitals and retail chains",
        focus_subjects: &["Chemistry", "Biology", "Mathematics"],
        institutions: &["University of Nairobi", "Kenyatta University", "Mount Kenya University"],
        entry_requirements: "KCSE mean grade B+ with B+ in Chemistry",
    },
    CareerRecord {
        name: "Architecture",
        demand: "Moderate demand",
        trend: "Tracks the construction cycle; strong portfolio matters",
        focus_subjects: &["Mathematics", "Physics", "Art & Design"],
        institutions: &["University of Nairobi", "JKUAT", "Technical University of Kenya"],
        entry_requirements: "KCSE mean grade B+ with strong Mathematics and Physics",
    },
    CareerRecord {
        name: "Actuarial Science",
        demand: "Moderate demand",
        trend: "Insurance and pensions sectors hire steadily but selectively",
        focus_subjects: &["Mathematics"],
        institutions: &["University of Nairobi", "Strathmore University", "JKUAT"],
        entry_requirements: "KCSE mean grade A- with A- in Mathematics",
    },
    CareerRecord {
        name: "Agricultural Science",
        demand: "Growing demand",
        trend: "Agri-tech and food security programmes are expanding",
        focus_subjects: &["Biology", "Chemistry", "Agriculture"],
        institutions: &["Egerton University", "JKUAT", "University of Eldoret"],
        entry_requirements: "KCSE mean grade C+ with C+ in Biology",
    },
    CareerRecord {
        name: "Laboratory Technology",
        demand: "Growing demand",
        trend: "County health facilities are expanding diagnostics capacity",
        focus_subjects: &["Biology", "Chemistry"],
        institutions: &["KMTC", "Technical University of Kenya", "Maseno University"],
        entry_requirements: "KCSE mean grade C with C in Biology and Chemistry",
    },
];

static SOCIAL_CAREERS: [CareerRecord; FULL_PAGE] = [
    CareerRecord {
        name: "Law",
        demand: "High demand",
        trend: "Commercial and technology law practices are growing",
        focus_subjects: &["English", "History", "Social Studies"],
        institutions: &["University of Nairobi", "Strathmore University", "Kenyatta University"],
        entry_requirements: "KCSE mean grade B+ with B+ in English",
    },
    CareerRecord {
        name: "Economics",
        demand: "High demand",
        trend: "Policy, banking and development agencies recruit yearly",
        focus_subjects: &["Mathematics", "Social Studies"],
        institutions: &["University of Nairobi", "Strathmore University", "Moi University"],
        entry_requirements: "KCSE mean grade B+ with strong Mathematics",
    },
    CareerRecord {
        name: "Psychology",
        demand: "Growing demand",
        trend: "Counselling services are expanding in schools and hospitals",
        focus_subjects: &["Biology", "Social Studies", "English"],
        institutions: &["Kenyatta University", "Daystar University", "USIU-Africa"],
        entry_requirements: "KCSE mean grade B with C+ in Biology",
    },
    CareerRecord {
        name: "Teaching",
        demand: "High demand",
        trend: "CBC rollout keeps demand for trained teachers high",
        focus_subjects: &["English", "Social Studies"],
        institutions: &["Kenyatta University", "Moi University", "Maseno University"],
        entry_requirements: "KCSE mean grade C+ with C+ in teaching subjects",
    },
    CareerRecord {
        name: "Journalism",
        demand: "Moderate demand",
        trend: "Digital media is replacing shrinking print newsrooms",
        focus_subjects: &["English", "Social Studies"],
        institutions: &["University of Nairobi", "Daystar University", "Multimedia University"],
        entry_requirements: "KCSE mean grade B- with B in English",
    },
    CareerRecord {
        name: "Social Work",
        demand: "Moderate demand",
        trend: "NGOs and county governments hire community officers",
        focus_subjects: &["Social Studies", "Religious Education"],
        institutions: &["University of Nairobi", "Kenyatta University", "Catholic University"],
        entry_requirements: "KCSE mean grade C+",
    },
    CareerRecord {
        name: "Public Administration",
        demand: "Moderate demand",
        trend: "Devolution created sustained county-level demand",
        focus_subjects: &["Social Studies", "English"],
        institutions: &["Kenyatta University", "Moi University", "Kisii University"],
        entry_requirements: "KCSE mean grade C+",
    },
    CareerRecord {
        name: "International Relations",
        demand: "Moderate demand",
        trend: "Regional bodies and NGOs based in Nairobi recruit graduates",
        focus_subjects: &["English", "History", "Social Studies"],
        institutions: &["USIU-Africa", "University of Nairobi", "Strathmore University"],
        entry_requirements: "KCSE mean grade B with B in English",
    },
    CareerRecord {
        name: "Human Resource Management",
        demand: "Moderate demand",
        trend: "Professionalizing across mid-size employers",
        focus_subjects: &["English", "Business Studies"],
        institutions: &["Kenyatta University", "KCA University", "Moi University"],
        entry_requirements: "KCSE mean grade C+",
    },
    CareerRecord {
        name: "Community Development",
        demand: "Growing demand",
        trend: "Donor-funded county programmes are expanding",
        focus_subjects: &["Social Studies", "Religious Education"],
        institutions: &["Maseno University", "Egerton University", "Daystar University"],
        entry_requirements: "KCSE mean grade C+",
    },
];

static ARTS_CAREERS: [CareerRecord; FULL_PAGE] = [
    CareerRecord {
        name: "Graphic Design",
        demand: "High demand",
        trend: "Every digital brand needs design; freelancing is viable",
        focus_subjects: &["Art & Design", "Computer Studies"],
        institutions: &["Technical University of Kenya", "Kenyatta University", "Buruburu Institute"],
        entry_requirements: "KCSE mean grade C with a portfolio",
    },
    CareerRecord {
        name: "Music",
        demand: "Growing demand",
        trend: "Streaming royalties and live events are expanding incomes",
        focus_subjects: &["Music", "Creative Arts"],
        institutions: &["Kenyatta University", "Kabarak University", "Sauti Academy"],
        entry_requirements: "KCSE mean grade C- with demonstrated ability",
    },
    CareerRecord {
        name: "Professional Sports",
        demand: "Growing demand",
        trend: "Athletics and football academies scout from school leagues",
        focus_subjects: &["Physical Education", "Creative Arts"],
        institutions: &["Kenyatta University", "Moi University", "National sports academies"],
        entry_requirements: "Demonstrated athletic performance; KCSE any grade",
    },
    CareerRecord {
        name: "Film & TV Production",
        demand: "Moderate demand",
        trend: "Local streaming commissions are lifting production budgets",
        focus_subjects: &["Creative Arts", "English"],
        institutions: &["Multimedia University", "Kenya Institute of Mass Communication", "ADMI"],
        entry_requirements: "KCSE mean grade C-",
    },
    CareerRecord {
        name: "Fashion Design",
        demand: "Moderate demand",
        trend: "Local fabric and export tailoring niches are growing",
        focus_subjects: &["Art & Design", "Home Science"],
        institutions: &["Kenyatta University", "Machakos University", "McEnsal School of Fashion"],
        entry_requirements: "KCSE mean grade C- with a portfolio",
    },
    CareerRecord {
        name: "Fine Art",
        demand: "Moderate demand",
        trend: "Gallery and commission work concentrated in major towns",
        focus_subjects: &["Art & Design"],
        institutions: &["Kenyatta University", "University of Nairobi", "Buruburu Institute"],
        entry_requirements: "KCSE mean grade C- with a portfolio",
    },
    CareerRecord {
        name: "Photography",
        demand: "Moderate demand",
        trend: "Events and commercial work sustain independent studios",
        focus_subjects: &["Art & Design", "Computer Studies"],
        institutions: &["ADMI", "Multimedia University", "East Africa Media Institute"],
        entry_requirements: "KCSE any grade with a portfolio",
    },
    CareerRecord {
        name: "Sports Management",
        demand: "Growing demand",
        trend: "Clubs and federations are professionalizing operations",
        focus_subjects: &["Physical Education", "Business Studies"],
        institutions: &["Kenyatta University", "Moi University", "USIU-Africa"],
        entry_requirements: "KCSE mean grade C+",
    },
    CareerRecord {
        name: "Dance & Choreography",
        demand: "Niche demand",
        trend: "Music video and live performance work is steady in cities",
        focus_subjects: &["Creative Arts", "Physical Education"],
        institutions: &["Kenya Performing Arts School", "GoDown Arts Centre", "Kenyatta University"],
        entry_requirements: "Audition-based; KCSE any grade",
    },
    CareerRecord {
        name: "Culinary Arts",
        demand: "Growing demand",
        trend: "Hospitality recovery is reopening hotel kitchens",
        focus_subjects: &["Home Science", "Creative Arts"],
        institutions: &["Kenya Utalii College", "Boma International Hospitality College", "NIBS"],
        entry_requirements: "KCSE mean grade D+",
    },
];

/// Read-only lookup over the static per-pathway tables. Constructed once at
/// startup and injected wherever career data is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct CareerCatalog;

impl CareerCatalog {
    pub fn new() -> Self {
        Self
    }

    /// The full ranked list for a pathway.
    pub fn list(&self, pathway: Pathway) -> &'static [CareerRecord] {
        match pathway {
            Pathway::Stem => &STEM_CAREERS,
            Pathway::SocialSciences => &SOCIAL_CAREERS,
            Pathway::ArtsAndSports => &ARTS_CAREERS,
        }
    }

    /// The visible page: top five, or the full ten after MORE.
    pub fn page(&self, pathway: Pathway, extended: bool) -> &'static [CareerRecord] {
        let list = self.list(pathway);
        if extended { list } else { &list[..SHORT_PAGE] }
    }

    /// Select a career by 1-based index into the visible page.
    pub fn select(
        &self,
        pathway: Pathway,
        index: usize,
        extended: bool,
    ) -> Option<&'static CareerRecord> {
        if index == 0 {
            return None;
        }
        self.page(pathway, extended).get(index - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pathway_has_a_full_catalog() {
        let catalog = CareerCatalog::new();
        for pathway in [Pathway::Stem, Pathway::SocialSciences, Pathway::ArtsAndSports] {
            assert_eq!(catalog.list(pathway).len(), FULL_PAGE);
            assert_eq!(catalog.page(pathway, false).len(), SHORT_PAGE);
            assert_eq!(catalog.page(pathway, true).len(), FULL_PAGE);
        }
    }

    #[test]
    fn catalog_order_is_stable() {
        let catalog = CareerCatalog::new();
        assert_eq!(catalog.list(Pathway::Stem)[0].name, "Engineering");
        assert_eq!(catalog.list(Pathway::SocialSciences)[0].name, "Law");
        assert_eq!(catalog.list(Pathway::ArtsAndSports)[0].name, "Graphic Design");
        // Page prefix matches the full list — no re-sorting.
        assert_eq!(
            catalog.page(Pathway::Stem, false),
            &catalog.list(Pathway::Stem)[..SHORT_PAGE]
        );
    }

    #[test]
    fn select_is_one_based_and_page_bounded() {
        let catalog = CareerCatalog::new();
        assert!(catalog.select(Pathway::Stem, 0, false).is_none());
        assert_eq!(
            catalog.select(Pathway::Stem, 1, false).map(|c| c.name),
            Some("Engineering")
        );
        // Index 6 is out of range on the short page, valid on the full page.
        assert!(catalog.select(Pathway::Stem, 6, false).is_none());
        assert!(catalog.select(Pathway::Stem, 6, true).is_some());
        assert!(catalog.select(Pathway::Stem, 11, true).is_none());
    }

    #[test]
    fn records_are_complete() {
        let catalog = CareerCatalog::new();
        for pathway in [Pathway::Stem, Pathway::SocialSciences, Pathway::ArtsAndSports] {
            for record in catalog.list(pathway) {
                assert!(!record.name.is_empty());
                assert!(!record.demand.is_empty());
                assert!(!record.trend.is_empty());
                assert!(!record.focus_subjects.is_empty());
                assert!(!record.institutions.is_empty());
                assert!(!record.entry_requirements.is_empty());
            }
        }
    }
}
