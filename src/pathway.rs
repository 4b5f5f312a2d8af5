//! Pathway scoring — the deterministic recommendation at the end of a
//! Grade 9 assessment, and the improvement feedback for earlier grades.

use crate::session::model::{Pathway, Rating, Subject, SubjectScores};

fn value(rating: Option<Rating>) -> u32 {
    rating.map(|r| r.value() as u32).unwrap_or(0)
}

/// Compute the recommended pathway from the five subject ratings.
///
/// `stem = math + science + technical`, `social = social × 2`,
/// `arts = creative × 2`; unset ratings count as 0. Comparisons are
/// evaluated in order with `>=`, so ties resolve STEM > Social Sciences >
/// Arts & Sports — all-equal ratings always yield STEM. The tie-break order
/// is load-bearing; do not reorder.
pub fn calculate(scores: &SubjectScores) -> Pathway {
    let stem = value(scores.math) + value(scores.science) + value(scores.technical);
    let social = value(scores.social) * 2;
    let arts = value(scores.creative) * 2;

    if stem >= social && stem >= arts {
        Pathway::Stem
    } else if social >= stem && social >= arts {
        Pathway::SocialSciences
    } else {
        Pathway::ArtsAndSports
    }
}

/// Subjects rated Approaching or Below, in assessment order. These become
/// the focus areas in the Grade 7/8 feedback reply; an empty list means
/// every subject is at Meeting or better.
pub fn improvement_focus(scores: &SubjectScores) -> Vec<Subject> {
    Subject::ALL
        .into_iter()
        .filter(|subject| value(scores.get(*subject)) <= Rating::Approaching.value() as u32)
        .collect()
}
