use super::common::*;
use crate::matching::{
    CandidateFilter, Complexity, ConstraintPolicy, Exclusion, ScoreBreakdown,
};

#[test]
fn budget_filter_excludes_top_scorer_priced_out() {
    let expensive = candidate("Pricey", "Senior React Developer", &["React", "CSS"], 12, 5.0, 150.0);
    let affordable = candidate("Frugal", "React Developer", &["React", "CSS"], 3, 4.0, 45.0);
    let engine = standard_engine(vec![affordable, expensive]);
    let work = work("React and CSS storefront", &["React", "CSS"], 20.0, 100.0);

    let ranked = engine.rank(&work, None);
    assert_eq!(ranked[0].candidate.name, "Pricey");

    let top = engine.top_matches(&work, &ConstraintPolicy::default(), 5);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].candidate.name, "Frugal");
}

#[test]
fn unavailable_candidates_are_dropped_only_for_high_complexity() {
    let mut busy = react_developer();
    busy.available = false;
    let engine = standard_engine(vec![busy]);
    let policy = ConstraintPolicy::default();

    let high = work_with_complexity("React app", &["React", "CSS"], 0.0, 100.0, Complexity::High);
    assert!(engine.top_matches(&high, &policy, 5).is_empty());

    let low = work_with_complexity("React app", &["React", "CSS"], 0.0, 100.0, Complexity::Low);
    assert_eq!(engine.top_matches(&low, &policy, 5).len(), 1);
}

#[test]
fn skill_overlap_threshold_uses_raw_count() {
    let engine = standard_engine(vec![react_developer()]);
    let work = work("React app", &["React", "Rust"], 0.0, 100.0);

    assert!(engine.top_matches(&work, &ConstraintPolicy::default(), 5).is_empty());
    let relaxed = ConstraintPolicy::default().with_min_skill_overlap(1);
    assert_eq!(engine.top_matches(&work, &relaxed, 5).len(), 1);
}

#[test]
fn exclusions_report_their_reason() {
    let candidate = candidate("Pricey", "Dev", &["React"], 1, 4.0, 150.0);
    let breakdown = ScoreBreakdown {
        candidate: &candidate,
        content: 0.0,
        collaborative: 0.0,
        skill_overlap: 1,
        combined: 0.0,
    };
    let work = work("React app", &["React"], 20.0, 100.0);

    let exclusion = ConstraintPolicy::default()
        .admit(&work, &breakdown)
        .expect_err("rate outside budget");
    assert_eq!(
        exclusion,
        Exclusion::RateOutsideBudget {
            rate: 150.0,
            min: 20.0,
            max: 100.0
        }
    );
    assert_eq!(exclusion.summary(), "rate 150.00 outside budget 20.00-100.00");

    let overlap = ConstraintPolicy {
        enforce_budget: false,
        ..ConstraintPolicy::default()
    }
    .admit(&work, &breakdown)
    .expect_err("overlap below minimum");
    assert_eq!(overlap.summary(), "skill overlap 1 below minimum 2");
}

#[test]
fn permissive_policy_truncates_to_top_n() {
    let engine = standard_engine(vec![react_developer(), chef()]);
    let work = work("anything", &[], 0.0, 1.0);
    let top = engine.top_matches(&work, &ConstraintPolicy::permissive(), 1);
    assert_eq!(top.len(), 1);
}
