use crate::matching::{
    BudgetRange, Candidate, CandidateId, Complexity, MatchingEngine, MatchingProfile, WorkItem,
};

pub(super) fn candidate(
    id: &str,
    title: &str,
    skills: &[&str],
    experience_years: u32,
    rating: f64,
    rate: f64,
) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        username: id.to_lowercase(),
        name: id.to_string(),
        title: title.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        experience_years,
        rating,
        rate,
        profile_url: format!("https://profiles.example/{id}"),
        available: true,
        completed_engagements: 0,
    }
}

pub(super) fn react_developer() -> Candidate {
    candidate("Ada", "Frontend Developer", &["React", "CSS"], 5, 4.5, 60.0)
}

pub(super) fn chef() -> Candidate {
    candidate("Bruno", "Chef", &["cooking"], 10, 5.0, 40.0)
}

pub(super) fn work(description: &str, skills: &[&str], min: f64, max: f64) -> WorkItem {
    work_with_complexity(description, skills, min, max, Complexity::Medium)
}

pub(super) fn work_with_complexity(
    description: &str,
    skills: &[&str],
    min: f64,
    max: f64,
    complexity: Complexity,
) -> WorkItem {
    WorkItem::new(
        "work-1",
        description,
        skills.iter().map(|s| s.to_string()).collect(),
        BudgetRange::new(min, max).expect("valid budget"),
        complexity,
        Some(14),
    )
    .expect("valid work item")
}

pub(super) fn standard_engine(candidates: Vec<Candidate>) -> MatchingEngine {
    MatchingEngine::new(candidates, MatchingProfile::standard())
}
