use std::io::Cursor;

use clap::Args;
use talent_match::error::AppError;
use talent_match::matching::{
    BudgetRange, CandidateFilter, Complexity, ConstraintPolicy, MatchingEngine, MatchingProfile,
    WorkItem,
};
use talent_match::roster::{RosterImporter, RosterSource};

const SAMPLE_ROSTER: &str = include_str!("../data/sample_roster.csv");

const DEFAULT_DEMO_TOP: usize = 5;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of matches to show after filtering
    #[arg(long, default_value_t = DEFAULT_DEMO_TOP)]
    pub(crate) top: usize,
    /// Override the sample work description
    #[arg(long)]
    pub(crate) description: Option<String>,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            top: DEFAULT_DEMO_TOP,
            description: None,
        }
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let import = RosterImporter::from_reader(Cursor::new(SAMPLE_ROSTER), RosterSource::Standard)?;
    println!(
        "Sample roster: {} candidate(s), {} row(s) rejected",
        import.candidates.len(),
        import.rejected.len()
    );
    for rejection in &import.rejected {
        println!("  - line {}: {}", rejection.line, rejection.reason);
    }

    let engine = MatchingEngine::new(import.candidates, MatchingProfile::standard());
    let description = args.description.unwrap_or_else(|| {
        "Build a responsive React web app with CSS animations and JavaScript widgets".to_string()
    });
    let work = WorkItem::new(
        "demo-work",
        description,
        Vec::new(),
        BudgetRange::new(20.0, 100.0)?,
        Complexity::Medium,
        Some(21),
    )?;

    let required = engine.required_skills(&work);
    println!("\nWork: {}", work.description);
    println!("Required skills (inferred): {}", required.join(", "));
    println!("Budget: ${:.0}-${:.0}/hr", work.budget.min, work.budget.max);

    let policy = ConstraintPolicy::default();
    println!("\nFull ranking:");
    for (rank, breakdown) in engine.rank(&work, None).iter().enumerate() {
        let verdict = match policy.admit(&work, breakdown) {
            Ok(()) => "eligible".to_string(),
            Err(exclusion) => format!("excluded: {}", exclusion.summary()),
        };
        println!(
            "{:>2}. {:<16} combined {:.3} | content {:.3} | collaborative {:.3} | overlap {} | {}",
            rank + 1,
            breakdown.candidate.name,
            breakdown.combined,
            breakdown.content,
            breakdown.collaborative,
            breakdown.skill_overlap,
            verdict
        );
    }

    let top = engine.top_matches(&work, &policy, args.top);
    println!("\nTop {} after constraints:", top.len());
    for breakdown in &top {
        println!(
            "- {} ({}) at ${:.0}/hr, score {:.3}",
            breakdown.candidate.name,
            breakdown.candidate.title,
            breakdown.candidate.rate,
            breakdown.combined
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_roster_imports_with_one_rejection() {
        let import = RosterImporter::from_reader(Cursor::new(SAMPLE_ROSTER), RosterSource::Standard)
            .expect("sample parses");
        assert_eq!(import.candidates.len(), 9);
        assert_eq!(import.rejected.len(), 1);
        assert_eq!(import.rejected[0].line, 11);
    }

    #[test]
    fn demo_runs_end_to_end() {
        run_demo(DemoArgs::default()).expect("demo completes");
    }
}
