use std::io::{BufRead, Write};
use std::sync::Arc;

use talent_match::config::{AppConfig, InterviewConfig};
use talent_match::error::AppError;
use talent_match::interview::{InterviewContext, InterviewSession};
use talent_match::matching::{
    BudgetRange, Candidate, Complexity, ConstraintPolicy, MatchingEngine, MatchingProfile,
    ScoreBreakdown, SkillExtractor, WorkItem,
};
use talent_match::roster::RosterImporter;
use talent_match::telemetry;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cli::MatchArgs;
use crate::infra::{print_results, ConsoleObserver, Prompter};
use crate::launcher::{CandidateLauncher, LaunchOutcome};

/// Work item fields supplied on the command line for the first round.
#[derive(Debug, Default)]
pub(crate) struct WorkPreset {
    pub(crate) description: Option<String>,
    pub(crate) skills: Option<String>,
    pub(crate) budget_min: Option<f64>,
    pub(crate) budget_max: Option<f64>,
    pub(crate) complexity: Option<Complexity>,
    pub(crate) timeline_days: Option<u32>,
}

pub(crate) fn run_matching(args: MatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let MatchArgs {
        roster,
        source,
        top,
        description,
        skills,
        budget_min,
        budget_max,
        complexity,
        timeline_days,
        spawn_candidate,
    } = args;

    let source = source.unwrap_or(config.matching.roster_source);
    let roster = roster.unwrap_or_else(|| config.matching.roster_csv.clone());
    let import = RosterImporter::from_path(&roster, source)?;
    println!(
        "Loaded {} candidate(s) from {} ({} row(s) skipped)",
        import.candidates.len(),
        roster.display(),
        import.rejected.len()
    );

    let engine = MatchingEngine::new(import.candidates, MatchingProfile::for_source(source));
    let policy =
        ConstraintPolicy::default().with_min_skill_overlap(config.matching.min_skill_overlap);
    let top_n = top.unwrap_or(config.matching.top_n);
    let launcher = CandidateLauncher::new(config.interview.candidate_terminal.clone())?;
    let mut prompts = Prompter::stdio();
    let mut preset = Some(WorkPreset {
        description,
        skills,
        budget_min,
        budget_max,
        complexity,
        timeline_days,
    });

    loop {
        let work = collect_work_item(&mut prompts, engine.extractor(), preset.take())?;
        let matches = engine.top_matches(&work, &policy, top_n);

        if matches.is_empty() {
            println!("\nNo candidates met the project's constraints.");
        } else {
            render_matches(&matches);
            for breakdown in &matches {
                let candidate = breakdown.candidate;
                if prompts.confirm(&format!("\nInterview {}?", candidate.name))? {
                    if let Err(err) = interview(
                        &mut prompts,
                        &config.interview,
                        &launcher,
                        spawn_candidate,
                        &work,
                        candidate,
                    ) {
                        warn!(candidate_id = %candidate.id, error = %err, "interview failed");
                        println!("Interview with {} failed: {err}", candidate.name);
                    }
                }

                if prompts.confirm(&format!("Hire {}?", candidate.name))? {
                    info!(work_id = %work.id, candidate_id = %candidate.id, "candidate hired");
                    println!("{} hired for project {}.", candidate.name, work.id);
                    break;
                }
            }
        }

        if !prompts.confirm("\nMatch another project?")? {
            return Ok(());
        }
    }
}

pub(crate) fn collect_work_item<R: BufRead, W: Write>(
    prompts: &mut Prompter<R, W>,
    extractor: &SkillExtractor,
    preset: Option<WorkPreset>,
) -> Result<WorkItem, AppError> {
    let preset = preset.unwrap_or_default();

    let description = match preset.description.filter(|d| !d.trim().is_empty()) {
        Some(description) => description,
        None => prompts.parsed("Project description: ", |input| {
            if input.is_empty() {
                Err("A description is required.".to_string())
            } else {
                Ok(input.to_string())
            }
        })?,
    };

    let inferred = extractor.extract_list(&description);
    if inferred.is_empty() {
        prompts.say("No skills could be inferred from the description.")?;
    } else {
        prompts.say(&format!("Inferred skills: {}", inferred.join(", ")))?;
    }

    let extra = match preset.skills {
        Some(skills) => skills,
        None => prompts.line("Additional skills (comma-separated, blank for none): ")?,
    };
    let required_skills: Vec<String> = inferred
        .into_iter()
        .chain(extra.split(',').map(|s| s.trim().to_string()))
        .collect();

    let budget = match (preset.budget_min, preset.budget_max) {
        (Some(min), Some(max)) => match BudgetRange::new(min, max) {
            Ok(budget) => budget,
            Err(err) => {
                prompts.say(&format!("Ignoring budget flags: {err}"))?;
                prompt_budget(prompts)?
            }
        },
        _ => prompt_budget(prompts)?,
    };

    let complexity = match preset.complexity {
        Some(complexity) => complexity,
        None => prompts.parsed("Complexity (low/medium/high): ", |input| {
            input.parse::<Complexity>().map_err(|err| err.to_string())
        })?,
    };

    let timeline_days = match preset.timeline_days.filter(|days| *days > 0) {
        Some(days) => days,
        None => prompts.parsed("Timeline in days: ", |input| match input.parse::<u32>() {
            Ok(days) if days > 0 => Ok(days),
            _ => Err("Enter a positive whole number of days.".to_string()),
        })?,
    };

    Ok(WorkItem::new(
        Uuid::new_v4().to_string(),
        description,
        required_skills,
        budget,
        complexity,
        Some(timeline_days),
    )?)
}

fn prompt_budget<R: BufRead, W: Write>(
    prompts: &mut Prompter<R, W>,
) -> Result<BudgetRange, AppError> {
    let min = prompts.parsed("Minimum hourly budget: ", parse_amount)?;
    let max = prompts.parsed("Maximum hourly budget: ", |input| {
        let max = parse_amount(input)?;
        BudgetRange::new(min, max).map_err(|err| err.to_string())
    })?;
    Ok(max)
}

fn parse_amount(input: &str) -> Result<f64, String> {
    match input.trim_start_matches('$').parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err("Enter a non-negative amount.".to_string()),
    }
}

fn interview<R: BufRead, W: Write>(
    prompts: &mut Prompter<R, W>,
    settings: &InterviewConfig,
    launcher: &CandidateLauncher,
    spawn: bool,
    work: &WorkItem,
    candidate: &Candidate,
) -> Result<(), AppError> {
    let mut context = InterviewContext::new(work, candidate);
    if prompts.confirm("Send a custom question to the candidate?")? {
        let question = prompts.line("Enter your question: ")?;
        context = context.with_client_message(question);
    }

    let mut session = InterviewSession::new(Arc::new(ConsoleObserver));
    let addr = session.listen(settings.socket_addr()?)?;
    let child = match launcher.launch(addr, spawn) {
        LaunchOutcome::Spawned(child) => Some(child),
        LaunchOutcome::Manual(command) => {
            println!("Ask the candidate to run: {command}");
            None
        }
    };

    session.accept()?;
    println!(
        "Currently interviewing {}, you will receive a response shortly...",
        candidate.username
    );
    let results = session.conduct(&context)?;
    print_results(&results);

    if let Some(mut child) = child {
        if let Err(err) = child.try_wait() {
            warn!(error = %err, "could not check candidate process status");
        }
    }
    Ok(())
}

fn render_matches(matches: &[ScoreBreakdown<'_>]) {
    println!("\nTop matches:");
    for (rank, breakdown) in matches.iter().enumerate() {
        let candidate = breakdown.candidate;
        println!(
            "{}. {} (score {:.3})",
            rank + 1,
            candidate.name,
            breakdown.combined
        );
        println!("   Title: {}", candidate.title);
        println!("   Skills: {}", candidate.skills.join(", "));
        println!("   Rate: ${:.2}/hr", candidate.rate);
        println!("   Engagements: {}", candidate.completed_engagements);
        println!("   Rating: {}", candidate.rating);
    }
}
