use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use talent_match::error::AppError;
use talent_match::matching::Complexity;
use talent_match::roster::RosterSource;

use crate::candidate::run_candidate;
use crate::demo::{run_demo, DemoArgs};
use crate::driver::run_matching;
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "talent-match",
    about = "Rank candidates against a piece of work and interview the best matches",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Interactively describe work, review matches and interview candidates
    Match(MatchArgs),
    /// Join an interview as the candidate
    Candidate(CandidateArgs),
    /// Rank a bundled sample roster without prompting
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct MatchArgs {
    /// Roster CSV (defaults to MATCH_ROSTER_CSV)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Roster column layout: standard or marketplace
    #[arg(long, value_parser = parse_source)]
    pub(crate) source: Option<RosterSource>,
    /// Number of matches to show
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Work description; prompted for when omitted
    #[arg(long)]
    pub(crate) description: Option<String>,
    /// Extra comma-separated skills added to the inferred ones
    #[arg(long)]
    pub(crate) skills: Option<String>,
    #[arg(long)]
    pub(crate) budget_min: Option<f64>,
    #[arg(long)]
    pub(crate) budget_max: Option<f64>,
    /// low, medium or high
    #[arg(long, value_parser = parse_complexity)]
    pub(crate) complexity: Option<Complexity>,
    #[arg(long)]
    pub(crate) timeline_days: Option<u32>,
    /// Open the candidate process in a terminal (INTERVIEW_CANDIDATE_TERMINAL)
    #[arg(long)]
    pub(crate) spawn_candidate: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CandidateArgs {
    /// Host the requester is listening on
    pub(crate) host: String,
    /// Port the requester is listening on
    pub(crate) port: u16,
    /// Socket timeout in seconds; 0 disables it
    #[arg(long)]
    pub(crate) timeout_secs: Option<u64>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match(args) => run_matching(args),
        Command::Candidate(args) => run_candidate(args),
        Command::Demo(args) => run_demo(args),
    }
}

fn parse_source(raw: &str) -> Result<RosterSource, String> {
    raw.parse::<RosterSource>().map_err(|err| err.to_string())
}

fn parse_complexity(raw: &str) -> Result<Complexity, String> {
    raw.parse::<Complexity>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_flags_parse() {
        let cli = Cli::try_parse_from([
            "talent-match",
            "match",
            "--source",
            "marketplace",
            "--budget-min",
            "20",
            "--budget-max",
            "80",
            "--complexity",
            "HIGH",
            "--spawn-candidate",
        ])
        .expect("valid flags");

        match cli.command {
            Some(Command::Match(args)) => {
                assert_eq!(args.source, Some(RosterSource::Marketplace));
                assert_eq!(args.complexity, Some(Complexity::High));
                assert_eq!(args.budget_max, Some(80.0));
                assert!(args.spawn_candidate);
            }
            other => panic!("expected match command, got {other:?}"),
        }
    }

    #[test]
    fn candidate_takes_positional_host_and_port() {
        let cli = Cli::try_parse_from(["talent-match", "candidate", "127.0.0.1", "65432"])
            .expect("valid args");
        match cli.command {
            Some(Command::Candidate(args)) => {
                assert_eq!(args.host, "127.0.0.1");
                assert_eq!(args.port, 65432);
                assert_eq!(args.timeout_secs, None);
            }
            other => panic!("expected candidate command, got {other:?}"),
        }
    }

    #[test]
    fn demo_defaults_match_the_flag_defaults() {
        let cli = Cli::try_parse_from(["talent-match", "demo"]).expect("valid args");
        match cli.command {
            Some(Command::Demo(args)) => {
                assert_eq!(args.top, 5);
                assert_eq!(args.top, DemoArgs::default().top);
            }
            other => panic!("expected demo command, got {other:?}"),
        }
    }

    #[test]
    fn unknown_complexity_is_rejected() {
        assert!(Cli::try_parse_from(["talent-match", "match", "--complexity", "extreme"]).is_err());
    }
}
