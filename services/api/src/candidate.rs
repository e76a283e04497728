use std::sync::Arc;
use std::time::Duration;

use talent_match::config::AppConfig;
use talent_match::error::AppError;
use talent_match::interview::{CandidateClient, QuestionPlan};
use talent_match::telemetry;

use crate::cli::CandidateArgs;
use crate::infra::{print_results, ConsoleObserver, Prompter};

pub(crate) fn run_candidate(args: CandidateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let mut policy = config.interview.connect_policy();
    if let Some(secs) = args.timeout_secs {
        policy.socket_timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }

    let client = CandidateClient::connect(&args.host, args.port, &policy)?
        .with_observer(Arc::new(ConsoleObserver));
    println!("You have an interview notification, please stand by...");

    let mut answers = Prompter::stdio();
    let results = client.run(&QuestionPlan::new(), &mut answers)?;
    print_results(&results);
    Ok(())
}
