use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};
use std::net::SocketAddr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use talent_match::interview::{AnswerSource, InterviewContext, InterviewObserver, InterviewResults};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Line-oriented operator prompts.
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    pub(crate) fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub(crate) fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// One trimmed line; end of input is an error.
    pub(crate) fn line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no input received",
            ));
        }
        Ok(input.trim().to_string())
    }

    /// Re-prompts until `parse` accepts the input.
    pub(crate) fn parsed<T, F>(&mut self, prompt: &str, parse: F) -> io::Result<T>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        loop {
            let input = self.line(prompt)?;
            match parse(&input) {
                Ok(value) => return Ok(value),
                Err(message) => self.say(&message)?,
            }
        }
    }

    pub(crate) fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self.parsed(&format!("{prompt} (yes/no): "), |input| {
            match input.to_ascii_lowercase().as_str() {
                "yes" | "y" => Ok(true),
                "no" | "n" => Ok(false),
                _ => Err("Please answer yes or no.".to_string()),
            }
        })
    }
}

impl<R: BufRead, W: Write> AnswerSource for Prompter<R, W> {
    fn answer(&mut self, question: &str) -> io::Result<String> {
        self.line(&format!("Answer to '{question}': "))
    }
}

/// Reports interview progress on stdout for the operator.
pub(crate) struct ConsoleObserver;

impl InterviewObserver for ConsoleObserver {
    fn listening(&self, addr: SocketAddr) {
        println!("Waiting for the candidate to connect on {addr}...");
    }

    fn connected(&self, peer: SocketAddr) {
        println!("Connected to {peer}.");
    }

    fn context_received(&self, context: &InterviewContext) {
        println!("\n--- Interview Preparation ---");
        println!("Project: {}", context.work_description);
        println!(
            "Candidate: {} ({})",
            context.candidate_username, context.candidate_title
        );
    }

    fn questions_received(&self, questions: &[String]) {
        println!(
            "Received {} question(s); waiting for the candidate's answers...",
            questions.len()
        );
    }

    fn completed(&self, results: &InterviewResults) {
        println!(
            "\nInterview complete for {} (score {:.2}).",
            results.candidate_username, results.score
        );
    }

    fn closed(&self) {
        println!("Interview connection closed.");
    }
}

pub(crate) fn print_results(results: &InterviewResults) {
    println!("Score: {:.2}", results.score);
    println!(
        "Candidate: {} ({}) | project {}",
        results.candidate_username, results.candidate_title, results.work_id
    );
    for pair in &results.questions_and_answers {
        println!("  Q: {}", pair.question);
        println!("  A: {}", pair.answer);
    }
}
