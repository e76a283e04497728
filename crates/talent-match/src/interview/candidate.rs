use std::collections::VecDeque;
use std::io::{self, BufReader};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::observer::{InterviewObserver, SilentObserver};
use super::protocol::{read_frame, write_frame, AnswerSheet, InterviewContext, InterviewResults};
use super::questions::QuestionPlan;
use super::session::InterviewError;

/// Connection establishment settings for the candidate process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectPolicy {
    pub attempts: u32,
    pub retry_delay: Duration,
    /// Applied to every read and write once connected.
    pub socket_timeout: Option<Duration>,
}

impl Default for ConnectPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            retry_delay: Duration::from_secs(2),
            socket_timeout: Some(Duration::from_secs(500)),
        }
    }
}

/// Supplies the candidate's answer to each question.
pub trait AnswerSource {
    fn answer(&mut self, question: &str) -> io::Result<String>;
}

/// Pre-recorded answers handed out in order; runs out to empty answers.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnswers {
    remaining: VecDeque<String>,
}

impl ScriptedAnswers {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            remaining: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl AnswerSource for ScriptedAnswers {
    fn answer(&mut self, _question: &str) -> io::Result<String> {
        Ok(self.remaining.pop_front().unwrap_or_default())
    }
}

/// Candidate side of the interview exchange.
pub struct CandidateClient {
    stream: BufReader<TcpStream>,
    peer: SocketAddr,
    observer: Arc<dyn InterviewObserver>,
}

impl CandidateClient {
    /// Connects with a fixed number of attempts and a fixed delay between
    /// them.
    pub fn connect(host: &str, port: u16, policy: &ConnectPolicy) -> Result<Self, InterviewError> {
        let attempts = policy.attempts.max(1);
        let mut attempt = 1;

        let stream = loop {
            match TcpStream::connect((host, port)) {
                Ok(stream) => break stream,
                Err(err) if attempt < attempts => {
                    warn!(host, port, attempt, error = %err, "connection attempt failed");
                    thread::sleep(policy.retry_delay);
                    attempt += 1;
                }
                Err(err) => {
                    return Err(InterviewError::Connect {
                        addr: format!("{host}:{port}"),
                        attempts,
                        source: err,
                    })
                }
            }
        };

        let configure = |stream: &TcpStream| -> io::Result<SocketAddr> {
            stream.set_read_timeout(policy.socket_timeout)?;
            stream.set_write_timeout(policy.socket_timeout)?;
            stream.peer_addr()
        };
        let peer = configure(&stream).map_err(|source| InterviewError::Connect {
            addr: format!("{host}:{port}"),
            attempts: attempt,
            source,
        })?;

        info!(%peer, attempt, "connected to interview requester");
        Ok(Self {
            stream: BufReader::new(stream),
            peer,
            observer: Arc::new(SilentObserver),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn InterviewObserver>) -> Self {
        self.observer = observer;
        self.observer.connected(self.peer);
        self
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Receives the context, sends generated questions, sends the answers
    /// and waits for the results. The connection is closed on return.
    pub fn run(
        mut self,
        plan: &QuestionPlan,
        answers: &mut dyn AnswerSource,
    ) -> Result<InterviewResults, InterviewError> {
        let outcome = self.exchange(plan, answers);
        if let Err(err) = self.stream.get_ref().shutdown(Shutdown::Both) {
            debug!(error = %err, "shutdown after interview failed");
        }
        self.observer.closed();
        outcome
    }

    fn exchange(
        &mut self,
        plan: &QuestionPlan,
        answers: &mut dyn AnswerSource,
    ) -> Result<InterviewResults, InterviewError> {
        let context: InterviewContext = read_frame(&mut self.stream, "context")?;
        debug!(work_id = %context.work_id, "context received");
        self.observer.context_received(&context);

        let questions = plan.questions(&context);
        write_frame(self.stream.get_mut(), &questions)?;
        debug!(count = questions.len(), "questions sent");

        let mut sheet = AnswerSheet::new();
        for question in &questions {
            let answer = answers
                .answer(question)
                .map_err(InterviewError::AnswerInput)?;
            sheet.insert(question.clone(), answer);
        }
        write_frame(self.stream.get_mut(), &sheet)?;
        self.observer.answers_received(&sheet);

        let results: InterviewResults = read_frame(&mut self.stream, "results")?;
        info!(score = results.score, "interview results received");
        self.observer.completed(&results);
        Ok(results)
    }
}
