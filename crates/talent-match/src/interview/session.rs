use std::io::{self, BufReader};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::observer::{InterviewObserver, SilentObserver};
use super::protocol::{
    read_frame, write_final_frame, write_frame, AnswerSheet, InterviewContext, InterviewResults,
    ProtocolError,
};

/// Requester-side lifecycle of one interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Idle,
    Listening,
    Connected,
    ContextSent,
    AwaitingQuestions,
    QuestionsReceived,
    AwaitingAnswers,
    AnswersReceived,
    Scored,
    Closed,
}

#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("failed to listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to accept interview connection: {0}")]
    Accept(#[source] io::Error),
    #[error("could not connect to {addr} after {attempts} attempt(s): {source}")]
    Connect {
        addr: String,
        attempts: u32,
        #[source]
        source: io::Error,
    },
    #[error("cannot {operation} while the session is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
    #[error("failed to read answer: {0}")]
    AnswerInput(#[source] io::Error),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Requester side of the interview exchange.
///
/// One session serves exactly one connection. Any protocol failure closes
/// the session; `close` is idempotent and also runs on drop.
pub struct InterviewSession {
    state: SessionState,
    listener: Option<TcpListener>,
    stream: Option<BufReader<TcpStream>>,
    read_timeout: Option<Duration>,
    context: Option<InterviewContext>,
    questions: Vec<String>,
    answers: AnswerSheet,
    results: Option<InterviewResults>,
    observer: Arc<dyn InterviewObserver>,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new(Arc::new(SilentObserver))
    }
}

impl InterviewSession {
    pub fn new(observer: Arc<dyn InterviewObserver>) -> Self {
        Self {
            state: SessionState::Idle,
            listener: None,
            stream: None,
            read_timeout: None,
            context: None,
            questions: Vec::new(),
            answers: AnswerSheet::new(),
            results: None,
            observer,
        }
    }

    /// Bounds every read on the accepted connection. Unbounded by default.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn results(&self) -> Option<&InterviewResults> {
        self.results.as_ref()
    }

    pub fn listen<A: ToSocketAddrs>(&mut self, addr: A) -> Result<SocketAddr, InterviewError> {
        self.expect_state("listen", SessionState::Idle)?;

        let bind_error = |source: io::Error| InterviewError::Bind {
            addr: describe(&addr),
            source,
        };
        let listener = TcpListener::bind(&addr).map_err(bind_error)?;
        let local = listener.local_addr().map_err(bind_error)?;

        self.listener = Some(listener);
        self.state = SessionState::Listening;
        info!(%local, "interview listener ready");
        self.observer.listening(local);
        Ok(local)
    }

    /// Blocks until a candidate connects. A failure returns the session to
    /// `Idle` without retrying.
    pub fn accept(&mut self) -> Result<SocketAddr, InterviewError> {
        self.expect_state("accept", SessionState::Listening)?;
        let Some(listener) = self.listener.as_ref() else {
            return Err(self.invalid("accept"));
        };

        let accepted = listener.accept().and_then(|(stream, peer)| {
            stream.set_read_timeout(self.read_timeout)?;
            Ok((stream, peer))
        });
        match accepted {
            Ok((stream, peer)) => {
                self.stream = Some(BufReader::new(stream));
                self.state = SessionState::Connected;
                info!(%peer, "candidate connected");
                self.observer.connected(peer);
                Ok(peer)
            }
            Err(err) => {
                warn!(error = %err, "accept failed");
                self.listener = None;
                self.state = SessionState::Idle;
                Err(InterviewError::Accept(err))
            }
        }
    }

    pub fn send_context(&mut self, context: &InterviewContext) -> Result<(), InterviewError> {
        self.expect_state("send the context", SessionState::Connected)?;
        let written = match self.stream.as_mut() {
            Some(stream) => write_frame(stream.get_mut(), context),
            None => return Err(self.invalid("send the context")),
        };
        self.settle(written)?;

        self.context = Some(context.clone());
        self.state = SessionState::ContextSent;
        debug!(work_id = %context.work_id, "context sent");
        Ok(())
    }

    pub fn receive_questions(&mut self) -> Result<&[String], InterviewError> {
        self.expect_state("receive questions", SessionState::ContextSent)?;
        self.state = SessionState::AwaitingQuestions;

        let read = match self.stream.as_mut() {
            Some(stream) => read_frame::<_, Vec<String>>(stream, "questions"),
            None => return Err(self.invalid("receive questions")),
        };
        self.questions = self.settle(read)?;
        self.state = SessionState::QuestionsReceived;
        debug!(count = self.questions.len(), "questions received");
        self.observer.questions_received(&self.questions);
        Ok(&self.questions)
    }

    pub fn receive_answers(&mut self) -> Result<&AnswerSheet, InterviewError> {
        self.expect_state("receive answers", SessionState::QuestionsReceived)?;
        self.state = SessionState::AwaitingAnswers;

        let read = match self.stream.as_mut() {
            Some(stream) => read_frame::<_, AnswerSheet>(stream, "answers"),
            None => return Err(self.invalid("receive answers")),
        };
        self.answers = self.settle(read)?;
        self.state = SessionState::AnswersReceived;
        debug!(count = self.answers.len(), "answers received");
        self.observer.answers_received(&self.answers);
        Ok(&self.answers)
    }

    pub fn score(&mut self) -> Result<&InterviewResults, InterviewError> {
        self.expect_state("score", SessionState::AnswersReceived)?;
        let Some(context) = self.context.as_ref() else {
            return Err(self.invalid("score"));
        };

        let results = InterviewResults::new(context, &self.questions, &self.answers);
        info!(
            candidate = %results.candidate_username,
            score = results.score,
            "interview scored"
        );
        self.state = SessionState::Scored;
        Ok(self.results.insert(results))
    }

    /// Sends the results document, then closes the session.
    pub fn send_results(&mut self) -> Result<(), InterviewError> {
        self.expect_state("send results", SessionState::Scored)?;
        let written = match (self.stream.as_mut(), self.results.as_ref()) {
            (Some(stream), Some(results)) => write_final_frame(stream.get_mut(), results),
            _ => return Err(self.invalid("send results")),
        };
        self.settle(written)?;

        if let Some(results) = &self.results {
            self.observer.completed(results);
        }
        self.close();
        Ok(())
    }

    /// Runs the exchange on an accepted connection. The session is closed on
    /// return, whatever the outcome.
    pub fn conduct(&mut self, context: &InterviewContext) -> Result<InterviewResults, InterviewError> {
        let outcome = self.exchange(context);
        self.close();
        outcome
    }

    fn exchange(&mut self, context: &InterviewContext) -> Result<InterviewResults, InterviewError> {
        self.send_context(context)?;
        self.receive_questions()?;
        self.receive_answers()?;
        let results = self.score()?.clone();
        self.send_results()?;
        Ok(results)
    }

    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }

        if let Some(stream) = self.stream.take() {
            if let Err(err) = stream.get_ref().shutdown(Shutdown::Both) {
                debug!(error = %err, "shutdown on close failed");
            }
        }
        self.listener = None;
        self.state = SessionState::Closed;
        debug!("interview session closed");
        self.observer.closed();
    }

    fn settle<T>(&mut self, outcome: Result<T, ProtocolError>) -> Result<T, InterviewError> {
        outcome.map_err(|err| {
            warn!(state = ?self.state, error = %err, "interview aborted");
            self.close();
            InterviewError::Protocol(err)
        })
    }

    fn expect_state(
        &self,
        operation: &'static str,
        expected: SessionState,
    ) -> Result<(), InterviewError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(operation))
        }
    }

    fn invalid(&self, operation: &'static str) -> InterviewError {
        InterviewError::InvalidState {
            operation,
            state: self.state,
        }
    }
}

impl Drop for InterviewSession {
    fn drop(&mut self) {
        self.close();
    }
}

fn describe<A: ToSocketAddrs>(addr: &A) -> String {
    match addr.to_socket_addrs() {
        Ok(mut addrs) => addrs
            .next()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "<no address>".to_string()),
        Err(_) => "<unresolvable address>".to_string(),
    }
}
