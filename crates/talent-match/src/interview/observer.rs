use std::net::SocketAddr;

use super::protocol::{AnswerSheet, InterviewContext, InterviewResults};

/// Progress callbacks for an interview, on either side of the connection.
///
/// Every method defaults to a no-op so callers implement only what they
/// report.
pub trait InterviewObserver: Send + Sync {
    fn listening(&self, _addr: SocketAddr) {}

    fn connected(&self, _peer: SocketAddr) {}

    fn context_received(&self, _context: &InterviewContext) {}

    fn questions_received(&self, _questions: &[String]) {}

    fn answers_received(&self, _answers: &AnswerSheet) {}

    fn completed(&self, _results: &InterviewResults) {}

    fn closed(&self) {}
}

/// Observer that reports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl InterviewObserver for SilentObserver {}
