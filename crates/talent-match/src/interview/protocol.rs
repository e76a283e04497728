//! Wire format of the interview exchange.
//!
//! Every message is one compact JSON document. The context, question list
//! and answer sheet are each terminated by `\n`; the results document is
//! terminated by the requester closing the stream. Readers accept a frame
//! ending at either a newline or end of stream.
//!
//! Peers that send an unterminated document and keep the connection open
//! are not supported: the requester keeps reading until a newline or close,
//! so such a peer stalls the session (indefinitely without a read timeout).

use std::collections::BTreeMap;
use std::io::{self, BufRead, Read, Write};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::{Candidate, WorkItem};

/// Largest accepted frame, newline excluded.
pub const MAX_FRAME_BYTES: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("connection i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("peer closed the connection before sending the {expected}")]
    PeerClosed { expected: &'static str },
    #[error("{expected} exceeds the {limit} byte frame limit")]
    FrameTooLarge {
        expected: &'static str,
        limit: usize,
    },
    #[error("malformed {expected}: {source}")]
    Malformed {
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Message 1, requester to candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewContext {
    #[serde(rename = "project_id")]
    pub work_id: String,
    #[serde(rename = "project_description")]
    pub work_description: String,
    #[serde(rename = "freelancer_username")]
    pub candidate_username: String,
    #[serde(rename = "freelancer_job_title")]
    pub candidate_title: String,
    #[serde(rename = "freelancer_skills")]
    pub candidate_skills: Vec<String>,
    #[serde(rename = "freelancer_id")]
    pub candidate_id: String,
    pub hourly_rate: f64,
    /// Custom question from the requester, asked after the generated ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_message: Option<String>,
}

impl InterviewContext {
    pub fn new(work: &WorkItem, candidate: &Candidate) -> Self {
        Self {
            work_id: work.id.clone(),
            work_description: work.description.clone(),
            candidate_username: candidate.username.clone(),
            candidate_title: candidate.title.clone(),
            candidate_skills: candidate.skills.clone(),
            candidate_id: candidate.id.to_string(),
            hourly_rate: candidate.rate,
            client_message: None,
        }
    }

    pub fn with_client_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = message.trim();
        self.client_message = (!message.is_empty()).then(|| message.to_string());
        self
    }
}

/// Message 3, candidate to requester: answer text keyed by question.
pub type AnswerSheet = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// Message 4, requester to candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewResults {
    #[serde(rename = "freelancer_username")]
    pub candidate_username: String,
    #[serde(rename = "freelancer_job_title")]
    pub candidate_title: String,
    pub questions_and_answers: Vec<QuestionAnswer>,
    pub score: f64,
    #[serde(rename = "project_id")]
    pub work_id: String,
}

impl InterviewResults {
    /// Pairs follow question order; unanswered questions carry an empty
    /// answer. Answers to questions that were never asked are appended, so
    /// every scored answer appears in the pairs.
    pub fn new(context: &InterviewContext, questions: &[String], answers: &AnswerSheet) -> Self {
        let mut questions_and_answers: Vec<QuestionAnswer> = questions
            .iter()
            .map(|question| QuestionAnswer {
                question: question.clone(),
                answer: answers.get(question).cloned().unwrap_or_default(),
            })
            .collect();
        questions_and_answers.extend(
            answers
                .iter()
                .filter(|(question, _)| !questions.contains(*question))
                .map(|(question, answer)| QuestionAnswer {
                    question: question.clone(),
                    answer: answer.clone(),
                }),
        );

        let score = score_texts(questions_and_answers.iter().map(|pair| pair.answer.as_str()));
        Self {
            candidate_username: context.candidate_username.clone(),
            candidate_title: context.candidate_title.clone(),
            questions_and_answers,
            score,
            work_id: context.work_id.clone(),
        }
    }
}

/// Placeholder evaluation: total answer length in characters divided by 100,
/// rounded to two decimals. It does not judge answer quality.
pub fn score_answers(answers: &AnswerSheet) -> f64 {
    score_texts(answers.values().map(String::as_str))
}

fn score_texts<'a>(answers: impl Iterator<Item = &'a str>) -> f64 {
    let total: usize = answers.map(|answer| answer.chars().count()).sum();
    let raw = total as f64 / 100.0;
    (raw * 100.0).round() / 100.0
}

/// Writes a newline-terminated frame and flushes.
pub fn write_frame<W, T>(writer: &mut W, message: &T) -> Result<(), ProtocolError>
where
    W: Write,
    T: Serialize + ?Sized,
{
    let mut bytes = serde_json::to_vec(message).map_err(ProtocolError::Encode)?;
    bytes.push(b'\n');
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Writes the final frame without a terminator; the caller closes the stream.
pub fn write_final_frame<W, T>(writer: &mut W, message: &T) -> Result<(), ProtocolError>
where
    W: Write,
    T: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec(message).map_err(ProtocolError::Encode)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Reads one frame, ending at a newline or end of stream.
pub fn read_frame<R, T>(reader: &mut R, expected: &'static str) -> Result<T, ProtocolError>
where
    R: BufRead,
    T: DeserializeOwned,
{
    let mut buf = Vec::new();
    let limit = MAX_FRAME_BYTES as u64 + 1;
    let read = reader.by_ref().take(limit).read_until(b'\n', &mut buf)?;
    if read == 0 {
        return Err(ProtocolError::PeerClosed { expected });
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
    } else if buf.len() > MAX_FRAME_BYTES {
        return Err(ProtocolError::FrameTooLarge {
            expected,
            limit: MAX_FRAME_BYTES,
        });
    }

    serde_json::from_slice(&buf).map_err(|source| ProtocolError::Malformed { expected, source })
}
