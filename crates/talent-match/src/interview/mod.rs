//! Two-party interview exchange over a TCP stream.
//!
//! The requester (`InterviewSession`) listens, sends the interview context,
//! receives the candidate's questions and answers, scores them and returns
//! the results before closing. The candidate (`CandidateClient`) connects,
//! generates questions through a `QuestionPlan` and answers them from an
//! `AnswerSource`.

mod candidate;
mod observer;
mod protocol;
mod questions;
mod session;

pub use candidate::{AnswerSource, CandidateClient, ConnectPolicy, ScriptedAnswers};
pub use observer::{InterviewObserver, SilentObserver};
pub use protocol::{
    read_frame, score_answers, write_final_frame, write_frame, AnswerSheet, InterviewContext,
    InterviewResults, ProtocolError, QuestionAnswer, MAX_FRAME_BYTES,
};
pub use questions::{template_questions, QuestionPlan, QuestionProvider, QuestionProviderError};
pub use session::{InterviewError, InterviewSession, SessionState};
