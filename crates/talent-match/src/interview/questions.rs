use thiserror::Error;
use tracing::{debug, warn};

use super::protocol::InterviewContext;

#[derive(Debug, Error)]
pub enum QuestionProviderError {
    #[error("question service unavailable: {0}")]
    Unavailable(String),
    #[error("question service returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// A source of interview questions, typically a remote generation service.
pub trait QuestionProvider: Send + Sync {
    fn name(&self) -> &str;

    fn generate(&self, context: &InterviewContext) -> Result<Vec<String>, QuestionProviderError>;
}

/// Ordered fallback over providers: the first non-empty result wins and
/// exhaustion yields the template questions. The requester's custom
/// question, if any, is always appended last.
#[derive(Default)]
pub struct QuestionPlan {
    providers: Vec<Box<dyn QuestionProvider>>,
}

impl QuestionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: Box<dyn QuestionProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn questions(&self, context: &InterviewContext) -> Vec<String> {
        let mut questions = self
            .providers
            .iter()
            .find_map(|provider| match provider.generate(context) {
                Ok(questions) => {
                    let questions: Vec<String> = questions
                        .into_iter()
                        .map(|q| q.trim().to_string())
                        .filter(|q| !q.is_empty())
                        .collect();
                    if questions.is_empty() {
                        debug!(provider = provider.name(), "provider returned no questions");
                        None
                    } else {
                        debug!(provider = provider.name(), count = questions.len(), "questions generated");
                        Some(questions)
                    }
                }
                Err(err) => {
                    warn!(provider = provider.name(), error = %err, "question provider failed");
                    None
                }
            })
            .unwrap_or_else(|| template_questions(context));

        if let Some(message) = &context.client_message {
            questions.push(message.clone());
        }
        questions
    }
}

pub fn template_questions(context: &InterviewContext) -> Vec<String> {
    vec![
        format!(
            "Can you describe your experience with {}?",
            context.work_description
        ),
        format!(
            "How do your skills in {} apply to this project?",
            context.candidate_skills.join(", ")
        ),
        "How do you typically manage project deadlines?".to_string(),
        "What is your preferred communication method for project updates?".to_string(),
        "Can you provide an example of a similar project you successfully completed?".to_string(),
    ]
}
