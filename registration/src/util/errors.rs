use thiserror::Error;

use crate::admission::{ChoiceId, QuestionId};

/// The identity collaborator has no authenticated user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no authenticated user; sign in to continue")]
    NotSignedIn,
}

/// The persistence collaborator did not accept an application.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("gateway unreachable: {0}")]
    Transport(String),
    #[error("application rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unreadable gateway response: {0}")]
    Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error("step {step} is incomplete")]
    StepIncomplete { step: u8 },
    #[error("applications can only be submitted from the final step (currently on step {step})")]
    NotOnFinalStep { step: u8 },
    #[error("a submission is already in flight")]
    Busy,
    #[error("the submission was interrupted before the gateway answered; submit again")]
    Interrupted,
    #[error("the application has already been submitted")]
    Closed,
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("at most {max} portfolio items are allowed, got {got}")]
    TooManyPortfolioItems { max: usize, got: usize },
    #[error("unknown admission question {0}")]
    UnknownQuestion(QuestionId),
    #[error("question {question} has no choice {choice}")]
    UnknownChoice { question: QuestionId, choice: ChoiceId },
    #[error("{0} admission question(s) left unanswered")]
    UnansweredQuestions(usize),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid question bank: {0}")]
    QuestionBank(String),
}
