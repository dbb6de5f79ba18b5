//! Admission test question bank and grading.
//!
//! Answers can only be recorded through a [`QuestionBank`], so an
//! [`AdmissionAnswers`] map never references a question or choice the bank
//! does not know.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use crate::util::errors::{ConfigError, WorkflowError};

pub const DEFAULT_PASS_MARK: u32 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

/// Zero-based index into a question's choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceId(pub u32);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer: ChoiceId,
}

#[derive(Debug, Deserialize)]
struct QuestionFile {
    questions: Vec<Question>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AdmissionAnswers(BTreeMap<QuestionId, ChoiceId>);

impl AdmissionAnswers {
    pub fn get(&self, question: QuestionId) -> Option<ChoiceId> {
        self.0.get(&question).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionTestData {
    completed: bool,
    score: u32,
    answers: AdmissionAnswers,
}

impl AdmissionTestData {
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Percentage of correct answers, 0..=100.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn answers(&self) -> &AdmissionAnswers {
        &self.answers
    }
}

#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    pass_mark: u32,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>, pass_mark: u32) -> Result<Self, ConfigError> {
        if questions.is_empty() {
            return Err(ConfigError::QuestionBank("no questions defined".into()));
        }
        if pass_mark > 100 {
            return Err(ConfigError::QuestionBank(format!(
                "pass mark {pass_mark} is above 100"
            )));
        }

        let mut seen = BTreeSet::new();
        for q in &questions {
            if !seen.insert(q.id) {
                return Err(ConfigError::QuestionBank(format!("duplicate question {}", q.id)));
            }
            if q.choices.is_empty() {
                return Err(ConfigError::QuestionBank(format!("question {} has no choices", q.id)));
            }
            if q.answer.0 as usize >= q.choices.len() {
                return Err(ConfigError::QuestionBank(format!(
                    "question {} answer {} is out of range",
                    q.id, q.answer
                )));
            }
        }

        Ok(Self { questions, pass_mark })
    }

    pub fn load(path: &Path, pass_mark: u32) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let file: QuestionFile = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
        Self::new(file.questions, pass_mark)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn pass_mark(&self) -> u32 {
        self.pass_mark
    }

    fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Record (or overwrite) the answer to one question.
    pub fn record(
        &self,
        answers: &mut AdmissionAnswers,
        question: QuestionId,
        choice: ChoiceId,
    ) -> Result<(), WorkflowError> {
        let q = self
            .question(question)
            .ok_or(WorkflowError::UnknownQuestion(question))?;
        if choice.0 as usize >= q.choices.len() {
            return Err(WorkflowError::UnknownChoice { question, choice });
        }
        answers.0.insert(question, choice);
        Ok(())
    }

    pub fn unanswered(&self, answers: &AdmissionAnswers) -> usize {
        self.questions
            .iter()
            .filter(|q| answers.get(q.id).is_none())
            .count()
    }

    /// Grade a full set of answers into a completed test.
    pub fn grade(&self, answers: AdmissionAnswers) -> Result<AdmissionTestData, WorkflowError> {
        let missing = self.unanswered(&answers);
        if missing > 0 {
            return Err(WorkflowError::UnansweredQuestions(missing));
        }

        let correct = self
            .questions
            .iter()
            .filter(|q| answers.get(q.id) == Some(q.answer))
            .count() as u32;
        let score = correct * 100 / self.questions.len() as u32;

        Ok(AdmissionTestData {
            completed: true,
            score,
            answers,
        })
    }

    pub fn passed(&self, result: &AdmissionTestData) -> bool {
        result.completed && result.score >= self.pass_mark
    }
}
