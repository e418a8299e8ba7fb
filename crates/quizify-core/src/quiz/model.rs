//! Typed quiz data model.
//!
//! Built from validated JSON. The typed model is the working copy the engine
//! owns for the lifetime of one session; the input value is left untouched.

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::Value;

use crate::error::{QuizError, Result, SchemaError};
use crate::quiz::validate;

/// A single selectable answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    /// Unique across the whole quiz, not just within a question.
    pub id: String,
    pub content: String,
    pub is_correct: bool,
}

/// One question with its answer set and, once answered, the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: String,
    pub content: String,
    /// Maximum contribution to the possible score.
    pub weight: f64,
    /// Cap on the rendered answer count. `None` = no limit.
    pub answer_limit: Option<usize>,
    pub answers: Vec<Answer>,
    /// Recorded selection, attached by the session.
    pub selected: Option<BTreeSet<String>>,
}

impl Question {
    /// Number of answers marked correct.
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }

    /// True iff the correct-answer count is not exactly one.
    pub fn has_multiple_answers(&self) -> bool {
        self.correct_count() != 1
    }
}

/// An ordered sequence of questions, parsed and shape-checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Validate and parse quiz data from a JSON value.
    ///
    /// # Errors
    ///
    /// Shape errors per [`validate`]; additionally, a field that is present
    /// but carries an unusable type is reported as missing.
    pub fn from_value(data: &Value) -> Result<Self> {
        validate(data)?;

        let mut questions = Vec::new();
        if let Some(records) = data.as_array() {
            for (index, record) in records.iter().enumerate() {
                questions.push(build_question(index, record)?);
            }
        }
        Ok(Self { questions })
    }

    /// Validate and parse quiz data from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Value = serde_json::from_str(json)?;
        Self::from_value(&data)
    }

    /// Validate and parse quiz data from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Identifiers arrive as JSON strings or numbers; both are compared as
/// strings, so numbers are rendered in decimal.
fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn build_question(index: usize, record: &Value) -> Result<Question> {
    let missing = |missing| QuizError::from(SchemaError::QuestionFields { index, missing });

    let id = record.get("id").map(id_string).ok_or_else(|| missing("id"))?;
    let content = record
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| missing("content"))?
        .to_string();
    let weight = record
        .get("weight")
        .and_then(Value::as_f64)
        .ok_or_else(|| missing("weight"))?;
    let answer_limit = match record.get("answer_limit") {
        Some(Value::Null) => None,
        Some(value) => Some(
            value
                .as_u64()
                .map(|n| n as usize)
                .ok_or_else(|| missing("answer_limit"))?,
        ),
        None => return Err(missing("answer_limit")),
    };
    let records = record
        .get("answers")
        .and_then(Value::as_array)
        .ok_or_else(|| missing("answers"))?;

    let mut answers = Vec::with_capacity(records.len());
    for (answer_index, answer) in records.iter().enumerate() {
        answers.push(build_answer(index, answer_index, answer)?);
    }

    Ok(Question {
        id,
        content,
        weight,
        answer_limit,
        answers,
        selected: None,
    })
}

fn build_answer(question_index: usize, answer_index: usize, record: &Value) -> Result<Answer> {
    let missing = |missing| {
        QuizError::from(SchemaError::AnswerFields {
            question_index,
            answer_index,
            missing,
        })
    };

    let id = record.get("id").map(id_string).ok_or_else(|| missing("id"))?;
    let content = record
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| missing("content"))?
        .to_string();
    let is_correct = record
        .get("is_correct")
        .and_then(Value::as_bool)
        .ok_or_else(|| missing("is_correct"))?;

    Ok(Answer {
        id,
        content,
        is_correct,
    })
}
