//! Shape validation for raw quiz data.
//!
//! Runs against the unparsed JSON value so the caller gets the same error
//! whether the data came from a file, a string, or an embedding application.
//! No side effects; the typed model is built separately by
//! [`Quiz::from_value`](crate::quiz::Quiz::from_value).

use serde_json::Value;

use crate::error::{DataError, QuizError, SchemaError};

/// Fields every question record must carry. `answer_limit` may be null but
/// must be present.
pub const QUESTION_REQUIRED_FIELDS: [&str; 5] =
    ["id", "content", "weight", "answer_limit", "answers"];

/// Fields every answer record must carry.
pub const ANSWER_REQUIRED_FIELDS: [&str; 3] = ["id", "content", "is_correct"];

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Validate the shape of raw quiz data.
///
/// # Errors
///
/// Returns [`DataError`] when the data is missing, not a sequence, or empty,
/// and [`SchemaError`] when a question or answer record lacks a required
/// field.
pub fn validate(data: &Value) -> Result<(), QuizError> {
    if data.is_null() {
        return Err(DataError::Missing.into());
    }
    let questions = match data.as_array() {
        Some(questions) => questions,
        None => {
            return Err(DataError::InvalidType {
                found: type_name(data),
            }
            .into())
        }
    };
    if questions.is_empty() {
        return Err(DataError::Empty.into());
    }

    for (index, question) in questions.iter().enumerate() {
        for field in QUESTION_REQUIRED_FIELDS {
            if question.get(field).is_none() {
                return Err(SchemaError::QuestionFields {
                    index,
                    missing: field,
                }
                .into());
            }
        }

        // Presence-only checks: a present-but-null answer_limit passes, and
        // typed construction handles wrong types.
        let answers = question.get("answers").and_then(Value::as_array);
        for (answer_index, answer) in answers.into_iter().flatten().enumerate() {
            for field in ANSWER_REQUIRED_FIELDS {
                if answer.get(field).is_none() {
                    return Err(SchemaError::AnswerFields {
                        question_index: index,
                        answer_index,
                        missing: field,
                    }
                    .into());
                }
            }
        }
    }

    Ok(())
}
