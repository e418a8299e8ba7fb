//! Core error types for quizify-core.
//!
//! Every failure in the engine is raised synchronously at the point of
//! violation and is never recovered internally; the caller (the rendering
//! collaborator or host application) decides how to present it.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for quizify-core.
#[derive(Error, Debug)]
pub enum QuizError {
    /// Quiz data shape errors
    #[error("Quiz data error: {0}")]
    Data(#[from] DataError),

    /// Missing or malformed question/answer fields
    #[error("Quiz schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Selection and sequencing errors
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shape errors for the raw quiz data as a whole.
#[derive(Error, Debug)]
pub enum DataError {
    /// No data was provided at all
    #[error("quiz data is required but was not provided")]
    Missing,

    /// The data is not an ordered sequence of questions
    #[error("quiz data must be a sequence of questions, got {found}")]
    InvalidType { found: &'static str },

    /// The sequence has zero elements
    #[error("quiz data contains no questions")]
    Empty,
}

/// Missing-field errors for individual question and answer records.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("question at index {index} is missing required field '{missing}'")]
    QuestionFields { index: usize, missing: &'static str },

    #[error(
        "answer {answer_index} of question at index {question_index} \
         is missing required field '{missing}'"
    )]
    AnswerFields {
        question_index: usize,
        answer_index: usize,
        missing: &'static str,
    },
}

/// Selection and sequencing errors raised by the session state machine.
#[derive(Error, Debug)]
pub enum SelectionError {
    /// An empty selection was submitted
    #[error("no answer selected")]
    Empty,

    /// `advance()` was called before the current question was answered
    #[error("question '{question_id}' has no recorded selection yet")]
    NotAnswered { question_id: String },

    /// A selection was submitted before the first question was handed out
    #[error("no active question to record a selection for")]
    NoActiveQuestion,

    /// The session already produced its result
    #[error("the quiz session has already finished")]
    SessionFinished,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },
}

/// Result type alias for QuizError
pub type Result<T, E = QuizError> = std::result::Result<T, E>;
