//! # Quizify Core Library
//!
//! This library is the engine behind a quiz-taking session: it validates
//! declarative quiz data, prepares a working copy (answer limiting,
//! shuffling, truncation), steps through the questions one at a time, and
//! computes a weighted, penalty-adjusted score.
//!
//! Rendering is deliberately someone else's job. The engine hands out plain
//! payloads and receives selections back; the bundled CLI is one such
//! renderer, and an embedding application can be another.
//!
//! ## Architecture
//!
//! - **Validator**: shape-checks raw JSON quiz data before anything else
//!   touches it
//! - **Data Preparer**: builds the session's exclusively-owned working copy,
//!   with seeded, reproducible shuffling
//! - **Sequencer**: a caller-driven state machine -- `advance()` yields
//!   questions until the sequence is exhausted, then the graded result
//! - **Grader**: partial credit per correct selection, penalties for
//!   incorrect selections on multi-answer questions
//!
//! ## Key Components
//!
//! - [`Quiz`]: parsed, validated quiz data
//! - [`QuizSession`]: the session state machine
//! - [`PrepareOptions`]: shuffle/limit knobs, with an optional seed
//! - [`QuizResult`]: the graded outcome

pub mod config;
pub mod error;
pub mod grade;
pub mod prepare;
pub mod quiz;
pub mod session;

pub use config::{config_dir, Config, ReportConfig};
pub use error::{ConfigError, DataError, QuizError, SchemaError, SelectionError};
pub use grade::{grade, QuestionScore, QuizResult};
pub use prepare::{prepare, PrepareOptions, PreparedQuiz};
pub use quiz::{validate, Answer, Question, Quiz};
pub use session::{AnswerOption, QuestionPayload, QuizSession, SessionState, Step};
