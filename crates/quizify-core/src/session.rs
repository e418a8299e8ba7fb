//! Quiz session state machine.
//!
//! A single session, strictly synchronous, driven one step at a time by the
//! rendering collaborator. The session exclusively owns the prepared working
//! copy; callers only ever see the payloads it hands out.
//!
//! ## State Transitions
//!
//! ```text
//! NotStarted -> InProgress -> Finished
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = QuizSession::new(prepare(quiz, &options));
//! loop {
//!     match session.advance()? {
//!         Step::Question(q) => session.record_selection(ask_user(&q))?,
//!         Step::Result(r) => break show(r),
//!     }
//! }
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SelectionError};
use crate::grade::{grade, QuizResult};
use crate::prepare::PreparedQuiz;
use crate::quiz::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    InProgress,
    Finished,
}

/// A selectable answer as handed to the renderer. The correctness flag
/// never leaves the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub content: String,
}

/// Presentational payload for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub id: String,
    pub content: String,
    /// Post-limit, post-shuffle answer order.
    pub answers: Vec<AnswerOption>,
    pub has_multiple_answers: bool,
}

/// One step of the quiz: the next question, or the final result once the
/// sequence is exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Question(QuestionPayload),
    Result(QuizResult),
}

/// Stateful cursor over a prepared quiz.
///
/// `advance()` yields questions until the sequence is exhausted, then grades
/// exactly once and yields the result. A selection must be recorded between
/// consecutive `advance()` calls.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    quiz: PreparedQuiz,
    cursor: Option<usize>,
    state: SessionState,
    result: Option<QuizResult>,
}

impl QuizSession {
    /// Create a session over a prepared quiz, positioned before the first
    /// question.
    pub fn new(quiz: PreparedQuiz) -> Self {
        Self {
            id: Uuid::new_v4(),
            quiz,
            cursor: None,
            state: SessionState::NotStarted,
            result: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current cursor position, once the session has started.
    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.quiz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quiz.is_empty()
    }

    /// Number of questions with a recorded selection.
    pub fn answered_count(&self) -> usize {
        self.quiz
            .questions()
            .iter()
            .filter(|q| q.selected.is_some())
            .count()
    }

    /// The computed result, once the session has finished.
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    fn current_question(&self) -> Option<&Question> {
        self.cursor.and_then(|pos| self.quiz.questions().get(pos))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance to the next step.
    ///
    /// # Errors
    ///
    /// Fails with [`SelectionError::NotAnswered`] when the current question
    /// has no recorded selection (skipped on the very first call, when there
    /// is nothing to have answered), and with
    /// [`SelectionError::SessionFinished`] once the result has been handed
    /// out.
    pub fn advance(&mut self) -> Result<Step> {
        if self.state == SessionState::Finished {
            return Err(SelectionError::SessionFinished.into());
        }

        if let Some(question) = self.current_question() {
            if question.selected.is_none() {
                return Err(SelectionError::NotAnswered {
                    question_id: question.id.clone(),
                }
                .into());
            }
        }

        let next = self.cursor.map_or(0, |pos| pos + 1);
        self.cursor = Some(next);

        match self.quiz.questions().get(next) {
            Some(question) => {
                self.state = SessionState::InProgress;
                log::debug!(
                    "session {}: question {}/{} ({})",
                    self.id,
                    next + 1,
                    self.quiz.len(),
                    question.id
                );
                Ok(Step::Question(payload(question)))
            }
            None => {
                let result = grade(self.quiz.questions());
                self.state = SessionState::Finished;
                log::debug!("session {}: finished", self.id);
                self.result = Some(result.clone());
                Ok(Step::Result(result))
            }
        }
    }

    /// Record the selection for the question most recently returned by
    /// [`advance`](Self::advance), unblocking the next `advance()` call.
    ///
    /// # Errors
    ///
    /// Fails with [`SelectionError::Empty`] for an empty selection,
    /// [`SelectionError::NoActiveQuestion`] before the first question has
    /// been handed out, and [`SelectionError::SessionFinished`] afterwards.
    pub fn record_selection<I, S>(&mut self, selected: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.state == SessionState::Finished {
            return Err(SelectionError::SessionFinished.into());
        }

        let selected: BTreeSet<String> = selected.into_iter().map(Into::into).collect();
        if selected.is_empty() {
            return Err(SelectionError::Empty.into());
        }

        let pos = match self.cursor {
            Some(pos) => pos,
            None => return Err(SelectionError::NoActiveQuestion.into()),
        };
        match self.quiz.questions_mut().get_mut(pos) {
            Some(question) => {
                question.selected = Some(selected);
                Ok(())
            }
            None => Err(SelectionError::NoActiveQuestion.into()),
        }
    }
}

fn payload(question: &Question) -> QuestionPayload {
    QuestionPayload {
        id: question.id.clone(),
        content: question.content.clone(),
        answers: question
            .answers
            .iter()
            .map(|a| AnswerOption {
                id: a.id.clone(),
                content: a.content.clone(),
            })
            .collect(),
        has_multiple_answers: question.has_multiple_answers(),
    }
}
