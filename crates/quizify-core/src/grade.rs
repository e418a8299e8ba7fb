//! Quiz grading.
//!
//! A pure function of the selection state: weighted partial credit for
//! correct selections, penalties for incorrect selections on multi-answer
//! questions. The session calls it exactly once, when the cursor passes the
//! last question.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quiz::Question;

/// Per-question scoring breakdown, kept for explainability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionScore {
    pub question_id: String,
    /// The question's weight.
    pub possible: f64,
    pub scored: f64,
    pub penalised: f64,
    /// Whether this question's points made it into the running totals.
    pub counted: bool,
}

/// Final quiz result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub total_possible_score: f64,
    pub total_achieved_score: f64,
    pub total_penalised_score: f64,
    pub total_final_score: f64,
    pub breakdown: Vec<QuestionScore>,
    pub graded_at: DateTime<Utc>,
}

/// Grade all questions against their recorded selections.
pub fn grade(questions: &[Question]) -> QuizResult {
    let mut total_possible = 0.0;
    let mut total_scored = 0.0;
    let mut total_penalised = 0.0;
    let mut breakdown = Vec::with_capacity(questions.len());

    for question in questions {
        total_possible += question.weight;

        let correct_count = question.correct_count();
        if correct_count == 0 {
            // Nothing can be scored or penalised; the weight still counts
            // toward the possible total.
            breakdown.push(QuestionScore {
                question_id: question.id.clone(),
                possible: question.weight,
                scored: 0.0,
                penalised: 0.0,
                counted: false,
            });
            continue;
        }

        let share = question.weight / correct_count as f64;
        let multiple = question.has_multiple_answers();

        let mut scored = 0.0;
        let mut penal = 0.0;
        for answer in &question.answers {
            let picked = question
                .selected
                .as_ref()
                .is_some_and(|sel| sel.contains(&answer.id));
            if answer.is_correct && picked {
                scored += share;
            } else if multiple && !answer.is_correct && picked {
                penal += share;
            }
        }

        // A question whose penalties outweigh its credit is excluded from
        // the running totals entirely, not clamped to zero.
        let counted = scored >= penal;
        if counted {
            total_scored += scored;
            total_penalised += penal;
        }

        breakdown.push(QuestionScore {
            question_id: question.id.clone(),
            possible: question.weight,
            scored,
            penalised: penal,
            counted,
        });
    }

    let total_final = total_scored - total_penalised;

    log::debug!(
        "graded {} questions: possible {total_possible}, scored {total_scored}, \
         penalised {total_penalised}, final {total_final}",
        questions.len()
    );

    QuizResult {
        total_possible_score: total_possible,
        total_achieved_score: total_scored,
        total_penalised_score: total_penalised,
        total_final_score: total_final,
        breakdown,
        graded_at: Utc::now(),
    }
}
