//! Quiz preparation.
//!
//! Turns a parsed [`Quiz`] into the working copy a session runs against:
//! per-question answer limiting, optional question/answer shuffling, and
//! question-count truncation, applied in that order.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::quiz::{Answer, Question, Quiz};

/// Options recognized by [`prepare`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrepareOptions {
    /// Randomize question order across the whole quiz.
    #[serde(default)]
    pub shuffle: bool,

    /// Randomize answer order per question, independently.
    #[serde(default)]
    pub shuffle_answers: bool,

    /// Cap the number of questions, applied after shuffling.
    /// `None` = unlimited.
    #[serde(default)]
    pub limit_questions_to: Option<usize>,

    /// Random seed for reproducibility (None = OS entropy).
    #[serde(default)]
    pub seed: Option<u64>,
}

/// The session's working copy.
///
/// Immutable from the caller's perspective; only the session and grader
/// touch it, and only the recorded selections ever change.
#[derive(Debug, Clone)]
pub struct PreparedQuiz {
    questions: Vec<Question>,
}

impl PreparedQuiz {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub(crate) fn questions_mut(&mut self) -> &mut [Question] {
        &mut self.questions
    }
}

/// Prepare a quiz for one session, consuming the parsed data as the
/// session's exclusively-owned working copy.
pub fn prepare(quiz: Quiz, options: &PrepareOptions) -> PreparedQuiz {
    let mut rng = match options.seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    };

    let mut questions = quiz.questions;

    for question in &mut questions {
        limit_answers(question, &mut rng);
    }

    if options.shuffle {
        questions.shuffle(&mut rng);
    }

    if options.shuffle_answers {
        for question in &mut questions {
            question.answers.shuffle(&mut rng);
        }
    }

    if let Some(limit) = options.limit_questions_to {
        questions.truncate(limit);
    }

    log::debug!("prepared {} questions", questions.len());

    PreparedQuiz { questions }
}

/// Apply a question's answer limit: keep every correct answer and fill the
/// remainder with incorrect answers drawn in random order.
fn limit_answers(question: &mut Question, rng: &mut Mcg128Xsl64) {
    let Some(limit) = question.answer_limit else {
        return;
    };

    // A limit that covers no more than the correct answers while exceeding
    // the total answer count leaves the question untouched.
    if limit <= question.correct_count() && limit > question.answers.len() {
        return;
    }

    let (correct, mut incorrect): (Vec<Answer>, Vec<Answer>) =
        question.answers.drain(..).partition(|a| a.is_correct);
    incorrect.shuffle(rng);
    incorrect.truncate(limit.saturating_sub(correct.len()));

    question.answers = correct;
    question.answers.extend(incorrect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn answer(id: &str, is_correct: bool) -> Answer {
        Answer {
            id: id.to_string(),
            content: format!("answer {id}"),
            is_correct,
        }
    }

    fn question(id: &str, answer_limit: Option<usize>, answers: Vec<Answer>) -> Question {
        Question {
            id: id.to_string(),
            content: format!("question {id}"),
            weight: 1.0,
            answer_limit,
            answers,
            selected: None,
        }
    }

    fn seeded(seed: u64) -> PrepareOptions {
        PrepareOptions {
            seed: Some(seed),
            ..PrepareOptions::default()
        }
    }

    fn ids(answers: &[Answer]) -> Vec<&str> {
        answers.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn no_options_leaves_order_untouched() {
        let quiz = Quiz {
            questions: vec![
                question("q1", None, vec![answer("a", true), answer("b", false)]),
                question("q2", None, vec![answer("c", false), answer("d", true)]),
            ],
        };
        let prepared = prepare(quiz, &seeded(1));
        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared.questions()[0].id, "q1");
        assert_eq!(ids(&prepared.questions()[0].answers), vec!["a", "b"]);
        assert_eq!(ids(&prepared.questions()[1].answers), vec!["c", "d"]);
    }

    #[test]
    fn limiting_respects_the_limit_and_keeps_correct_first() {
        let quiz = Quiz {
            questions: vec![question(
                "q1",
                Some(3),
                vec![
                    answer("a", false),
                    answer("b", true),
                    answer("c", false),
                    answer("d", false),
                    answer("e", true),
                ],
            )],
        };
        let prepared = prepare(quiz, &seeded(11));
        let kept = &prepared.questions()[0].answers;
        assert_eq!(kept.len(), 3);
        // Correct answers survive in their original relative order, then the
        // randomly drawn incorrect fill.
        assert_eq!(kept[0].id, "b");
        assert_eq!(kept[1].id, "e");
        assert!(!kept[2].is_correct);
    }

    #[test]
    fn limit_below_correct_count_keeps_only_correct() {
        let quiz = Quiz {
            questions: vec![question(
                "q1",
                Some(1),
                vec![answer("a", true), answer("b", true), answer("c", false)],
            )],
        };
        let prepared = prepare(quiz, &seeded(3));
        assert_eq!(ids(&prepared.questions()[0].answers), vec!["a", "b"]);
    }

    #[test]
    fn degenerate_guard_never_holds_for_consistent_data() {
        // The guard requires limit <= correct_count and limit > total at
        // once, and correct_count can never exceed total. Limiting therefore
        // applies whenever answer_limit is set: an all-correct question with
        // a limit above its total keeps exactly its correct answers.
        let quiz = Quiz {
            questions: vec![question(
                "q1",
                Some(4),
                vec![answer("a", true), answer("b", true), answer("c", true)],
            )],
        };
        let prepared = prepare(quiz, &seeded(5));
        assert_eq!(ids(&prepared.questions()[0].answers), vec!["a", "b", "c"]);
    }

    #[test]
    fn null_limit_never_trims() {
        let quiz = Quiz {
            questions: vec![question(
                "q1",
                None,
                vec![answer("a", true), answer("b", false), answer("c", false)],
            )],
        };
        let prepared = prepare(quiz, &seeded(9));
        assert_eq!(prepared.questions()[0].answers.len(), 3);
    }

    #[test]
    fn shuffle_preserves_the_question_set() {
        let quiz = Quiz {
            questions: (0..8)
                .map(|i| question(&format!("q{i}"), None, vec![answer(&format!("a{i}"), true)]))
                .collect(),
        };
        let options = PrepareOptions {
            shuffle: true,
            ..seeded(42)
        };
        let prepared = prepare(quiz, &options);
        let mut kept: Vec<_> = prepared.questions().iter().map(|q| q.id.clone()).collect();
        kept.sort();
        let expected: Vec<_> = (0..8).map(|i| format!("q{i}")).collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn shuffle_answers_preserves_each_answer_set() {
        let quiz = Quiz {
            questions: vec![question(
                "q1",
                None,
                vec![
                    answer("a", true),
                    answer("b", false),
                    answer("c", false),
                    answer("d", false),
                ],
            )],
        };
        let options = PrepareOptions {
            shuffle_answers: true,
            ..seeded(42)
        };
        let prepared = prepare(quiz, &options);
        let mut kept = ids(&prepared.questions()[0].answers);
        kept.sort_unstable();
        assert_eq!(kept, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let make = || Quiz {
            questions: (0..6)
                .map(|i| {
                    question(
                        &format!("q{i}"),
                        Some(2),
                        vec![
                            answer(&format!("a{i}"), true),
                            answer(&format!("b{i}"), false),
                            answer(&format!("c{i}"), false),
                        ],
                    )
                })
                .collect(),
        };
        let options = PrepareOptions {
            shuffle: true,
            shuffle_answers: true,
            limit_questions_to: Some(4),
            seed: Some(1234),
        };
        let first = prepare(make(), &options);
        let second = prepare(make(), &options);
        assert_eq!(first.questions(), second.questions());
    }

    #[test]
    fn question_limit_truncates() {
        let quiz = Quiz {
            questions: (0..4)
                .map(|i| question(&format!("q{i}"), None, vec![answer(&format!("a{i}"), true)]))
                .collect(),
        };
        let options = PrepareOptions {
            limit_questions_to: Some(2),
            ..seeded(1)
        };
        let prepared = prepare(quiz, &options);
        assert_eq!(prepared.len(), 2);
    }

    #[test]
    fn question_limit_larger_than_quiz_is_a_no_op() {
        let quiz = Quiz {
            questions: vec![question("q1", None, vec![answer("a", true)])],
        };
        let options = PrepareOptions {
            limit_questions_to: Some(10),
            ..seeded(1)
        };
        assert_eq!(prepare(quiz, &options).len(), 1);
    }

    proptest! {
        #[test]
        fn limiting_never_drops_a_correct_answer(
            specs in proptest::collection::vec(
                (proptest::collection::vec(any::<bool>(), 1..8), proptest::option::of(0usize..10)),
                1..6,
            ),
            seed in any::<u64>(),
        ) {
            let questions: Vec<Question> = specs
                .iter()
                .enumerate()
                .map(|(qi, (flags, limit))| {
                    question(
                        &format!("q{qi}"),
                        *limit,
                        flags
                            .iter()
                            .enumerate()
                            .map(|(ai, correct)| answer(&format!("q{qi}a{ai}"), *correct))
                            .collect(),
                    )
                })
                .collect();
            let originals = questions.clone();
            let prepared = prepare(Quiz { questions }, &seeded(seed));

            for original in &originals {
                let kept = prepared
                    .questions()
                    .iter()
                    .find(|q| q.id == original.id)
                    .unwrap();
                for correct in original.answers.iter().filter(|a| a.is_correct) {
                    prop_assert!(kept.answers.iter().any(|a| a.id == correct.id));
                }
                if let Some(limit) = original.answer_limit {
                    let correct_count = original.correct_count();
                    let guarded =
                        limit <= correct_count && limit > original.answers.len();
                    if guarded {
                        prop_assert_eq!(kept.answers.len(), original.answers.len());
                    } else {
                        prop_assert!(kept.answers.len() <= limit.max(correct_count));
                    }
                }
            }
        }
    }
}
