mod model;
mod validate;

pub use model::{Answer, Question, Quiz};
pub use validate::{validate, ANSWER_REQUIRED_FIELDS, QUESTION_REQUIRED_FIELDS};
