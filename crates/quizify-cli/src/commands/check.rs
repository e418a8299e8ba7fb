use std::path::PathBuf;

use clap::Args;
use quizify_core::Quiz;

#[derive(Args)]
pub struct CheckArgs {
    /// Path to the quiz JSON file
    pub file: PathBuf,
}

pub fn run(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let quiz = Quiz::from_path(&args.file)?;
    let answers: usize = quiz.questions.iter().map(|q| q.answers.len()).sum();
    println!(
        "{}: ok ({} questions, {} answers)",
        args.file.display(),
        quiz.len(),
        answers
    );
    Ok(())
}
