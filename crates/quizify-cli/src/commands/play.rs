use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Args;
use quizify_core::{
    prepare, Config, PrepareOptions, QuestionPayload, Quiz, QuizResult, QuizSession, Step,
};

#[derive(Args)]
pub struct PlayArgs {
    /// Path to the quiz JSON file
    pub file: PathBuf,
    /// Randomize question order
    #[arg(long)]
    pub shuffle: bool,
    /// Randomize answer order per question
    #[arg(long)]
    pub shuffle_answers: bool,
    /// Cap the number of questions
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
    /// Seed for reproducible shuffling
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print the final result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Config defaults, overridden by whatever was passed on the command line.
fn merge_options(config: &Config, args: &PlayArgs) -> PrepareOptions {
    let mut options = config.play.clone();
    if args.shuffle {
        options.shuffle = true;
    }
    if args.shuffle_answers {
        options.shuffle_answers = true;
    }
    if args.limit.is_some() {
        options.limit_questions_to = args.limit;
    }
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    options
}

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let options = merge_options(&config, &args);

    let quiz = Quiz::from_path(&args.file)?;
    let mut session = QuizSession::new(prepare(quiz, &options));
    log::debug!("session {} over {} questions", session.id(), session.len());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        match session.advance()? {
            Step::Question(question) => {
                let number = session.position().unwrap_or(0) + 1;
                print_question(&question, number, session.len());
                let selection = loop {
                    let raw = prompt(&mut lines)?;
                    match parse_selection(&raw, &question) {
                        Ok(ids) => break ids,
                        Err(msg) => eprintln!("{msg}"),
                    }
                };
                session.record_selection(selection)?;
            }
            Step::Result(result) => {
                print_result(&result, &config, args.json)?;
                break;
            }
        }
    }

    Ok(())
}

fn print_question(question: &QuestionPayload, number: usize, total: usize) {
    println!();
    println!("[{number}/{total}] {}", question.content);
    for (i, answer) in question.answers.iter().enumerate() {
        println!("  {}. {}", i + 1, answer.content);
    }
    if question.has_multiple_answers {
        println!("(multiple selections allowed, e.g. \"1,3\")");
    }
}

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>) -> io::Result<String> {
    print!("> ");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => line,
        None => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed before the quiz finished",
        )),
    }
}

/// Turn "1,3" style input into the corresponding answer ids.
fn parse_selection(raw: &str, question: &QuestionPayload) -> Result<Vec<String>, String> {
    let mut ids = Vec::new();
    for token in raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let n: usize = token
            .parse()
            .map_err(|_| format!("not an option number: {token}"))?;
        let answer = n
            .checked_sub(1)
            .and_then(|i| question.answers.get(i))
            .ok_or_else(|| format!("no option {n}"))?;
        ids.push(answer.id.clone());
    }
    if ids.is_empty() {
        return Err("select at least one option".to_string());
    }
    Ok(ids)
}

fn print_result(
    result: &QuizResult,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json || config.report.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!();
    println!("Quiz results");
    println!("  possible:  {}", result.total_possible_score);
    println!("  achieved:  {}", result.total_achieved_score);
    println!("  penalised: {}", result.total_penalised_score);
    println!("  final:     {}", result.total_final_score);
    if config.report.show_breakdown {
        println!();
        for score in &result.breakdown {
            let mark = if score.counted { ' ' } else { '!' };
            println!(
                "  {mark} question {}: {:.2}/{:.2} (penalty {:.2})",
                score.question_id, score.scored, score.possible, score.penalised
            );
        }
    }
    Ok(())
}
