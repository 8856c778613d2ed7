//! The `chemquiz play` command.

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use quiz_core::model::{QuizCategory, QuizQuestion, ScoreBoard};
use services::{AnswerFeedback, AppServices, Clock, QuizSession, SessionReport};

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Pick(usize),
    Quit,
    Invalid,
}

/// Parse a 1-based menu selection; `q` quits.
fn parse_choice(input: &str, len: usize) -> Choice {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Choice::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Choice::Pick(n - 1),
        _ => Choice::Invalid,
    }
}

pub async fn execute(config: &AppConfig, category: Option<QuizCategory>) -> Result<()> {
    let services = config.build_services(Clock::default_clock()).await?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let category = match category {
        Some(category) => category,
        None => {
            let board = services.scores().snapshot().await;
            println!("{}", selector_table(&board));
            match prompt(&mut lines, "Category number (q to quit): ", QuizCategory::ALL.len())
                .await?
            {
                Some(index) => QuizCategory::ALL[index],
                None => return Ok(()),
            }
        }
    };

    play_session(&services, category, &mut lines).await
}

async fn play_session<R>(
    services: &AppServices,
    category: QuizCategory,
    lines: &mut Lines<R>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let quiz_loop = services.quiz_loop();
    let mut session = quiz_loop.start_session(category).await?;
    println!("\n{}: {}", category.title(), category.description());

    while let Some(question) = session.current_question() {
        println!("\n{}", render_question(&session, question));
        let options = question.options().to_vec();
        let Some(index) = prompt(lines, "Your answer (q to quit): ", options.len()).await? else {
            println!("Session abandoned.");
            return Ok(());
        };

        let feedback = quiz_loop.answer(&mut session, &options[index]).await?;
        println!("{}", render_feedback(&feedback));
        quiz_loop.finish_reveal(&mut session).await?;
    }

    if let Some(report) = session.report() {
        println!("\n{}", render_report(&report));
    }
    Ok(())
}

/// Read lines until a valid choice or quit. End of input counts as quit.
async fn prompt<R>(lines: &mut Lines<R>, label: &str, len: usize) -> Result<Option<usize>>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        print!("{label}");
        std::io::Write::flush(&mut std::io::stdout()).context("failed to flush stdout")?;
        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            return Ok(None);
        };
        match parse_choice(&line, len) {
            Choice::Pick(index) => return Ok(Some(index)),
            Choice::Quit => return Ok(None),
            Choice::Invalid => println!("Enter a number from 1 to {len}."),
        }
    }
}

fn selector_table(board: &ScoreBoard) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Category", "Score", "Best streak"]);
    for (n, category) in QuizCategory::ALL.into_iter().enumerate() {
        let score = board.get(category);
        table.add_row(vec![
            Cell::new(n + 1),
            Cell::new(category.title()),
            Cell::new(format!("{}/{}", score.correct(), score.total())),
            Cell::new(score.best_streak()),
        ]);
    }
    table
}

fn render_question(session: &QuizSession, question: &QuizQuestion) -> String {
    let progress = session.progress();
    let mut out = format!(
        "Question {} of {} [{}]  streak {}\n{}\n",
        session.position().unwrap_or(progress.total),
        progress.total,
        question.difficulty(),
        session.streak(),
        question.prompt()
    );
    for (n, option) in question.options().iter().enumerate() {
        out.push_str(&format!("  {}. {option}\n", n + 1));
    }
    out
}

fn render_feedback(feedback: &AnswerFeedback) -> String {
    let mut out = if feedback.answer.correct {
        format!(
            "Correct! +{} points (streak {})",
            feedback.answer.points, feedback.answer.streak
        )
    } else {
        format!("Wrong. The answer is: {}", feedback.correct_answer)
    };
    if !feedback.explanation.is_empty() {
        out.push_str(&format!("\n{}", feedback.explanation));
    }
    let change = &feedback.stats.change;
    if change.leveled_up() {
        out.push_str(&format!("\nLevel up! You reached level {}.", change.level));
    }
    for id in &change.unlocked {
        out.push_str(&format!("\nAchievement unlocked: {} ({})", id.title(), id.description()));
    }
    out
}

fn render_report(report: &SessionReport) -> String {
    format!(
        "Session complete: {}/{} correct ({}%), {} points, best streak {}",
        report.correct,
        report.answered,
        report.accuracy_percent(),
        report.points_earned,
        report.best_streak
    )
}
