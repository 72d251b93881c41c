//! Interactive swipe loop: the questionnaire, then like/skip on stdin.

use anyhow::{Context, Result};
use catalog::Movie;
use colored::Colorize;
use pipeline::{PreferenceSnapshot, Questionnaire, QuestionnaireStep};
use session::{RecommendationSession, SessionPhase, SessionResult};
use sources::MovieSource;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::print_movie_line;

type Input = Lines<BufReader<Stdin>>;

/// A single keystroke-style command in the swipe loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeCommand {
    Like,
    Skip,
    History,
    Restart,
    Quit,
}

impl SwipeCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "l" | "like" | "y" => Some(SwipeCommand::Like),
            "s" | "skip" | "n" => Some(SwipeCommand::Skip),
            "h" | "history" => Some(SwipeCommand::History),
            "r" | "restart" => Some(SwipeCommand::Restart),
            "q" | "quit" | "exit" => Some(SwipeCommand::Quit),
            _ => None,
        }
    }
}

/// Run the session until the user quits or stdin closes.
pub async fn run<S>(session: &RecommendationSession<S>, preset: Option<PreferenceSnapshot>) -> Result<()>
where
    S: MovieSource + ?Sized,
{
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let preferences = match preset {
        Some(preferences) => preferences,
        None => match ask_preferences(&mut input).await? {
            Some(preferences) => preferences,
            None => return Ok(()),
        },
    };
    println!("{}", "Finding movies for you...".dimmed());
    report(session.start(preferences).await);

    loop {
        show_state(session);
        println!(
            "{}",
            "[l]ike  [s]kip  [h]istory  [r]estart  [q]uit".dimmed()
        );

        let Some(line) = input.next_line().await.context("Failed to read input")? else {
            break;
        };
        let Some(command) = SwipeCommand::parse(&line) else {
            println!("{}", format!("Unknown command '{}'", line.trim()).yellow());
            continue;
        };

        match command {
            SwipeCommand::Like => report(session.like().await),
            SwipeCommand::Skip => report(session.skip().await),
            SwipeCommand::History => print_history(&session.liked_history()),
            SwipeCommand::Restart => match ask_preferences(&mut input).await? {
                Some(preferences) => report(session.start(preferences).await),
                None => break,
            },
            SwipeCommand::Quit => break,
        }
    }

    print_history(&session.liked_history());
    Ok(())
}

/// Walk the questionnaire. `None` when stdin closes first.
async fn ask_preferences(input: &mut Input) -> Result<Option<PreferenceSnapshot>> {
    let mut questionnaire = Questionnaire::new();

    loop {
        let (position, total) = questionnaire.progress();
        let Some(question) = questionnaire.current() else {
            return Ok(None);
        };
        println!(
            "\n{} {}",
            format!("Question {} of {}:", position, total).dimmed(),
            question.text.bold().blue()
        );
        println!("{}", question.description.dimmed());
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", (i + 1).to_string().green(), option);
        }

        let Some(line) = input.next_line().await.context("Failed to read input")? else {
            return Ok(None);
        };
        let answer = line.trim();
        let step = match answer.parse::<usize>() {
            Ok(n) if n >= 1 => questionnaire.answer_index(n - 1),
            _ => questionnaire.answer(answer),
        };

        match step {
            Ok(QuestionnaireStep::Complete(preferences)) => return Ok(Some(preferences)),
            Ok(QuestionnaireStep::Next(_)) => {}
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
}

fn report(result: SessionResult<Option<Movie>>) {
    if let Err(e) = result {
        println!("{} {}", "✗".red(), e);
    }
}

fn show_state<S: MovieSource + ?Sized>(session: &RecommendationSession<S>) {
    if let Some(error) = session.last_error() {
        println!(
            "{}",
            format!("Last request failed ({:?}); try again.", error.kind).yellow()
        );
    }

    match session.current_movie() {
        Some(movie) => print_card(&movie),
        None if session.phase() == SessionPhase::Exhausted => println!(
            "{}",
            "No more movies match your preferences. Skip to look again or restart.".yellow()
        ),
        None => println!("{}", "Nothing to show yet.".dimmed()),
    }
}

fn print_card(movie: &Movie) {
    println!(
        "\n{} {}",
        movie.title.bold(),
        format!("({})", movie.display_year()).dimmed()
    );
    println!("{}{} - {:.1}", "• ".green(), movie.genre, movie.rating);
    if !movie.description.is_empty() {
        println!("  {}", movie.description);
    }
}

fn print_history(liked: &[Movie]) {
    println!("\n{}", format!("Liked movies ({}):", liked.len()).bold().blue());
    for (i, movie) in liked.iter().enumerate() {
        print_movie_line(i + 1, movie);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(SwipeCommand::parse("l"), Some(SwipeCommand::Like));
        assert_eq!(SwipeCommand::parse(" Skip "), Some(SwipeCommand::Skip));
        assert_eq!(SwipeCommand::parse("Q"), Some(SwipeCommand::Quit));
        assert_eq!(SwipeCommand::parse(""), None);
        assert_eq!(SwipeCommand::parse("maybe"), None);
    }
}
