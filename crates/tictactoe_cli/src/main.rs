//! tictactoe - headless tic-tac-toe harness

use anyhow::{Context, Result};
use clap::Parser;
use tictactoe_cli::{Cli, Command, RoundReport, Session, SessionArgs, parse_script};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { moves, session } => run_play(&moves, &session),
        Command::Match { rounds, session } => run_match(&rounds, &session),
    }
}

/// Play one round from a move script
#[instrument(skip(args))]
fn run_play(moves: &str, args: &SessionArgs) -> Result<()> {
    let config = args.game_config()?;
    let steps = parse_script(moves)?;
    let mut session = Session::new(config, args.seed);

    let report = session
        .play_round(&steps)
        .with_context(|| format!("round '{}' failed", moves))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&session, &report);
    }
    Ok(())
}

/// Play rounds until the match length is reached
#[instrument(skip(args))]
fn run_match(rounds: &[String], args: &SessionArgs) -> Result<()> {
    let config = args.game_config()?;
    let mut session = Session::new(config, args.seed);
    let mut reports = Vec::new();

    for (number, moves) in rounds.iter().enumerate() {
        if session.tracker().is_complete() {
            warn!(
                skipped = rounds.len() - number,
                "Match already complete, ignoring remaining rounds"
            );
            break;
        }
        let steps = parse_script(moves)?;
        let report = session
            .play_round(&steps)
            .with_context(|| format!("round {} ('{}') failed", number + 1, moves))?;
        info!(round = number + 1, outcome = %report.outcome, "Round played");

        if !args.json {
            println!("== Round {} ==", number + 1);
            print_report(&session, &report);
            println!();
        }
        reports.push(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else if !session.tracker().is_complete() {
        println!(
            "Match unfinished: {} of {} rounds played",
            session.tracker().rounds_played(),
            session.tracker().match_length()
        );
    }
    Ok(())
}

fn print_report(session: &Session, report: &RoundReport) {
    let config = session.config();
    for event in &report.events {
        println!("{}", event);
    }
    println!("Outcome: {}", report.outcome);
    println!("{}", report.board);
    println!(
        "{}: {}  {}: {}  Draws: {}",
        config.player_x(),
        report.score.x_wins(),
        config.player_o(),
        report.score.o_wins(),
        report.score.draws()
    );
}
