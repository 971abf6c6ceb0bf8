//! End-to-end tests for the headless harness.

use clap::Parser;
use std::io::Write;
use tictactoe_cli::{Cli, Command, GameEvent, Session, Step, parse_script};
use tictactoe_engine::{Difficulty, GameConfig, Mark, MatchScore, RoundOutcome};

fn session_from(argv: &[&str]) -> (Session, Vec<Vec<Step>>) {
    let cli = Cli::try_parse_from(argv).expect("valid arguments");
    match cli.command {
        Command::Play { moves, session } => {
            let config = session.game_config().expect("valid config");
            (
                Session::new(config, session.seed),
                vec![parse_script(&moves).expect("valid script")],
            )
        }
        Command::Match { rounds, session } => {
            let config = session.game_config().expect("valid config");
            let scripts = rounds
                .iter()
                .map(|r| parse_script(r).expect("valid script"))
                .collect();
            (Session::new(config, session.seed), scripts)
        }
    }
}

#[test]
fn test_play_reports_win_and_board() {
    let (mut session, scripts) = session_from(&["tictactoe", "play", "0,3,1,4,2"]);
    let report = session.play_round(&scripts[0]).unwrap();

    assert_eq!(report.outcome.winner(), Some(Mark::X));
    assert_eq!(report.board.display(), "X|X|X\n-+-+-\nO|O|5\n-+-+-\n6|7|8");
    assert_eq!(report.score, MatchScore::new(1, 0, 0));
}

#[test]
fn test_play_against_hard_ai_is_reproducible() {
    let argv = ["tictactoe", "play", "4 8 6", "--ai", "hard"];
    let (mut first, scripts) = session_from(&argv);
    let (mut second, _) = session_from(&argv);

    let a = first.play_round(&scripts[0]).unwrap();
    let b = second.play_round(&scripts[0]).unwrap();
    assert_eq!(a, b);

    // The heuristic builds 0-1 while X sets up a fork, then wins first.
    let played: Vec<usize> = first
        .engine()
        .history()
        .iter()
        .map(|p| p.to_index())
        .collect();
    assert_eq!(played, vec![4, 0, 8, 1, 6, 2]);
    assert_eq!(a.outcome.winner(), Some(Mark::O));
    let ai_moves = a
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::MovePlaced { by_ai: true, .. }))
        .count();
    assert_eq!(ai_moves, 3);
}

#[test]
fn test_easy_ai_with_seed_is_reproducible() {
    let argv = ["tictactoe", "play", "4", "--ai", "easy", "--seed", "11"];
    let (mut first, scripts) = session_from(&argv);
    let (mut second, _) = session_from(&argv);
    assert_eq!(
        first.play_round(&scripts[0]).unwrap(),
        second.play_round(&scripts[0]).unwrap()
    );
}

#[test]
fn test_match_stops_at_length() {
    let (mut session, scripts) = session_from(&[
        "tictactoe",
        "match",
        "--match-length",
        "2",
        "--round",
        "0,3,1,4,2",
        "--round",
        "0,4,1,2,8,6",
    ]);

    let results: Vec<bool> = scripts
        .iter()
        .map(|s| session.play_round(s).unwrap().match_complete)
        .collect();

    assert_eq!(results, vec![false, true]);
    assert_eq!(session.tracker().scores(), MatchScore::new(1, 1, 0));
}

#[test]
fn test_unfinished_round_is_not_recorded() {
    let (mut session, scripts) = session_from(&["tictactoe", "play", "4,0,u"]);
    let report = session.play_round(&scripts[0]).unwrap();
    assert_eq!(report.outcome, RoundOutcome::InProgress);
    assert_eq!(session.tracker().rounds_played(), 0);
    assert!(matches!(
        report.events.last(),
        Some(GameEvent::MoveUndone { mark: Mark::O, .. })
    ));
}

#[test]
fn test_config_file_names_appear_in_events() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "player_x = \"Ada\"\nplayer_o = \"Grace\"").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let (mut session, scripts) =
        session_from(&["tictactoe", "play", "0,3,1,4,2", "--config", &path]);
    let report = session.play_round(&scripts[0]).unwrap();

    assert!(matches!(
        report.events.last(),
        Some(GameEvent::RoundFinished { winner: Some(name), .. }) if name == "Ada"
    ));
}

#[test]
fn test_report_serializes_to_json() {
    let mut session = Session::new(
        GameConfig::default().with_difficulty(Difficulty::Medium),
        Some(0),
    );
    let report = session.play_round(&[Step::Place(4)]).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["outcome"], "InProgress");
    assert_eq!(json["events"][0]["event"], "move_placed");
    assert_eq!(json["events"][1]["by_ai"], true);
}
