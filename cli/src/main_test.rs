use clap::CommandFactory;

use super::*;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn history_delete_parses_id_and_yes_flag() {
    let cli = Cli::try_parse_from(["agriscan", "--state-file", "/tmp/s.json", "history", "delete", "42", "--yes"])
        .expect("parse");
    match cli.command {
        Command::History(HistoryCommand { command: HistorySubcommand::Delete { id, yes } }) => {
            assert_eq!(id, 42);
            assert!(yes);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn predict_takes_a_path() {
    let cli = Cli::try_parse_from(["agriscan", "predict", "leaf.jpg"]).expect("parse");
    assert!(matches!(cli.command, Command::Predict { ref path } if path == &PathBuf::from("leaf.jpg")));
}

#[test]
fn only_explicit_yes_confirms() {
    assert!(is_yes("y"));
    assert!(is_yes(" YES "));
    assert!(!is_yes(""));
    assert!(!is_yes("n"));
    assert!(!is_yes("yep"));
}
