//! End-to-end tests for the direct session with built-in commands.

use std::io::Cursor;
use std::sync::Arc;

use cmd_prompt::commands::{install_builtins, BuiltinOptions, Dispatcher, MemorySink};
use cmd_prompt::session::Session;
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;

fn run_script(script: &str, options: BuiltinOptions) -> (Vec<String>, bool) {
    let stop = CancellationToken::new();
    let sink = Arc::new(MemorySink::new());
    let mut dispatcher = Dispatcher::new();
    install_builtins(&mut dispatcher, &stop, sink.clone(), options).unwrap();

    Session::new(&dispatcher, sink.clone(), stop.clone(), "")
        .without_prompt()
        .run(Cursor::new(script.to_string()))
        .unwrap();

    (sink.lines(), stop.is_cancelled())
}

#[test]
fn test_echo_then_quit() {
    let (lines, stopped) = run_script("echo hello world\nq\necho after\n", BuiltinOptions::default());
    assert_eq!(lines, vec!["hello world"]);
    assert!(stopped);
}

#[test]
fn test_unknown_commands_do_not_end_session() {
    let (lines, stopped) = run_script("nope\n\necho still here\n", BuiltinOptions::default());
    assert_eq!(
        lines,
        vec![
            "Command \"nope\" is not registered!",
            "Command \"\" is not registered!",
            "still here"
        ]
    );
    assert!(!stopped);
}

#[test]
fn test_unknown_hint_fallback() {
    let (lines, _) = run_script("nope a b\n", BuiltinOptions { unknown_hint: true });
    assert_eq!(
        lines,
        vec!["Unknown command \"nope\". Type \"help\" for available commands."]
    );
}
