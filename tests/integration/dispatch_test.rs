//! Dispatch contract tests against the public API.

use std::sync::{Arc, Mutex};

use cmd_prompt::commands::{shared, Dispatcher, Handler, HandlerResult};
use cmd_prompt::error::PromptError;
use pretty_assertions::assert_eq;

type Calls = Arc<Mutex<Vec<Vec<String>>>>;

fn collector(calls: &Calls) -> impl Handler + 'static {
    let calls = Arc::clone(calls);
    move |args: &[String]| -> HandlerResult {
        calls.lock().unwrap().push(args.to_vec());
        Ok(())
    }
}

fn new_calls() -> Calls {
    Arc::new(Mutex::new(Vec::new()))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_duplicate_registration_keeps_first_handler() {
    for name in ["echo", "q", "", "Ünïcode", "with space"] {
        let first = new_calls();
        let second = new_calls();
        let mut dispatcher = Dispatcher::new();

        dispatcher.register(name, collector(&first)).unwrap();
        let err = dispatcher.register(name, collector(&second)).unwrap_err();
        assert!(
            matches!(err, PromptError::DuplicateCommand { name: ref n } if n == name),
            "unexpected error for {name:?}: {err:?}"
        );

        dispatcher.fire(name, &[]).unwrap();
        assert_eq!(first.lock().unwrap().len(), 1);
        assert!(second.lock().unwrap().is_empty());
    }
}

#[test]
fn test_unregistered_name_without_fallback_is_not_found() {
    let calls = new_calls();
    let mut dispatcher = Dispatcher::new();
    dispatcher.register("echo", collector(&calls)).unwrap();

    for name in ["Echo", "ech", "quit", "", "echo "] {
        let err = dispatcher.fire(name, &strings(&["a"])).unwrap_err();
        assert!(matches!(err, PromptError::CommandNotFound { name: ref n } if n == name));
        assert_eq!(err.to_string(), format!("Command \"{name}\" is not registered!"));
    }
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_unregistered_name_with_fallback_forwards_name() {
    let calls = new_calls();
    let mut dispatcher = Dispatcher::new();
    dispatcher.register_default(collector(&calls));

    dispatcher.fire("n", &strings(&["a", "b"])).unwrap();

    assert_eq!(*calls.lock().unwrap(), vec![strings(&["n", "a", "b"])]);
}

#[test]
fn test_process_echo_passes_exact_args() {
    let calls = new_calls();
    let mut dispatcher = Dispatcher::new();
    dispatcher.register("echo", collector(&calls)).unwrap();

    dispatcher.process("echo hello world").unwrap();

    assert_eq!(*calls.lock().unwrap(), vec![strings(&["hello", "world"])]);
}

#[test]
fn test_quit_and_q_share_one_handler() {
    let calls = new_calls();
    let mut dispatcher = Dispatcher::new();
    let quit = shared(collector(&calls));
    dispatcher.register_shared("quit", Arc::clone(&quit)).unwrap();
    dispatcher.register_shared("q", quit).unwrap();

    dispatcher.process("quit").unwrap();
    dispatcher.process("q").unwrap();

    assert_eq!(*calls.lock().unwrap(), vec![Vec::<String>::new(), Vec::new()]);
}

#[test]
fn test_empty_input_without_fallback_names_empty_string() {
    let dispatcher = Dispatcher::new();
    let err = dispatcher.process("").unwrap_err();
    assert!(matches!(err, PromptError::CommandNotFound { ref name } if name.is_empty()));
}

#[test]
fn test_empty_input_with_fallback_forwards_empty_name() {
    let calls = new_calls();
    let mut dispatcher = Dispatcher::new();
    dispatcher.register_default(collector(&calls));

    dispatcher.process("").unwrap();

    assert_eq!(*calls.lock().unwrap(), vec![strings(&[""])]);
}

#[test]
fn test_whitespace_runs_collapse() {
    let padded = new_calls();
    let plain = new_calls();

    let mut dispatcher = Dispatcher::new();
    dispatcher.register("echo", collector(&padded)).unwrap();
    dispatcher.process("  echo   a   b ").unwrap();

    let mut reference = Dispatcher::new();
    reference.register("echo", collector(&plain)).unwrap();
    reference.process("echo a b").unwrap();

    assert_eq!(*padded.lock().unwrap(), *plain.lock().unwrap());
    assert_eq!(*padded.lock().unwrap(), vec![strings(&["a", "b"])]);
}

#[test]
fn test_second_fallback_replaces_first() {
    let first = new_calls();
    let second = new_calls();
    let mut dispatcher = Dispatcher::new();

    dispatcher.register_default(collector(&first));
    dispatcher.register_default(collector(&second));
    dispatcher.process("missing x").unwrap();

    assert!(first.lock().unwrap().is_empty());
    assert_eq!(*second.lock().unwrap(), vec![strings(&["missing", "x"])]);
}
