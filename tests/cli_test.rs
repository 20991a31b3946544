//! Tests for the `ollama-dev` binary's exit status
//!
//! These run the compiled binary against an address nothing listens on, so
//! no Ollama server is needed.

use std::process::{Command, Output};

fn run_cli(envs: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ollama-dev"));
    for var in [
        "OLLAMA_HOST",
        "OLLAMA_PORT",
        "OLLAMA_MODEL",
        "OLLAMA_DEV_LOG_LEVEL",
        "OLLAMA_DEV_LOG_FORMAT",
        "OLLAMA_DEV_LOG_FILE",
    ] {
        command.env_remove(var);
    }
    command.envs(envs.iter().copied());
    command.output().expect("failed to run ollama-dev")
}

#[test]
fn test_unreachable_server_exits_with_failure() {
    let output = run_cli(&[("OLLAMA_HOST", "127.0.0.1:1")]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("http://127.0.0.1:1"), "{stdout}");
    assert!(
        stdout.contains("Cannot connect to Ollama. Make sure it is running."),
        "{stdout}"
    );
    assert!(!stdout.contains("Connected!"), "{stdout}");
}

#[test]
fn test_invalid_port_exits_with_failure() {
    let output = run_cli(&[("OLLAMA_PORT", "not-a-port")]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid Ollama configuration"), "{stderr}");
    assert!(output.stdout.is_empty());
}
