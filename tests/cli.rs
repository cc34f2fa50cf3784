use std::{
    path::Path,
    process::{Command, Output},
};

const REGISTRATION_TOKEN_PATH: &str = "/api/v3/orgs/acme/actions/runners/registration-token";

fn run_init(base_url: &str, token_dest: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_github-runner-init"))
        .env_remove("GITHUB_RUNNER_SERVICE_ACCOUNT")
        .env_remove("RUST_LOG")
        .env_remove("RUNNER_INIT_LOGGER")
        .env_remove("RUNNER_INIT_LOG_DIRECTIVES")
        .env_remove("RUNNER_INIT_VERBOSITY")
        .env("GITHUB_URL", base_url)
        .env("GITHUB_ORGANIZATION", "acme")
        .env("GITHUB_TOKEN", "ghp_example")
        .env("GITHUB_RUNNER_TOKEN_DEST", token_dest)
        .output()
        .unwrap()
}

#[test]
fn writes_registration_token() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", REGISTRATION_TOKEN_PATH)
        .match_header("authorization", "Bearer ghp_example")
        .with_status(201)
        .with_body(r#"{"token":"abc123","expires_at":"2026-10-17T13:00:00Z"}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("runner_token");

    let output = run_init(&server.url(), &dest);

    assert!(output.status.success(), "{output:?}");
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "abc123");
    mock.assert();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Runner token successfully written to file"),
        "{stderr}"
    );
}

#[test]
fn request_log_names_the_organization_once() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", REGISTRATION_TOKEN_PATH)
        .with_status(201)
        .with_body(r#"{"token":"abc123"}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("runner_token");

    let output = run_init(&server.url(), &dest);
    assert!(output.status.success(), "{output:?}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    let request_line = stderr
        .lines()
        .find(|line| line.contains("Requesting runner token"))
        .unwrap();
    assert_eq!(
        request_line.matches("organization=acme").count(),
        1,
        "{request_line}"
    );
}

#[test]
fn failed_request_leaves_destination_alone() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", REGISTRATION_TOKEN_PATH)
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("runner_token");
    let existing = dir.path().join("existing_token");
    std::fs::write(&existing, "previous").unwrap();

    let output = run_init(&server.url(), &missing);
    assert_eq!(output.status.code(), Some(1));
    assert!(!missing.exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("404"));

    let output = run_init(&server.url(), &existing);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "previous");
}

#[test]
fn response_without_token_fails() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", REGISTRATION_TOKEN_PATH)
        .with_status(200)
        .with_body("{}")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("runner_token");

    let output = run_init(&server.url(), &dest);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Fetching runner registration token"), "{stderr}");
    assert!(stderr.contains("Token not found in response"), "{stderr}");
    assert!(!dest.exists());
}

#[test]
fn later_runs_replace_the_token() {
    let mut server = mockito::Server::new();
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("runner_token");

    let first = server
        .mock("POST", REGISTRATION_TOKEN_PATH)
        .with_status(201)
        .with_body(r#"{"token":"first-token-which-is-longer"}"#)
        .create();
    assert!(run_init(&server.url(), &dest).status.success());
    first.remove();

    let _second = server
        .mock("POST", REGISTRATION_TOKEN_PATH)
        .with_status(201)
        .with_body(r#"{"token":"second"}"#)
        .create();
    assert!(run_init(&server.url(), &dest).status.success());

    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "second");
}

#[test]
fn unwritable_destination_fails() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", REGISTRATION_TOKEN_PATH)
        .with_status(201)
        .with_body(r#"{"token":"abc123"}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("missing-dir").join("runner_token");

    let output = run_init(&server.url(), &dest);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Writing runner token"));
}
