use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_quill"))
}

/// Isolated config, data and store locations for one test.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir should succeed");
        std::fs::create_dir_all(dir.path().join("config")).expect("create config dir");
        std::fs::create_dir_all(dir.path().join("data")).expect("create data dir");
        Self { dir }
    }

    fn store(&self) -> PathBuf {
        self.dir.path().join("journal.db")
    }

    fn config_file(&self) -> PathBuf {
        self.dir.path().join("config").join("quill").join("config.toml")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env("QUILL_STORE", self.store())
            .env_remove("QUILL_PASSWORD")
            .env_remove("QUILL_NEW_PASSWORD")
            .env_remove("QUILL_USER")
            .env_remove("QUILL_CONFIG")
            .env_remove("QUILL_LOG")
            .env("NO_COLOR", "1")
            .stdin(Stdio::null())
            .arg("--no-input");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().expect("run quill")
    }

    fn run_with_password(&self, password: &str, args: &[&str]) -> Output {
        self.command()
            .env("QUILL_PASSWORD", password)
            .args(args)
            .output()
            .expect("run quill")
    }

    fn add(&self, title: &str, body: &str) -> String {
        let output = self.run(&["add", title, "--body", body, "--quiet"]);
        assert_success(&output);
        stdout(&output).trim().to_string()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed: stdout={} stderr={}",
        stdout(output),
        stderr(output)
    );
}

fn file_contains(path: &Path, needle: &str) -> bool {
    let bytes = std::fs::read(path).expect("read store");
    bytes
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}

#[test]
fn test_cli_add_list_show() {
    let sandbox = Sandbox::new();

    let added = sandbox.run(&["add", "Morning", "--body", "Coffee on the porch", "-m", "calm"]);
    assert_success(&added);
    let out = stdout(&added);
    assert!(out.contains("status=ok"));
    assert!(out.contains("moods=Calm"));
    assert!(out.contains("encrypted=no"));

    let list = sandbox.run(&["list"]);
    assert_success(&list);
    let list_out = stdout(&list);
    assert!(list_out.contains("Morning"));
    assert!(list_out.contains("Coffee on the porch"));

    let id = list_out
        .split('\t')
        .next()
        .expect("id column")
        .to_string();
    let show = sandbox.run(&["show", &id[..8]]);
    assert_success(&show);
    let show_out = stdout(&show);
    assert!(show_out.contains("title=Morning"));
    assert!(show_out.contains("Coffee on the porch"));
}

#[test]
fn test_cli_list_json_is_newest_first() {
    let sandbox = Sandbox::new();
    sandbox.add("First", "one");
    sandbox.add("Second", "two");

    let output = sandbox.run(&["list", "--json"]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    let entries = value.as_array().expect("array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["title"], "Second");
    assert_eq!(entries[1]["title"], "First");
}

#[test]
fn test_cli_list_filters_by_mood_and_query() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["add", "Gym", "--body", "Lifted", "-m", "energetic", "-q"]);
    assert_success(&output);
    sandbox.add("Reading", "A long novel");

    let by_mood = sandbox.run(&["list", "--mood", "energetic", "--json"]);
    assert_success(&by_mood);
    let value: serde_json::Value = serde_json::from_str(&stdout(&by_mood)).expect("valid json");
    assert_eq!(value.as_array().expect("array").len(), 1);
    assert_eq!(value[0]["title"], "Gym");

    let by_query = sandbox.run(&["list", "--query", "NOVEL", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&by_query)).expect("valid json");
    assert_eq!(value.as_array().expect("array").len(), 1);
    assert_eq!(value[0]["title"], "Reading");
}

#[test]
fn test_cli_list_empty_message() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["list"]);
    assert_success(&output);
    assert!(stdout(&output).contains("No entries found."));
}

#[test]
fn test_cli_edit_keeps_id_and_creation_time() {
    let sandbox = Sandbox::new();
    let id = sandbox.add("Draft", "first version");

    let before = sandbox.run(&["show", &id, "--json"]);
    let before: serde_json::Value = serde_json::from_str(&stdout(&before)).expect("valid json");

    let edited = sandbox.run(&["edit", &id, "--body", "second version", "-m", "grateful"]);
    assert_success(&edited);

    let after = sandbox.run(&["show", &id, "--json"]);
    let after: serde_json::Value = serde_json::from_str(&stdout(&after)).expect("valid json");
    assert_eq!(after["body"], "second version");
    assert_eq!(after["moods"], serde_json::json!(["Grateful"]));
    assert_eq!(after["created_at"], before["created_at"]);

    let list = sandbox.run(&["list", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&list)).expect("valid json");
    assert_eq!(value.as_array().expect("array").len(), 1);
}

#[test]
fn test_cli_unknown_entry_exits_not_found() {
    let sandbox = Sandbox::new();
    sandbox.add("Only", "entry");

    let output = sandbox.run(&["delete", "does-not-exist", "--yes"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("not found"));

    let output = sandbox.run(&["show", "does-not-exist"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_cli_delete_requires_yes_without_tty() {
    let sandbox = Sandbox::new();
    let id = sandbox.add("Keep", "me");

    let refused = sandbox.run(&["delete", &id]);
    assert_eq!(refused.status.code(), Some(4));
    assert!(stderr(&refused).contains("--yes"));

    let deleted = sandbox.run(&["delete", &id, "--yes"]);
    assert_success(&deleted);
    let list = sandbox.run(&["list", "--json"]);
    assert_eq!(stdout(&list).trim(), "[]");
}

#[test]
fn test_cli_encrypt_then_unlock_with_env_password() {
    let sandbox = Sandbox::new();
    sandbox.add("Private", "It rained all day");

    let encrypt = sandbox.run_with_password("hunter2", &["encrypt"]);
    assert_success(&encrypt);
    assert!(stdout(&encrypt).contains("entries=1"));
    assert!(!file_contains(&sandbox.store(), "It rained all day"));

    let status = sandbox.run(&["status", "--json"]);
    assert_success(&status);
    let value: serde_json::Value = serde_json::from_str(&stdout(&status)).expect("valid json");
    assert_eq!(value["encrypted"], true);
    assert_eq!(value["entries"], 1);
    assert_eq!(value["titles"], serde_json::json!(["Private"]));

    let show = sandbox.run_with_password("hunter2", &["list", "--json"]);
    assert_success(&show);
    let value: serde_json::Value = serde_json::from_str(&stdout(&show)).expect("valid json");
    assert_eq!(value[0]["body"], "It rained all day");

    let added = sandbox.run_with_password("hunter2", &["add", "Later", "--body", "Sunny", "-q"]);
    assert_success(&added);
    assert!(!file_contains(&sandbox.store(), "Sunny"));
}

#[test]
fn test_cli_wrong_password_exits_auth_failed() {
    let sandbox = Sandbox::new();
    sandbox.add("Private", "secret");
    assert_success(&sandbox.run_with_password("hunter2", &["encrypt"]));

    let output = sandbox.run_with_password("wrong", &["list"]);
    assert_eq!(output.status.code(), Some(5));
    let err = stderr(&output);
    assert!(err.contains("Incorrect password."));
    assert!(err.contains("quill reset"));
    assert!(!stdout(&output).contains("secret"));
}

#[test]
fn test_cli_locked_without_password_fails() {
    let sandbox = Sandbox::new();
    sandbox.add("Private", "secret");
    assert_success(&sandbox.run_with_password("hunter2", &["encrypt"]));

    let output = sandbox.run(&["list"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("QUILL_PASSWORD"));
}

#[test]
fn test_cli_encrypt_rejects_short_password() {
    let sandbox = Sandbox::new();
    sandbox.add("Private", "secret");

    let output = sandbox.run_with_password("abc", &["encrypt"]);
    assert_eq!(output.status.code(), Some(4));

    let status = sandbox.run(&["status", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&status)).expect("valid json");
    assert_eq!(value["encrypted"], false);
}

#[test]
fn test_cli_passwd_replaces_password() {
    let sandbox = Sandbox::new();
    sandbox.add("Private", "secret");
    assert_success(&sandbox.run_with_password("hunter2", &["encrypt"]));

    let changed = sandbox
        .command()
        .env("QUILL_PASSWORD", "hunter2")
        .env("QUILL_NEW_PASSWORD", "correct horse")
        .arg("passwd")
        .output()
        .expect("run quill");
    assert_success(&changed);

    let old = sandbox.run_with_password("hunter2", &["list"]);
    assert_eq!(old.status.code(), Some(5));

    let new = sandbox.run_with_password("correct horse", &["list", "--json"]);
    assert_success(&new);
    let value: serde_json::Value = serde_json::from_str(&stdout(&new)).expect("valid json");
    assert_eq!(value[0]["body"], "secret");
}

#[test]
fn test_cli_decrypt_restores_plain_storage() {
    let sandbox = Sandbox::new();
    sandbox.add("Private", "secret");
    assert_success(&sandbox.run_with_password("hunter2", &["encrypt"]));

    let refused = sandbox.run_with_password("hunter2", &["decrypt"]);
    assert_eq!(refused.status.code(), Some(4));

    let decrypted = sandbox.run_with_password("hunter2", &["decrypt", "--yes"]);
    assert_success(&decrypted);

    let list = sandbox.run(&["list", "--json"]);
    assert_success(&list);
    let value: serde_json::Value = serde_json::from_str(&stdout(&list)).expect("valid json");
    assert_eq!(value[0]["body"], "secret");
}

#[test]
fn test_cli_reset_erases_locked_journal() {
    let sandbox = Sandbox::new();
    sandbox.add("Private", "secret");
    assert_success(&sandbox.run_with_password("hunter2", &["encrypt"]));

    let reset = sandbox.run(&["reset", "--yes"]);
    assert_success(&reset);

    let status = sandbox.run(&["status", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&status)).expect("valid json");
    assert_eq!(value["encrypted"], false);
    assert_eq!(value["entries"], 0);

    let list = sandbox.run(&["list"]);
    assert_success(&list);
}

#[test]
fn test_cli_users_have_separate_journals() {
    let sandbox = Sandbox::new();
    let added = sandbox.run(&["--user", "alice", "add", "Alice", "--body", "hers", "-q"]);
    assert_success(&added);

    let bob = sandbox.run(&["--user", "bob", "list", "--json"]);
    assert_eq!(stdout(&bob).trim(), "[]");

    let alice = sandbox.run(&["--user", "alice", "list", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&alice)).expect("valid json");
    assert_eq!(value[0]["title"], "Alice");
}

#[test]
fn test_cli_crisis_language_shows_support_notice() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["add", "Bad night", "--body", "I want to end it all"]);
    assert_success(&output);
    let notice = stderr(&output);
    assert!(notice.contains("You are not alone"));
    assert!(notice.contains("988 (USA/Canada) or 111 (UK)"));

    let calm = sandbox.run(&["add", "Walk", "--body", "Saw a heron"]);
    assert_success(&calm);
    assert!(!stderr(&calm).contains("You are not alone"));
}

#[test]
fn test_cli_export_writes_private_file() {
    let sandbox = Sandbox::new();
    sandbox.add("One", "first");
    let target = sandbox.dir.path().join("export.json");

    let output = sandbox.run(&["export", "--output", target.to_str().expect("utf-8 path")]);
    assert_success(&output);

    let contents = std::fs::read_to_string(&target).expect("read export");
    let value: serde_json::Value = serde_json::from_str(&contents).expect("valid json");
    assert_eq!(value[0]["body"], "first");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&target).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn test_cli_init_writes_config() {
    let sandbox = Sandbox::new();
    let store = sandbox.dir.path().join("elsewhere.db");

    let output = sandbox
        .command()
        .env_remove("QUILL_STORE")
        .args(["init", store.to_str().expect("utf-8 path"), "--editor", "nano"])
        .output()
        .expect("run quill");
    assert_success(&output);
    assert!(store.exists());

    let config = std::fs::read_to_string(sandbox.config_file()).expect("read config");
    assert!(config.contains("elsewhere.db"));
    assert!(config.contains("nano"));

    let again = sandbox.run(&["init"]);
    assert_eq!(again.status.code(), Some(4));

    let added = sandbox
        .command()
        .env_remove("QUILL_STORE")
        .args(["add", "Configured", "--body", "via config"])
        .output()
        .expect("run quill");
    assert_success(&added);
    assert!(file_contains(&store, "via config"));
}

#[test]
fn test_cli_quiet_add_prints_only_id() {
    let sandbox = Sandbox::new();
    let id = sandbox.add("Quiet", "entry");
    assert!(!id.is_empty());
    assert!(!id.contains('='));
}

#[test]
fn test_cli_no_subcommand_prints_help() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&[]);
    assert_success(&output);
    assert!(stdout(&output).contains("Usage"));
}
