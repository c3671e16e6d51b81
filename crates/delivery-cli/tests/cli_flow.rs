use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_delivery"))
}

fn temp_base(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time")
        .as_nanos();
    let base = std::env::temp_dir().join(format!("{}_{}_{}", prefix, std::process::id(), nanos));
    std::fs::create_dir_all(&base).expect("create temp dir");
    base
}

struct Sandbox {
    base: PathBuf,
    ledger: PathBuf,
}

impl Sandbox {
    fn new(prefix: &str) -> Self {
        let base = temp_base(prefix);
        std::fs::create_dir_all(base.join("c")).expect("create config dir");
        std::fs::create_dir_all(base.join("d")).expect("create data dir");
        let ledger = base.join("deliveries.db");
        Self { base, ledger }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("XDG_CONFIG_HOME", self.base.join("c"))
            .env("XDG_DATA_HOME", self.base.join("d"))
            .env_remove("DELIVERY_CONFIG")
            .env_remove("DELIVERY_LEDGER_PATH")
            .env_remove("DELIVERY_IDENTITY")
            .env("NO_COLOR", "1");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.run_on(&self.ledger, args)
    }

    fn run_on(&self, ledger: &Path, args: &[&str]) -> Output {
        let mut cmd = self.command();
        cmd.args(args).arg("--ledger").arg(ledger);
        cmd.output().expect("run delivery")
    }

    fn run_ok(&self, args: &[&str]) -> Output {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "{:?} failed: stdout={}, stderr={}",
            args,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.run_ok(args);
        serde_json::from_slice(&output.stdout).expect("parse json output")
    }

    fn init(&self, owner: &str) {
        self.run_ok(&["init", "--owner", owner]);
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.base);
    }
}

fn config_path(sandbox: &Sandbox) -> PathBuf {
    sandbox.base.join("c").join("delivery").join("config.toml")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_init_record_update_show() {
    let sandbox = Sandbox::new("delivery_cli_flow");
    sandbox.init("0xowner");
    assert!(sandbox.ledger.exists());
    assert!(config_path(&sandbox).exists());

    let first = sandbox.json(&[
        "record",
        "--sender",
        "Alice",
        "--recipient",
        "Bob",
        "--dispatch-time",
        "1000",
        "--json",
    ]);
    assert_eq!(first["id"], 1);
    assert_eq!(first["status"], "dispatched");
    assert_eq!(first["delivery_time"], 0);

    let second = sandbox.json(&[
        "record",
        "--sender",
        "Charlie",
        "--recipient",
        "David",
        "--dispatch-time",
        "2000",
        "--status",
        "in transit",
        "--json",
    ]);
    assert_eq!(second["id"], 2);

    let ids = sandbox.json(&["list", "--ids", "--json"]);
    assert_eq!(ids, serde_json::json!([1, 2]));

    let update = sandbox.run_ok(&["update", "1", "delivered"]);
    assert!(stdout(&update).contains("dispatched -> delivered"));

    let shown = sandbox.json(&["show", "1", "--json"]);
    assert_eq!(shown["sender"], "Alice");
    assert_eq!(shown["recipient"], "Bob");
    assert_eq!(shown["dispatch_time"], 1000);
    assert_eq!(shown["status"], "delivered");
    assert!(shown["delivery_time"].as_i64().expect("delivery time") > 0);

    let plain = sandbox.run_ok(&["show", "2"]);
    let text = stdout(&plain);
    assert!(text.contains("sender=Charlie"));
    assert!(text.contains("status=in transit"));
    assert!(text.contains("delivery_time=pending"));
}

#[test]
fn test_cli_unknown_package_exits_not_found() {
    let sandbox = Sandbox::new("delivery_cli_missing");
    sandbox.init("0xowner");

    let update = sandbox.run(&["update", "3", "x"]);
    assert_eq!(update.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&update.stderr).contains("Delivery record not found"));

    let show = sandbox.run(&["show", "1"]);
    assert_eq!(show.status.code(), Some(3));

    let ids = sandbox.json(&["list", "--ids", "--json"]);
    assert_eq!(ids, serde_json::json!([]));
    let events = sandbox.json(&["events", "--json"]);
    assert_eq!(events, serde_json::json!([]));
}

#[test]
fn test_cli_events_and_owner() {
    let sandbox = Sandbox::new("delivery_cli_events");
    sandbox.init("0xowner");

    sandbox.run_ok(&[
        "record",
        "--sender",
        "Alice",
        "--recipient",
        "Bob",
        "--dispatch-time",
        "1000",
    ]);
    sandbox.run_ok(&["update", "1", "delivered"]);

    let events = sandbox.json(&["events", "--json"]);
    let array = events.as_array().expect("events array");
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["event"], "delivery_recorded");
    assert_eq!(array[0]["sender"], "Alice");
    assert_eq!(array[1]["event"], "status_updated");
    assert_eq!(array[1]["old_status"], "dispatched");
    assert_eq!(array[1]["new_status"], "delivered");
    assert_eq!(array[1]["seq"], 2);

    let text = stdout(&sandbox.run_ok(&["events", "--package", "1"]));
    assert!(text.contains("StatusUpdated(1, \"dispatched\", \"delivered\")"));

    let owner = stdout(&sandbox.run_ok(&["owner"]));
    assert_eq!(owner.trim(), "0xowner");
}

#[test]
fn test_cli_enforce_owner_rejects_other_caller() {
    let sandbox = Sandbox::new("delivery_cli_owner");
    sandbox.run_ok(&["init", "--owner", "0xowner", "--enforce-owner"]);

    let allowed = sandbox.run(&["record", "--sender", "a", "--recipient", "b"]);
    assert!(allowed.status.success());

    let denied = sandbox.run(&[
        "record",
        "--sender",
        "c",
        "--recipient",
        "d",
        "--caller",
        "0xstranger",
    ]);
    assert_eq!(denied.status.code(), Some(5));

    let ids = sandbox.json(&["list", "--ids", "--json"]);
    assert_eq!(ids, serde_json::json!([1]));
}

#[test]
fn test_cli_missing_ledger_is_not_found() {
    let sandbox = Sandbox::new("delivery_cli_no_ledger");
    let output = sandbox.run(&["list"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No ledger found"));
}

#[test]
fn test_cli_init_refuses_existing_file() {
    let sandbox = Sandbox::new("delivery_cli_reinit");
    sandbox.init("0xowner");
    let again = sandbox.run(&["init", "--owner", "0xother"]);
    assert_eq!(again.status.code(), Some(4));
}

#[test]
fn test_cli_check_detects_tampering() {
    let sandbox = Sandbox::new("delivery_cli_check");
    sandbox.init("0xowner");
    sandbox.run_ok(&["record", "--sender", "a", "--recipient", "b"]);
    sandbox.run_ok(&["record", "--sender", "c", "--recipient", "d"]);
    sandbox.run_ok(&["check"]);

    tamper(&sandbox.ledger);

    let check = sandbox.run(&["check"]);
    assert_eq!(check.status.code(), Some(6));
    assert!(String::from_utf8_lossy(&check.stderr).contains("Integrity check failed"));
}

#[test]
fn test_cli_reinit_moves_config_and_keeps_policy_per_ledger() {
    let sandbox = Sandbox::new("delivery_cli_two_ledgers");
    let guarded = sandbox.base.join("guarded.db");
    let open = sandbox.base.join("open.db");

    let first = sandbox.run_on(&guarded, &["init", "--owner", "owner1", "--enforce-owner"]);
    assert!(first.status.success());
    let second = sandbox.run_on(&open, &["init", "--owner", "owner2"]);
    assert!(second.status.success());

    let config = std::fs::read_to_string(config_path(&sandbox)).expect("read config");
    assert!(config.contains("open.db"));
    assert!(config.contains("owner2"));

    // The open ledger never picks up the guarded ledger's policy or owner.
    let record = sandbox.run_on(&open, &["record", "--sender", "a", "--recipient", "b"]);
    assert!(record.status.success());
    let stranger = sandbox.run_on(
        &open,
        &["record", "--sender", "c", "--recipient", "d", "--caller", "stranger"],
    );
    assert!(stranger.status.success());

    // The guarded ledger keeps its policy after the config moved on.
    let denied = sandbox.run_on(
        &guarded,
        &["record", "--sender", "e", "--recipient", "f", "--caller", "stranger"],
    );
    assert_eq!(denied.status.code(), Some(5));
    let owner = sandbox.run_on(
        &guarded,
        &["record", "--sender", "e", "--recipient", "f", "--caller", "owner1"],
    );
    assert!(owner.status.success());
}

#[test]
fn test_cli_enforce_owner_applies_over_existing_config() {
    let sandbox = Sandbox::new("delivery_cli_enforce_reinit");
    let earlier = sandbox.base.join("earlier.db");
    assert!(sandbox
        .run_on(&earlier, &["init", "--owner", "owner1"])
        .status
        .success());
    assert!(config_path(&sandbox).exists());

    sandbox.run_ok(&["init", "--owner", "owner2", "--enforce-owner"]);

    let denied = sandbox.run(&[
        "record",
        "--sender",
        "a",
        "--recipient",
        "b",
        "--caller",
        "stranger",
    ]);
    assert_eq!(denied.status.code(), Some(5));

    let allowed = sandbox.run(&["record", "--sender", "a", "--recipient", "b"]);
    assert!(allowed.status.success());
}

#[test]
fn test_cli_events_for_unknown_package_exits_not_found() {
    let sandbox = Sandbox::new("delivery_cli_events_missing");
    sandbox.init("0xowner");
    sandbox.run_ok(&["record", "--sender", "a", "--recipient", "b"]);

    let output = sandbox.run(&["events", "--package", "9"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Delivery record not found"));
}

#[test]
fn test_cli_list_formats() {
    let sandbox = Sandbox::new("delivery_cli_formats");
    sandbox.init("0xowner");
    sandbox.run_ok(&[
        "record",
        "--sender",
        "Charlie Brown",
        "--recipient",
        "Lucy",
        "--status",
        "in transit",
    ]);

    let plain = stdout(&sandbox.run_ok(&["list", "--format", "plain"]));
    let cells: Vec<&str> = plain.trim_end().split('\t').collect();
    assert_eq!(cells, ["1", "Charlie Brown", "Lucy", "in transit", "pending"]);

    let table = stdout(&sandbox.run_ok(&["list", "--format", "table"]));
    assert!(table.contains("SENDER"));
    assert!(table.contains("Charlie Brown"));

    let rejected = sandbox.run(&["list", "--format", "csv"]);
    assert_eq!(rejected.status.code(), Some(4));
}

fn tamper(path: &Path) {
    let conn = rusqlite::Connection::open(path).expect("open sqlite");
    conn.execute("DELETE FROM events WHERE package_id = 1", [])
        .expect("delete events");
    conn.execute("DELETE FROM deliveries WHERE id = 1", [])
        .expect("delete delivery");
}
