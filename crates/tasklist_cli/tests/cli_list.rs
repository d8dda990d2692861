use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tasklist-{nanos}-{file_name}"))
}

fn write_store(path: &PathBuf, count: u64) {
    let tasks: Vec<serde_json::Value> = (1..=count)
        .map(|key| {
            serde_json::json!({
                "key": key,
                "task": format!("chore {key}"),
                "priority": "Low",
                "deadline": "2024-01-01",
                "status": "Incomplete",
                "timestamp": "2024-01-01 00:00:00"
            })
        })
        .collect();
    std::fs::write(
        path,
        serde_json::to_string_pretty(&serde_json::Value::Array(tasks)).unwrap(),
    )
    .unwrap();
}

#[test]
fn list_renders_the_table_with_footer() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let store_path = temp_path("cli-list.json");
    let config_path = temp_path("cli-list-config.json");
    write_store(&store_path, 2);

    let output = Command::new(exe)
        .args(["list"])
        .env("TASKLIST_STORE_PATH", &store_path)
        .env("TASKLIST_CONFIG_PATH", &config_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Task"));
    assert!(stdout.contains("chore 1"));
    assert!(stdout.contains("chore 2"));
    assert!(stdout.contains("page 1 of 1 (2 tasks)"));
}

#[test]
fn list_empty_store_shows_zero_tasks() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let store_path = temp_path("cli-list-empty.json");
    let config_path = temp_path("cli-list-empty-config.json");

    let output = Command::new(exe)
        .args(["list"])
        .env("TASKLIST_STORE_PATH", &store_path)
        .env("TASKLIST_CONFIG_PATH", &config_path)
        .output()
        .expect("failed to run list command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("page 1 of 1 (0 tasks)"));
}

#[test]
fn list_json_outputs_the_slot_array() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let store_path = temp_path("cli-list-json.json");
    write_store(&store_path, 3);

    let output = Command::new(exe)
        .args(["list", "--json"])
        .env("TASKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 3);
    assert_eq!(rows[0]["task"], "chore 1");
    assert_eq!(rows[2]["key"], 3);
}

#[test]
fn list_pages_follow_the_configured_page_size() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let store_path = temp_path("cli-list-paged.json");
    let config_path = temp_path("cli-list-paged-config.json");
    write_store(&store_path, 3);
    std::fs::write(&config_path, r#"{"page_size": 2}"#).unwrap();

    let output = Command::new(exe)
        .args(["list", "--page", "2"])
        .env("TASKLIST_STORE_PATH", &store_path)
        .env("TASKLIST_CONFIG_PATH", &config_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();
    std::fs::remove_file(&config_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("chore 3"));
    assert!(!stdout.contains("chore 2"));
    assert!(stdout.contains("page 2 of 2 (3 tasks)"));
}

#[test]
fn list_honors_config_overrides() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let store_path = temp_path("cli-list-override.json");
    let config_path = temp_path("cli-list-override-config.json");
    write_store(&store_path, 3);

    let output = Command::new(exe)
        .args(["list", "--config-override", "page_size=1"])
        .env("TASKLIST_STORE_PATH", &store_path)
        .env("TASKLIST_CONFIG_PATH", &config_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("page 1 of 3 (3 tasks)"));
}

#[test]
fn list_warns_but_proceeds_on_invalid_config() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let store_path = temp_path("cli-list-badconf.json");
    let config_path = temp_path("cli-list-badconf-config.json");
    write_store(&store_path, 1);
    std::fs::write(&config_path, "{ nope ").unwrap();

    let output = Command::new(exe)
        .args(["list"])
        .env("TASKLIST_STORE_PATH", &store_path)
        .env("TASKLIST_CONFIG_PATH", &config_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();
    std::fs::remove_file(&config_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("chore 1"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARNING: invalid_data"));
}

#[test]
fn list_recovers_from_corrupt_slot() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let store_path = temp_path("cli-list-corrupt.json");
    let config_path = temp_path("cli-list-corrupt-config.json");
    std::fs::write(&store_path, "][ nope").unwrap();

    let output = Command::new(exe)
        .args(["list"])
        .env("TASKLIST_STORE_PATH", &store_path)
        .env("TASKLIST_CONFIG_PATH", &config_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("page 1 of 1 (0 tasks)"));
}
