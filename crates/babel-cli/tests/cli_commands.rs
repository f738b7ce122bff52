//! Integration tests for the `babel` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FULL_REPLY: &str = "钟声响起，你走进图书馆。

```status
时间: 14:00
时段: 下午
地点: 巴别塔-图书馆
银币: 48
怀疑度: 150
行动1: 查阅古籍
行动2: 与埃莉诺交谈
行动3: 离开
角色动态:
- 埃莉诺|位置=巴别塔-图书馆|行动=看书|好感度=47
事件更新:
- headline|第1天|图书馆新规|禁书区加派守卫
- rumor|第1天|流言|不会出现
```
";

fn babel() -> Command {
    Command::cargo_bin("babel").unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_narrative_and_fields() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "reply.txt", FULL_REPLY);

    babel()
        .args(["parse", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("钟声响起，你走进图书馆。"))
        .stdout(predicate::str::contains("巴别塔-图书馆"))
        .stdout(predicate::str::contains("图书馆新规"))
        .stdout(predicate::str::contains("```status").not())
        .stderr(predicate::str::contains("unknown event type"));
}

#[test]
fn parse_json_output() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "reply.txt", FULL_REPLY);

    let output = babel()
        .args(["parse", file.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["content"], "钟声响起，你走进图书馆。");
    assert_eq!(json["status"]["suspicion"], 100);
    assert_eq!(json["status"]["coins"], 48);
    assert_eq!(json["status"]["characterDynamics"]["埃莉诺"]["affection"], 47);
    assert_eq!(json["status"]["eventUpdates"].as_array().unwrap().len(), 1);
    assert_eq!(json["status"]["eventUpdates"][0]["type"], "headline");
}

#[test]
fn parse_without_block() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "reply.txt", "只有叙述。");

    babel()
        .args(["parse", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("只有叙述。"))
        .stdout(predicate::str::contains("No status block."));
}

#[test]
fn parse_missing_file() {
    babel()
        .args(["parse", "/nonexistent/reply.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_with_warnings() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "reply.txt", FULL_REPLY);

    babel()
        .args(["check", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status block OK"))
        .stdout(predicate::str::contains("1 characters, 1 events, 1 warnings"))
        .stderr(predicate::str::contains("the rest of the 事件更新 list still applies"))
        .stderr(predicate::str::contains("1 warning"));
}

#[test]
fn check_fails_without_block() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "reply.txt", "没有状态。");

    babel()
        .args(["check", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no status block"));
}

#[test]
fn check_fails_on_truncated_block() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "reply.txt", "叙述\n```status\n怀疑度: 90\n");

    babel()
        .args(["check", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("never closed"))
        .stderr(predicate::str::contains("no status is applied"))
        .stderr(predicate::str::contains("1 error, 0 warnings"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

fn script_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(&dir, "01.txt", FULL_REPLY);
    write(&dir, "02.txt", "夜色降临。\n```status\n天气: 雪\n```");
    dir
}

#[test]
fn play_replays_script_and_saves() {
    let script = script_dir();
    let out = TempDir::new().unwrap();
    let save = out.path().join("save.json");

    babel()
        .args([
            "play",
            "--script",
            script.path().to_str().unwrap(),
            "--save",
            save.to_str().unwrap(),
            "--name",
            "罗宾",
        ])
        .write_stdin("去图书馆\n:status\n:events\n等待\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("钟声响起"))
        .stdout(predicate::str::contains("WANTED"))
        .stdout(predicate::str::contains("查阅古籍 / 与埃莉诺交谈 / 离开"))
        .stdout(predicate::str::contains("罗宾"))
        .stdout(predicate::str::contains("夜色降临。"))
        .stdout(predicate::str::contains("Saved to"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&save).unwrap()).unwrap();
    assert_eq!(json["version"], "1.1");
    assert_eq!(json["gameState"]["stats"]["suspicion"], 100);
    assert_eq!(json["gameState"]["profile"]["weather"], "雪");
    assert_eq!(json["gameState"]["profile"]["name"], "罗宾");
}

#[test]
fn play_reports_exhausted_script() {
    let script = TempDir::new().unwrap();

    babel()
        .args(["play", "--script", script.path().to_str().unwrap()])
        .write_stdin("你好\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("系统错误：以太连接中断。"));
}

#[test]
fn play_without_api_key_shows_configuration_notice() {
    let script = script_dir();
    let settings_dir = TempDir::new().unwrap();
    let settings = settings_dir.path().join("settings.json");

    babel()
        .args([
            "play",
            "--script",
            script.path().to_str().unwrap(),
            "--settings",
            settings.to_str().unwrap(),
        ])
        .write_stdin("你好\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("尚未配置 API Key"));

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&settings).unwrap()).unwrap();
    assert_eq!(stored["has_visited"], "true");
}

#[test]
fn play_meta_commands() {
    let script = script_dir();

    babel()
        .args(["play", "--script", script.path().to_str().unwrap()])
        .write_stdin(":chars 关同学\n:open map\n:open attic\n:quest\n:map\n:bogus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("关祁"))
        .stdout(predicate::str::contains("巴别塔地图"))
        .stdout(predicate::str::contains("unknown modal"))
        .stdout(predicate::str::contains("usage: :quest"))
        .stdout(predicate::str::contains("You:"))
        .stdout(predicate::str::contains("unknown command: :bogus"));
}

#[test]
fn play_missing_script_dir() {
    babel()
        .args(["play", "--script", "/nonexistent/script"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read directory"));
}

// ---------------------------------------------------------------------------
// state
// ---------------------------------------------------------------------------

#[test]
fn state_summarises_save() {
    let script = script_dir();
    let out = TempDir::new().unwrap();
    let save = out.path().join("save.json");

    babel()
        .args([
            "play",
            "--script",
            script.path().to_str().unwrap(),
            "--save",
            save.to_str().unwrap(),
        ])
        .write_stdin("去图书馆\nquit\n")
        .assert()
        .success();

    babel()
        .args(["state", save.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("version 1.1"))
        .stdout(predicate::str::contains("14:00 · 下午"))
        .stdout(predicate::str::contains("WANTED"));
}

#[test]
fn state_loads_basic_save() {
    let dir = TempDir::new().unwrap();
    let save = write(
        &dir,
        "old.json",
        r#"{"version": "1.0", "timestamp": "2025-01-01T00:00:00.000Z", "gameState": {"stats": {"empireContribution": 20, "clubContribution": 30, "suspicion": 55}}}"#,
    );

    babel()
        .args(["state", save.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("version 1.0"))
        .stdout(predicate::str::contains("CAUTION"));
}

#[test]
fn state_rejects_non_save() {
    let dir = TempDir::new().unwrap();
    let save = write(&dir, "bad.json", r#"{"hello": 1}"#);

    babel()
        .args(["state", save.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing gameState"));
}
