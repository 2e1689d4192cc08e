//! `filemap` binary scenarios.

use crate::common::*;

#[test]
fn scenario_map_prints_mapping() {
    let env = TestEnv::new();
    env.write("tasks.toml", GLOB_BACKUP_TASK)
        .write("a.txt", "")
        .write("b.txt", "")
        .write("notes.md", "");

    let result = env.run(&["map", "tasks.toml"]);

    assert!(result.success, "{}", result.stderr);
    insta::assert_snapshot!(result.stdout.trim_end(), @r"
    a.txt -> a.bak
    b.txt -> b.bak
    ");
}

#[test]
fn scenario_map_json() {
    let env = TestEnv::new();
    env.write("tasks.toml", MERGE_TASK)
        .write("parts/x.txt", "")
        .write("parts/y.txt", "");

    let result = env.run(&["map", "tasks.toml", "--json"]);

    assert!(result.success, "{}", result.stderr);
    let value: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "task": "bundle",
            "mapping": [
                {"source": "parts/x.txt", "target": "bundle.txt"},
                {"source": "parts/y.txt", "target": "bundle.txt"},
            ],
        }])
    );
}

#[test]
fn scenario_tasks_per_stage() {
    let env = TestEnv::new();
    env.write("tasks.toml", CHAINED_STAGES_TASK)
        .write("src/a.txt", "");

    let result = env.run(&["tasks", "tasks.toml"]);

    assert!(result.success, "{}", result.stderr);
    let value: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {
                "name": "GlobMapper1",
                "targets": ["build/a.txt"],
                "file_dep": ["src/a.txt"],
                "actions": [{"command": "cp src/a.txt build/a.txt"}],
            },
            {
                "name": "RegexMapper1",
                "targets": ["build/a.gz"],
                "file_dep": ["build/a.txt"],
                "actions": [{"command": "gzip -c build/a.txt > build/a.gz"}],
            },
        ])
    );
}

#[test]
fn scenario_tasks_keep_doc() {
    let env = TestEnv::new();
    env.write("tasks.toml", GLOB_BACKUP_TASK).write("a.txt", "");

    let result = env.run(&["tasks", "tasks.toml", "--task", "backup"]);

    assert!(result.success, "{}", result.stderr);
    let value: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(value[0]["name"], "backup");
    assert_eq!(value[0]["doc"], "back up text files");
    assert_eq!(value[0]["actions"][0]["command"], "cp a.txt a.bak");
}

#[test]
fn scenario_empty_mapping_fails_the_run() {
    let env = TestEnv::new();
    env.write("tasks.toml", GLOB_BACKUP_TASK);

    let result = env.run(&["tasks", "tasks.toml"]);

    assert!(!result.success);
    assert_ne!(result.exit_code, 0);
    assert!(result.stderr.contains("empty mapping"), "{}", result.stderr);
}

#[test]
fn scenario_user_config_tolerates_empty_mapping() {
    let env = TestEnv::new();
    env.write("tasks.toml", GLOB_BACKUP_TASK);
    env.write_user_config("[defaults]\nallow_empty_map = true\n");

    let result = env.run(&["tasks", "tasks.toml"]);

    assert!(result.success, "{}", result.stderr);
    let value: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(value[0]["actions"], serde_json::json!(["noop"]));
    assert_eq!(value[0]["targets"], serde_json::json!([]));
}

#[test]
fn scenario_env_overrides_task_file_defaults() {
    let env = TestEnv::new();
    env.write(
        "tasks.toml",
        &format!("[defaults]\ndir = \"missing\"\n{GLOB_BACKUP_TASK}"),
    )
    .write("data/a.txt", "");

    let result = env.run_with_env(&["map", "tasks.toml"], &[("FILEMAPPERS_DIR", "data")]);

    assert!(result.success, "{}", result.stderr);
    assert_eq!(result.stdout.trim_end(), "data/a.txt -> data/a.bak");
}

#[test]
fn scenario_chained_stages_follow_defaults_dir() {
    let env = TestEnv::new();
    env.write(
        "tasks.toml",
        &format!("[defaults]\ndir = \"proj\"\n{CHAINED_STAGES_TASK}"),
    )
    .write("proj/src/one.txt", "")
    .write("proj/src/two.md", "");

    let result = env.run(&["map", "tasks.toml"]);

    assert!(result.success, "{}", result.stderr);
    assert_eq!(result.stdout.trim_end(), "proj/src/one.txt -> proj/build/one.gz");
}

#[test]
fn scenario_task_flag_selects_one_task() {
    let env = TestEnv::new();
    env.write("tasks.toml", &format!("{GLOB_BACKUP_TASK}{MERGE_TASK}"))
        .write("a.txt", "")
        .write("parts/1.txt", "");

    let result = env.run(&["map", "tasks.toml", "--task", "bundle"]);

    assert!(result.success, "{}", result.stderr);
    assert_eq!(result.stdout.trim_end(), "parts/1.txt -> bundle.txt");
}

#[test]
fn scenario_unknown_task_name() {
    let env = TestEnv::new();
    env.write("tasks.toml", GLOB_BACKUP_TASK);

    let result = env.run(&["map", "tasks.toml", "--task", "nope"]);

    assert!(!result.success);
    assert!(result.stderr.contains("no task named 'nope'"), "{}", result.stderr);
}

#[test]
fn scenario_unknown_key_is_a_warning() {
    let env = TestEnv::new();
    env.write(
        "tasks.toml",
        "[[task]]\nkind = \"identity\"\nsrc = [\"a\"]\nfile_deps = true\n",
    );

    let result = env.run(&["map", "tasks.toml"]);

    assert!(result.success, "{}", result.stderr);
    assert!(result.stderr.contains("unknown key 'file_deps'"), "{}", result.stderr);
    assert!(result.stderr.contains("did you mean 'file_dep'"), "{}", result.stderr);
    assert_eq!(result.stdout.trim_end(), "a -> a");
}
