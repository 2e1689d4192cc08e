//! End-to-end pipelines on the local filesystem.

use std::fs::File;
use std::io::{self, Read, Write};

use crate::common::*;

use filemappers::{
    FileOpener, Mapper, MapperResult, MergeOpener, SourceSpec, TaskAction, TaskDescriptor,
};

fn copy(input: &mut File, output: &mut File) -> io::Result<()> {
    io::copy(input, output).map(|_| ())
}

fn shout(input: &mut File, output: &mut File) -> io::Result<()> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    output.write_all(text.to_uppercase().as_bytes())
}

fn run_all(task: &TaskDescriptor) {
    for action in &task.actions {
        let outcome = action.run().expect("in-process action");
        assert!(outcome.is_success(), "failed entries: {:?}", outcome.failed);
    }
}

#[test]
fn scenario_glob_backup_copies_each_file() {
    let env = TestEnv::new();
    env.write("a.txt", "alpha").write("b.txt", "beta").write("c.md", "skip");

    let mut mapper = Mapper::glob("*.txt", "*.bak")
        .unwrap()
        .with_base_dir(env.project_root.path())
        .with_action(filemappers::ActionSpec::Callback(
            FileOpener::default().into_callback(copy),
        ));

    let task = mapper.build_task(TaskDescriptor::named("backup")).unwrap();
    assert_eq!(task.targets.len(), 2);
    run_all(&task);

    assert_eq!(env.read("a.bak"), "alpha");
    assert_eq!(env.read("b.bak"), "beta");
    assert_eq!(
        list_all_files(env.project_root.path()),
        vec!["a.bak", "a.txt", "b.bak", "b.txt", "c.md"]
    );
}

#[test]
fn scenario_chained_stages_run_in_order() {
    let env = TestEnv::new();
    env.write("src/one.txt", "one").write("src/two.txt", "two");
    let root = env.project_root.path();

    let mut mapper = Mapper::chained(
        SourceSpec::glob("src/*.txt"),
        vec![
            Mapper::glob_with_pattern(SourceSpec::Paths(Vec::new()), "src/*.txt", "build/*.txt")
                .unwrap()
                .with_base_dir(root)
                .with_action(filemappers::ActionSpec::Callback(
                    FileOpener::default().into_callback(copy),
                )),
            Mapper::regex(SourceSpec::Paths(Vec::new()), r"\.txt$", ".loud")
                .unwrap()
                .with_action(filemappers::ActionSpec::Callback(
                    FileOpener::default().into_callback(shout),
                )),
        ],
    )
    .unwrap()
    .with_base_dir(root);

    let tasks = mapper
        .tasks(TaskDescriptor::new())
        .collect::<MapperResult<Vec<_>>>()
        .unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].name.as_deref(), Some("GlobMapper1"));
    assert_eq!(tasks[1].name.as_deref(), Some("RegexMapper1"));
    for task in &tasks {
        run_all(task);
    }

    assert_eq!(env.read("build/one.txt"), "one");
    assert_eq!(env.read("build/one.loud"), "ONE");
    assert_eq!(env.read("build/two.loud"), "TWO");
}

#[test]
fn scenario_glob_prefix_is_relative_to_base_dir() {
    let env = TestEnv::new();
    env.write("src/a.txt", "a").write("src/b.md", "b");
    let root = env.project_root.path();

    let mut glob = Mapper::glob("src/*.txt", "build/*.txt")
        .unwrap()
        .with_base_dir(root)
        .with_command("cp %(source)s %(target)s");
    let task = glob.build_task(TaskDescriptor::named("copy")).unwrap();

    assert_eq!(
        task.targets.iter().cloned().collect::<Vec<_>>(),
        vec![env.project_path("build/a.txt").display().to_string()]
    );

    let mut chained = Mapper::chained(
        "src/*.txt",
        vec![Mapper::glob_with_pattern(SourceSpec::Paths(Vec::new()), "src/*.txt", "build/*.txt")
            .unwrap()
            .with_base_dir(root)],
    )
    .unwrap()
    .with_base_dir(root);

    assert_eq!(
        chained.resolve_mapping().unwrap(),
        &[filemappers::MappingEntry::new(
            env.project_path("src/a.txt"),
            env.project_path("build/a.txt"),
        )]
    );
}

#[test]
fn scenario_merge_opener_concatenates() {
    let env = TestEnv::new();
    env.write("parts/1.txt", "first\n")
        .write("parts/2.txt", "second\n")
        .write("parts/3.txt", "third\n");

    let mut mapper = Mapper::merge("parts/*.txt", env.project_path("bundle.txt"))
        .unwrap()
        .with_base_dir(env.project_root.path())
        .with_action(filemappers::ActionSpec::Callback(
            MergeOpener::new().into_callback(copy),
        ));

    let task = mapper.build_task(TaskDescriptor::new()).unwrap();
    assert_eq!(task.file_dep.as_ref().map(Vec::len), Some(3));
    run_all(&task);

    assert_eq!(env.read("bundle.txt"), "first\nsecond\nthird\n");
}

#[test]
fn scenario_failed_entry_does_not_stop_the_rest() {
    let env = TestEnv::new();
    env.write("in/a.txt", "a").write("in/b.txt", "b");

    // Targets under a path that is a regular file cannot be created.
    env.write("blocked", "");
    let root = env.project_root.path().display().to_string();
    let mut mapper = Mapper::regex(
        SourceSpec::paths([env.project_path("in/a.txt"), env.project_path("in/b.txt")]),
        r"/in/a\.txt$",
        "/blocked/a.txt",
    )
    .unwrap()
    .ignore_nonmatching(false)
    .with_action(filemappers::ActionSpec::Callback(
        FileOpener::default().into_callback(copy),
    ));

    let task = mapper.build_task(TaskDescriptor::new()).unwrap();
    let TaskAction::Run(action) = &task.actions[0] else {
        panic!("expected an in-process action");
    };
    let outcome = action.run();

    assert_eq!(outcome.attempted, 2);
    assert!(!outcome.is_success());
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(
        outcome.failed[0].target.to_string(),
        format!("{root}/blocked/a.txt")
    );
}

#[cfg(unix)]
#[test]
fn scenario_symlinks_respect_follow_flag() {
    let env = TestEnv::new();
    env.write("real.txt", "data");
    std::os::unix::fs::symlink(env.project_path("real.txt"), env.project_path("link.txt")).unwrap();

    let names = |follow: bool| -> Vec<String> {
        let mut mapper = Mapper::identity("*.txt")
            .with_base_dir(env.project_root.path())
            .follow_symlinks(follow);
        mapper
            .resolve_mapping()
            .unwrap()
            .iter()
            .map(|e| e.source.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    };

    assert_eq!(names(true), vec!["link.txt", "real.txt"]);
    assert_eq!(names(false), vec!["real.txt"]);
}
