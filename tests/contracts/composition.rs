//! Composition contracts: Composite (fan-in) and Chained (pipeline).

use std::collections::BTreeSet;

use crate::common::*;

use filemappers::{Mapper, MapperResult, SourceSpec, TaskDescriptor};

fn empty() -> SourceSpec {
    SourceSpec::Paths(Vec::new())
}

/// CONTRACT: Composite targets/deps are the union of its parts.
mod composite {
    use super::*;

    #[test]
    fn contract_composite_is_union_of_parts() {
        let mut m1 = Mapper::glob_with_pattern(SourceSpec::paths(["a.txt", "b.txt"]), "*.txt", "*.bak")
            .unwrap();
        let mut m2 = Mapper::merge(SourceSpec::paths(["c.md", "d.md"]), "docs.md").unwrap();

        let mut expected_targets = BTreeSet::new();
        let mut expected_deps = BTreeSet::new();
        for mapper in [&mut m1, &mut m2] {
            for entry in mapper.resolve_mapping().unwrap() {
                expected_targets.insert(entry.target.to_string());
                expected_deps.insert(entry.source.to_string());
            }
        }

        let mut composite = Mapper::composite(vec![m1, m2]).with_callback(|_, _| true);
        let task = composite.build_task(TaskDescriptor::new()).unwrap();

        assert_eq!(task.targets, expected_targets);
        let deps: BTreeSet<_> = task.file_dep.unwrap().into_iter().collect();
        assert_eq!(deps, expected_deps);
    }
}

/// CONTRACT: Chained without a terminal action yields one named task per
/// stage, each fed by the previous stage's targets.
mod chained {
    use super::*;

    #[test]
    fn contract_chained_stage_tasks_are_threaded_and_named() {
        let mut mapper = Mapper::chained(
            SourceSpec::paths(["a.txt", "b.txt"]),
            vec![
                Mapper::regex(empty(), r"\.txt$", ".tmp")
                    .unwrap()
                    .with_command("step1 %(source)s %(target)s"),
                Mapper::regex(empty(), r"\.tmp$", ".out")
                    .unwrap()
                    .with_command("step2 %(source)s %(target)s"),
            ],
        )
        .unwrap();

        let tasks = mapper
            .tasks(TaskDescriptor::new())
            .collect::<MapperResult<Vec<_>>>()
            .unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].name.as_deref(), Some("RegexMapper1"));
        assert_eq!(tasks[1].name.as_deref(), Some("RegexMapper2"));
        assert_eq!(tasks[0].targets, string_set(["a.tmp", "b.tmp"]));
        assert_eq!(
            tasks[1].file_dep,
            Some(vec!["a.tmp".to_string(), "b.tmp".to_string()])
        );
        assert_eq!(tasks[1].targets, string_set(["a.out", "b.out"]));
    }

    #[test]
    fn contract_chained_with_action_maps_originals_to_finals() {
        let mut mapper = Mapper::chained(
            SourceSpec::paths(["a.txt"]),
            vec![
                Mapper::glob_with_pattern(empty(), "*.txt", "*.tmp").unwrap(),
                Mapper::glob_with_pattern(empty(), "*.tmp", "*.out").unwrap(),
            ],
        )
        .unwrap()
        .with_callback(|_, _| true);

        let tasks: Vec<_> = mapper.tasks(TaskDescriptor::named("all")).collect();

        assert_eq!(tasks.len(), 1);
        let task = tasks.into_iter().next().unwrap().unwrap();
        assert_eq!(task.targets, string_set(["a.out"]));
        assert_eq!(task.file_dep, Some(vec!["a.txt".to_string()]));
    }
}
