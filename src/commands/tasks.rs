//! Tasks command handler

use std::path::Path;

use anyhow::{Context, Result};

use filemappers::{MapperResult, TaskDescriptor};

use super::{load, task_label};

pub fn cmd_tasks(file: &Path, task: Option<&str>) -> Result<()> {
    let loaded = load(file)?;
    let defs = loaded.selected(task)?;

    let mut descriptors: Vec<TaskDescriptor> = Vec::new();
    for (index, def) in defs.iter().enumerate() {
        let label = task_label(def, index);
        let mut mapper = def
            .build(&loaded.defaults)
            .with_context(|| format!("task '{label}'"))?;
        let built = mapper
            .tasks(def.base_task())
            .collect::<MapperResult<Vec<_>>>()
            .with_context(|| format!("task '{label}'"))?;
        descriptors.extend(built);
    }

    println!("{}", serde_json::to_string_pretty(&descriptors)?);
    Ok(())
}
