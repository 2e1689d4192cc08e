//! Map command handler

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use super::{load, task_label};

pub fn cmd_map(file: &Path, task: Option<&str>, json: bool) -> Result<()> {
    let loaded = load(file)?;
    let defs = loaded.selected(task)?;

    let mut rendered = Vec::new();
    for (index, def) in defs.iter().enumerate() {
        let label = task_label(def, index);
        let mut mapper = def
            .build(&loaded.defaults)
            .with_context(|| format!("task '{label}'"))?;
        let mapping = mapper
            .resolve_mapping()
            .with_context(|| format!("task '{label}'"))?
            .to_vec();
        rendered.push((label, mapping));
    }

    if json {
        let out: Vec<_> = rendered
            .iter()
            .map(|(label, mapping)| json!({ "task": label, "mapping": mapping }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let multiple = rendered.len() > 1;
    for (label, mapping) in &rendered {
        if multiple {
            println!("[{label}]");
        }
        for entry in mapping {
            println!("{entry}");
        }
    }
    Ok(())
}
