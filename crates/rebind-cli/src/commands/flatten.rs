//! Flattened hierarchy listing

use super::load_selection;
use crate::config::OutputFormat;
use anyhow::{Context, Result};
use rebind_core::RebindError;
use rebind_hierarchy::{flatten, PathEntry};

pub struct FlattenArgs {
    pub hierarchy: String,
    pub select: Option<String>,
    /// Only list objects with this name
    pub name: Option<String>,
    pub format: OutputFormat,
}

pub fn run(args: FlattenArgs) -> Result<()> {
    let (hierarchy, selection) = load_selection(&args.hierarchy, args.select.as_deref())?;
    let selection = selection
        .ok_or(RebindError::NoSelection)
        .context("nothing to flatten")?;

    let entries: Vec<PathEntry> = flatten(&hierarchy, selection)?
        .into_iter()
        .filter(|e| args.name.as_deref().map_or(true, |n| e.object_name == n))
        .collect();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            for entry in &entries {
                println!("{:<24} {}", entry.object_name, entry.relative_path);
            }
            if let Some(name) = &args.name {
                println!();
                println!("{}", name_note(name, entries.len()));
            }
        }
    }

    Ok(())
}

/// Whether a lost binding with this leaf name could be repaired
fn name_note(name: &str, count: usize) -> String {
    match count {
        0 => format!("No object named '{}': bindings to it cannot be repaired", name),
        1 => format!("'{}' is unique: bindings to it can be repaired", name),
        n => format!("{} objects named '{}': bindings to it are ambiguous", n, name),
    }
}
