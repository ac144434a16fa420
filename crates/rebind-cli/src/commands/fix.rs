//! Lost binding repair command

use super::load_selection;
use super::output::{print_reports_text, reports_json};
use crate::config::OutputFormat;
use crate::progress::Progress;
use anyhow::{Context, Result};
use rebind_validator::ValidationSession;

pub struct FixArgs {
    pub hierarchy: String,
    pub select: Option<String>,
    /// Repair only the clip with this name
    pub clip: Option<String>,
    pub dry_run: bool,
    pub format: OutputFormat,
    pub progress: bool,
}

pub fn run(args: FixArgs) -> Result<()> {
    let (hierarchy, selection) = load_selection(&args.hierarchy, args.select.as_deref())?;
    let mut session = ValidationSession::open(&hierarchy, selection)
        .context("cannot validate the selected object")?;
    session.set_persist(!args.dry_run);

    let target = match &args.clip {
        Some(name) => Some(
            session
                .find_report(name)
                .with_context(|| format!("clip '{}' is not on the selected controller", name))?,
        ),
        None => None,
    };

    let previous: Vec<Vec<String>> = session
        .reports()
        .iter()
        .map(|r| r.bindings.iter().map(|b| b.path.clone()).collect())
        .collect();

    let progress = Progress::bar(args.progress, "recovering");
    let mut on_progress = |item: &str, fraction: f32| progress.update(item, fraction);
    let summary = match target {
        Some(index) => session.recover_clip(index, Some(&mut on_progress))?,
        None => session.recover_all(Some(&mut on_progress))?,
    };
    progress.finish();

    let (reports, previous): (Vec<_>, Vec<_>) = session
        .reports()
        .iter()
        .zip(previous)
        .enumerate()
        .filter(|(i, _)| target.map_or(true, |t| t == *i))
        .map(|(_, pair)| pair)
        .unzip();

    match args.format {
        OutputFormat::Json => {
            let mut value = reports_json(&reports, Some(previous.as_slice()));
            value["dry_run"] = serde_json::json!(args.dry_run);
            value["clips_written"] = serde_json::json!(summary.clips_written);
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            print_reports_text(&reports, Some(previous.as_slice()));
            println!();
            println!(
                "{} fixed, {} without a same-named object, {} ambiguous",
                summary.fixed, summary.no_same_name, summary.duplicate
            );
            if args.dry_run {
                println!("Dry run: no clips were written.");
            } else {
                println!("{} clip file(s) written.", summary.clips_written);
            }
        }
    }

    let ok = reports.iter().all(|r| r.has_no_error());
    session.close();
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
