//! Lost binding check command

use super::load_selection;
use super::output::{print_reports_text, reports_json};
use crate::config::OutputFormat;
use anyhow::{Context, Result};
use rebind_validator::ValidationSession;

pub struct CheckArgs {
    pub hierarchy: String,
    pub select: Option<String>,
    pub format: OutputFormat,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let (hierarchy, selection) = load_selection(&args.hierarchy, args.select.as_deref())?;
    let session = ValidationSession::open(&hierarchy, selection)
        .context("cannot validate the selected object")?;

    let reports: Vec<_> = session.reports().iter().collect();
    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports_json(&reports, None))?);
        }
        OutputFormat::Text => print_reports_text(&reports, None),
    }

    let ok = session.has_no_error();
    session.close();
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
