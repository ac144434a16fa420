//! Report rendering shared by `check` and `fix`

use rebind_validator::{ClipReport, FixState, LostBinding};

/// Print reports as text. `previous` holds each binding's path before
/// recovery, indexed like `reports`, when recovery has run.
pub fn print_reports_text(reports: &[&ClipReport], previous: Option<&[Vec<String>]>) {
    if reports.is_empty() {
        println!("No clips found on the selected controller.");
        return;
    }

    for (r, report) in reports.iter().enumerate() {
        if report.bindings.is_empty() {
            println!("{}: no lost bindings", report.clip_name);
            continue;
        }

        let status = if report.has_no_error() { "ok" } else { "ERROR" };
        println!(
            "{}: {} lost binding(s) [{}]",
            report.clip_name,
            report.bindings.len(),
            status
        );

        for (b, binding) in report.bindings.iter().enumerate() {
            let before = previous.and_then(|p| p.get(r)).and_then(|p| p.get(b));
            println!("  {}", binding_line(binding, before.map(String::as_str)));
        }
    }
}

fn binding_line(binding: &LostBinding, before: Option<&str>) -> String {
    let path = match before {
        Some(before) if before != binding.path => format!("{} -> {}", before, binding.path),
        _ => binding.path.clone(),
    };
    let path = if path.is_empty() { "(root)".to_string() } else { path };

    let mut line = format!(
        "[{:<18}] {} ({}, {})",
        binding.state, path, binding.attribute, binding.handle.category
    );
    let detail = binding.state.detail();
    if !detail.is_empty() {
        line.push_str(": ");
        line.push_str(detail);
    }
    line
}

/// Reports as a JSON value
pub fn reports_json(reports: &[&ClipReport], previous: Option<&[Vec<String>]>) -> serde_json::Value {
    let clips: Vec<serde_json::Value> = reports
        .iter()
        .enumerate()
        .map(|(r, report)| {
            let bindings: Vec<serde_json::Value> = report
                .bindings
                .iter()
                .enumerate()
                .map(|(b, binding)| {
                    let before = previous.and_then(|p| p.get(r)).and_then(|p| p.get(b));
                    serde_json::json!({
                        "object_name": binding.object_name,
                        "path": binding.path,
                        "previous_path": before,
                        "attribute": binding.attribute,
                        "category": binding.handle.category.key(),
                        "index": binding.handle.index,
                        "state": binding.state,
                        "detail": binding.state.detail(),
                    })
                })
                .collect();

            serde_json::json!({
                "clip": report.clip_name,
                "file": report.source.as_ref().map(|p| p.display().to_string()),
                "has_no_error": report.has_no_error(),
                "bindings": bindings,
            })
        })
        .collect();

    serde_json::json!({
        "ok": reports.iter().all(|r| r.has_no_error()),
        "lost": reports.iter().map(|r| r.bindings.len()).sum::<usize>(),
        "fixed": reports.iter().map(|r| r.count(FixState::Fixed)).sum::<usize>(),
        "clips": clips,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebind_clip::{BindingHandle, ClipStore, CurveCategory};

    fn report(state: FixState, path: &str) -> ClipReport {
        let mut store = ClipStore::new();
        let clip = store.insert_str("grab", "").unwrap();
        ClipReport {
            clip,
            clip_name: "grab".to_string(),
            source: None,
            bindings: vec![LostBinding {
                object_name: "Hand".to_string(),
                path: path.to_string(),
                attribute: "Position".to_string(),
                state,
                handle: BindingHandle {
                    clip,
                    category: CurveCategory::Position,
                    index: 0,
                },
            }],
        }
    }

    #[test]
    fn test_binding_line_shows_rewrite() {
        let r = report(FixState::Fixed, "Leg/Hand");
        let line = binding_line(&r.bindings[0], Some("Arm/Hand"));
        assert!(line.contains("Arm/Hand -> Leg/Hand"));
        assert!(line.contains("fixed"));
        assert!(line.contains("position_curves"));
        assert!(line.ends_with("animation path was changed"));
    }

    #[test]
    fn test_binding_line_for_lost() {
        let r = report(FixState::Lost, "Arm/Hand");
        let line = binding_line(&r.bindings[0], None);
        assert!(line.contains("lost"));
        assert!(line.ends_with("(Position, position_curves)"));
    }

    #[test]
    fn test_reports_json() {
        let r = report(FixState::ErrorDuplicate, "Arm/Hand");
        let previous = vec![vec!["Arm/Hand".to_string()]];
        let value = reports_json(&[&r], Some(previous.as_slice()));

        assert_eq!(value["ok"], false);
        assert_eq!(value["lost"], 1);
        assert_eq!(value["fixed"], 0);
        let binding = &value["clips"][0]["bindings"][0];
        assert_eq!(binding["state"], "error_duplicate");
        assert_eq!(binding["category"], "position_curves");
        assert_eq!(binding["previous_path"], "Arm/Hand");
        assert!(value["clips"][0]["file"].is_null());
    }
}
