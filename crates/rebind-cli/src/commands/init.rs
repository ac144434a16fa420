//! Sample project scaffolding command

use anyhow::Result;
use std::fs;
use std::path::Path;

const HIERARCHY: &str = r#"# Hand was moved under Body/Arm after the clips were recorded.
[root]
name = "Hero"

[root.animator]
controller = "hero.controller.toml"

[[root.children]]
name = "Body"

[[root.children.children]]
name = "Arm"

[[root.children.children.children]]
name = "Hand"

[[root.children]]
name = "Accessories"

[[root.children.children]]
name = "Ribbon"

[[root.children]]
name = "Hair"

[[root.children.children]]
name = "Ribbon"
"#;

const CONTROLLER: &str = r#"[controller]
name = "hero"

[[layers]]
name = "Base Layer"

[[layers.states]]
name = "Idle"
clip = "clips/idle.anim.toml"

[[layers.states]]
name = "Walk"
clip = "clips/walk.anim.toml"

[[layers]]
name = "Gesture"

[[layers.states]]
name = "Wave"
clip = "clips/wave.anim.toml"

[[layers.states]]
name = "Empty"
"#;

const IDLE_CLIP: &str = r#"name = "idle"

[[position_curves]]
path = "Body/Arm"
"#;

const WALK_CLIP: &str = r#"name = "walk"

[[position_curves]]
path = "Arm/Hand"

[[scale_curves]]
path = "Body"

# Cape was renamed to Cloak
[[float_curves]]
path = "Cape"
attribute = "m_IsActive"
"#;

const WAVE_CLIP: &str = r#"name = "wave"

# Both Accessories and Hair hold a Ribbon
[[pptr_curves]]
path = "Ribbon"
attribute = "m_Sprite"

[[editor_curves]]
path = ""
attribute = "m_Enabled"

[[euler_editor_curves]]
path = "Arm"
attribute = "localEulerAnglesRaw.z"
"#;

const CONFIG: &str = r#"[output]
# format = "json"
progress = true

[recovery]
save = true
"#;

pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);

    if project_dir.exists() {
        anyhow::bail!("Directory '{}' already exists", name);
    }

    fs::create_dir_all(project_dir.join("clips"))?;
    fs::create_dir_all(project_dir.join(".rebind"))?;

    fs::write(project_dir.join("hero.hierarchy.toml"), HIERARCHY)?;
    fs::write(project_dir.join("hero.controller.toml"), CONTROLLER)?;
    fs::write(project_dir.join("clips/idle.anim.toml"), IDLE_CLIP)?;
    fs::write(project_dir.join("clips/walk.anim.toml"), WALK_CLIP)?;
    fs::write(project_dir.join("clips/wave.anim.toml"), WAVE_CLIP)?;
    fs::write(project_dir.join(".rebind/config.toml"), CONFIG)?;

    println!("Created sample project '{}'", name);
    println!();
    println!("Next steps:");
    println!("  cd {}", name);
    println!("  rebind check hero.hierarchy.toml");
    println!("  rebind fix hero.hierarchy.toml --dry-run");

    Ok(())
}
