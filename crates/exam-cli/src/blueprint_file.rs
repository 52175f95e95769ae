//! On-disk blueprint format.
//!
//! Blueprints are TOML files with the section list as an array of tables:
//!
//! ```toml
//! tenant_id = "dps-rohini"
//! class_id = "8"
//! subject = "Physics"
//! total_marks_target = 20
//! duration_minutes = 90
//!
//! [[sections]]
//! category = "multiple_choice"
//! enabled = true
//! question_count = 10
//! marks_per_question = 1
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use exam_model::AssessmentBlueprint;

pub fn load_blueprint(path: &Path) -> Result<AssessmentBlueprint> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read blueprint file {}", path.display()))?;
    let blueprint: AssessmentBlueprint = toml::from_str(&text)
        .with_context(|| format!("parse blueprint file {}", path.display()))?;
    Ok(blueprint)
}
