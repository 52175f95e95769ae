//! CSV loader for class policy tables.
//!
//! The policy file is a flat CSV keyed by tenant and class:
//!
//! ```csv
//! tenant_id,class_id,allowed_categories,mcq_max_marks
//! dps-rohini,8,multiple_choice|short_answer|descriptive,20
//! dps-rohini,5,one_word|fill_blank|true_false|multiple_choice,15
//! ```
//!
//! `allowed_categories` is pipe-separated; `mcq_max_marks` may be blank for
//! no ceiling.

use std::collections::BTreeSet;
use std::path::Path;

use exam_model::{ClassId, ClassPolicy, SectionCategory, TenantId};
use tracing::debug;

use crate::error::PolicyError;
use crate::registry::PolicyRegistry;

fn header_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn get_string(row: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| row.get(i))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn parse_categories(
    raw: &str,
    path: &Path,
    line: u64,
) -> Result<BTreeSet<SectionCategory>, PolicyError> {
    let mut categories = BTreeSet::new();
    for part in raw.split('|') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let category = part
            .parse::<SectionCategory>()
            .map_err(|e| PolicyError::InvalidRow {
                path: path.to_path_buf(),
                line,
                message: e.to_string(),
            })?;
        categories.insert(category);
    }
    if categories.is_empty() {
        return Err(PolicyError::InvalidRow {
            path: path.to_path_buf(),
            line,
            message: "allowed_categories is empty".to_string(),
        });
    }
    Ok(categories)
}

/// Load a policy registry from a `policies.csv` file.
pub fn load_policies_csv(path: &Path) -> Result<PolicyRegistry, PolicyError> {
    let bytes = std::fs::read(path).map_err(|e| PolicyError::io(path, e))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());
    let headers = reader
        .headers()
        .map_err(|e| PolicyError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();

    let idx_tenant = header_index(&headers, "tenant_id");
    let idx_class = header_index(&headers, "class_id");
    let idx_categories = header_index(&headers, "allowed_categories");
    let idx_mcq_max = header_index(&headers, "mcq_max_marks");

    let mut registry = PolicyRegistry::new();
    for (row_number, row) in reader.records().enumerate() {
        // Header occupies line 1.
        let line = row_number as u64 + 2;
        let row = row.map_err(|e| PolicyError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let invalid_row = |message: String| PolicyError::InvalidRow {
            path: path.to_path_buf(),
            line,
            message,
        };

        let tenant_raw = get_string(&row, idx_tenant)
            .ok_or_else(|| invalid_row("missing tenant_id".to_string()))?;
        let class_raw = get_string(&row, idx_class)
            .ok_or_else(|| invalid_row("missing class_id".to_string()))?;
        let categories_raw = get_string(&row, idx_categories)
            .ok_or_else(|| invalid_row("missing allowed_categories".to_string()))?;

        let tenant = TenantId::new(tenant_raw).map_err(|e| invalid_row(e.to_string()))?;
        let class = ClassId::new(class_raw).map_err(|e| invalid_row(e.to_string()))?;
        let allowed_categories = parse_categories(&categories_raw, path, line)?;
        let mcq_max_marks = match get_string(&row, idx_mcq_max) {
            Some(raw) => Some(
                raw.parse::<u32>()
                    .map_err(|e| invalid_row(format!("mcq_max_marks: {e}")))?,
            ),
            None => None,
        };

        if registry.resolve(&tenant, &class).is_ok() {
            return Err(PolicyError::Duplicate {
                path: path.to_path_buf(),
                tenant,
                class,
            });
        }

        registry.insert(
            tenant,
            ClassPolicy {
                class_id: class,
                allowed_categories,
                mcq_max_marks,
            },
        );
    }

    debug!(policies = registry.len(), path = %path.display(), "loaded policy table");
    Ok(registry)
}
