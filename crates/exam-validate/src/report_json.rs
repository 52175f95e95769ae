//! Machine-readable validation report payload.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use exam_model::AssessmentBlueprint;

use crate::findings::{Finding, ValidationReport};

const REPORT_SCHEMA: &str = "exam-engine.validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
pub struct ValidationReportPayload {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub tenant_id: String,
    pub class_id: String,
    pub subject: String,
    pub valid: bool,
    pub findings: Vec<FindingJson>,
}

#[derive(Debug, Serialize)]
pub struct FindingJson {
    pub code: &'static str,
    pub message: String,
    #[serde(flatten)]
    pub detail: Finding,
}

pub fn report_payload(
    blueprint: &AssessmentBlueprint,
    report: &ValidationReport,
) -> ValidationReportPayload {
    payload_at(blueprint, report, Utc::now().to_rfc3339())
}

// Split out so snapshot tests can pin the timestamp.
pub(crate) fn payload_at(
    blueprint: &AssessmentBlueprint,
    report: &ValidationReport,
    generated_at: String,
) -> ValidationReportPayload {
    ValidationReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at,
        tenant_id: blueprint.tenant_id.to_string(),
        class_id: blueprint.class_id.to_string(),
        subject: blueprint.subject.clone(),
        valid: report.is_valid(),
        findings: report
            .findings
            .iter()
            .map(|finding| FindingJson {
                code: finding.code(),
                message: finding.message(),
                detail: finding.clone(),
            })
            .collect(),
    }
}


/// Write the report as pretty JSON next to other engine outputs.
pub fn write_report_json(
    output_path: &Path,
    blueprint: &AssessmentBlueprint,
    report: &ValidationReport,
) -> std::io::Result<PathBuf> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let payload = report_payload(blueprint, report);
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(output_path, format!("{json}\n"))?;
    Ok(output_path.to_path_buf())
}
