//! Blueprint validation.
//!
//! `validate` is a pure function over a blueprint and a class policy: no I/O,
//! no clock, no state. It is the correctness gate for every downstream
//! operation; the orchestrator refuses to touch the generation collaborator
//! until this passes.

mod findings;
mod report_json;

pub use findings::{BlueprintRejected, Finding, ValidationReport};
pub use report_json::{ValidationReportPayload, report_payload, write_report_json};

use exam_model::{AssessmentBlueprint, ClassPolicy, SectionCategory, SectionConfig};

/// Validate a blueprint against the class policy.
///
/// Check order matches the submission contract:
/// 1. structural shape of enabled sections (short-circuits on failure);
/// 2. policy membership of every enabled category;
/// 3. the MCQ mark ceiling, when the policy sets one;
/// 4. exact mark-sum equality with the declared target;
/// 5. non-emptiness.
///
/// Checks 2-5 accumulate so the caller sees every violation in one pass.
pub fn validate(blueprint: &AssessmentBlueprint, policy: &ClassPolicy) -> ValidationReport {
    let structural: Vec<Finding> = blueprint
        .enabled_sections()
        .filter_map(structural_finding)
        .collect();
    if !structural.is_empty() {
        return ValidationReport {
            findings: structural,
        };
    }

    let mut findings = Vec::new();

    for section in blueprint.enabled_sections() {
        if !policy.allows(section.category) {
            findings.push(Finding::CategoryNotAllowed {
                category: section.category,
            });
        }
    }

    if let Some(limit) = policy.mcq_max_marks {
        let mcq_marks: u64 = blueprint
            .enabled_sections()
            .filter(|section| section.category == SectionCategory::MultipleChoice)
            .map(SectionConfig::planned_marks)
            .sum();
        if mcq_marks > u64::from(limit) {
            findings.push(Finding::McqMarksExceeded {
                actual: mcq_marks,
                limit,
            });
        }
    }

    let computed = blueprint.planned_marks();
    if computed != u64::from(blueprint.total_marks_target) {
        findings.push(Finding::MarksMismatch {
            computed,
            target: blueprint.total_marks_target,
        });
    }

    if blueprint.enabled_sections().next().is_none() {
        findings.push(Finding::EmptyBlueprint);
    }

    ValidationReport { findings }
}

fn structural_finding(section: &SectionConfig) -> Option<Finding> {
    if section.question_count == 0 {
        return Some(Finding::Structural {
            category: section.category,
            message: "enabled section has a question count of 0".to_string(),
        });
    }
    if section.marks_per_question == 0 {
        return Some(Finding::Structural {
            category: section.category,
            message: "enabled section has 0 marks per question".to_string(),
        });
    }
    None
}
