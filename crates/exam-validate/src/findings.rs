use serde::{Deserialize, Serialize};

use exam_model::SectionCategory;

/// A single reason a blueprint was rejected.
///
/// Findings accumulate: apart from structural defects (which abort the run
/// because later checks would compute on garbage), the validator reports
/// every violation at once so the caller can fix all of them in one round
/// trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// An enabled section violates a basic shape rule (zero questions or
    /// zero marks per question).
    Structural {
        category: SectionCategory,
        message: String,
    },
    /// An enabled category is outside the class policy's allow list.
    CategoryNotAllowed { category: SectionCategory },
    /// MCQ section marks exceed the policy ceiling. `actual` is the summed
    /// planned marks over every enabled multiple-choice section, so it can
    /// exceed `u32::MAX` for adversarial counts.
    McqMarksExceeded { actual: u64, limit: u32 },
    /// Enabled sections do not sum exactly to the declared target.
    MarksMismatch { computed: u64, target: u32 },
    /// No section is enabled.
    EmptyBlueprint,
}

impl Finding {
    /// Stable machine code for reports and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Finding::Structural { .. } => "BP_STRUCT",
            Finding::CategoryNotAllowed { .. } => "BP_CATEGORY",
            Finding::McqMarksExceeded { .. } => "BP_MCQ_CEILING",
            Finding::MarksMismatch { .. } => "BP_MARK_SUM",
            Finding::EmptyBlueprint => "BP_EMPTY",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Finding::Structural { category, message } => {
                format!("{category}: {message}")
            }
            Finding::CategoryNotAllowed { category } => {
                format!("category not allowed for this class: {category}")
            }
            Finding::McqMarksExceeded { actual, limit } => format!(
                "MCQ section marks ({actual}) exceed the class ceiling ({limit})"
            ),
            Finding::MarksMismatch { computed, target } => format!(
                "enabled sections sum to {computed} marks but the target is {target}"
            ),
            Finding::EmptyBlueprint => "no section is enabled".to_string(),
        }
    }
}

/// Outcome of validating one blueprint against one class policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn finding_count(&self) -> usize {
        self.findings.len()
    }

    /// Convert into a `Result` for callers that gate on validity.
    pub fn into_result(self) -> Result<(), BlueprintRejected> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(BlueprintRejected { report: self })
        }
    }
}

/// A blueprint failed validation; carries the full report so every violation
/// reaches the caller at once.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("blueprint rejected with {} finding(s)", report.finding_count())]
pub struct BlueprintRejected {
    pub report: ValidationReport,
}
