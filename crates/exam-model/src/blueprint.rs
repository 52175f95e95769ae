use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::SectionCategory;
use crate::error::ModelError;
use crate::ids::{ClassId, TenantId};

/// Requested difficulty profile for generated question content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyMix {
    #[default]
    Balanced,
    Easy,
    Medium,
    Challenging,
}

impl DifficultyMix {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyMix::Balanced => "balanced",
            DifficultyMix::Easy => "easy",
            DifficultyMix::Medium => "medium",
            DifficultyMix::Challenging => "challenging",
        }
    }
}

impl fmt::Display for DifficultyMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyMix {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "balanced" => Ok(DifficultyMix::Balanced),
            "easy" => Ok(DifficultyMix::Easy),
            "medium" => Ok(DifficultyMix::Medium),
            "challenging" | "hard" => Ok(DifficultyMix::Challenging),
            _ => Err(ModelError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// One requested section of an assessment: a question-type family, how many
/// questions, and the per-question mark value.
///
/// Invariant (enforced by the validator, not by construction): an enabled
/// section has `question_count >= 1` and `marks_per_question >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub category: SectionCategory,
    pub enabled: bool,
    pub question_count: u32,
    pub marks_per_question: u32,
}

impl SectionConfig {
    /// An enabled section with the category's conventional mark value.
    pub fn enabled(category: SectionCategory, question_count: u32) -> Self {
        Self {
            category,
            enabled: true,
            question_count,
            marks_per_question: category.default_marks(),
        }
    }

    /// Override the per-question mark value.
    pub fn with_marks(mut self, marks_per_question: u32) -> Self {
        self.marks_per_question = marks_per_question;
        self
    }

    /// Marks this section contributes to the paper total.
    ///
    /// Widened to `u64`: both factors arrive from untrusted input, and a
    /// product past `u32::MAX` must surface as an honest mark-sum mismatch
    /// rather than wrap or panic.
    pub fn planned_marks(&self) -> u64 {
        u64::from(self.question_count) * u64::from(self.marks_per_question)
    }
}

/// The declarative request describing a desired assessment, prior to any
/// content generation. Consumed once by the orchestrator; the produced
/// artifact keeps a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentBlueprint {
    pub tenant_id: TenantId,
    pub class_id: ClassId,
    pub subject: String,
    pub total_marks_target: u32,
    pub duration_minutes: u32,
    #[serde(default)]
    pub difficulty_mix: DifficultyMix,
    pub sections: Vec<SectionConfig>,
    #[serde(default)]
    pub learning_tags: BTreeSet<String>,
}

impl AssessmentBlueprint {
    /// Enabled sections in declaration order.
    pub fn enabled_sections(&self) -> impl Iterator<Item = &SectionConfig> {
        self.sections.iter().filter(|section| section.enabled)
    }

    /// Sum of planned marks over enabled sections.
    pub fn planned_marks(&self) -> u64 {
        self.enabled_sections()
            .map(SectionConfig::planned_marks)
            .sum()
    }
}

#[doc(hidden)]
pub mod test_support {
    use super::{AssessmentBlueprint, SectionConfig};
    use crate::category::SectionCategory;
    use crate::ids::{ClassId, TenantId};

    /// The end-to-end blueprint scenario: 10 MCQ at 1 mark plus 2 descriptive
    /// at 5 marks, targeting 20.
    pub fn sample_blueprint() -> AssessmentBlueprint {
        AssessmentBlueprint {
            tenant_id: TenantId::new("dps-rohini").expect("tenant id"),
            class_id: ClassId::new("8").expect("class id"),
            subject: "Physics".to_string(),
            total_marks_target: 20,
            duration_minutes: 60,
            difficulty_mix: Default::default(),
            sections: vec![
                SectionConfig::enabled(SectionCategory::MultipleChoice, 10),
                SectionConfig::enabled(SectionCategory::Descriptive, 2),
            ],
            learning_tags: Default::default(),
        }
    }
}
