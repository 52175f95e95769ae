use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blueprint::AssessmentBlueprint;
use crate::category::SectionCategory;
use crate::ids::{ArtifactId, OptionId, QuestionId};

/// One answer option of a choice-based question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: OptionId,
    pub text: String,
}

/// Category-specific question payload.
///
/// Choice-based categories (multiple choice, matching) own an option list and
/// answer by option id; every other category answers in free text. Keeping
/// this a tagged variant means each shape enumerates exactly the fields it
/// owns instead of signalling shape through optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionBody {
    Choice {
        options: Vec<AnswerOption>,
        correct: OptionId,
    },
    Text {
        answer: String,
    },
}

impl QuestionBody {
    pub fn options(&self) -> Option<&[AnswerOption]> {
        match self {
            QuestionBody::Choice { options, .. } => Some(options),
            QuestionBody::Text { .. } => None,
        }
    }

    /// True when a choice body's correct id is present in its option list.
    /// Text bodies are trivially consistent.
    pub fn answer_is_consistent(&self) -> bool {
        match self {
            QuestionBody::Choice { options, correct } => {
                options.iter().any(|option| option.id == *correct)
            }
            QuestionBody::Text { .. } => true,
        }
    }
}

/// A generated question. Immutable once assembled into an artifact except
/// through the revision editor, which replaces fields atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub category: SectionCategory,
    pub text: String,
    pub body: QuestionBody,
    pub marks: u32,
}

/// An assembled artifact section: sequentially numbered, carrying the
/// questions produced for one enabled blueprint section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub section_number: u32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub marks_per_question: u32,
    pub questions: Vec<Question>,
}

impl Section {
    pub fn marks(&self) -> u64 {
        self.questions
            .iter()
            .map(|question| u64::from(question.marks))
            .sum()
    }
}

/// Lifecycle status of an artifact. Forward-only: generating -> generated ->
/// published, with published terminal for this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactStatus {
    Generating,
    Generated,
    Published,
}

impl ArtifactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactStatus::Generating => "generating",
            ArtifactStatus::Generated => "generated",
            ArtifactStatus::Published => "published",
        }
    }
}

impl std::fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fully generated, editable assessment object.
///
/// Created by the orchestrator on successful generation, edited in place by
/// the revision editor, advanced to published by the scheduler. Never deleted
/// by this engine. `version` is an optimistic-concurrency counter incremented
/// on every successful mutation; edits carrying a stale version are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentArtifact {
    pub id: ArtifactId,
    pub blueprint: AssessmentBlueprint,
    pub sections: Vec<Section>,
    pub status: ArtifactStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_end: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub version: u64,
    /// Set when a later `regenerate` call replaced this artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<ArtifactId>,
}

impl AssessmentArtifact {
    /// Derived question count across all sections.
    pub fn total_questions(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.questions.len())
            .sum()
    }

    /// Derived mark total across all sections. Equals the blueprint target at
    /// generation time; post-generation edits may drift from it, including
    /// past `u32::MAX`.
    pub fn computed_total_marks(&self) -> u64 {
        self.sections.iter().map(Section::marks).sum()
    }

    /// Whether the revision editor may touch this artifact.
    pub fn is_editable(&self) -> bool {
        self.status == ArtifactStatus::Generated
    }

    pub fn find_question(&self, question_id: &QuestionId) -> Option<&Question> {
        self.sections
            .iter()
            .flat_map(|section| section.questions.iter())
            .find(|question| question.id == *question_id)
    }

    pub fn find_question_mut(&mut self, question_id: &QuestionId) -> Option<&mut Question> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.questions.iter_mut())
            .find(|question| question.id == *question_id)
    }
}

#[doc(hidden)]
pub mod test_support {
    use chrono::TimeZone;

    use super::{
        AnswerOption, ArtifactStatus, AssessmentArtifact, Question, QuestionBody, Section,
    };
    use crate::blueprint::AssessmentBlueprint;
    use crate::ids::{ArtifactId, OptionId, QuestionId};

    /// Build an artifact matching the sample blueprint: 10 MCQ at 1 mark and
    /// 2 descriptive at 5 marks.
    pub fn sample_artifact(blueprint: &AssessmentBlueprint) -> AssessmentArtifact {
        let created_at = chrono::Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        let id = ArtifactId::derive(
            &blueprint.tenant_id,
            &blueprint.class_id,
            &created_at.to_rfc3339(),
            0,
        );
        let mcq_questions: Vec<Question> = (1..=10)
            .map(|n| {
                let options: Vec<AnswerOption> = ["a", "b", "c", "d"]
                    .iter()
                    .map(|suffix| AnswerOption {
                        id: OptionId::new(format!("q{n}-{suffix}")).unwrap(),
                        text: format!("Option {suffix}"),
                    })
                    .collect();
                Question {
                    id: QuestionId::new(format!("{}-s1-q{n}", id.to_hex())).unwrap(),
                    category: crate::category::SectionCategory::MultipleChoice,
                    text: format!("Sample MCQ stem {n}"),
                    body: QuestionBody::Choice {
                        correct: options[0].id.clone(),
                        options,
                    },
                    marks: 1,
                }
            })
            .collect();
        let descriptive_questions: Vec<Question> = (1..=2)
            .map(|n| Question {
                id: QuestionId::new(format!("{}-s2-q{n}", id.to_hex())).unwrap(),
                category: crate::category::SectionCategory::Descriptive,
                text: format!("Sample descriptive stem {n}"),
                body: QuestionBody::Text {
                    answer: "Model answer".to_string(),
                },
                marks: 5,
            })
            .collect();
        AssessmentArtifact {
            id,
            blueprint: blueprint.clone(),
            sections: vec![
                Section {
                    section_number: 1,
                    title: "Section A: Multiple Choice".to_string(),
                    instructions: Some("Choose the correct option.".to_string()),
                    marks_per_question: 1,
                    questions: mcq_questions,
                },
                Section {
                    section_number: 2,
                    title: "Section B: Descriptive".to_string(),
                    instructions: None,
                    marks_per_question: 5,
                    questions: descriptive_questions,
                },
            ],
            status: ArtifactStatus::Generated,
            scheduled_start: None,
            scheduled_end: None,
            created_by: "teacher@example.org".to_string(),
            created_at,
            version: 1,
            superseded_by: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::test_support::sample_blueprint;
    use crate::ids::QuestionId;

    #[test]
    fn answer_consistency_checks_option_ids() {
        let options = vec![
            AnswerOption {
                id: OptionId::new("a").unwrap(),
                text: "A".to_string(),
            },
            AnswerOption {
                id: OptionId::new("b").unwrap(),
                text: "B".to_string(),
            },
        ];
        let good = QuestionBody::Choice {
            correct: OptionId::new("b").unwrap(),
            options: options.clone(),
        };
        assert!(good.answer_is_consistent());
        let bad = QuestionBody::Choice {
            correct: OptionId::new("z").unwrap(),
            options,
        };
        assert!(!bad.answer_is_consistent());
    }

    #[test]
    fn question_lookup_spans_sections() {
        let blueprint = sample_blueprint();
        let artifact = test_support::sample_artifact(&blueprint);
        let target = QuestionId::new(format!("{}-s2-q2", artifact.id.to_hex())).unwrap();
        let question = artifact.find_question(&target).expect("question exists");
        assert_eq!(question.marks, 5);
        assert!(artifact.find_question(&QuestionId::new("missing").unwrap()).is_none());
    }

    #[test]
    fn published_artifacts_are_not_editable() {
        let blueprint = sample_blueprint();
        let mut artifact = test_support::sample_artifact(&blueprint);
        assert!(artifact.is_editable());
        artifact.status = ArtifactStatus::Published;
        assert!(!artifact.is_editable());
    }
}
