//! In-place revision of generated artifacts.
//!
//! Teachers fine-tune individual questions after generation: reword a stem,
//! swap an option, adjust marks. Every edit is atomic (the patch applies in
//! full or not at all) and deliberately unconstrained by the blueprint's
//! original mark target; only generation-time submission is mark-constrained.
//!
//! Concurrency policy: reject-stale. The caller passes the artifact version
//! it read; a mismatch means someone else edited in between and the edit is
//! refused rather than merged. Every successful edit increments the version.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use exam_compose::{ArtifactStore, StoreError};
use exam_model::{
    AnswerOption, ArtifactId, ArtifactStatus, AssessmentArtifact, OptionId, Question,
    QuestionBody, QuestionId, SectionCategory,
};

#[derive(Debug, thiserror::Error)]
pub enum ReviseError {
    #[error("artifact not found: {0}")]
    ArtifactNotFound(ArtifactId),

    #[error("question not found in artifact: {0}")]
    QuestionNotFound(QuestionId),

    /// Published artifacts are immutable through this engine.
    #[error("artifact {id} is {status} and can no longer be edited")]
    ArtifactLocked {
        id: ArtifactId,
        status: ArtifactStatus,
    },

    /// The patched correct answer does not reference any option on the
    /// (patched) question.
    #[error("correct answer references unknown option id: {0}")]
    InvalidAnswerReference(OptionId),

    /// Option lists only exist on choice-based categories.
    #[error("category {0} does not carry an option list")]
    OptionsNotSupported(SectionCategory),

    /// A free-text answer was supplied for a choice question, or an option
    /// id for a free-text question.
    #[error("answer shape does not match question category {0}")]
    AnswerShapeMismatch(SectionCategory),

    #[error("marks must be at least 1")]
    InvalidMarks,

    /// The artifact changed since the caller read it.
    #[error("stale edit: expected version {expected}, artifact is at {actual}")]
    StaleEdit { expected: u64, actual: u64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Replacement value for a question's answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerPatch {
    /// New correct option id (choice-based questions only).
    Option(OptionId),
    /// New free-text answer (all other categories).
    Text(String),
}

/// Partial update to a single question. Absent fields are left untouched;
/// present fields replace the previous value wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<AnswerOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<AnswerPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<u32>,
}

impl QuestionPatch {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.options.is_none()
            && self.correct_answer.is_none()
            && self.marks.is_none()
    }
}

/// Apply a patch to one question of a stored artifact.
///
/// Returns the updated artifact on success. On any failure the store is left
/// untouched and the patch is discarded in full.
pub fn edit_question(
    store: &mut dyn ArtifactStore,
    artifact_id: &ArtifactId,
    question_id: &QuestionId,
    patch: &QuestionPatch,
    expected_version: u64,
) -> Result<AssessmentArtifact, ReviseError> {
    let mut artifact = store
        .get(artifact_id)?
        .ok_or(ReviseError::ArtifactNotFound(*artifact_id))?;

    if !artifact.is_editable() {
        return Err(ReviseError::ArtifactLocked {
            id: artifact.id,
            status: artifact.status,
        });
    }
    if artifact.version != expected_version {
        return Err(ReviseError::StaleEdit {
            expected: expected_version,
            actual: artifact.version,
        });
    }

    let question = artifact
        .find_question_mut(question_id)
        .ok_or_else(|| ReviseError::QuestionNotFound(question_id.clone()))?;

    // Stage the full patch on a clone; commit only if every field validates.
    *question = apply_patch(question, patch)?;
    artifact.version += 1;
    store.update(artifact.clone())?;

    debug!(
        artifact = %artifact_id,
        question = %question_id,
        version = artifact.version,
        "question edited"
    );
    if patch.marks.is_some() {
        info!(
            artifact = %artifact_id,
            total_marks = artifact.computed_total_marks(),
            target = artifact.blueprint.total_marks_target,
            "derived totals recomputed after marks edit"
        );
    }
    Ok(artifact)
}

fn apply_patch(question: &Question, patch: &QuestionPatch) -> Result<Question, ReviseError> {
    let mut staged = question.clone();

    if let Some(text) = &patch.text {
        staged.text = text.clone();
    }

    if let Some(marks) = patch.marks {
        if marks == 0 {
            return Err(ReviseError::InvalidMarks);
        }
        staged.marks = marks;
    }

    if let Some(options) = &patch.options {
        match &mut staged.body {
            QuestionBody::Choice {
                options: current, ..
            } => *current = options.clone(),
            QuestionBody::Text { .. } => {
                return Err(ReviseError::OptionsNotSupported(staged.category));
            }
        }
    }

    if let Some(answer) = &patch.correct_answer {
        match (&mut staged.body, answer) {
            (QuestionBody::Choice { correct, .. }, AnswerPatch::Option(id)) => {
                *correct = id.clone();
            }
            (QuestionBody::Text { answer: current }, AnswerPatch::Text(text)) => {
                *current = text.clone();
            }
            _ => return Err(ReviseError::AnswerShapeMismatch(staged.category)),
        }
    }

    // The staged body must be self-consistent even when only one of
    // options/correct_answer was patched: replacing options may orphan the
    // existing answer, and a new answer must land in the existing list.
    if !staged.body.answer_is_consistent() {
        if let QuestionBody::Choice { correct, .. } = &staged.body {
            return Err(ReviseError::InvalidAnswerReference(correct.clone()));
        }
    }

    Ok(staged)
}
