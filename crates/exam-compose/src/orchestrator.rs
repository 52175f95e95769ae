//! Submission lifecycle: validate, generate, assemble, persist.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tracing::{debug, info, warn};

use exam_model::{
    ArtifactId, ArtifactStatus, AssessmentArtifact, AssessmentBlueprint, QuestionId, Section,
    SectionCategory, SectionConfig,
};
use exam_policy::PolicyRegistry;
use exam_validate::validate;

use crate::error::{ComposeError, StoreError};
use crate::generate::{ContentGenerationService, GenerationRequest};
use crate::store::ArtifactStore;

/// Owns the draft -> generating -> generated transition for one engine
/// instance.
///
/// Each `submit` call is an independent unit of work: it resolves policy
/// fresh, validates, generates every enabled section in declaration order,
/// and persists exactly one artifact or nothing at all. Published is reached
/// only through the publication scheduler; there are no reverse transitions.
pub struct CompositionOrchestrator<'a, G> {
    policies: &'a PolicyRegistry,
    generator: &'a G,
    nonce: AtomicU64,
}

impl<'a, G: ContentGenerationService> CompositionOrchestrator<'a, G> {
    pub fn new(policies: &'a PolicyRegistry, generator: &'a G) -> Self {
        Self {
            policies,
            generator,
            nonce: AtomicU64::new(0),
        }
    }

    /// Validate a blueprint and, on success, generate and persist an
    /// artifact in `Generated` state.
    ///
    /// On validation failure every finding is returned at once and no state
    /// changes: the generation collaborator is never contacted. A generation
    /// shortfall discards the whole attempt without touching the store.
    pub fn submit(
        &self,
        store: &mut dyn ArtifactStore,
        blueprint: &AssessmentBlueprint,
        created_by: &str,
    ) -> Result<AssessmentArtifact, ComposeError> {
        let policy = self
            .policies
            .resolve(&blueprint.tenant_id, &blueprint.class_id)?;
        validate(blueprint, policy).into_result()?;

        let created_at = Utc::now();
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
        let id = ArtifactId::derive(
            &blueprint.tenant_id,
            &blueprint.class_id,
            &created_at.to_rfc3339(),
            nonce,
        );

        info!(
            artifact = %id,
            tenant = %blueprint.tenant_id,
            class = %blueprint.class_id,
            subject = %blueprint.subject,
            "blueprint accepted, generating"
        );

        let mut artifact = AssessmentArtifact {
            id,
            blueprint: blueprint.clone(),
            sections: Vec::new(),
            status: ArtifactStatus::Generating,
            scheduled_start: None,
            scheduled_end: None,
            created_by: created_by.to_string(),
            created_at,
            version: 1,
            superseded_by: None,
        };

        for (index, config) in blueprint.enabled_sections().enumerate() {
            let section_number = index as u32 + 1;
            let section = self.generate_section(&artifact.id, blueprint, config, section_number)?;
            artifact.sections.push(section);
        }

        let computed = artifact.computed_total_marks();
        if computed != u64::from(blueprint.total_marks_target) {
            return Err(ComposeError::TotalsDrift {
                computed,
                target: blueprint.total_marks_target,
            });
        }

        artifact.status = ArtifactStatus::Generated;
        store.create(artifact.clone())?;
        info!(
            artifact = %artifact.id,
            questions = artifact.total_questions(),
            marks = computed,
            "artifact generated"
        );
        Ok(artifact)
    }

    /// Re-run the original blueprint snapshot of an existing artifact.
    ///
    /// The prior artifact is superseded, never mutated in content: it keeps
    /// its id and sections and gains only a pointer to its replacement, so
    /// the audit trail stays intact.
    pub fn regenerate(
        &self,
        store: &mut dyn ArtifactStore,
        artifact_id: &ArtifactId,
    ) -> Result<AssessmentArtifact, ComposeError> {
        let mut prior = store
            .get(artifact_id)?
            .ok_or(StoreError::NotFound(*artifact_id))?;
        let replacement = self.submit(store, &prior.blueprint, &prior.created_by)?;

        prior.superseded_by = Some(replacement.id);
        prior.version += 1;
        store.update(prior)?;
        info!(prior = %artifact_id, replacement = %replacement.id, "artifact regenerated");
        Ok(replacement)
    }

    fn generate_section(
        &self,
        artifact_id: &ArtifactId,
        blueprint: &AssessmentBlueprint,
        config: &SectionConfig,
        section_number: u32,
    ) -> Result<Section, ComposeError> {
        let request = GenerationRequest {
            category: config.category,
            count: config.question_count,
            marks_per_question: config.marks_per_question,
            subject: blueprint.subject.clone(),
            class_id: blueprint.class_id.clone(),
            difficulty_mix: blueprint.difficulty_mix,
        };
        debug!(
            section = section_number,
            category = %config.category,
            count = config.question_count,
            "requesting section content"
        );

        let mut questions =
            self.generator
                .generate(&request)
                .map_err(|failure| ComposeError::Generation {
                    category: config.category,
                    message: failure.message,
                })?;

        if (questions.len() as u32) < config.question_count {
            return Err(ComposeError::GenerationIncomplete {
                category: config.category,
                requested: config.question_count,
                received: questions.len() as u32,
            });
        }
        if (questions.len() as u32) > config.question_count {
            warn!(
                section = section_number,
                category = %config.category,
                requested = config.question_count,
                received = questions.len(),
                "collaborator over-delivered, truncating"
            );
            questions.truncate(config.question_count as usize);
        }

        // Question ids are canonicalized per artifact so content from any
        // collaborator stays unique across sections.
        for (ordinal, question) in questions.iter_mut().enumerate() {
            question.id = QuestionId::new(format!(
                "{artifact}-s{section_number}-q{n}",
                artifact = artifact_id.to_hex(),
                n = ordinal + 1
            ))
            .expect("canonical question id is non-empty");
            question.marks = config.marks_per_question;
        }

        Ok(Section {
            section_number,
            title: section_title(section_number, config.category),
            instructions: default_instructions(config.category),
            marks_per_question: config.marks_per_question,
            questions,
        })
    }
}

fn section_title(section_number: u32, category: SectionCategory) -> String {
    // Papers label sections A, B, C... in declaration order.
    let letter = char::from(b'A' + ((section_number - 1) % 26) as u8);
    format!("Section {letter}: {category}")
}

fn default_instructions(category: SectionCategory) -> Option<String> {
    let text = match category {
        SectionCategory::MultipleChoice => "Choose the correct option.",
        SectionCategory::Matching => "Match the items in column A with column B.",
        SectionCategory::TrueFalse => "State whether each statement is true or false.",
        SectionCategory::FillBlank => "Fill in the blanks.",
        SectionCategory::OneWord => "Answer in one word.",
        SectionCategory::ShortAnswer | SectionCategory::Descriptive
        | SectionCategory::Application => return None,
    };
    Some(text.to_string())
}
