//! Content generation collaborator interface.

use exam_model::{
    AnswerOption, ClassId, DifficultyMix, OptionId, Question, QuestionBody, QuestionId,
    SectionCategory,
};

/// One generation call: everything the collaborator needs to produce the
/// questions for a single section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub category: SectionCategory,
    pub count: u32,
    pub marks_per_question: u32,
    pub subject: String,
    pub class_id: ClassId,
    pub difficulty_mix: DifficultyMix,
}

/// A generation attempt failed outright (transport error, upstream refusal,
/// timeout surfaced by the caller). Shortfalls are not failures at this
/// level; the orchestrator counts the returned questions itself.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct GenerationFailure {
    pub message: String,
}

impl GenerationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// External question-content producer.
///
/// Treated as a black box: it may return zero or fewer questions than asked
/// for, and repeated calls with the same request are not assumed to return
/// the same content. The orchestrator never retries through this trait.
pub trait ContentGenerationService {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<Question>, GenerationFailure>;
}

/// Deterministic placeholder generator.
///
/// Produces numbered template stems so the CLI demo and tests can exercise
/// the full composition path without the real content service.
#[derive(Debug, Clone, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn new() -> Self {
        Self
    }

    fn build_question(request: &GenerationRequest, ordinal: u32) -> Question {
        let id = QuestionId::new(format!(
            "tmpl-{}-{}-q{ordinal}",
            request.class_id,
            category_slug(request.category)
        ))
        .expect("template question id is non-empty");
        let text = format!(
            "[{subject}] {category} question {ordinal} ({difficulty})",
            subject = request.subject,
            category = request.category,
            difficulty = request.difficulty_mix,
        );
        let body = if request.category.is_choice_based() {
            let options: Vec<AnswerOption> = ["a", "b", "c", "d"]
                .iter()
                .map(|suffix| AnswerOption {
                    id: OptionId::new(format!("{id_stem}-{suffix}", id_stem = id.as_str()))
                        .expect("option id is non-empty"),
                    text: format!("Placeholder option {suffix}"),
                })
                .collect();
            QuestionBody::Choice {
                correct: options[0].id.clone(),
                options,
            }
        } else {
            QuestionBody::Text {
                answer: format!("Model answer for question {ordinal}"),
            }
        };
        Question {
            id,
            category: request.category,
            text,
            body,
            marks: request.marks_per_question,
        }
    }
}

impl ContentGenerationService for TemplateGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<Question>, GenerationFailure> {
        Ok((1..=request.count)
            .map(|ordinal| Self::build_question(request, ordinal))
            .collect())
    }
}

fn category_slug(category: SectionCategory) -> &'static str {
    match category {
        SectionCategory::OneWord => "one_word",
        SectionCategory::FillBlank => "fill_blank",
        SectionCategory::TrueFalse => "true_false",
        SectionCategory::MultipleChoice => "multiple_choice",
        SectionCategory::Matching => "matching",
        SectionCategory::ShortAnswer => "short_answer",
        SectionCategory::Descriptive => "descriptive",
        SectionCategory::Application => "application",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(category: SectionCategory, count: u32) -> GenerationRequest {
        GenerationRequest {
            category,
            count,
            marks_per_question: 2,
            subject: "Physics".to_string(),
            class_id: ClassId::new("8").unwrap(),
            difficulty_mix: DifficultyMix::Balanced,
        }
    }

    #[test]
    fn template_generator_honours_the_requested_count() {
        let generator = TemplateGenerator::new();
        let questions = generator
            .generate(&request(SectionCategory::ShortAnswer, 5))
            .unwrap();
        assert_eq!(questions.len(), 5);
        assert!(questions.iter().all(|q| q.marks == 2));
        assert!(questions.iter().all(|q| q.body.options().is_none()));
    }

    #[test]
    fn choice_questions_carry_consistent_answer_keys() {
        let generator = TemplateGenerator::new();
        let questions = generator
            .generate(&request(SectionCategory::MultipleChoice, 3))
            .unwrap();
        for question in questions {
            assert_eq!(question.body.options().map(<[AnswerOption]>::len), Some(4));
            assert!(question.body.answer_is_consistent());
        }
    }
}
