//! Rule-by-rule validation behaviour.

use std::collections::BTreeSet;

use exam_model::blueprint::test_support::sample_blueprint;
use exam_model::{ClassId, ClassPolicy, SectionCategory, SectionConfig};
use exam_validate::{Finding, validate};

fn permissive_policy() -> ClassPolicy {
    ClassPolicy::permissive(ClassId::new("8").unwrap())
}

fn restrictive_policy(
    categories: impl IntoIterator<Item = SectionCategory>,
    mcq_max_marks: Option<u32>,
) -> ClassPolicy {
    ClassPolicy {
        class_id: ClassId::new("8").unwrap(),
        allowed_categories: categories.into_iter().collect(),
        mcq_max_marks,
    }
}

#[test]
fn valid_blueprint_produces_empty_report() {
    let report = validate(&sample_blueprint(), &permissive_policy());
    assert!(report.is_valid());
    assert!(report.into_result().is_ok());
}

#[test]
fn mark_sum_mismatch_reports_computed_and_target() {
    let mut blueprint = sample_blueprint();
    blueprint.total_marks_target = 25;
    let report = validate(&blueprint, &permissive_policy());
    assert_eq!(
        report.findings,
        vec![Finding::MarksMismatch {
            computed: 20,
            target: 25
        }]
    );
}

#[test]
fn disabled_sections_are_ignored_entirely() {
    let mut blueprint = sample_blueprint();
    // A disabled section with nonsense values must not trip structural or
    // policy checks, nor count toward the mark sum.
    blueprint.sections.push(SectionConfig {
        category: SectionCategory::Matching,
        enabled: false,
        question_count: 0,
        marks_per_question: 0,
    });
    let policy = restrictive_policy(
        [SectionCategory::MultipleChoice, SectionCategory::Descriptive],
        None,
    );
    assert!(validate(&blueprint, &policy).is_valid());
}

#[test]
fn category_not_allowed_even_when_marks_balance() {
    // Policy scenario from the contract: a class restricted to one-word and
    // fill-blank must reject descriptive even though the arithmetic is fine.
    let mut blueprint = sample_blueprint();
    blueprint.sections = vec![
        SectionConfig::enabled(SectionCategory::OneWord, 10),
        SectionConfig::enabled(SectionCategory::Descriptive, 2),
    ];
    blueprint.total_marks_target = u32::try_from(blueprint.planned_marks()).unwrap();
    let policy = restrictive_policy([SectionCategory::OneWord, SectionCategory::FillBlank], None);
    let report = validate(&blueprint, &policy);
    assert_eq!(
        report.findings,
        vec![Finding::CategoryNotAllowed {
            category: SectionCategory::Descriptive
        }]
    );
}

#[test]
fn mcq_ceiling_applies_only_when_configured() {
    let blueprint = sample_blueprint(); // 10 MCQ x 1 mark
    let unlimited = restrictive_policy(
        [SectionCategory::MultipleChoice, SectionCategory::Descriptive],
        None,
    );
    assert!(validate(&blueprint, &unlimited).is_valid());

    let capped = restrictive_policy(
        [SectionCategory::MultipleChoice, SectionCategory::Descriptive],
        Some(5),
    );
    let report = validate(&blueprint, &capped);
    assert_eq!(
        report.findings,
        vec![Finding::McqMarksExceeded {
            actual: 10,
            limit: 5
        }]
    );
}

#[test]
fn mcq_ceiling_sums_across_multiple_mcq_sections() {
    // Two MCQ sections of 4 marks each: fine alone, 8 in total against a
    // ceiling of 6.
    let mut blueprint = sample_blueprint();
    blueprint.sections = vec![
        SectionConfig::enabled(SectionCategory::MultipleChoice, 4),
        SectionConfig::enabled(SectionCategory::MultipleChoice, 4),
        SectionConfig::enabled(SectionCategory::Descriptive, 2),
    ];
    blueprint.total_marks_target = u32::try_from(blueprint.planned_marks()).unwrap();
    let policy = restrictive_policy(
        [SectionCategory::MultipleChoice, SectionCategory::Descriptive],
        Some(6),
    );
    let report = validate(&blueprint, &policy);
    assert_eq!(
        report.findings,
        vec![Finding::McqMarksExceeded { actual: 8, limit: 6 }]
    );
}

#[test]
fn huge_section_counts_fail_cleanly_instead_of_wrapping() {
    // question_count x marks_per_question is past u32::MAX here; the mark-sum
    // gate must report the real product, not a wrapped one.
    let mut blueprint = sample_blueprint();
    blueprint.sections = vec![SectionConfig {
        category: SectionCategory::Descriptive,
        enabled: true,
        question_count: u32::MAX,
        marks_per_question: 2,
    }];
    blueprint.total_marks_target = 20;
    let report = validate(&blueprint, &permissive_policy());
    assert_eq!(
        report.findings,
        vec![Finding::MarksMismatch {
            computed: u64::from(u32::MAX) * 2,
            target: 20
        }]
    );
}

#[test]
fn mcq_ceiling_boundary_is_inclusive() {
    let blueprint = sample_blueprint();
    let policy = restrictive_policy(
        [SectionCategory::MultipleChoice, SectionCategory::Descriptive],
        Some(10),
    );
    assert!(validate(&blueprint, &policy).is_valid());
}

#[test]
fn empty_blueprint_is_rejected() {
    let mut blueprint = sample_blueprint();
    for section in &mut blueprint.sections {
        section.enabled = false;
    }
    blueprint.total_marks_target = 1;
    let report = validate(&blueprint, &permissive_policy());
    assert!(report.findings.contains(&Finding::EmptyBlueprint));
}

#[test]
fn violations_accumulate_in_a_single_report() {
    let mut blueprint = sample_blueprint();
    blueprint.total_marks_target = 25; // mismatch: sections still sum to 20
    let policy = restrictive_policy(
        [SectionCategory::MultipleChoice],
        Some(5), // MCQ contributes 10
    );
    let report = validate(&blueprint, &policy);
    let codes: BTreeSet<&str> = report.findings.iter().map(Finding::code).collect();
    assert_eq!(
        codes,
        BTreeSet::from(["BP_CATEGORY", "BP_MCQ_CEILING", "BP_MARK_SUM"])
    );
}

#[test]
fn structural_defects_surface_alone() {
    let mut blueprint = sample_blueprint();
    blueprint.sections[1].marks_per_question = 0;
    blueprint.total_marks_target = 999;
    let report = validate(&blueprint, &restrictive_policy([SectionCategory::OneWord], None));
    assert_eq!(report.finding_count(), 1);
    assert!(matches!(
        report.findings[0],
        Finding::Structural {
            category: SectionCategory::Descriptive,
            ..
        }
    ));
}
