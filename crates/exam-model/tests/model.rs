//! Serialization behaviour of the shared model types.

use std::collections::BTreeSet;

use exam_model::{
    AssessmentBlueprint, ClassId, ClassPolicy, DifficultyMix, SectionCategory, SectionConfig,
    TenantId,
};

fn sample_policy() -> ClassPolicy {
    ClassPolicy {
        class_id: ClassId::new("8").unwrap(),
        allowed_categories: BTreeSet::from([
            SectionCategory::MultipleChoice,
            SectionCategory::ShortAnswer,
            SectionCategory::Descriptive,
        ]),
        mcq_max_marks: Some(20),
    }
}

#[test]
fn blueprint_round_trips_through_json() {
    let blueprint = AssessmentBlueprint {
        tenant_id: TenantId::new("dps-rohini").unwrap(),
        class_id: ClassId::new("8").unwrap(),
        subject: "Physics".to_string(),
        total_marks_target: 100,
        duration_minutes: 180,
        difficulty_mix: DifficultyMix::Challenging,
        sections: vec![
            SectionConfig::enabled(SectionCategory::MultipleChoice, 20),
            SectionConfig::enabled(SectionCategory::Descriptive, 8).with_marks(10),
        ],
        learning_tags: BTreeSet::from(["motion".to_string(), "optics".to_string()]),
    };
    let json = serde_json::to_string(&blueprint).expect("serialize blueprint");
    let round: AssessmentBlueprint = serde_json::from_str(&json).expect("deserialize blueprint");
    assert_eq!(round, blueprint);
    assert_eq!(round.planned_marks(), 100);
}

#[test]
fn blueprint_defaults_difficulty_and_tags() {
    let json = r#"{
        "tenant_id": "dps-rohini",
        "class_id": "8",
        "subject": "Physics",
        "total_marks_target": 20,
        "duration_minutes": 60,
        "sections": []
    }"#;
    let blueprint: AssessmentBlueprint = serde_json::from_str(json).expect("deserialize");
    assert_eq!(blueprint.difficulty_mix, DifficultyMix::Balanced);
    assert!(blueprint.learning_tags.is_empty());
}

#[test]
fn policy_round_trips_through_json() {
    let policy = sample_policy();
    let json = serde_json::to_string(&policy).expect("serialize policy");
    let round: ClassPolicy = serde_json::from_str(&json).expect("deserialize policy");
    assert_eq!(round, policy);
    assert!(round.allows(SectionCategory::MultipleChoice));
    assert!(!round.allows(SectionCategory::Matching));
}
