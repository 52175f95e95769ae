//! Policy CSV loading behaviour.

use std::io::Write;

use exam_model::{ClassId, SectionCategory, TenantId};
use exam_policy::{PolicyError, load_policies_csv};

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

#[test]
fn loads_policies_with_and_without_mcq_ceiling() {
    let file = write_csv(
        "tenant_id,class_id,allowed_categories,mcq_max_marks\n\
         dps-rohini,8,multiple_choice|short_answer|descriptive,20\n\
         dps-rohini,12,multiple_choice|descriptive|application,\n",
    );
    let registry = load_policies_csv(file.path()).expect("load policies");
    assert_eq!(registry.len(), 2);

    let tenant = TenantId::new("dps-rohini").unwrap();
    let class8 = registry
        .resolve(&tenant, &ClassId::new("8").unwrap())
        .expect("class 8 policy");
    assert_eq!(class8.mcq_max_marks, Some(20));
    assert!(class8.allows(SectionCategory::ShortAnswer));
    assert!(!class8.allows(SectionCategory::Matching));

    let class12 = registry
        .resolve(&tenant, &ClassId::new("12").unwrap())
        .expect("class 12 policy");
    assert_eq!(class12.mcq_max_marks, None);
}

#[test]
fn accepts_hyphenated_category_spellings() {
    let file = write_csv(
        "tenant_id,class_id,allowed_categories,mcq_max_marks\n\
         t1,5,mcq|fill-blank|true-false,10\n",
    );
    let registry = load_policies_csv(file.path()).expect("load policies");
    let policy = registry
        .resolve(&TenantId::new("t1").unwrap(), &ClassId::new("5").unwrap())
        .unwrap();
    assert!(policy.allows(SectionCategory::MultipleChoice));
    assert!(policy.allows(SectionCategory::FillBlank));
    assert!(policy.allows(SectionCategory::TrueFalse));
}

#[test]
fn rejects_unknown_category() {
    let file = write_csv(
        "tenant_id,class_id,allowed_categories,mcq_max_marks\n\
         t1,5,essay,\n",
    );
    let err = load_policies_csv(file.path()).unwrap_err();
    match err {
        PolicyError::InvalidRow { line, .. } => assert_eq!(line, 2),
        other => panic!("expected InvalidRow, got {other:?}"),
    }
}

#[test]
fn rejects_empty_category_list() {
    let file = write_csv(
        "tenant_id,class_id,allowed_categories,mcq_max_marks\n\
         t1,5,,\n",
    );
    assert!(matches!(
        load_policies_csv(file.path()).unwrap_err(),
        PolicyError::InvalidRow { .. }
    ));
}

#[test]
fn rejects_duplicate_tenant_class_rows() {
    let file = write_csv(
        "tenant_id,class_id,allowed_categories,mcq_max_marks\n\
         t1,5,multiple_choice,\n\
         t1,5,descriptive,\n",
    );
    assert!(matches!(
        load_policies_csv(file.path()).unwrap_err(),
        PolicyError::Duplicate { .. }
    ));
}

#[test]
fn rejects_non_numeric_mcq_ceiling() {
    let file = write_csv(
        "tenant_id,class_id,allowed_categories,mcq_max_marks\n\
         t1,5,multiple_choice,lots\n",
    );
    assert!(matches!(
        load_policies_csv(file.path()).unwrap_err(),
        PolicyError::InvalidRow { .. }
    ));
}
