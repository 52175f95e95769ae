//! Publication transitions against a seeded store.

use chrono::{TimeZone, Utc};

use exam_compose::{ArtifactStore, InMemoryStore};
use exam_model::artifact::test_support::sample_artifact;
use exam_model::blueprint::test_support::sample_blueprint;
use exam_model::{ArtifactStatus, AssessmentArtifact};
use exam_publish::{PublishError, publish};

fn seeded_store() -> (InMemoryStore, AssessmentArtifact) {
    let artifact = sample_artifact(&sample_blueprint());
    let mut store = InMemoryStore::new();
    store.create(artifact.clone()).expect("seed artifact");
    (store, artifact)
}

#[test]
fn publishing_sets_status_and_window_verbatim() {
    let (mut store, artifact) = seeded_store();
    let start = Utc.with_ymd_and_hms(2026, 3, 9, 9, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 3, 9, 10, 30, 0).unwrap();

    let published = publish(&mut store, &artifact.id, Some(start), Some(end))
        .expect("publish succeeds");

    assert_eq!(published.status, ArtifactStatus::Published);
    assert_eq!(published.scheduled_start, Some(start));
    assert_eq!(published.scheduled_end, Some(end));
    assert_eq!(published.version, artifact.version + 1);
    // Content is untouched.
    assert_eq!(published.sections, artifact.sections);

    let stored = store.get(&artifact.id).unwrap().expect("still stored");
    assert_eq!(stored, published);
}

#[test]
fn publishing_without_a_window_is_allowed() {
    let (mut store, artifact) = seeded_store();
    let published = publish(&mut store, &artifact.id, None, None).expect("open window");
    assert_eq!(published.status, ArtifactStatus::Published);
    assert_eq!(published.scheduled_start, None);
    assert_eq!(published.scheduled_end, None);
}

#[test]
fn inverted_window_is_rejected_before_touching_the_store() {
    let (mut store, artifact) = seeded_store();
    let start = Utc.with_ymd_and_hms(2026, 3, 9, 10, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 3, 9, 9, 0, 0).unwrap();

    let err = publish(&mut store, &artifact.id, Some(start), Some(end)).unwrap_err();
    assert!(matches!(err, PublishError::InvalidSchedule { .. }));

    let stored = store.get(&artifact.id).unwrap().unwrap();
    assert_eq!(stored.status, ArtifactStatus::Generated);
}

#[test]
fn zero_length_window_is_rejected() {
    let (mut store, artifact) = seeded_store();
    let instant = Utc.with_ymd_and_hms(2026, 3, 9, 9, 0, 0).unwrap();
    let err = publish(&mut store, &artifact.id, Some(instant), Some(instant)).unwrap_err();
    assert!(matches!(err, PublishError::InvalidSchedule { .. }));
}

#[test]
fn publishing_twice_is_refused() {
    let (mut store, artifact) = seeded_store();
    publish(&mut store, &artifact.id, None, None).expect("first publish");

    let err = publish(&mut store, &artifact.id, None, None).unwrap_err();
    assert!(matches!(
        err,
        PublishError::NotPublishable {
            status: ArtifactStatus::Published,
            ..
        }
    ));
}

#[test]
fn generating_artifacts_cannot_be_published() {
    let (mut store, mut artifact) = seeded_store();
    artifact.status = ArtifactStatus::Generating;
    store.update(artifact.clone()).expect("rewind status");

    let err = publish(&mut store, &artifact.id, None, None).unwrap_err();
    assert!(matches!(
        err,
        PublishError::NotPublishable {
            status: ArtifactStatus::Generating,
            ..
        }
    ));
}
