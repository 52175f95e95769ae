//! Publication scheduling and per-class history views.
//!
//! Publishing is the terminal transition: a `Generated` artifact becomes
//! `Published`, optionally with a scheduled exam window, and is immutable
//! from then on. History views are pure groupings over whatever slice of
//! artifacts the caller fetched from the store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use exam_compose::{ArtifactStore, StoreError};
use exam_model::{ArtifactId, ArtifactStatus, AssessmentArtifact, ClassId};

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("artifact not found: {0}")]
    ArtifactNotFound(ArtifactId),

    /// Only `Generated` artifacts can be published: drafts are still being
    /// composed and published artifacts stay published.
    #[error("artifact {id} is {status} and cannot be published")]
    NotPublishable {
        id: ArtifactId,
        status: ArtifactStatus,
    },

    #[error("scheduled window is empty or inverted: start {start}, end {end}")]
    InvalidSchedule {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Move a generated artifact to `Published`, optionally attaching an exam
/// window.
///
/// Question content is stored verbatim; only status, schedule and version
/// change. Either timestamp may be omitted (publish-now with an open window),
/// but when both are present the window must have positive length.
pub fn publish(
    store: &mut dyn ArtifactStore,
    artifact_id: &ArtifactId,
    scheduled_start: Option<DateTime<Utc>>,
    scheduled_end: Option<DateTime<Utc>>,
) -> Result<AssessmentArtifact, PublishError> {
    if let (Some(start), Some(end)) = (scheduled_start, scheduled_end)
        && start >= end
    {
        return Err(PublishError::InvalidSchedule { start, end });
    }

    let mut artifact = store
        .get(artifact_id)?
        .ok_or(PublishError::ArtifactNotFound(*artifact_id))?;
    if artifact.status != ArtifactStatus::Generated {
        return Err(PublishError::NotPublishable {
            id: artifact.id,
            status: artifact.status,
        });
    }

    artifact.status = ArtifactStatus::Published;
    artifact.scheduled_start = scheduled_start;
    artifact.scheduled_end = scheduled_end;
    artifact.version += 1;
    store.update(artifact.clone())?;

    info!(
        artifact = %artifact.id,
        class = %artifact.blueprint.class_id,
        start = ?scheduled_start,
        end = ?scheduled_end,
        "artifact published"
    );
    Ok(artifact)
}

/// All artifacts of one class, ordered oldest to newest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassHistory {
    pub class_id: ClassId,
    pub artifacts: Vec<AssessmentArtifact>,
}

impl ClassHistory {
    pub fn latest(&self) -> Option<&AssessmentArtifact> {
        self.artifacts.last()
    }
}

/// Group artifacts by class for a history view.
///
/// Classes are ordered by their most recent artifact, newest first, with the
/// latest artifact's id breaking timestamp ties. Within a class, artifacts
/// run oldest to newest. Pure over its input; callers typically feed it one
/// tenant's `list_tenant` result.
pub fn group_by_class(artifacts: &[AssessmentArtifact]) -> Vec<ClassHistory> {
    let mut groups: Vec<ClassHistory> = Vec::new();
    for artifact in artifacts {
        let class_id = &artifact.blueprint.class_id;
        match groups.iter_mut().find(|g| g.class_id == *class_id) {
            Some(group) => group.artifacts.push(artifact.clone()),
            None => groups.push(ClassHistory {
                class_id: class_id.clone(),
                artifacts: vec![artifact.clone()],
            }),
        }
    }

    for group in &mut groups {
        group
            .artifacts
            .sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    }
    groups.sort_by(|a, b| {
        let (a_latest, b_latest) = (most_recent(a), most_recent(b));
        b_latest
            .created_at
            .cmp(&a_latest.created_at)
            .then(a_latest.id.cmp(&b_latest.id))
    });
    groups
}

fn most_recent(group: &ClassHistory) -> &AssessmentArtifact {
    // Groups are built non-empty and already sorted oldest first.
    &group.artifacts[group.artifacts.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use exam_model::blueprint::test_support::sample_blueprint;

    fn artifact_for(class: &str, hour: u32, nonce: u64) -> AssessmentArtifact {
        let mut blueprint = sample_blueprint();
        blueprint.class_id = ClassId::new(class).unwrap();
        let mut artifact =
            exam_model::artifact::test_support::sample_artifact(&blueprint);
        artifact.created_at = Utc.with_ymd_and_hms(2026, 3, 2, hour, 0, 0).unwrap();
        artifact.id = ArtifactId::derive(
            &blueprint.tenant_id,
            &blueprint.class_id,
            &artifact.created_at.to_rfc3339(),
            nonce,
        );
        artifact
    }

    #[test]
    fn classes_are_ordered_by_most_recent_activity() {
        let a = artifact_for("8", 9, 0);
        let c = artifact_for("9", 10, 1);
        let b = artifact_for("8", 11, 2);

        let grouped = group_by_class(&[a.clone(), b.clone(), c.clone()]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].class_id, ClassId::new("8").unwrap());
        assert_eq!(grouped[0].artifacts, vec![a, b]);
        assert_eq!(grouped[1].class_id, ClassId::new("9").unwrap());
        assert_eq!(grouped[1].artifacts, vec![c]);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_by_class(&[]).is_empty());
    }
}
