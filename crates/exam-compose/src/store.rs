//! Durable artifact storage interface and the two bundled backends.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use exam_model::{ArtifactId, AssessmentArtifact, ClassId, TenantId};

use crate::error::StoreError;

/// Keyed storage for assessment artifacts.
///
/// The engine never deletes artifacts; deletion is an administrative concern
/// outside this engine. `create` must refuse an existing id so concurrent
/// submissions cannot clobber each other's artifacts.
pub trait ArtifactStore {
    fn create(&mut self, artifact: AssessmentArtifact) -> Result<(), StoreError>;

    /// Replace an existing artifact in full.
    fn update(&mut self, artifact: AssessmentArtifact) -> Result<(), StoreError>;

    fn get(&self, id: &ArtifactId) -> Result<Option<AssessmentArtifact>, StoreError>;

    /// All artifacts of a tenant, ordered by id.
    fn list_tenant(&self, tenant: &TenantId) -> Result<Vec<AssessmentArtifact>, StoreError>;

    /// Artifacts of one class within a tenant, ordered by id.
    fn list_by_class(
        &self,
        tenant: &TenantId,
        class: &ClassId,
    ) -> Result<Vec<AssessmentArtifact>, StoreError> {
        Ok(self
            .list_tenant(tenant)?
            .into_iter()
            .filter(|artifact| artifact.blueprint.class_id == *class)
            .collect())
    }
}

/// In-memory store for tests and request-scoped pipelines.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    artifacts: BTreeMap<ArtifactId, AssessmentArtifact>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl ArtifactStore for InMemoryStore {
    fn create(&mut self, artifact: AssessmentArtifact) -> Result<(), StoreError> {
        if self.artifacts.contains_key(&artifact.id) {
            return Err(StoreError::AlreadyExists(artifact.id));
        }
        self.artifacts.insert(artifact.id, artifact);
        Ok(())
    }

    fn update(&mut self, artifact: AssessmentArtifact) -> Result<(), StoreError> {
        if !self.artifacts.contains_key(&artifact.id) {
            return Err(StoreError::NotFound(artifact.id));
        }
        self.artifacts.insert(artifact.id, artifact);
        Ok(())
    }

    fn get(&self, id: &ArtifactId) -> Result<Option<AssessmentArtifact>, StoreError> {
        Ok(self.artifacts.get(id).cloned())
    }

    fn list_tenant(&self, tenant: &TenantId) -> Result<Vec<AssessmentArtifact>, StoreError> {
        Ok(self
            .artifacts
            .values()
            .filter(|artifact| artifact.blueprint.tenant_id == *tenant)
            .cloned()
            .collect())
    }
}

/// One-JSON-file-per-artifact store rooted at a directory.
///
/// File name is the artifact id in hex. Good enough for the CLI and for
/// single-writer deployments; anything heavier lives behind the same trait.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &ArtifactId) -> PathBuf {
        self.root.join(format!("{}.json", id.to_hex()))
    }

    fn read_artifact(&self, path: &Path) -> Result<AssessmentArtifact, StoreError> {
        let bytes = std::fs::read(path).map_err(|e| StoreError::io(path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Codec {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn write_artifact(&self, artifact: &AssessmentArtifact) -> Result<(), StoreError> {
        let path = self.path_for(&artifact.id);
        let json = serde_json::to_string_pretty(artifact).map_err(|e| StoreError::Codec {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, format!("{json}\n")).map_err(|e| StoreError::io(&path, e))
    }
}

impl ArtifactStore for JsonDirStore {
    fn create(&mut self, artifact: AssessmentArtifact) -> Result<(), StoreError> {
        let path = self.path_for(&artifact.id);
        if path.exists() {
            return Err(StoreError::AlreadyExists(artifact.id));
        }
        self.write_artifact(&artifact)
    }

    fn update(&mut self, artifact: AssessmentArtifact) -> Result<(), StoreError> {
        let path = self.path_for(&artifact.id);
        if !path.exists() {
            return Err(StoreError::NotFound(artifact.id));
        }
        self.write_artifact(&artifact)
    }

    fn get(&self, id: &ArtifactId) -> Result<Option<AssessmentArtifact>, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        self.read_artifact(&path).map(Some)
    }

    fn list_tenant(&self, tenant: &TenantId) -> Result<Vec<AssessmentArtifact>, StoreError> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| StoreError::io(&self.root, e))?;
        let mut artifacts = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.root, e))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let artifact = self.read_artifact(&path)?;
            if artifact.blueprint.tenant_id == *tenant {
                artifacts.push(artifact);
            }
        }
        artifacts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_model::artifact::test_support::sample_artifact;
    use exam_model::blueprint::test_support::sample_blueprint;

    #[test]
    fn in_memory_create_rejects_duplicate_ids() {
        let blueprint = sample_blueprint();
        let artifact = sample_artifact(&blueprint);
        let mut store = InMemoryStore::new();
        store.create(artifact.clone()).expect("first create");
        assert!(matches!(
            store.create(artifact),
            Err(StoreError::AlreadyExists(_))
        ));
    }

    #[test]
    fn in_memory_update_requires_existing_artifact() {
        let blueprint = sample_blueprint();
        let artifact = sample_artifact(&blueprint);
        let mut store = InMemoryStore::new();
        assert!(matches!(
            store.update(artifact),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn list_by_class_filters_on_class_id() {
        let blueprint = sample_blueprint();
        let artifact = sample_artifact(&blueprint);
        let mut store = InMemoryStore::new();
        store.create(artifact.clone()).unwrap();

        let tenant = blueprint.tenant_id.clone();
        let same_class = store
            .list_by_class(&tenant, &blueprint.class_id)
            .expect("list");
        assert_eq!(same_class.len(), 1);

        let other = store
            .list_by_class(&tenant, &exam_model::ClassId::new("9").unwrap())
            .expect("list");
        assert!(other.is_empty());
    }
}
