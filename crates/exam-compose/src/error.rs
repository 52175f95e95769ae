use std::path::PathBuf;

use exam_model::{ArtifactId, SectionCategory};
use exam_policy::PolicyError;
use exam_validate::BlueprintRejected;

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Rejected(#[from] BlueprintRejected),

    /// The generation collaborator returned fewer questions than requested.
    /// Partial sections are never accepted; nothing is persisted.
    #[error(
        "generation incomplete for {category}: requested {requested}, received {received}"
    )]
    GenerationIncomplete {
        category: SectionCategory,
        requested: u32,
        received: u32,
    },

    /// The generation collaborator failed outright.
    #[error("generation failed for {category}: {message}")]
    Generation {
        category: SectionCategory,
        message: String,
    },

    /// Final invariant check: an assembled artifact's marks no longer match
    /// the blueprint target. Indicates a bug in assembly, not bad input.
    #[error("assembled artifact totals {computed} marks, blueprint target is {target}")]
    TotalsDrift { computed: u64, target: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("artifact not found: {0}")]
    NotFound(ArtifactId),

    #[error("artifact already exists: {0}")]
    AlreadyExists(ArtifactId),

    #[error("store I/O failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode or decode artifact {path}: {source}")]
    Codec {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
