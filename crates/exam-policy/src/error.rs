use std::path::PathBuf;

use exam_model::{ClassId, TenantId};

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("no class policy for tenant {tenant}, class {class}")]
    NotFound { tenant: TenantId, class: ClassId },

    #[error("failed to read policy file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse policy CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("invalid policy row {line} in {path}: {message}")]
    InvalidRow {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("duplicate policy for tenant {tenant}, class {class} in {path}")]
    Duplicate {
        path: PathBuf,
        tenant: TenantId,
        class: ClassId,
    },
}

impl PolicyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
