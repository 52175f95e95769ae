use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::ModelError;

macro_rules! string_id {
    ($name:ident, $error:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ModelError::$error(value));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(TenantId, InvalidTenantId);
string_id!(ClassId, InvalidClassId);
string_id!(QuestionId, InvalidQuestionId);
string_id!(OptionId, InvalidOptionId);

/// A deterministic artifact identifier.
///
/// Derived from a SHA-256 digest over the submission context and rendered as
/// lowercase hex; a fresh nonce per submission keeps regenerated artifacts
/// distinct from their predecessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactId([u8; 16]);

impl ArtifactId {
    pub fn derive(tenant: &TenantId, class: &ClassId, created_at_rfc3339: &str, nonce: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(tenant.as_str().as_bytes());
        hasher.update([0x1f]);
        hasher.update(class.as_str().as_bytes());
        hasher.update([0x1f]);
        hasher.update(created_at_rfc3339.as_bytes());
        hasher.update([0x1f]);
        hasher.update(nonce.to_be_bytes());
        let digest: [u8; 32] = hasher.finalize().into();
        let mut out = [0u8; 16];
        out.copy_from_slice(&digest[..16]);
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(value: &str) -> Result<Self, ModelError> {
        let bytes =
            hex::decode(value.trim()).map_err(|e| ModelError::InvalidArtifactId(e.to_string()))?;
        if bytes.len() != 16 {
            return Err(ModelError::InvalidArtifactId(format!(
                "expected 16 bytes, got {}",
                bytes.len()
            )));
        }
        let mut out = [0u8; 16];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl serde::Serialize for ArtifactId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for ArtifactId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ids_trim_and_reject_empty() {
        let tenant = TenantId::new("  dps-rohini  ").expect("valid tenant");
        assert_eq!(tenant.as_str(), "dps-rohini");
        assert!(TenantId::new("   ").is_err());
        assert!(ClassId::new("").is_err());
    }

    #[test]
    fn artifact_id_round_trips_hex() {
        let tenant = TenantId::new("t1").unwrap();
        let class = ClassId::new("8").unwrap();
        let id = ArtifactId::derive(&tenant, &class, "2026-01-05T09:00:00+00:00", 1);
        let parsed = ArtifactId::from_hex(&id.to_hex()).expect("parse hex");
        assert_eq!(parsed, id);
    }

    #[test]
    fn artifact_id_nonce_changes_identity() {
        let tenant = TenantId::new("t1").unwrap();
        let class = ClassId::new("8").unwrap();
        let a = ArtifactId::derive(&tenant, &class, "2026-01-05T09:00:00+00:00", 1);
        let b = ArtifactId::derive(&tenant, &class, "2026-01-05T09:00:00+00:00", 2);
        assert_ne!(a, b);
    }
}
