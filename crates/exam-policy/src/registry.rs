use std::collections::BTreeMap;

use exam_model::{ClassId, ClassPolicy, TenantId};

use crate::error::PolicyError;

/// Resolves the class policy governing a submission.
///
/// The registry is read-only reference data: callers treat a resolved policy
/// as advisory-but-binding and re-validate against it at submit time, so a
/// policy changed between fetch and submit fails closed at validation rather
/// than silently passing on stale data.
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    policies: BTreeMap<(TenantId, ClassId), ClassPolicy>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a policy, replacing any previous entry for the same
    /// (tenant, class) pair.
    pub fn insert(&mut self, tenant: TenantId, policy: ClassPolicy) {
        self.policies
            .insert((tenant, policy.class_id.clone()), policy);
    }

    /// Look up the policy for a class within a tenant.
    pub fn resolve(&self, tenant: &TenantId, class: &ClassId) -> Result<&ClassPolicy, PolicyError> {
        self.policies
            .get(&(tenant.clone(), class.clone()))
            .ok_or_else(|| PolicyError::NotFound {
                tenant: tenant.clone(),
                class: class.clone(),
            })
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// All (tenant, policy) entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&TenantId, &ClassPolicy)> {
        self.policies
            .iter()
            .map(|((tenant, _), policy)| (tenant, policy))
    }
}
