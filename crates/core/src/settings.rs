//! Engine-level knobs passed in by the caller rather than compiled in.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::assignment::StaffRole;

pub const DEFAULT_CONFLICT_WINDOW_MINUTES: u32 = 180;

/// Reseller prefixes found on imported booking ids.
pub const DEFAULT_BOOKING_ID_PREFIXES: [&str; 6] = ["ENRO-", "TTG-", "PRO-", "VIA-", "HED-", "VET-"];

/// Per-resource participant categories that are never counted.
///
/// Labels are matched trimmed and case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<String>>", into = "BTreeMap<String, Vec<String>>")]
pub struct CategoryExclusions {
    by_resource: BTreeMap<String, BTreeSet<String>>,
}

impl CategoryExclusions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude(mut self, resource_id: impl Into<String>, category: &str) -> Self {
        self.insert(resource_id, category);
        self
    }

    pub fn insert(&mut self, resource_id: impl Into<String>, category: &str) {
        self.by_resource
            .entry(resource_id.into())
            .or_default()
            .insert(fold_label(category));
    }

    pub fn is_excluded(&self, resource_id: &str, category: &str) -> bool {
        self.by_resource
            .get(resource_id)
            .is_some_and(|labels| labels.contains(&fold_label(category)))
    }

    pub fn is_empty(&self) -> bool {
        self.by_resource.is_empty()
    }
}

fn fold_label(label: &str) -> String {
    label.trim().to_lowercase()
}

impl From<BTreeMap<String, Vec<String>>> for CategoryExclusions {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        let mut exclusions = CategoryExclusions::new();
        for (resource_id, labels) in map {
            for label in labels {
                exclusions.insert(resource_id.clone(), &label);
            }
        }
        exclusions
    }
}

impl From<CategoryExclusions> for BTreeMap<String, Vec<String>> {
    fn from(exclusions: CategoryExclusions) -> Self {
        exclusions
            .by_resource
            .into_iter()
            .map(|(resource_id, labels)| (resource_id, labels.into_iter().collect()))
            .collect()
    }
}

/// How assignments of one role interact with each other across slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// The same resource may not hold two slots on one day closer than
    /// `window_minutes` apart.
    Exclusive { window_minutes: u32 },
    /// No mutual exclusion; overlapping or identical slots are fine.
    Shared,
}

/// Role-keyed conflict policies. Roles without an entry are [`ConflictPolicy::Shared`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePolicies(BTreeMap<StaffRole, ConflictPolicy>);

impl RolePolicies {
    pub fn with_guide_window(window_minutes: u32) -> Self {
        let mut policies = BTreeMap::new();
        policies.insert(StaffRole::Guide, ConflictPolicy::Exclusive { window_minutes });
        policies.insert(StaffRole::Escort, ConflictPolicy::Shared);
        policies.insert(StaffRole::Headphone, ConflictPolicy::Shared);
        policies.insert(StaffRole::Printing, ConflictPolicy::Shared);
        Self(policies)
    }

    pub fn set(&mut self, role: StaffRole, policy: ConflictPolicy) {
        self.0.insert(role, policy);
    }

    pub fn policy(&self, role: StaffRole) -> ConflictPolicy {
        self.0.get(&role).copied().unwrap_or(ConflictPolicy::Shared)
    }
}

impl Default for RolePolicies {
    fn default() -> Self {
        Self::with_guide_window(DEFAULT_CONFLICT_WINDOW_MINUTES)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub category_exclusions: CategoryExclusions,
    pub role_policies: RolePolicies,
    pub booking_id_prefixes: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            category_exclusions: CategoryExclusions::default(),
            role_policies: RolePolicies::default(),
            booking_id_prefixes: DEFAULT_BOOKING_ID_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
        }
    }
}
